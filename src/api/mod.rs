use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed generate endpoint path on the VLT backend.
pub const GENERATE_PATH: &str = "/VLT/content/v1/generate";

/// Shown when the request never got a response (backend down, DNS, refused).
pub const BACKEND_UNREACHABLE_MSG: &str =
    "Failed to generate content. Please make sure the backend is running.";

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub question: String,
    pub local_llm: bool,
}

/// Payload returned by the backend on success. Taken verbatim; nothing beyond
/// field presence is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub status: String,
    pub message: String,
    pub data: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status. No error body schema is
    /// parsed; only the numeric status is reported.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request could not be sent or no response was received.
    #[error("Failed to generate content. Please make sure the backend is running.")]
    Transport(#[source] reqwest::Error),

    /// The backend answered 2xx but the body was not valid JSON.
    #[error("Backend returned an invalid response: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Client for the VLT generate endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the question to `{base_url}/VLT/content/v1/generate`.
    ///
    /// The caller is expected to pass an already-trimmed, non-empty question;
    /// validation lives with the form state, not here.
    pub async fn generate(
        &self,
        question: &str,
        local_llm: bool,
    ) -> Result<GenerateResponse, ApiError> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let payload = GenerateRequest {
            question: question.to_string(),
            local_llm,
        };

        tracing::debug!(%url, local_llm, "sending generate request");

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "backend rejected request");
            return Err(ApiError::Status(status.as_u16()));
        }

        response.json::<GenerateResponse>().await.map_err(ApiError::Parse)
    }
}
