use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::oneshot;

use crate::api::{ApiClient, ApiError, GenerateResponse, BACKEND_UNREACHABLE_MSG};
use crate::config::AppConfig;

/// Validation message for an empty or whitespace-only question.
pub const EMPTY_QUESTION_MSG: &str = "Please enter a question";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Question,
    LocalLlm,
}

/// The form view state. Four pieces of local state (question, toggle,
/// response, error) plus the handle of the single in-flight request.
pub struct App {
    pub section: Section,

    /// User-edited question text. Trimmed only at submit time.
    pub question: String,

    /// "Use local LLM" toggle, forwarded verbatim in the request payload.
    pub use_local_llm: bool,

    /// Last successful backend response, if any.
    pub response: Option<GenerateResponse>,

    /// Last validation or request failure, rendered in the alert area.
    pub error: Option<String>,

    /// Spinner animation frame, advanced on tick while loading.
    pub spinner_frame: usize,

    client: ApiClient,

    // At most one request is ever in flight; its result arrives here and is
    // drained from tick() so the draw loop never blocks on the network.
    inflight: Option<oneshot::Receiver<Result<GenerateResponse, ApiError>>>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            section: Section::Question,
            question: String::new(),
            use_local_llm: config.local_llm,
            response: None,
            error: None,
            spinner_frame: 0,
            client: ApiClient::new(&config.base_url),
            inflight: None,
        }
    }

    /// True exactly while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.inflight.is_some()
    }

    /// The submit action is enabled only when idle with a non-blank question.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.question.trim().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Question => Section::LocalLlm,
                    Section::LocalLlm => Section::Question,
                };
            }

            // Esc = clear, matching the disabled Clear button while loading
            KeyCode::Esc => {
                if !self.is_loading() {
                    self.clear();
                }
            }

            KeyCode::Enter => match self.section {
                Section::Question => self.submit(),
                Section::LocalLlm => self.toggle_local_llm(),
            },

            KeyCode::Char(' ') if self.section == Section::LocalLlm => {
                self.toggle_local_llm();
            }

            KeyCode::Char(c) if self.section == Section::Question => {
                if !self.is_loading() {
                    self.question.push(c);
                }
            }

            KeyCode::Backspace if self.section == Section::Question => {
                if !self.is_loading() {
                    self.question.pop();
                }
            }

            _ => {}
        }
    }

    /// Validate the question and fire the request.
    ///
    /// An empty trimmed question sets the validation error without touching
    /// the network. While a request is already in flight this is a no-op.
    pub fn submit(&mut self) {
        if self.is_loading() {
            return;
        }

        let question = self.question.trim().to_string();
        if question.is_empty() {
            self.error = Some(EMPTY_QUESTION_MSG.to_string());
            return;
        }

        self.error = None;
        self.response = None;

        let client = self.client.clone();
        let local_llm = self.use_local_llm;
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = client.generate(&question, local_llm).await;
            // Receiver may be gone if the app quit mid-request; nothing to do.
            let _ = tx.send(result);
        });

        self.inflight = Some(rx);
    }

    /// Reset question, response, and error. The toggle and any in-flight
    /// request are left alone.
    pub fn clear(&mut self) {
        self.question.clear();
        self.response = None;
        self.error = None;
    }

    /// Flip the local-LLM toggle. Disabled while loading.
    pub fn toggle_local_llm(&mut self) {
        if self.is_loading() {
            return;
        }
        self.use_local_llm = !self.use_local_llm;
    }

    /// Drain the in-flight request if it has resolved. Called once per event
    /// loop iteration.
    pub fn tick(&mut self) {
        let Some(rx) = self.inflight.as_mut() else {
            return;
        };

        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        match rx.try_recv() {
            Ok(Ok(response)) => {
                tracing::debug!(status = %response.status, "generate request succeeded");
                self.response = Some(response);
                self.inflight = None;
            }
            Ok(Err(e)) => {
                tracing::warn!("generate request failed: {}", e);
                self.error = Some(e.to_string());
                self.inflight = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                // Task panicked or was aborted before sending.
                self.error = Some(BACKEND_UNREACHABLE_MSG.to_string());
                self.inflight = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(base_url: &str) -> App {
        let config = AppConfig {
            base_url: base_url.to_string(),
            local_llm: false,
        };
        App::new(&config)
    }

    /// Tick until the in-flight request resolves, bounded so a hung test
    /// fails instead of spinning forever.
    async fn settle(app: &mut App) {
        for _ in 0..200 {
            app.tick();
            if !app.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("request never resolved");
    }

    #[tokio::test]
    async fn empty_question_sets_validation_error_without_network_call() {
        let mut app = test_app("http://127.0.0.1:1");

        app.submit();

        assert_eq!(app.error.as_deref(), Some(EMPTY_QUESTION_MSG));
        assert!(!app.is_loading());
        assert!(app.response.is_none());
    }

    #[tokio::test]
    async fn whitespace_question_is_treated_as_empty() {
        let mut app = test_app("http://127.0.0.1:1");
        app.question = "   \t ".to_string();

        app.submit();

        assert_eq!(app.error.as_deref(), Some(EMPTY_QUESTION_MSG));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn successful_submit_stores_response_and_clears_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(crate::api::GENERATE_PATH))
            .and(body_json(json!({
                "question": "What is AI?",
                "local_llm": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "Done",
                "data": "Hello"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = test_app(&server.uri());
        app.question = "What is AI?".to_string();
        app.error = Some("stale error".to_string());

        app.submit();
        assert!(app.is_loading());
        assert!(app.error.is_none());

        settle(&mut app).await;

        let response = app.response.as_ref().expect("response set");
        assert_eq!(response.status, "success");
        assert_eq!(response.message, "Done");
        assert_eq!(response.data, "Hello");
        assert!(app.error.is_none());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn question_is_trimmed_before_submission() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(crate::api::GENERATE_PATH))
            .and(body_json(json!({
                "question": "What is AI?",
                "local_llm": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "message": "ok",
                "data": "hi"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = test_app(&server.uri());
        app.question = "  What is AI?  ".to_string();

        app.submit();
        settle(&mut app).await;

        assert!(app.response.is_some());
    }

    #[tokio::test]
    async fn http_500_surfaces_status_error_and_no_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(crate::api::GENERATE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut app = test_app(&server.uri());
        app.question = "What is AI?".to_string();

        app.submit();
        settle(&mut app).await;

        assert!(app.response.is_none());
        let error = app.error.as_deref().expect("error set");
        assert!(error.contains("HTTP error! status: 500"), "got: {error}");
    }

    #[tokio::test]
    async fn unreachable_backend_surfaces_generic_message() {
        let mut app = test_app("http://127.0.0.1:1");
        app.question = "What is AI?".to_string();

        app.submit();
        settle(&mut app).await;

        assert_eq!(app.error.as_deref(), Some(BACKEND_UNREACHABLE_MSG));
        assert!(app.response.is_none());
    }

    #[tokio::test]
    async fn submit_while_loading_is_a_no_op() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(crate::api::GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "status": "success",
                        "message": "ok",
                        "data": "hi"
                    }))
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut app = test_app(&server.uri());
        app.question = "What is AI?".to_string();

        app.submit();
        assert!(app.is_loading());

        // Second submit and toggle must both bounce off the in-flight guard.
        app.submit();
        app.toggle_local_llm();
        assert!(!app.use_local_llm);

        settle(&mut app).await;
        assert!(app.response.is_some());
    }

    #[tokio::test]
    async fn edits_are_ignored_while_loading() {
        let mut app = test_app("http://127.0.0.1:1");
        app.question = "keep me".to_string();

        // Park a dummy in-flight handle to simulate loading.
        let (_tx, rx) = oneshot::channel();
        app.inflight = Some(rx);

        app.handle_key(KeyEvent::from(KeyCode::Char('x')));
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        app.handle_key(KeyEvent::from(KeyCode::Esc));

        assert_eq!(app.question, "keep me");
        drop(_tx);
    }

    #[tokio::test]
    async fn clear_resets_form_but_keeps_toggle() {
        let mut app = test_app("http://127.0.0.1:1");
        app.question = "something".to_string();
        app.use_local_llm = true;
        app.error = Some("boom".to_string());
        app.response = Some(GenerateResponse {
            status: "success".to_string(),
            message: "Done".to_string(),
            data: "Hello".to_string(),
        });

        app.clear();

        assert!(app.question.is_empty());
        assert!(app.response.is_none());
        assert!(app.error.is_none());
        assert!(app.use_local_llm);
    }

    #[tokio::test]
    async fn can_submit_tracks_loading_and_blank_question() {
        let mut app = test_app("http://127.0.0.1:1");
        assert!(!app.can_submit());

        app.question = "  ".to_string();
        assert!(!app.can_submit());

        app.question = "hello".to_string();
        assert!(app.can_submit());

        let (_tx, rx) = oneshot::channel();
        app.inflight = Some(rx);
        assert!(!app.can_submit());
        drop(_tx);
    }

    #[tokio::test]
    async fn toggle_flips_via_keys_when_focused() {
        let mut app = test_app("http://127.0.0.1:1");
        app.section = Section::LocalLlm;

        app.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert!(app.use_local_llm);

        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(!app.use_local_llm);
    }
}
