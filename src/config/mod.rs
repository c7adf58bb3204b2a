use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "VLT_API_URL";

/// Base URL used when neither config file nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Initial state of the "use local LLM" toggle. Toggling in the UI is
    /// never written back; this is only the startup default.
    #[serde(default)]
    pub local_llm: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            local_llm: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("vernac");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default. The `VLT_API_URL`
    /// environment variable wins over whatever the file says.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    fn load_file() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return AppConfig::default(),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        config
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost:8001");
        assert!(!config.local_llm);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            base_url: "http://backend.example:9000".to_string(),
            local_llm: true,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.base_url, deserialized.base_url);
        assert_eq!(config.local_llm, deserialized.local_llm);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let deserialized: AppConfig = toml::from_str("").unwrap();
        assert_eq!(deserialized.base_url, DEFAULT_BASE_URL);
        assert!(!deserialized.local_llm);
    }
}
