use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const PLACEHOLDER_MARKER: &str = "your_supabase";

/// LectureLens application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Primary provider (Gemini) API key
    pub google_api_key: Option<String>,

    /// Gemini model name
    pub gemini_model: String,

    /// Gemini API base URL
    pub gemini_base_url: String,

    /// Secondary provider (Hugging Face inference) API key
    pub huggingface_api_key: Option<String>,

    /// Hugging Face model id
    pub huggingface_model: String,

    /// Hugging Face inference base URL
    pub huggingface_base_url: String,

    /// Supabase project URL for history
    pub supabase_url: Option<String>,

    /// Supabase anon key
    pub supabase_anon_key: Option<String>,

    /// Optional timeout for outbound provider/store calls, in seconds
    ///
    /// Unset by default: calls wait on the provider and the hosting
    /// platform's own request timeout applies.
    pub provider_timeout_secs: Option<u64>,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

/// Credentials that drive provider selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            huggingface_api_key: None,
            huggingface_model: "facebook/bart-large-cnn".to_string(),
            huggingface_base_url: "https://api-inference.huggingface.co/models".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            provider_timeout_secs: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            google_api_key: get("GOOGLE_AI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            huggingface_model: get("HUGGINGFACE_MODEL").unwrap_or(defaults.huggingface_model),
            huggingface_base_url: get("HUGGINGFACE_BASE_URL")
                .unwrap_or(defaults.huggingface_base_url),
            supabase_url: get("SUPABASE_URL").or_else(|| get("NEXT_PUBLIC_SUPABASE_URL")),
            supabase_anon_key: get("SUPABASE_ANON_KEY")
                .or_else(|| get("NEXT_PUBLIC_SUPABASE_ANON_KEY")),
            provider_timeout_secs: get("PROVIDER_TIMEOUT_SECS").and_then(|s| s.parse().ok()),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: get("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Provider credentials currently configured
    pub fn provider_credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            primary: self.google_api_key.clone(),
            secondary: self.huggingface_api_key.clone(),
        }
    }

    /// Whether the history store URL and key look usable
    pub fn history_configured(&self) -> bool {
        let url_ok = self.supabase_url.as_deref().is_some_and(|url| {
            (url.starts_with("http://") || url.starts_with("https://"))
                && !url.contains(PLACEHOLDER_MARKER)
        });
        let key_ok = self
            .supabase_anon_key
            .as_deref()
            .is_some_and(|key| !key.contains(PLACEHOLDER_MARKER) && key.len() > 20);

        url_ok && key_ok
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, url) in [
            ("Gemini base URL", &self.gemini_base_url),
            ("Hugging Face base URL", &self.huggingface_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.gemini_model.is_empty() || self.huggingface_model.is_empty() {
            return Err(AppError::config("Model name cannot be empty"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(AppError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
