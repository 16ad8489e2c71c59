use lecturelens_common::{AppConfig, AppError, Result};
use lecturelens_llm::Summarizer;
use std::sync::Arc;
use std::time::Duration;

use crate::history::{HistoryStore, SupabaseHistoryStore};

/// Shared application state
pub struct AppState {
    /// Summarization entry point
    pub summarizer: Summarizer,

    /// History store, when configured
    pub history: Option<Arc<dyn HistoryStore>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &AppConfig) -> Result<Self> {
        let summarizer = Summarizer::from_config(config)?;

        let history = match (&config.supabase_url, &config.supabase_anon_key) {
            (Some(url), Some(key)) if config.history_configured() => {
                let store = SupabaseHistoryStore::new(
                    url,
                    key,
                    config.provider_timeout_secs.map(Duration::from_secs),
                )?;
                Some(Arc::new(store) as Arc<dyn HistoryStore>)
            }
            _ => None,
        };

        Ok(Self::with_parts(summarizer, history))
    }

    pub fn with_parts(summarizer: Summarizer, history: Option<Arc<dyn HistoryStore>>) -> Self {
        Self {
            summarizer,
            history,
        }
    }

    /// History store or `StorageUnavailable`
    pub fn history_store(&self) -> Result<Arc<dyn HistoryStore>> {
        self.history.clone().ok_or_else(|| {
            AppError::storage_unavailable(
                "History store not configured. Please set SUPABASE_URL and SUPABASE_ANON_KEY environment variables.",
            )
        })
    }
}
