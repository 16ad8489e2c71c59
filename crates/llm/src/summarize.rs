use async_trait::async_trait;
use lecturelens_common::{AppConfig, AppError, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::chunking::{chunk_transcript, truncate_chars, CHUNK_MAX_CHARS, MAX_CHUNKS};
use crate::client::GeminiClient;
use crate::huggingface::HuggingFaceClient;
use crate::llm_trait::TextGenerator;
use crate::prompts::{chunk_prompt, direct_prompt, refine_prompt};
use crate::retry::{exhausted, RetryPolicy};

/// Transcript characters forwarded to the primary provider
pub const DIRECT_MAX_CHARS: usize = 8000;

/// Merged-notes characters forwarded to the refine call
pub const MERGE_MAX_CHARS: usize = 5000;

/// Which provider path a request takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderChoice {
    Primary,
    Fallback,
    NoneConfigured,
}

impl ProviderChoice {
    /// First match wins: primary, then fallback
    pub fn select(primary_configured: bool, secondary_configured: bool) -> Self {
        if primary_configured {
            Self::Primary
        } else if secondary_configured {
            Self::Fallback
        } else {
            Self::NoneConfigured
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::NoneConfigured => "none_configured",
        }
    }
}

/// A strategy that turns a transcript into structured notes
#[async_trait]
pub trait SummarizationProvider: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String>;

    fn strategy(&self) -> &'static str;
}

/// One call to the primary provider over the truncated transcript
pub struct DirectProvider {
    generator: Arc<dyn TextGenerator>,
    max_chars: usize,
}

impl DirectProvider {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            max_chars: DIRECT_MAX_CHARS,
        }
    }
}

#[async_trait]
impl SummarizationProvider for DirectProvider {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let text = truncate_chars(transcript, self.max_chars);
        debug!(
            "Direct summarization via {} - {} chars",
            self.generator.name(),
            text.chars().count()
        );
        self.generator.generate(&direct_prompt(text)).await
    }

    fn strategy(&self) -> &'static str {
        "direct"
    }
}

/// Map-reduce over fixed-size chunks on the secondary provider
///
/// Chunks run strictly in order; each gets `retry`, the refine call gets
/// a single attempt.
pub struct ChunkedFallbackProvider {
    generator: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
    chunk_chars: usize,
    max_chunks: usize,
    merge_chars: usize,
}

impl ChunkedFallbackProvider {
    pub fn new(generator: Arc<dyn TextGenerator>, retry: RetryPolicy) -> Self {
        Self {
            generator,
            retry,
            chunk_chars: CHUNK_MAX_CHARS,
            max_chunks: MAX_CHUNKS,
            merge_chars: MERGE_MAX_CHARS,
        }
    }

    async fn summarize_chunk(&self, index: usize, total: usize, chunk: &str) -> Result<String> {
        let label = format!("Chunk {}/{} summarization", index + 1, total);
        let prompt = chunk_prompt(chunk);
        let generator = &self.generator;
        let prompt = prompt.as_str();

        self.retry
            .run(&label, move || generator.generate(prompt))
            .await
            .map_err(|e| exhausted(&label, self.retry.max_attempts, e))
    }
}

#[async_trait]
impl SummarizationProvider for ChunkedFallbackProvider {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let plan = chunk_transcript(transcript.trim(), self.chunk_chars, self.max_chunks);
        if plan.dropped_chars > 0 {
            warn!(
                "Transcript exceeds {} chunks; dropping {} trailing characters",
                self.max_chunks, plan.dropped_chars
            );
        }

        let total = plan.chunks.len();
        info!("Split transcript into {} chunks", total);

        let mut partials = Vec::with_capacity(total);
        for (i, chunk) in plan.chunks.iter().enumerate() {
            debug!("Summarizing chunk {}/{}", i + 1, total);
            partials.push(self.summarize_chunk(i, total, chunk).await?);
        }

        let merged = partials.join("\n");
        info!("Merged chunk summaries - Length: {} chars", merged.chars().count());

        let merged = truncate_chars(&merged, self.merge_chars);
        self.generator.generate(&refine_prompt(merged)).await
    }

    fn strategy(&self) -> &'static str {
        "chunked_fallback"
    }
}

/// Entry point for summarization: picks a provider per call
#[derive(Clone)]
pub struct Summarizer {
    primary: Option<Arc<dyn TextGenerator>>,
    secondary: Option<Arc<dyn TextGenerator>>,
    retry: RetryPolicy,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(
        primary: Option<Arc<dyn TextGenerator>>,
        secondary: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            primary,
            secondary,
            retry: RetryPolicy::chunk(),
        }
    }

    /// Build provider clients for whichever credentials are configured
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.provider_timeout_secs.map(Duration::from_secs);
        let credentials = config.provider_credentials();

        let primary = match credentials.primary {
            Some(key) => Some(Arc::new(GeminiClient::new(
                &config.gemini_base_url,
                &config.gemini_model,
                key,
                timeout,
            )?) as Arc<dyn TextGenerator>),
            None => None,
        };

        let secondary = match credentials.secondary {
            Some(key) => Some(Arc::new(HuggingFaceClient::new(
                &config.huggingface_base_url,
                &config.huggingface_model,
                key,
                timeout,
            )?) as Arc<dyn TextGenerator>),
            None => None,
        };

        Ok(Self::new(primary, secondary))
    }

    /// Override the per-chunk retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn choice(&self) -> ProviderChoice {
        ProviderChoice::select(self.primary.is_some(), self.secondary.is_some())
    }

    /// Provider for the current configuration
    pub fn provider(&self) -> Result<Box<dyn SummarizationProvider>> {
        match (self.choice(), &self.primary, &self.secondary) {
            (ProviderChoice::Primary, Some(generator), _) => {
                Ok(Box::new(DirectProvider::new(generator.clone())))
            }
            (ProviderChoice::Fallback, _, Some(generator)) => Ok(Box::new(
                ChunkedFallbackProvider::new(generator.clone(), self.retry),
            )),
            _ => Err(AppError::provider_unavailable(
                "No summarization provider configured",
            )),
        }
    }

    /// Summarize a transcript into structured notes
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(AppError::invalid_input("Transcript is required"));
        }

        let provider = self.provider()?;
        info!(
            "Starting summarization - Strategy: {}, Text length: {} chars",
            provider.strategy(),
            transcript.chars().count()
        );

        let summary = provider.summarize(transcript).await?;
        info!("Summarization complete - Length: {} chars", summary.chars().count());
        Ok(summary)
    }
}
