use async_trait::async_trait;
use lecturelens_common::Result;

/// A single text-generation endpoint: prompt in, text out
///
/// Implementations make exactly one outbound call per `generate` and never
/// retry on their own; retry is the caller's policy.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logs and error messages
    fn name(&self) -> &str;
}
