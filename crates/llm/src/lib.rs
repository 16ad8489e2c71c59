//! LectureLens LLM Integration
//!
//! Gemini and Hugging Face clients and transcript summarization

mod chunking;
mod client;
mod http;
mod huggingface;
mod llm_trait;
mod prompts;
mod retry;
mod summarize;
mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use chunking::{chunk_transcript, truncate_chars, ChunkPlan, CHUNK_MAX_CHARS, MAX_CHUNKS};
pub use client::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use llm_trait::TextGenerator;
pub use prompts::{chunk_prompt, direct_prompt, refine_prompt, NOTES_PROMPT};
pub use retry::RetryPolicy;
pub use summarize::{
    ChunkedFallbackProvider, DirectProvider, ProviderChoice, SummarizationProvider, Summarizer,
    DIRECT_MAX_CHARS, MERGE_MAX_CHARS,
};
pub use types::{GenerateContentRequest, GenerateContentResponse, InferenceRequest, InferenceResponse};
