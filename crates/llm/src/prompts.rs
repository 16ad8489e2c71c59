//! Prompt templates for lecture summarization

/// Instructions for the single-call primary path
pub const NOTES_PROMPT: &str = r#"You are an expert academic assistant. Analyze the following lecture transcript and turn it into well-structured study notes.

Include these sections, using markdown headings and bullet points:
1. **Main Topic/Subject**
2. **Key Concepts** (bullet points)
3. **Important Definitions** (if any)
4. **Examples or Case Studies** (if mentioned)
5. **Conclusion/Takeaways**

Highlight key terms in bold and keep the structure easy to review."#;

/// Prompt for the primary provider over the (truncated) transcript
pub fn direct_prompt(transcript: &str) -> String {
    format!("{}\n\nTranscript:\n{}", NOTES_PROMPT, transcript)
}

/// Input for one chunk on the secondary provider
///
/// Summarization models take the raw passage; no instruction wrapper.
pub fn chunk_prompt(chunk: &str) -> String {
    chunk.to_string()
}

/// Prompt asking the secondary provider to merge partial summaries
pub fn refine_prompt(merged: &str) -> String {
    format!(
        "Combine and refine the following lecture notes into a single structured summary with headings and bullet points:\n\n{}",
        merged
    )
}
