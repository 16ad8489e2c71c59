use serde::{Deserialize, Serialize};

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Gemini generateContent response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidates blocked by safety filters come back without `content`
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Hugging Face inference request
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub options: InferenceOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until the model is loaded instead of failing with 503
    pub wait_for_model: bool,
}

/// One output item of a Hugging Face summarization/text-generation model
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceOutput {
    #[serde(default)]
    pub summary_text: Option<String>,

    #[serde(default)]
    pub generated_text: Option<String>,
}

/// Hugging Face returns either a list of outputs or a single object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    List(Vec<InferenceOutput>),
    Single(InferenceOutput),
}

impl InferenceResponse {
    /// Extracted summary text of the first output, if non-blank
    pub fn text(&self) -> Option<String> {
        let output = match self {
            Self::List(items) => items.first()?,
            Self::Single(item) => item,
        };
        output
            .summary_text
            .as_ref()
            .or(output.generated_text.as_ref())
            .filter(|t| !t.trim().is_empty())
            .cloned()
    }
}
