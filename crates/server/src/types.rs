use lecturelens_llm::ProviderChoice;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Summary";

/// Summarize response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Row to insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTranscript {
    pub title: String,
    pub transcript: String,
    pub summary: String,
}

impl NewTranscript {
    /// Missing or empty title falls back to `DEFAULT_TITLE`
    pub fn new(transcript: String, summary: String, title: Option<String>) -> Self {
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Self {
            title,
            transcript,
            summary,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub provider: ProviderChoice,
    pub history_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_title() {
        let row = NewTranscript::new("t".into(), "s".into(), None);
        assert_eq!(row.title, DEFAULT_TITLE);

        let row = NewTranscript::new("t".into(), "s".into(), Some(String::new()));
        assert_eq!(row.title, DEFAULT_TITLE);

        let row = NewTranscript::new("t".into(), "s".into(), Some("  ".into()));
        assert_eq!(row.title, "  ");

        let row = NewTranscript::new("t".into(), "s".into(), Some("Week 3".into()));
        assert_eq!(row.title, "Week 3");
    }

    #[test]
    fn test_insert_shape() {
        let row = NewTranscript::new("t".into(), "s".into(), None);
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({ "title": DEFAULT_TITLE, "transcript": "t", "summary": "s" })
        );
    }
}
