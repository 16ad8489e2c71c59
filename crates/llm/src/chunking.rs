/// Maximum characters per chunk sent to the secondary provider
pub const CHUNK_MAX_CHARS: usize = 3000;

/// Maximum number of chunks summarized per request
pub const MAX_CHUNKS: usize = 20;

/// Result of splitting a transcript into fixed-size chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Chunks in original order, each at most `max_chars` characters
    pub chunks: Vec<String>,

    /// Characters past the chunk cap that were not included
    pub dropped_chars: usize,
}

/// Split text into contiguous chunks of at most `max_chars` characters
///
/// Counts Unicode scalar values, so a chunk never ends mid-character. Only
/// the first `max_chunks` chunks are kept; the rest is reported in
/// `dropped_chars`.
pub fn chunk_transcript(text: &str, max_chars: usize, max_chunks: usize) -> ChunkPlan {
    assert!(max_chars > 0, "max_chars must be positive");

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() && chunks.len() < max_chunks {
        let split_at = byte_offset(rest, max_chars);
        let (head, tail) = rest.split_at(split_at);
        chunks.push(head.to_string());
        rest = tail;
    }

    ChunkPlan {
        chunks,
        dropped_chars: rest.chars().count(),
    }
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    &text[..byte_offset(text, max_chars)]
}

/// Byte offset just past the `n`th character, or the end of the string
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map(|(i, _)| i).unwrap_or(text.len())
}
