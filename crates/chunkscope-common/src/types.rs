use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest chunk size the front-end offers.
pub const MIN_CHUNK_SIZE: usize = 100;
/// Largest chunk size the front-end offers.
pub const MAX_CHUNK_SIZE: usize = 2000;
/// Overlap must leave at least this many fresh characters per chunk.
pub const MIN_STRIDE: usize = 50;

pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_OVERLAP: usize = 50;

/// Number of characters (Unicode scalar values) in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// True when there is nothing worth chunking.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Fixed,
    Sentence,
    Paragraph,
    Sliding,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Fixed,
        Strategy::Sentence,
        Strategy::Paragraph,
        Strategy::Sliding,
    ];

    /// The name used on the wire and echoed back in [`ChunkMetadata::strategy`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Sentence => "sentence",
            Strategy::Paragraph => "paragraph",
            Strategy::Sliding => "sliding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Fixed => "Fixed Size",
            Strategy::Sentence => "Sentence-based",
            Strategy::Paragraph => "Paragraph-based",
            Strategy::Sliding => "Sliding Window",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Fixed => "Splits text into chunks of fixed size with specified overlap",
            Strategy::Sentence => {
                "Splits text by sentences while maintaining chunk size constraints"
            }
            Strategy::Paragraph => {
                "Splits by paragraphs, combining small ones and splitting large ones"
            }
            Strategy::Sliding => "Uses a sliding window approach with fixed overlap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Strategy::Fixed),
            "sentence" => Ok(Strategy::Sentence),
            "paragraph" => Ok(Strategy::Paragraph),
            "sliding" => Ok(Strategy::Sliding),
            other => Err(ParamError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Problems with a chunking request. The `Display` text is what users see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("No text provided")]
    EmptyText,
    #[error("Invalid chunking strategy")]
    UnknownStrategy(String),
    #[error("chunk_size {value} is outside {min}..={max}", min = MIN_CHUNK_SIZE, max = MAX_CHUNK_SIZE)]
    ChunkSizeOutOfRange { value: usize },
    #[error("overlap {value} exceeds the maximum of {max} for this chunk_size")]
    OverlapOutOfRange { value: usize, max: usize },
}

/// The user-adjustable knobs of a chunking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkParams {
    pub strategy: Strategy,
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            strategy: Strategy::Fixed,
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkParams {
    /// Largest overlap the front-end offers for the current chunk size.
    pub fn max_overlap(&self) -> usize {
        self.chunk_size.saturating_sub(MIN_STRIDE)
    }

    /// Every advisory bound the parameters break. Empty means in range.
    ///
    /// These bounds are only what the front-end offers; the service decides
    /// what it actually accepts.
    pub fn bound_violations(&self) -> Vec<ParamError> {
        let mut violations = Vec::new();
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            violations.push(ParamError::ChunkSizeOutOfRange {
                value: self.chunk_size,
            });
        }
        if self.overlap > self.max_overlap() {
            violations.push(ParamError::OverlapOutOfRange {
                value: self.overlap,
                max: self.max_overlap(),
            });
        }
        violations
    }
}

/// Body of `POST /chunk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRequest {
    pub text: String,
    pub strategy: Strategy,
    pub chunk_size: usize,
    pub overlap: usize,
}

impl ChunkRequest {
    pub fn new(text: impl Into<String>, params: ChunkParams) -> Self {
        Self {
            text: text.into(),
            strategy: params.strategy,
            chunk_size: params.chunk_size,
            overlap: params.overlap,
        }
    }

    pub fn params(&self) -> ChunkParams {
        ChunkParams {
            strategy: self.strategy,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
        }
    }
}

/// Aggregate figures describing a chunk list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub total_chunks: usize,
    pub average_chunk_size: f64,
    pub strategy: String,
}

impl ChunkMetadata {
    pub fn summarize(chunks: &[String], strategy: Strategy) -> Self {
        Self {
            total_chunks: chunks.len(),
            average_chunk_size: average_chars(chunks),
            strategy: strategy.to_string(),
        }
    }
}

fn average_chars(chunks: &[String]) -> f64 {
    if chunks.is_empty() {
        return 0.0;
    }
    let total_chars: usize = chunks.iter().map(|c| char_len(c)).sum();
    total_chars as f64 / chunks.len() as f64
}

/// Successful body of `POST /chunk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkResult {
    pub chunks: Vec<String>,
    pub metadata: ChunkMetadata,
}

impl ChunkResult {
    pub fn new(chunks: Vec<String>, strategy: Strategy) -> Self {
        let metadata = ChunkMetadata::summarize(&chunks, strategy);
        Self { chunks, metadata }
    }

    /// Whether `metadata` actually describes `chunks`.
    pub fn is_consistent(&self) -> bool {
        self.metadata.total_chunks == self.chunks.len()
            && (self.metadata.average_chunk_size - average_chars(&self.chunks)).abs() < 1e-6
    }
}

/// Successful body of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_wire_names_round_trip() {
        for strategy in Strategy::ALL {
            let parsed: Strategy = strategy.as_str().parse().unwrap();
            assert_eq!(parsed, strategy);
            assert_eq!(
                serde_json::to_value(strategy).unwrap(),
                serde_json::json!(strategy.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_strategy_message() {
        let err = "semantic".parse::<Strategy>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid chunking strategy");
    }

    #[test]
    fn test_default_params_within_bounds() {
        let params = ChunkParams::default();
        assert_eq!(params.chunk_size, 500);
        assert_eq!(params.overlap, 50);
        assert_eq!(params.max_overlap(), 450);
        assert!(params.bound_violations().is_empty());
    }

    #[test]
    fn test_bound_violations_reported() {
        let params = ChunkParams {
            strategy: Strategy::Sliding,
            chunk_size: 80,
            overlap: 60,
        };
        let violations = params.bound_violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0], ParamError::ChunkSizeOutOfRange { value: 80 });
        assert_eq!(
            violations[1],
            ParamError::OverlapOutOfRange { value: 60, max: 30 }
        );
    }

    #[test]
    fn test_summarize_counts_characters_not_bytes() {
        let chunks = vec!["héllo".to_string(), "wörld!".to_string()];
        let meta = ChunkMetadata::summarize(&chunks, Strategy::Sentence);
        assert_eq!(meta.total_chunks, 2);
        assert!((meta.average_chunk_size - 5.5).abs() < 1e-9);
        assert_eq!(meta.strategy, "sentence");
    }

    #[test]
    fn test_summarize_empty_list() {
        let meta = ChunkMetadata::summarize(&[], Strategy::Fixed);
        assert_eq!(meta.total_chunks, 0);
        assert_eq!(meta.average_chunk_size, 0.0);
    }

    #[test]
    fn test_result_consistency_check() {
        let mut result = ChunkResult::new(vec!["abc".into(), "de".into()], Strategy::Fixed);
        assert!(result.is_consistent());
        result.metadata.total_chunks = 3;
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_request_wire_shape() {
        let req = ChunkRequest::new("some text", ChunkParams::default());
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "some text",
                "strategy": "fixed",
                "chunk_size": 500,
                "overlap": 50,
            })
        );
        assert_eq!(req.params(), ChunkParams::default());
    }
}
