pub mod fixed;
pub mod paragraph;
pub mod sentence;
pub mod sliding;
pub mod strategies;
mod text;

use chunkscope_common::types::{is_blank, ChunkRequest, ChunkResult};

/// Splits text into an ordered list of chunks.
pub trait ChunkingStrategy: Send + Sync {
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Reasons the service refuses to chunk. The `Display` text is sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    #[error("No text provided")]
    EmptyText,
    #[error("chunk_size must be positive")]
    ZeroChunkSize,
    #[error("overlap must be smaller than chunk_size")]
    OverlapTooLarge,
}

/// Validate a request and run the strategy it names.
pub fn chunk_text(request: &ChunkRequest) -> Result<ChunkResult, ChunkError> {
    if is_blank(&request.text) {
        return Err(ChunkError::EmptyText);
    }
    if request.chunk_size == 0 {
        return Err(ChunkError::ZeroChunkSize);
    }
    if request.overlap >= request.chunk_size {
        return Err(ChunkError::OverlapTooLarge);
    }

    let chunker = strategies::select_strategy(request.params());
    let chunks = chunker.chunk(&request.text);
    tracing::debug!(
        strategy = %request.strategy,
        chunk_size = request.chunk_size,
        overlap = request.overlap,
        chunk_count = chunks.len(),
        "Text chunked"
    );

    Ok(ChunkResult::new(chunks, request.strategy))
}
