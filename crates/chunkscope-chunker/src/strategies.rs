use chunkscope_common::types::{ChunkParams, Strategy};

use crate::fixed::FixedChunker;
use crate::paragraph::ParagraphChunker;
use crate::sentence::SentenceChunker;
use crate::sliding::SlidingWindowChunker;
use crate::ChunkingStrategy;

/// Build the chunker named by `params.strategy`.
pub fn select_strategy(params: ChunkParams) -> Box<dyn ChunkingStrategy> {
    let ChunkParams {
        strategy,
        chunk_size,
        overlap,
    } = params;

    match strategy {
        Strategy::Fixed => Box::new(FixedChunker::new(chunk_size, overlap)),
        Strategy::Sentence => Box::new(SentenceChunker::new(chunk_size, overlap)),
        Strategy::Paragraph => Box::new(ParagraphChunker::new(chunk_size, overlap)),
        Strategy::Sliding => Box::new(SlidingWindowChunker::new(chunk_size, overlap)),
    }
}
