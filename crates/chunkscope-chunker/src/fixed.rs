use crate::text::CharIndex;
use crate::ChunkingStrategy;

/// Contiguous windows of `chunk_size` characters; consecutive windows share
/// `overlap` characters.
pub struct FixedChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }
}

impl ChunkingStrategy for FixedChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let index = CharIndex::new(text);
        let total = index.len();
        let mut chunks = Vec::new();
        if total == 0 || self.chunk_size == 0 {
            return chunks;
        }

        let stride = self.chunk_size.saturating_sub(self.overlap).max(1);
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(total);
            chunks.push(index.slice(start, end).to_string());
            if end >= total {
                break;
            }
            start += stride;
        }

        chunks
    }
}
