use crate::text::CharIndex;
use crate::ChunkingStrategy;

/// Window of `chunk_size` characters advanced by `chunk_size - overlap` per
/// step. Each window is cut back to its last space so words stay whole; the
/// final window runs to the end of the text.
pub struct SlidingWindowChunker {
    chunk_size: usize,
    overlap: usize,
}

impl SlidingWindowChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }
}

impl ChunkingStrategy for SlidingWindowChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let index = CharIndex::new(text);
        let total = index.len();
        let mut chunks = Vec::new();
        if self.chunk_size == 0 {
            return chunks;
        }

        let stride = self.chunk_size.saturating_sub(self.overlap).max(1);
        let mut start = 0;
        while start < total {
            let mut end = start + self.chunk_size;
            if end >= total {
                chunks.push(index.slice(start, total).to_string());
                break;
            }

            if let Some(space) = index.rfind_space(start, end) {
                if space > start {
                    end = space;
                }
            }
            chunks.push(index.slice(start, end).to_string());
            start += stride;
        }

        chunks
    }
}
