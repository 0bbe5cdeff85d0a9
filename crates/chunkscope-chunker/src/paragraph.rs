use chunkscope_common::types::char_len;
use regex::Regex;
use std::sync::LazyLock;

use crate::fixed::FixedChunker;
use crate::ChunkingStrategy;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

/// Merges short paragraphs (joined by a blank line) up to `chunk_size` and
/// falls back to [`FixedChunker`] for paragraphs longer than that.
pub struct ParagraphChunker {
    chunk_size: usize,
    overlap: usize,
}

impl ParagraphChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }
}

impl ChunkingStrategy for ParagraphChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0;

        let paragraphs = PARAGRAPH_BREAK
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty());

        for para in paragraphs {
            let para_len = char_len(para);

            if para_len > self.chunk_size {
                if !current.is_empty() {
                    chunks.push(current.join("\n\n"));
                    current.clear();
                    current_len = 0;
                }
                chunks.extend(FixedChunker::new(self.chunk_size, self.overlap).chunk(para));
                continue;
            }

            if current_len + para_len > self.chunk_size && !current.is_empty() {
                chunks.push(current.join("\n\n"));
                current.clear();
                current_len = 0;
            }

            current.push(para);
            current_len += para_len;
        }

        if !current.is_empty() {
            chunks.push(current.join("\n\n"));
        }

        chunks
    }
}
