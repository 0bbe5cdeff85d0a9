use chunkscope_common::types::char_len;
use regex::Regex;
use std::sync::LazyLock;

use crate::ChunkingStrategy;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"));

/// Split after `.`, `!` or `?` followed by whitespace. The whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END.find_iter(text) {
        // The terminator is a single ASCII byte.
        let end = m.start() + 1;
        sentences.push(&text[last..end]);
        last = m.end();
    }
    if last < text.len() {
        sentences.push(&text[last..]);
    }
    sentences
}

/// Packs whole sentences, joined by a space, until `chunk_size` would be
/// exceeded. With a non-zero overlap the last sentence of a chunk also opens
/// the next one.
pub struct SentenceChunker {
    chunk_size: usize,
    overlap: usize,
}

impl SentenceChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }
}

impl ChunkingStrategy for SentenceChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0;

        for sentence in split_sentences(text) {
            let sentence_len = char_len(sentence);

            if current_len + sentence_len > self.chunk_size && !current.is_empty() {
                chunks.push(current.join(" "));
                let carried = if self.overlap > 0 {
                    current.last().copied()
                } else {
                    None
                };
                current.clear();
                current_len = 0;
                if let Some(last) = carried {
                    current.push(last);
                    current_len = char_len(last);
                }
            }

            current.push(sentence);
            current_len += sentence_len;
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        chunks
    }
}
