/// Character-indexed view over a string.
///
/// Chunk sizes are measured in characters, so every window computation goes
/// through here instead of slicing on byte offsets.
pub(crate) struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of each character, followed by `text.len()`.
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    /// Number of characters.
    pub(crate) fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        let last = self.len();
        self.offsets[char_idx.min(last)]
    }

    /// Characters `[start, end)`, clamped to the text.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end).max(from);
        &self.text[from..to]
    }

    /// Character index of the last `' '` in `[start, end)`.
    pub(crate) fn rfind_space(&self, start: usize, end: usize) -> Option<usize> {
        let from = self.byte_offset(start);
        let window = self.slice(start, end);
        let byte_idx = from + window.rfind(' ')?;
        self.offsets.binary_search(&byte_idx).ok()
    }
}
