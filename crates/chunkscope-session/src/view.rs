use chunkscope_common::types::{ChunkParams, ChunkResult};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing uploaded yet.
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Immutable snapshot of everything the presentation layer shows.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub phase: Phase,
    pub params: ChunkParams,
    /// Extracted document text, once an upload succeeded.
    pub text: Option<Arc<str>>,
    pub source_name: Option<String>,
    /// Last successful result. Survives later failures.
    pub result: Option<ChunkResult>,
    /// The one message currently surfaced to the user.
    pub error: Option<String>,
    /// The newest upload has not answered yet.
    pub uploading: bool,
    /// Token of the newest upload; older uploads that answer late are stale.
    pub upload_generation: u64,
    /// Token of the newest chunk request; responses carrying any other token are stale.
    pub generation: u64,
    /// Stale responses dropped so far.
    pub discarded_responses: u64,
    /// User actions applied so far.
    pub applied_actions: u64,
}

impl ViewState {
    pub fn new(params: ChunkParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// No upload or current chunk request is outstanding.
    pub fn is_settled(&self) -> bool {
        !self.uploading && self.phase != Phase::Loading
    }
}
