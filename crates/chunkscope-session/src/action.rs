use chunkscope_common::types::{ChunkRequest, ChunkResult, Strategy};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UploadRequested { filename: String, bytes: Vec<u8> },
    TextExtracted {
        generation: u64,
        filename: String,
        text: String,
    },
    UploadFailed { generation: u64, message: String },
    StrategyChanged(Strategy),
    ChunkSizeChanged(usize),
    OverlapChanged(usize),
    Retry,
    ChunkSucceeded { generation: u64, result: ChunkResult },
    ChunkFailed { generation: u64, message: String },
}

impl Action {
    /// Short name for logs; avoids dumping upload bytes or document text.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::UploadRequested { .. } => "upload_requested",
            Action::TextExtracted { .. } => "text_extracted",
            Action::UploadFailed { .. } => "upload_failed",
            Action::StrategyChanged(_) => "strategy_changed",
            Action::ChunkSizeChanged(_) => "chunk_size_changed",
            Action::OverlapChanged(_) => "overlap_changed",
            Action::Retry => "retry",
            Action::ChunkSucceeded { .. } => "chunk_succeeded",
            Action::ChunkFailed { .. } => "chunk_failed",
        }
    }
}

/// Network work requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Upload {
        generation: u64,
        filename: String,
        bytes: Vec<u8>,
    },
    Submit { generation: u64, request: ChunkRequest },
}
