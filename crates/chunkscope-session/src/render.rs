//! Plain-text presentation of a [`ViewState`].

use chunkscope_common::types::{char_len, ChunkResult, Strategy};
use std::fmt;

use crate::view::{Phase, ViewState};

/// Display name for a strategy echoed back by the service.
pub fn strategy_label(wire_name: &str) -> String {
    match wire_name.parse::<Strategy>() {
        Ok(strategy) => strategy.label().to_string(),
        Err(_) => wire_name.to_string(),
    }
}

pub struct ResultView<'a>(pub &'a ChunkResult);

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.0.metadata;
        writeln!(f, "Chunking Results")?;
        writeln!(f, "  Total Chunks: {}", meta.total_chunks)?;
        writeln!(
            f,
            "  Average Chunk Size: {} characters",
            meta.average_chunk_size.round() as u64
        )?;
        writeln!(f, "  Strategy: {}", strategy_label(&meta.strategy))?;

        for (i, chunk) in self.0.chunks.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Chunk {} ({} characters)", i + 1, char_len(chunk))?;
            writeln!(f, "{chunk}")?;
        }
        Ok(())
    }
}

pub struct SessionView<'a>(pub &'a ViewState);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let params = &view.params;

        if let Some(name) = &view.source_name {
            writeln!(f, "Document: {name}")?;
        }
        writeln!(
            f,
            "Strategy: {} | Chunk size: {} | Overlap: {}",
            params.strategy.label(),
            params.chunk_size,
            params.overlap
        )?;
        writeln!(f, "  {}", params.strategy.description())?;

        if view.uploading {
            writeln!(f, "Uploading document...")?;
        }
        if let Some(error) = &view.error {
            writeln!(f, "Error: {error}")?;
        }

        match view.phase {
            Phase::Idle if !view.uploading && view.error.is_none() => {
                writeln!(f, "Upload a PDF to see how it gets chunked.")?;
            }
            Phase::Loading => writeln!(f, "Processing...")?,
            _ => {}
        }

        if let Some(result) = &view.result {
            writeln!(f)?;
            write!(f, "{}", ResultView(result))?;
        }
        Ok(())
    }
}

pub fn render(view: &ViewState) -> String {
    SessionView(view).to_string()
}

pub fn render_result(result: &ChunkResult) -> String {
    ResultView(result).to_string()
}
