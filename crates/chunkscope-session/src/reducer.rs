use chunkscope_common::types::{is_blank, ChunkRequest, ParamError};
use std::sync::Arc;

use crate::action::{Action, Effect};
use crate::view::{Phase, ViewState};

/// Compute the next view and the network call it needs, if any.
pub fn reduce(state: &ViewState, action: Action) -> (ViewState, Option<Effect>) {
    let mut next = state.clone();

    match action {
        Action::UploadRequested { filename, bytes } => {
            next.upload_generation += 1;
            next.uploading = true;
            let effect = Effect::Upload {
                generation: next.upload_generation,
                filename,
                bytes,
            };
            (next, Some(effect))
        }
        Action::TextExtracted {
            generation,
            filename,
            text,
        } => {
            if generation != state.upload_generation {
                return discard(next, "upload", generation, state.upload_generation);
            }
            next.uploading = false;
            next.text = Some(Arc::from(text));
            next.source_name = Some(filename);
            submit(next)
        }
        Action::UploadFailed {
            generation,
            message,
        } => {
            if generation != state.upload_generation {
                return discard(next, "upload", generation, state.upload_generation);
            }
            next.uploading = false;
            next.error = Some(message);
            // Before the first document there is nothing to fall back to.
            if next.has_text() {
                next.phase = Phase::Error;
            }
            (next, None)
        }
        Action::StrategyChanged(strategy) => {
            next.params.strategy = strategy;
            resubmit(next)
        }
        Action::ChunkSizeChanged(chunk_size) => {
            next.params.chunk_size = chunk_size;
            resubmit(next)
        }
        Action::OverlapChanged(overlap) => {
            next.params.overlap = overlap;
            resubmit(next)
        }
        Action::Retry => resubmit(next),
        Action::ChunkSucceeded { generation, result } => {
            if generation != state.generation {
                return discard(next, "chunk", generation, state.generation);
            }
            next.phase = Phase::Success;
            next.result = Some(result);
            next.error = None;
            (next, None)
        }
        Action::ChunkFailed {
            generation,
            message,
        } => {
            if generation != state.generation {
                return discard(next, "chunk", generation, state.generation);
            }
            next.phase = Phase::Error;
            next.error = Some(message);
            (next, None)
        }
    }
}

fn resubmit(next: ViewState) -> (ViewState, Option<Effect>) {
    if next.has_text() {
        submit(next)
    } else {
        (next, None)
    }
}

fn submit(mut next: ViewState) -> (ViewState, Option<Effect>) {
    next.generation += 1;

    let Some(text) = next.text.clone().filter(|text| !is_blank(text)) else {
        next.phase = Phase::Error;
        next.error = Some(ParamError::EmptyText.to_string());
        return (next, None);
    };

    for violation in next.params.bound_violations() {
        tracing::warn!(%violation, "Parameters outside the offered range, sending anyway");
    }

    next.phase = Phase::Loading;
    next.error = None;
    let effect = Effect::Submit {
        generation: next.generation,
        request: ChunkRequest::new(&*text, next.params),
    };
    (next, Some(effect))
}

fn discard(
    mut next: ViewState,
    request: &'static str,
    stale: u64,
    current: u64,
) -> (ViewState, Option<Effect>) {
    tracing::debug!(request, stale, current, "Discarding superseded response");
    next.discarded_responses += 1;
    (next, None)
}
