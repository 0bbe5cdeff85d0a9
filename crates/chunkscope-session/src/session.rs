use chunkscope_client::ChunkBackend;
use chunkscope_common::types::ChunkParams;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::action::{Action, Effect};
use crate::reducer::reduce;
use crate::view::ViewState;

const QUEUE_CAPACITY: usize = 256;

/// Queue entry. Only user actions count towards [`ViewState::applied_actions`].
enum Message {
    User(Action),
    Outcome(Action),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session event loop has shut down")]
    Closed,
}

/// Front door to a running session.
///
/// One task owns the [`ViewState`] and applies queued actions in arrival
/// order. Network calls run as separate tasks that post their outcome back to
/// the same queue.
pub struct SessionHandle {
    tx: mpsc::Sender<Message>,
    state: watch::Receiver<Arc<ViewState>>,
    sent: AtomicU64,
}

impl SessionHandle {
    pub fn spawn(backend: Arc<dyn ChunkBackend>, params: ChunkParams) -> Self {
        let (tx, rx) = mpsc::channel::<Message>(QUEUE_CAPACITY);
        let initial = ViewState::new(params);
        let (publish, state) = watch::channel(Arc::new(initial.clone()));

        tokio::spawn(run(initial, rx, tx.downgrade(), backend, publish));

        Self {
            tx,
            state,
            sent: AtomicU64::new(0),
        }
    }

    /// Queue a user action.
    pub async fn dispatch(&self, action: Action) -> Result<(), SessionError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        self.tx
            .send(Message::User(action))
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<(), SessionError> {
        self.dispatch(Action::UploadRequested {
            filename: filename.to_string(),
            bytes,
        })
        .await
    }

    /// The latest published view.
    pub fn snapshot(&self) -> Arc<ViewState> {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every new view.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.state.clone()
    }

    /// Wait until every dispatched action is applied and nothing it started is
    /// still pending.
    pub async fn settled(&self) -> Result<Arc<ViewState>, SessionError> {
        let sent = self.sent.load(Ordering::SeqCst);
        let mut rx = self.state.clone();
        let view = rx
            .wait_for(|view| view.applied_actions >= sent && view.is_settled())
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(Arc::clone(&view))
    }
}

async fn run(
    mut state: ViewState,
    mut rx: mpsc::Receiver<Message>,
    tx: mpsc::WeakSender<Message>,
    backend: Arc<dyn ChunkBackend>,
    publish: watch::Sender<Arc<ViewState>>,
) {
    while let Some(message) = rx.recv().await {
        let (action, from_user) = match message {
            Message::User(action) => (action, true),
            Message::Outcome(action) => (action, false),
        };
        let kind = action.kind();

        let (mut next, effect) = reduce(&state, action);
        if from_user {
            next.applied_actions += 1;
        }
        state = next;
        tracing::debug!(
            action = kind,
            phase = ?state.phase,
            generation = state.generation,
            "Session updated"
        );

        publish.send_replace(Arc::new(state.clone()));

        if let Some(effect) = effect {
            spawn_effect(effect, Arc::clone(&backend), tx.clone());
        }
    }

    tracing::debug!("Session queue closed, shutting down");
}

fn spawn_effect(effect: Effect, backend: Arc<dyn ChunkBackend>, tx: mpsc::WeakSender<Message>) {
    tokio::spawn(async move {
        let outcome = match effect {
            Effect::Upload {
                generation,
                filename,
                bytes,
            } => match backend.upload_pdf(&filename, bytes).await {
                Ok(text) => Action::TextExtracted {
                    generation,
                    filename,
                    text,
                },
                Err(e) => {
                    tracing::warn!(%filename, error = %e, "Upload failed");
                    Action::UploadFailed {
                        generation,
                        message: e.to_string(),
                    }
                }
            },
            Effect::Submit {
                generation,
                request,
            } => match backend.chunk(&request).await {
                Ok(result) => Action::ChunkSucceeded { generation, result },
                Err(e) => {
                    tracing::warn!(generation, error = %e, "Chunk request failed");
                    Action::ChunkFailed {
                        generation,
                        message: e.to_string(),
                    }
                }
            },
        };

        // Nobody is left to see the outcome once every handle is gone.
        if let Some(tx) = tx.upgrade() {
            let _ = tx.send(Message::Outcome(outcome)).await;
        }
    });
}
