//! The front-end side of the chunking contract.
//!
//! All UI state lives in one [`ViewState`]. Input events become [`Action`]s on a
//! single queue; [`reduce`] turns the current state and an action into the next
//! state plus at most one network [`Effect`]. The [`SessionHandle`] owns the queue
//! and runs effects, so callers only ever see whole snapshots.

pub mod action;
pub mod reducer;
pub mod render;
pub mod session;
pub mod view;

pub use action::{Action, Effect};
pub use reducer::reduce;
pub use session::{SessionError, SessionHandle};
pub use view::{Phase, ViewState};
