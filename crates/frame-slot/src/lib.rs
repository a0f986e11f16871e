//! Latest-Frame Handoff
//!
//! Holds the most recently rendered frame. The detection side publishes,
//! the render side reads; each swap replaces the whole frame at once so the
//! reader never sees a half-updated list.

mod slot;

pub use slot::{channel, SlotReader, SlotWriter};

use thiserror::Error;

/// Slot error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    #[error("Writer dropped, no further frames will arrive")]
    Closed,
}
