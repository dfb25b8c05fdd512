//! Progress module - Persistent scheduling state and review events
//!
//! Implements the per-item, per-learner scheduling memory:
//! - Progress records with the adaptive and step state shapes
//! - The 0-3 rating scale and scheduler-kind ownership tag
//! - Review events and the append-only review history

mod history;
mod record;

pub use history::ReviewHistoryEntry;
pub use record::{ProgressRecord, Rating, ReviewEvent, ReviewState, SchedulerKind, StepPhase};
