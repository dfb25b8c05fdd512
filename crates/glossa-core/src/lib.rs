//! # Glossa Core
//!
//! Review-scheduling engine for the Glossa language-learning platform.
//! Decides when every learnable item - vocabulary word, grammar concept,
//! recorded error - should next be shown to the learner, and merges due
//! items of all kinds into one prioritized, time-bounded practice queue.
//!
//! - **Adaptive scheduler**: continuous stability/difficulty model for
//!   native vocabulary
//! - **Step scheduler**: learning/relearning step tables with an ease
//!   factor, for imported vocabulary
//! - **Dispatcher**: routes each review to the scheduler that owns the
//!   item and emits an append-only history entry
//! - **Queue builder**: cross-type priority scoring, interleaving, and
//!   time-budget truncation
//!
//! Everything here is pure, synchronous computation over values. Fetching
//! due items and persisting outcomes happen behind the traits in
//! [`contracts`]; the surrounding application owns I/O, transactions, and
//! per-item write serialization.
//!
//! ## Quick Start
//!
//! ```rust
//! use glossa_core::{ProgressRecord, ReviewEvent, SchedulerDispatcher};
//! use chrono::Utc;
//!
//! let dispatcher = SchedulerDispatcher::new();
//! let record = ProgressRecord::new_adaptive("vocab-123");
//!
//! // Learner answered "good"
//! let processed = dispatcher.process(&record, &ReviewEvent::new(2, Utc::now()))?;
//! assert_eq!(processed.record.scheduled_interval_days, 3);
//! # Ok::<(), glossa_core::ScheduleError>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod contracts;
pub mod progress;
pub mod queue;
pub mod scheduler;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Progress state and review events
pub use progress::{
    ProgressRecord, Rating, ReviewEvent, ReviewHistoryEntry, ReviewState, SchedulerKind,
    StepPhase,
};

// Schedulers and dispatch
pub use scheduler::{
    retrievability, AdaptiveOutcome, AdaptiveParameters, AdaptivePreview, AdaptiveScheduler,
    AdaptiveState, ProcessedReview, Result, ScheduleError, SchedulerDispatcher, StepOutcome,
    StepParameters, StepPreview, StepScheduler, StepState,
};

// Queue building
pub use queue::{
    summarize, DueError, DueGrammar, DueVocabulary, ItemKind, QueueBuilder, QueueConfig,
    QueueItem, QueueMode, QueueSummary,
};

// External contracts
pub use contracts::{build_queue_for_learner, DueItemSource, ProgressStore};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Highest valid review rating (the scale is 0..=3)
pub const RATING_MAX: i32 = 3;

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        build_queue_for_learner, DueError, DueGrammar, DueItemSource, DueVocabulary, ItemKind,
        ProcessedReview, ProgressRecord, ProgressStore, QueueBuilder, QueueItem, QueueMode,
        Rating, Result, ReviewEvent, ReviewHistoryEntry, ScheduleError, SchedulerDispatcher,
        SchedulerKind,
    };
}
