//! Scheduler Module
//!
//! The two review schedulers and the dispatcher that routes between them:
//!
//! - **AdaptiveScheduler**: continuous stability/difficulty model for
//!   native vocabulary.
//! - **StepScheduler**: discrete learning/relearning step tables with an
//!   ease factor, for imported vocabulary.
//! - **SchedulerDispatcher**: per-item routing by scheduler kind, record
//!   write-back, counter updates, and history entries.
//!
//! Both schedulers are pure functions over value state: no clock reads,
//! no I/O, deterministic for identical inputs.

mod adaptive;
mod dispatch;
mod steps;

pub use adaptive::{
    retrievability, AdaptiveOutcome, AdaptiveParameters, AdaptivePreview, AdaptiveScheduler,
    AdaptiveState, DEFAULT_MAX_STABILITY, MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_STABILITY,
};

pub use steps::{
    StepOutcome, StepParameters, StepPreview, StepScheduler, StepState,
    DEFAULT_MAX_INTERVAL_DAYS, MAX_EASE, MIN_EASE, STARTING_EASE,
};

pub use dispatch::{ProcessedReview, Result, ScheduleError, SchedulerDispatcher};
