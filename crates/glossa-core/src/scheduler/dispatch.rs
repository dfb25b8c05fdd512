//! Scheduler Dispatcher - Routes reviews to the owning scheduler
//!
//! Validates the incoming event, converts the stored progress record into
//! the owning scheduler's typed state, invokes it, writes every outcome
//! field back onto a fresh copy of the record, and emits one append-only
//! history entry per processed review.
//!
//! Processing is not idempotent: submitting the same event twice advances
//! the counters twice. At-most-once submission per learner action is the
//! caller's responsibility, as is serializing writes per item.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::progress::{
    ProgressRecord, Rating, ReviewEvent, ReviewHistoryEntry, ReviewState, SchedulerKind,
    StepPhase,
};
use crate::scheduler::adaptive::{AdaptiveScheduler, AdaptiveState};
use crate::scheduler::steps::{StepScheduler, StepState};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Scheduling error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Rating outside the closed 0-3 range
    #[error("Invalid rating: {0} (expected 0-3)")]
    InvalidRating(i32),
    /// The record's stored fields do not match its scheduler-kind tag
    #[error("Inconsistent scheduler state for {item_id}: {detail}")]
    InconsistentSchedulerKind { item_id: String, detail: String },
    /// The event carried no timestamp
    #[error("Review event has no timestamp")]
    MissingTimestamp,
}

/// Scheduling result type
pub type Result<T> = std::result::Result<T, ScheduleError>;

// ============================================================================
// LAPSE THRESHOLDS
// ============================================================================

/// Highest rating that counts as a lapse for adaptive items.
const ADAPTIVE_LAPSE_MAX_RATING: i32 = 1;

/// Highest rating that counts as a lapse for step items.
const STEP_LAPSE_MAX_RATING: i32 = 2;

// ============================================================================
// DISPATCHER
// ============================================================================

/// Outcome of one processed review: the updated record and its history entry.
#[derive(Debug, Clone)]
pub struct ProcessedReview {
    pub record: ProgressRecord,
    pub history: ReviewHistoryEntry,
}

/// Routes review events to the scheduler that owns the item.
#[derive(Debug, Clone, Default)]
pub struct SchedulerDispatcher {
    adaptive: AdaptiveScheduler,
    steps: StepScheduler,
}

impl SchedulerDispatcher {
    /// Create a dispatcher with default scheduler parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with custom scheduler parameters.
    pub fn with_schedulers(adaptive: AdaptiveScheduler, steps: StepScheduler) -> Self {
        Self { adaptive, steps }
    }

    /// Process one review event against a stored progress record.
    ///
    /// Returns an updated copy of the record plus a populated history entry;
    /// the input record is never mutated. Fails fast, with nothing written,
    /// on an out-of-range rating, a missing timestamp, or a record whose
    /// stored fields do not match its kind tag.
    pub fn process(
        &self,
        record: &ProgressRecord,
        event: &ReviewEvent,
    ) -> Result<ProcessedReview> {
        let rating =
            Rating::from_i32(event.rating).ok_or(ScheduleError::InvalidRating(event.rating))?;
        let occurred_at = event.occurred_at.ok_or(ScheduleError::MissingTimestamp)?;

        let processed = match record.kind {
            SchedulerKind::Adaptive => self.apply_adaptive(record, event, rating, occurred_at)?,
            SchedulerKind::Steps => self.apply_steps(record, event, rating, occurred_at)?,
        };

        tracing::debug!(
            item = %record.item_id,
            kind = %record.kind,
            rating = rating.as_i32(),
            transition = %processed.history.transition,
            interval_days = processed.record.scheduled_interval_days,
            "review processed"
        );
        Ok(processed)
    }

    /// Process a review, stamping events that carry no timestamp with the
    /// current instant.
    ///
    /// This is the only place the clock is read; everything below it takes
    /// `occurred_at` explicitly.
    pub fn process_now(
        &self,
        record: &ProgressRecord,
        event: &ReviewEvent,
    ) -> Result<ProcessedReview> {
        let mut event = event.clone();
        event.occurred_at = Some(event.occurred_at.unwrap_or_else(Utc::now));
        self.process(record, &event)
    }

    fn apply_adaptive(
        &self,
        record: &ProgressRecord,
        event: &ReviewEvent,
        rating: Rating,
        occurred_at: DateTime<Utc>,
    ) -> Result<ProcessedReview> {
        let state = adaptive_state_of(record)?;
        let outcome = self
            .adaptive
            .review(&state, rating, record.last_reviewed_at, occurred_at);

        let mut updated = record.clone();
        updated.stability = outcome.stability;
        updated.difficulty = outcome.difficulty;
        updated.scheduled_interval_days = outcome.scheduled_interval_days;
        updated.review_state = Some(outcome.state);
        updated.repetitions = record.repetitions + 1;
        if rating.as_i32() <= ADAPTIVE_LAPSE_MAX_RATING {
            updated.lapses = record.lapses + 1;
        }
        updated.due_at = Some(outcome.next_due_at);
        updated.last_reviewed_at = Some(occurred_at);

        let history = ReviewHistoryEntry {
            id: Uuid::new_v4(),
            item_id: record.item_id.clone(),
            kind: SchedulerKind::Adaptive,
            rating: rating.as_i32(),
            occurred_at,
            transition: transition_label(state.state.as_str(), outcome.state.as_str()),
            interval_days_before: record.scheduled_interval_days,
            interval_days_after: outcome.scheduled_interval_days,
            stability_before: Some(state.stability),
            stability_after: Some(outcome.stability),
            difficulty_before: Some(state.difficulty),
            difficulty_after: Some(outcome.difficulty),
            ease_before: None,
            ease_after: None,
            response_latency_ms: event.response_latency_ms,
        };

        Ok(ProcessedReview {
            record: updated,
            history,
        })
    }

    fn apply_steps(
        &self,
        record: &ProgressRecord,
        event: &ReviewEvent,
        rating: Rating,
        occurred_at: DateTime<Utc>,
    ) -> Result<ProcessedReview> {
        let state = step_state_of(record)?;
        let outcome = self
            .steps
            .review(&state, rating, record.last_reviewed_at, occurred_at);

        let mut updated = record.clone();
        updated.scheduled_interval_days = outcome.scheduled_interval_days;
        updated.phase = Some(outcome.phase);
        updated.step_index = outcome.step_index;
        updated.ease_factor = Some(outcome.ease_factor);
        updated.repetitions = record.repetitions + 1;
        if rating.as_i32() <= STEP_LAPSE_MAX_RATING {
            updated.lapses = record.lapses + 1;
        }
        updated.due_at = Some(outcome.next_due_at);
        updated.last_reviewed_at = Some(occurred_at);

        let history = ReviewHistoryEntry {
            id: Uuid::new_v4(),
            item_id: record.item_id.clone(),
            kind: SchedulerKind::Steps,
            rating: rating.as_i32(),
            occurred_at,
            transition: transition_label(state.phase.as_str(), outcome.phase.as_str()),
            interval_days_before: record.scheduled_interval_days,
            interval_days_after: outcome.scheduled_interval_days,
            stability_before: None,
            stability_after: None,
            difficulty_before: None,
            difficulty_after: None,
            ease_before: Some(state.ease_factor),
            ease_after: Some(outcome.ease_factor),
            response_latency_ms: event.response_latency_ms,
        };

        Ok(ProcessedReview {
            record: updated,
            history,
        })
    }
}

fn transition_label(before: &str, after: &str) -> String {
    format!("{}→{}", before, after)
}

// ============================================================================
// STATE CONVERSIONS
// ============================================================================

/// Convert a stored record into the adaptive scheduler's state shape.
///
/// Refuses to guess: a reviewed item with no review state, or one carrying
/// step fields, is surfaced as inconsistent rather than defaulted.
fn adaptive_state_of(record: &ProgressRecord) -> Result<AdaptiveState> {
    if record.phase.is_some() || record.ease_factor.is_some() {
        return Err(inconsistent(record, "step fields present on an adaptive item"));
    }
    let state = match record.review_state {
        Some(state) => state,
        None if record.repetitions == 0 => ReviewState::New,
        None => return Err(inconsistent(record, "reviewed item has no review state")),
    };
    Ok(AdaptiveState {
        stability: record.stability,
        difficulty: record.difficulty,
        repetitions: record.repetitions,
        lapses: record.lapses,
        scheduled_interval_days: record.scheduled_interval_days,
        state,
    })
}

/// Convert a stored record into the step scheduler's state shape.
fn step_state_of(record: &ProgressRecord) -> Result<StepState> {
    if record.review_state.is_some() {
        return Err(inconsistent(record, "adaptive review state present on a step item"));
    }
    let ease_factor = record
        .ease_factor
        .ok_or_else(|| inconsistent(record, "missing ease factor"))?;
    let phase = match record.phase {
        Some(phase) => phase,
        None if record.repetitions == 0 => StepPhase::New,
        None => return Err(inconsistent(record, "reviewed item has no phase")),
    };
    Ok(StepState {
        phase,
        step_index: record.step_index,
        ease_factor,
        interval_days: record.scheduled_interval_days,
        repetitions: record.repetitions,
        lapses: record.lapses,
    })
}

fn inconsistent(record: &ProgressRecord, detail: &str) -> ScheduleError {
    ScheduleError::InconsistentSchedulerKind {
        item_id: record.item_id.clone(),
        detail: detail.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
