//! Step Scheduler - Discrete phase tables with an ease factor
//!
//! Schedules imported vocabulary with the classic flashcard convention:
//! new cards walk a learning-step table denominated in minutes, graduate
//! into day-denominated review intervals that grow with an ease factor,
//! and fall back into a relearning-step table on a lapse.
//!
//! Phases: `New → Learn → Review ⇄ Relearn`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{Rating, StepPhase};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Ease factor bounds
pub const MIN_EASE: f64 = 1.3;
pub const MAX_EASE: f64 = 2.5;

/// Ease factor seeded on brand-new items
pub const STARTING_EASE: f64 = 2.5;

/// Default cap on review intervals, in days
pub const DEFAULT_MAX_INTERVAL_DAYS: i32 = 36_500;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Tunable parameters for the step scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepParameters {
    /// Learning-step offsets in minutes, walked in order
    pub learning_steps_minutes: Vec<i64>,
    /// Relearning-step offsets in minutes, walked after a lapse
    pub relearning_steps_minutes: Vec<i64>,
    /// First review interval after graduating with Good
    pub graduating_interval_days: i32,
    /// First review interval after graduating with Easy
    pub easy_interval_days: i32,
    /// Interval multiplier for Hard reviews
    pub hard_multiplier: f64,
    /// Extra interval multiplier for Easy reviews
    pub easy_bonus: f64,
    /// Interval multiplier applied to the pre-lapse interval when a card
    /// graduates back out of relearning
    pub lapse_multiplier: f64,
    /// Cap on review intervals, in days
    pub maximum_interval_days: i32,
}

impl Default for StepParameters {
    fn default() -> Self {
        Self {
            learning_steps_minutes: vec![1, 10],
            relearning_steps_minutes: vec![10],
            graduating_interval_days: 1,
            easy_interval_days: 4,
            hard_multiplier: 1.2,
            easy_bonus: 1.3,
            lapse_multiplier: 0.7,
            maximum_interval_days: DEFAULT_MAX_INTERVAL_DAYS,
        }
    }
}

// ============================================================================
// STATE AND OUTCOME
// ============================================================================

/// Immutable input state for one step review computation.
///
/// `interval_days` holds the current review interval; through a relearning
/// excursion it retains the pre-lapse interval so the graduation penalty
/// has something to apply to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepState {
    pub phase: StepPhase,
    pub step_index: usize,
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub lapses: i32,
}

impl StepState {
    /// State of a never-reviewed item.
    pub fn new_item() -> Self {
        Self {
            phase: StepPhase::New,
            step_index: 0,
            ease_factor: STARTING_EASE,
            interval_days: 0,
            repetitions: 0,
            lapses: 0,
        }
    }
}

/// Result of one step review computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub phase: StepPhase,
    pub step_index: usize,
    pub ease_factor: f64,
    /// Review interval in whole days; 0 while learning, and the retained
    /// pre-lapse interval while relearning
    pub scheduled_interval_days: i32,
    /// Whole days between the previous review and this one; 0 for the first
    pub elapsed_days: i64,
    pub next_due_at: DateTime<Utc>,
}

/// The outcome each rating would produce, for answer-button previews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPreview {
    pub again: StepOutcome,
    pub hard: StepOutcome,
    pub good: StepOutcome,
    pub easy: StepOutcome,
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Step-table scheduler for imported vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StepScheduler {
    params: StepParameters,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(params: StepParameters) -> Self {
        Self { params }
    }

    /// Compute the state transition for one review.
    ///
    /// Pure function with the same shape as the adaptive scheduler's.
    /// Due offsets are minutes while in `Learn`/`Relearn` and days in
    /// `Review`.
    pub fn review(
        &self,
        state: &StepState,
        rating: Rating,
        last_reviewed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        let elapsed_days = last_reviewed_at
            .map(|t| (now - t).num_days().max(0))
            .unwrap_or(0);

        match state.phase {
            StepPhase::New => self.review_new(state, rating, elapsed_days, now),
            StepPhase::Learn => self.review_learn(state, rating, elapsed_days, now),
            StepPhase::Review => self.review_review(state, rating, elapsed_days, now),
            StepPhase::Relearn => self.review_relearn(state, rating, elapsed_days, now),
        }
    }

    /// The outcome every rating would produce from the given state.
    pub fn preview(
        &self,
        state: &StepState,
        last_reviewed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> StepPreview {
        StepPreview {
            again: self.review(state, Rating::Again, last_reviewed_at, now),
            hard: self.review(state, Rating::Hard, last_reviewed_at, now),
            good: self.review(state, Rating::Good, last_reviewed_at, now),
            easy: self.review(state, Rating::Easy, last_reviewed_at, now),
        }
    }

    fn review_new(
        &self,
        state: &StepState,
        rating: Rating,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        let steps = &self.params.learning_steps_minutes;
        match rating {
            Rating::Again | Rating::Hard => self.learn_step(state, 0, elapsed_days, now),
            Rating::Good | Rating::Easy => {
                if steps.len() <= 1 {
                    // Single-step deck: graduate straight to review
                    self.graduate(state, rating, elapsed_days, now)
                } else {
                    self.learn_step(state, 1, elapsed_days, now)
                }
            }
        }
    }

    fn review_learn(
        &self,
        state: &StepState,
        rating: Rating,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        match rating {
            Rating::Again => self.learn_step(state, 0, elapsed_days, now),
            Rating::Hard => self.learn_step(state, state.step_index, elapsed_days, now),
            Rating::Good | Rating::Easy => {
                let next = state.step_index + 1;
                if next >= self.params.learning_steps_minutes.len() {
                    self.graduate(state, rating, elapsed_days, now)
                } else {
                    self.learn_step(state, next, elapsed_days, now)
                }
            }
        }
    }

    fn review_review(
        &self,
        state: &StepState,
        rating: Rating,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        match rating {
            Rating::Again => {
                // Lapse: drop into the relearning table, keep the pre-lapse
                // interval around for the graduation penalty
                let minutes = step_minutes(&self.params.relearning_steps_minutes, 0);
                StepOutcome {
                    phase: StepPhase::Relearn,
                    step_index: 0,
                    ease_factor: (state.ease_factor - 0.2).max(MIN_EASE),
                    scheduled_interval_days: state.interval_days,
                    elapsed_days,
                    next_due_at: now + Duration::minutes(minutes),
                }
            }
            Rating::Hard => {
                let ease = (state.ease_factor - 0.15).max(MIN_EASE);
                let interval =
                    self.cap_interval(state.interval_days as f64 * self.params.hard_multiplier);
                self.review_outcome(interval, ease, elapsed_days, now)
            }
            Rating::Good => {
                let interval = self.cap_interval(state.interval_days as f64 * state.ease_factor);
                self.review_outcome(interval, state.ease_factor, elapsed_days, now)
            }
            Rating::Easy => {
                let ease = (state.ease_factor + 0.15).min(MAX_EASE);
                let interval = self
                    .cap_interval(state.interval_days as f64 * ease * self.params.easy_bonus);
                self.review_outcome(interval, ease, elapsed_days, now)
            }
        }
    }

    fn review_relearn(
        &self,
        state: &StepState,
        rating: Rating,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        match rating {
            Rating::Again => {
                let minutes = step_minutes(&self.params.relearning_steps_minutes, 0);
                StepOutcome {
                    phase: StepPhase::Relearn,
                    step_index: 0,
                    ease_factor: state.ease_factor,
                    scheduled_interval_days: state.interval_days,
                    elapsed_days,
                    next_due_at: now + Duration::minutes(minutes),
                }
            }
            Rating::Hard | Rating::Good | Rating::Easy => {
                // Graduate back with a 30% penalty on the pre-lapse interval
                let interval = self
                    .cap_interval(state.interval_days as f64 * self.params.lapse_multiplier);
                self.review_outcome(interval, state.ease_factor, elapsed_days, now)
            }
        }
    }

    fn learn_step(
        &self,
        state: &StepState,
        step_index: usize,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        let minutes = step_minutes(&self.params.learning_steps_minutes, step_index);
        StepOutcome {
            phase: StepPhase::Learn,
            step_index,
            ease_factor: state.ease_factor,
            scheduled_interval_days: 0,
            elapsed_days,
            next_due_at: now + Duration::minutes(minutes),
        }
    }

    fn graduate(
        &self,
        state: &StepState,
        rating: Rating,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        let interval = if rating == Rating::Easy {
            self.params.easy_interval_days
        } else {
            self.params.graduating_interval_days
        };
        self.review_outcome(interval.max(1), state.ease_factor, elapsed_days, now)
    }

    fn review_outcome(
        &self,
        interval_days: i32,
        ease_factor: f64,
        elapsed_days: i64,
        now: DateTime<Utc>,
    ) -> StepOutcome {
        StepOutcome {
            phase: StepPhase::Review,
            step_index: 0,
            ease_factor,
            scheduled_interval_days: interval_days,
            elapsed_days,
            next_due_at: now + Duration::days(interval_days as i64),
        }
    }

    fn cap_interval(&self, interval: f64) -> i32 {
        (interval.round() as i32)
            .max(1)
            .min(self.params.maximum_interval_days)
    }
}

fn step_minutes(table: &[i64], index: usize) -> i64 {
    table
        .get(index)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(10)
}

// ============================================================================
// TESTS
// ============================================================================
