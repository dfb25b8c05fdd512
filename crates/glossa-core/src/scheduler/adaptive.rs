//! Adaptive Scheduler - Continuous stability/difficulty model
//!
//! Schedules native vocabulary with two continuous estimates per item:
//!
//! - **Stability**: how many days the memory is expected to last. Grows on
//!   successful reviews, collapses on failures.
//! - **Difficulty**: intrinsic hardness in [1.0, 10.0]. Drifts up on
//!   failures, down on easy recalls.
//!
//! The review function is pure and deterministic: identical inputs always
//! produce identical outputs. `now` is always supplied by the caller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{Rating, ReviewState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Stability floor after a total failure
pub const FAIL_STABILITY_FLOOR: f64 = 0.2;

/// Stability floor everywhere else, including initial seeding
pub const MIN_STABILITY: f64 = 0.3;

/// Difficulty bounds
pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Default cap on stability, in days
pub const DEFAULT_MAX_STABILITY: f64 = 365.0;

/// Minutes until the next attempt after a failing review
pub const DEFAULT_AGAIN_MINUTES: i64 = 10;

/// Initial intervals in days by rating for a never-reviewed item.
/// The failing entry is zero days; the item comes back within minutes.
const INITIAL_INTERVAL_DAYS: [i32; 4] = [0, 1, 3, 4];

// ============================================================================
// PARAMETERS
// ============================================================================

/// Tunable parameters for the adaptive scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveParameters {
    /// Cap on stability, in days
    pub max_stability: f64,
    /// Minutes until the next attempt after a failing review
    pub again_minutes: i64,
}

impl Default for AdaptiveParameters {
    fn default() -> Self {
        Self {
            max_stability: DEFAULT_MAX_STABILITY,
            again_minutes: DEFAULT_AGAIN_MINUTES,
        }
    }
}

// ============================================================================
// STATE AND OUTCOME
// ============================================================================

/// Immutable input state for one adaptive review computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveState {
    pub stability: f64,
    pub difficulty: f64,
    pub repetitions: i32,
    pub lapses: i32,
    pub scheduled_interval_days: i32,
    pub state: ReviewState,
}

impl AdaptiveState {
    /// State of a never-reviewed item.
    pub fn new_item() -> Self {
        Self {
            stability: 0.0,
            difficulty: 5.0,
            repetitions: 0,
            lapses: 0,
            scheduled_interval_days: 0,
            state: ReviewState::New,
        }
    }
}

/// Result of one adaptive review computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveOutcome {
    pub stability: f64,
    pub difficulty: f64,
    pub scheduled_interval_days: i32,
    /// Whole days between the previous review and this one; 0 for the first
    pub elapsed_days: i64,
    pub state: ReviewState,
    pub next_due_at: DateTime<Utc>,
}

/// The outcome each rating would produce, for answer-button previews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptivePreview {
    pub again: AdaptiveOutcome,
    pub hard: AdaptiveOutcome,
    pub good: AdaptiveOutcome,
    pub easy: AdaptiveOutcome,
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Stability/difficulty scheduler for native vocabulary.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveScheduler {
    params: AdaptiveParameters,
}

impl AdaptiveScheduler {
    /// Create a scheduler with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with custom parameters.
    pub fn with_parameters(params: AdaptiveParameters) -> Self {
        Self { params }
    }

    /// Compute the state transition for one review.
    ///
    /// Pure function: no clock reads, no I/O. `last_reviewed_at` is absent
    /// for a never-reviewed item. Both timestamps are UTC; mixing reference
    /// frames is a caller bug.
    pub fn review(
        &self,
        state: &AdaptiveState,
        rating: Rating,
        last_reviewed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AdaptiveOutcome {
        let elapsed_days = last_reviewed_at
            .map(|t| (now - t).num_days().max(0))
            .unwrap_or(0);

        if state.repetitions == 0 {
            return self.first_review(rating, now);
        }

        let (next_state, difficulty, stability) = match rating {
            Rating::Again => (
                ReviewState::Relearning,
                state.difficulty + 1.0,
                (state.stability * 0.2).max(FAIL_STABILITY_FLOOR),
            ),
            Rating::Hard => (
                ReviewState::Relearning,
                state.difficulty + 0.4,
                (state.stability * 0.7).max(MIN_STABILITY),
            ),
            Rating::Good => (
                ReviewState::Reviewing,
                state.difficulty - 0.1,
                (state.stability * 1.3 + 1.0).min(self.params.max_stability),
            ),
            Rating::Easy => (
                ReviewState::Reviewing,
                state.difficulty - 0.4,
                (state.stability * 1.6 + 1.5).min(self.params.max_stability),
            ),
        };

        let scheduled_interval_days = match rating {
            Rating::Again => 0,
            Rating::Hard | Rating::Good => (stability.round() as i32).max(1),
            Rating::Easy => ((stability * 1.1).round() as i32).max(1),
        };

        AdaptiveOutcome {
            stability,
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
            scheduled_interval_days,
            elapsed_days,
            state: next_state,
            next_due_at: self.due_at(now, scheduled_interval_days),
        }
    }

    /// The outcome every rating would produce from the given state.
    pub fn preview(
        &self,
        state: &AdaptiveState,
        last_reviewed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AdaptivePreview {
        AdaptivePreview {
            again: self.review(state, Rating::Again, last_reviewed_at, now),
            hard: self.review(state, Rating::Hard, last_reviewed_at, now),
            good: self.review(state, Rating::Good, last_reviewed_at, now),
            easy: self.review(state, Rating::Easy, last_reviewed_at, now),
        }
    }

    /// First review of a brand-new item: the interval comes straight from
    /// the rating, stability is seeded from that interval, and difficulty
    /// from the rating.
    fn first_review(&self, rating: Rating, now: DateTime<Utc>) -> AdaptiveOutcome {
        let scheduled_interval_days = INITIAL_INTERVAL_DAYS[rating.as_i32() as usize];
        let stability = (scheduled_interval_days as f64).max(MIN_STABILITY);
        let difficulty =
            (5.0 - rating.as_i32() as f64 * 0.5).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        let state = match rating {
            Rating::Again | Rating::Hard => ReviewState::Learning,
            Rating::Good | Rating::Easy => ReviewState::Reviewing,
        };

        AdaptiveOutcome {
            stability,
            difficulty,
            scheduled_interval_days,
            elapsed_days: 0,
            state,
            next_due_at: self.due_at(now, scheduled_interval_days),
        }
    }

    fn due_at(&self, now: DateTime<Utc>, interval_days: i32) -> DateTime<Utc> {
        if interval_days == 0 {
            now + Duration::minutes(self.params.again_minutes)
        } else {
            now + Duration::days(interval_days as i64)
        }
    }
}

// ============================================================================
// RETRIEVABILITY
// ============================================================================

/// Probability of successful recall after `elapsed_days` for a memory of the
/// given stability.
///
/// Power forgetting curve `R(t) = (1 + t / (9 S))^-1`, so recall probability
/// is ~0.9 when the elapsed time equals the stability.
pub fn retrievability(stability: f64, elapsed_days: f64) -> f64 {
    if elapsed_days <= 0.0 {
        return 1.0;
    }
    if stability <= 0.001 {
        return 0.0;
    }
    (1.0 + elapsed_days / (9.0 * stability)).powi(-1)
}

// ============================================================================
// TESTS
// ============================================================================
