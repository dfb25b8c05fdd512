//! Progress Record - The per-item, per-learner scheduling memory
//!
//! Each record carries:
//! - The scheduler kind that owns the item for its lifetime
//! - Shared counters (repetitions, lapses) and the last chosen interval
//! - Adaptive fields (stability, difficulty, review state)
//! - Step fields (phase, step index, ease factor)
//! - Due and last-reviewed timestamps (UTC only)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RATING
// ============================================================================

/// Learner's self-reported recall quality for one review.
///
/// The platform-wide scale is 0-3:
///
/// | Rating | Value | Meaning                       |
/// |--------|-------|-------------------------------|
/// | Again  | 0     | Total failure to recall       |
/// | Hard   | 1     | Recalled with serious effort  |
/// | Good   | 2     | Recalled correctly            |
/// | Easy   | 3     | Trivially easy                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Total failure, the item must come back within minutes
    Again,
    /// Recalled, but barely
    Hard,
    /// Recalled correctly with normal effort
    Good,
    /// Trivially easy, the interval can grow faster
    Easy,
}

impl Rating {
    /// Parse from the raw 0-3 wire value.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Rating::Again),
            1 => Some(Rating::Hard),
            2 => Some(Rating::Good),
            3 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// The raw 0-3 wire value.
    #[inline]
    pub fn as_i32(&self) -> i32 {
        match self {
            Rating::Again => 0,
            Rating::Hard => 1,
            Rating::Good => 2,
            Rating::Easy => 3,
        }
    }

    /// All ratings in ascending order. Useful for previews.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SCHEDULER KIND
// ============================================================================

/// Which scheduler owns an item.
///
/// The kind is set at item creation and must not change for the lifetime of
/// the item without resetting its scheduling state, because the two
/// schedulers use incompatible state shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Continuous stability/difficulty model (native vocabulary)
    #[default]
    Adaptive,
    /// Discrete step tables with an ease factor (imported vocabulary)
    Steps,
}

impl SchedulerKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerKind::Adaptive => "adaptive",
            SchedulerKind::Steps => "steps",
        }
    }
}

impl std::fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SchedulerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adaptive" => Ok(SchedulerKind::Adaptive),
            "steps" => Ok(SchedulerKind::Steps),
            _ => Err(format!("Unknown scheduler kind: {}", s)),
        }
    }
}

// ============================================================================
// LIFECYCLE ENUMS
// ============================================================================

/// Lifecycle bucket of an item owned by the adaptive scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    /// Never reviewed
    #[default]
    New,
    /// Failed or barely recalled recently, short intervals
    Learning,
    /// Graduated, intervals grow with stability
    Reviewing,
    /// Lapsed after graduating, recovering
    Relearning,
}

impl ReviewState {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::New => "new",
            ReviewState::Learning => "learning",
            ReviewState::Reviewing => "reviewing",
            ReviewState::Relearning => "relearning",
        }
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle phase of an item owned by the step scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepPhase {
    /// Never reviewed
    #[default]
    New,
    /// Walking the learning-step table, due offsets in minutes
    Learn,
    /// Graduated, due offsets in days
    Review,
    /// Lapsed, walking the relearning-step table
    Relearn,
}

impl StepPhase {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepPhase::New => "new",
            StepPhase::Learn => "learn",
            StepPhase::Review => "review",
            StepPhase::Relearn => "relearn",
        }
    }
}

impl std::fmt::Display for StepPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROGRESS RECORD
// ============================================================================

/// The persistent scheduling state of one learnable item for one learner.
///
/// This is the flat shape the storage layer reads and writes. The dispatcher
/// converts it into the owning scheduler's typed state before computing, and
/// writes every outcome field back onto a fresh copy. Adaptive fields and
/// step fields are mutually exclusive; a record whose populated fields do not
/// match its `kind` tag is rejected rather than guessed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Opaque identifier of the learnable item
    pub item_id: String,
    /// The scheduler that owns this item
    pub kind: SchedulerKind,
    /// Memory durability estimate in days (adaptive)
    pub stability: f64,
    /// Intrinsic difficulty estimate, 1.0 = easy, 10.0 = hard (adaptive)
    pub difficulty: f64,
    /// Total reviews processed, monotonically non-decreasing
    pub repetitions: i32,
    /// Failing reviews, monotonically non-decreasing
    pub lapses: i32,
    /// Interval chosen at the most recent review, in whole days
    pub scheduled_interval_days: i32,
    /// Adaptive lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_state: Option<ReviewState>,
    /// Step lifecycle phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<StepPhase>,
    /// Position in the current step table (steps only)
    pub step_index: usize,
    /// Interval growth multiplier, bounded [1.3, 2.5] (steps only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease_factor: Option<f64>,
    /// When the item next becomes eligible for review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// When the item was last reviewed; absent for brand-new items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Create a brand-new record owned by the adaptive scheduler.
    pub fn new_adaptive(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            kind: SchedulerKind::Adaptive,
            stability: 0.0,
            difficulty: 5.0,
            repetitions: 0,
            lapses: 0,
            scheduled_interval_days: 0,
            review_state: Some(ReviewState::New),
            phase: None,
            step_index: 0,
            ease_factor: None,
            due_at: None,
            last_reviewed_at: None,
        }
    }

    /// Create a brand-new record owned by the step scheduler.
    ///
    /// The ease factor is seeded at 2.5.
    pub fn new_steps(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            kind: SchedulerKind::Steps,
            stability: 0.0,
            difficulty: 5.0,
            repetitions: 0,
            lapses: 0,
            scheduled_interval_days: 0,
            review_state: None,
            phase: Some(StepPhase::New),
            step_index: 0,
            ease_factor: Some(2.5),
            due_at: None,
            last_reviewed_at: None,
        }
    }

    /// Whether the item has never been reviewed.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    /// Whether the item is due for review at `now`.
    ///
    /// A record with no due timestamp has never been scheduled and counts
    /// as due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.map(|t| t <= now).unwrap_or(true)
    }
}

// ============================================================================
// REVIEW EVENT
// ============================================================================

/// One learner review submission.
///
/// The rating arrives as a raw integer from the request layer and is
/// validated at the dispatch boundary. `occurred_at` must be supplied by the
/// caller; the dispatcher only fills in the current instant at the outermost
/// convenience entry point.
///
/// Uses `deny_unknown_fields` to prevent field injection attacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewEvent {
    /// Recall quality on the 0-3 scale
    pub rating: i32,
    /// When the review happened (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    /// How long the learner took to answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_latency_ms: Option<u32>,
}

impl ReviewEvent {
    /// Create an event with an explicit timestamp.
    pub fn new(rating: i32, occurred_at: DateTime<Utc>) -> Self {
        Self {
            rating,
            occurred_at: Some(occurred_at),
            response_latency_ms: None,
        }
    }

    /// Create an event with no timestamp, to be stamped at the boundary.
    pub fn rated(rating: i32) -> Self {
        Self {
            rating,
            occurred_at: None,
            response_latency_ms: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
