//! Queue Items - Due rows, priority scoring, and the queue output shape
//!
//! The three due-item row shapes mirror what the read contracts deliver;
//! `source_id` and `metadata` pass through the builder unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base priority per kind. Recorded errors are treated as the most fragile,
/// grammar concepts next, vocabulary last.
pub const BASE_PRIORITY_ERROR: f64 = 30.0;
pub const BASE_PRIORITY_GRAMMAR: f64 = 20.0;
pub const BASE_PRIORITY_VOCABULARY: f64 = 10.0;

/// Overdue bonus: 3 points per day overdue, capped at 30
pub const OVERDUE_BONUS_PER_DAY: f64 = 3.0;
pub const OVERDUE_BONUS_CAP: f64 = 30.0;

/// Fragility bonus ceiling: items with a stability-like measure below this
/// earn the difference as bonus points
pub const FRAGILITY_CEILING: f64 = 20.0;

/// Flat fragility bonus for brand-new items with no measure yet
pub const NEW_ITEM_FRAGILITY_BONUS: f64 = 10.0;

/// Lapse bonus: 2 points per recorded lapse, capped at 10
pub const LAPSE_BONUS_PER_LAPSE: f64 = 2.0;
pub const LAPSE_BONUS_CAP: f64 = 10.0;

/// Priority scores live in [0, 100]
pub const MAX_PRIORITY_SCORE: f64 = 100.0;

/// Coarse per-kind time estimates in seconds. Not measured.
pub const VOCABULARY_SECONDS: u32 = 8;
pub const GRAMMAR_SECONDS: u32 = 180;
pub const ERROR_SECONDS: u32 = 15;

// ============================================================================
// ITEM KIND
// ============================================================================

/// The practice-item domains a queue can mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Vocabulary,
    Grammar,
    Error,
}

impl ItemKind {
    /// Base priority band for this kind.
    #[inline]
    pub fn base_priority(&self) -> f64 {
        match self {
            ItemKind::Vocabulary => BASE_PRIORITY_VOCABULARY,
            ItemKind::Grammar => BASE_PRIORITY_GRAMMAR,
            ItemKind::Error => BASE_PRIORITY_ERROR,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Vocabulary => "vocabulary",
            ItemKind::Grammar => "grammar",
            ItemKind::Error => "error",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DUE ROWS
// ============================================================================

/// A due vocabulary item as delivered by the read contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueVocabulary {
    pub source_id: String,
    /// Absent for brand-new items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    pub lapses: i32,
    /// Negative when not yet due (lookahead window)
    pub due_since_days: i32,
    #[serde(default)]
    pub metadata: Value,
}

/// A due grammar concept as delivered by the read contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueGrammar {
    pub source_id: String,
    /// Mastery score, used as the stability-like measure
    pub score: f64,
    pub lapses_equivalent: i32,
    pub due_since_days: i32,
    #[serde(default)]
    pub metadata: Value,
}

/// A due recorded error as delivered by the read contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueError {
    pub source_id: String,
    pub stability: f64,
    pub lapses: i32,
    pub due_since_days: i32,
    #[serde(default)]
    pub metadata: Value,
}

// ============================================================================
// QUEUE ITEM
// ============================================================================

/// One entry of a built practice queue. Output-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub kind: ItemKind,
    /// Urgency in [0, 100], higher first
    pub priority_score: f64,
    /// Negative when not yet due
    pub days_overdue: i32,
    pub estimated_seconds: u32,
    /// Opaque caller identifier, passed through unchanged
    pub source_id: String,
    /// Opaque caller payload, passed through unchanged
    pub metadata: Value,
}

// ============================================================================
// SCORING
// ============================================================================

/// Priority score for one due item.
///
/// `base + overdue bonus + fragility bonus + lapse bonus`, capped at 100.
/// The fragility bonus rewards weak measures; a missing or non-positive
/// measure marks a brand-new item and earns the flat bonus instead.
pub(crate) fn priority_score(
    kind: ItemKind,
    days_overdue: i32,
    stability_like: Option<f64>,
    lapses: i32,
) -> f64 {
    let overdue_bonus = if days_overdue > 0 {
        (days_overdue as f64 * OVERDUE_BONUS_PER_DAY).min(OVERDUE_BONUS_CAP)
    } else {
        0.0
    };
    let fragility_bonus = match stability_like {
        Some(measure) if measure > 0.0 => (FRAGILITY_CEILING - measure).max(0.0),
        _ => NEW_ITEM_FRAGILITY_BONUS,
    };
    let lapse_bonus = (lapses.max(0) as f64 * LAPSE_BONUS_PER_LAPSE).min(LAPSE_BONUS_CAP);

    (kind.base_priority() + overdue_bonus + fragility_bonus + lapse_bonus)
        .min(MAX_PRIORITY_SCORE)
}

// ============================================================================
// TESTS
// ============================================================================
