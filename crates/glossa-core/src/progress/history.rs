//! Review History - Append-only audit trail of processed reviews
//!
//! One entry is created per processed review event, capturing the full
//! before/after transition. Entries are never mutated or deleted here;
//! retention is the storage layer's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::SchedulerKind;

/// Immutable record of one review's state transition.
///
/// Adaptive reviews populate the stability/difficulty pairs; step reviews
/// populate the ease pair. Both carry the interval pair and a transition
/// label such as `"new→learning"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistoryEntry {
    /// Unique identifier (UUID v4)
    pub id: Uuid,
    /// The item that was reviewed
    pub item_id: String,
    /// Which scheduler produced the transition
    pub kind: SchedulerKind,
    /// The 0-3 rating the learner gave
    pub rating: i32,
    /// When the review happened (UTC)
    pub occurred_at: DateTime<Utc>,
    /// Lifecycle transition, e.g. `"review→relearn"`
    pub transition: String,
    /// Interval before the review, in whole days
    pub interval_days_before: i32,
    /// Interval chosen by the review, in whole days
    pub interval_days_after: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability_before: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability_after: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_before: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_after: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease_before: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease_after: Option<f64>,
    /// How long the learner took to answer, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_latency_ms: Option<u32>,
}
