//! Queue Builder - Scoring, ordering, and time-boxing the practice queue
//!
//! Consumes the three due-item collections the read contracts fetched,
//! scores each row, orders the result per the selected mode, and optionally
//! truncates it to fit a time budget. Read-only and stateless: building a
//! queue never touches scheduling state, so it is safe to call repeatedly
//! and concurrently for any learner.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::items::{
    priority_score, DueError, DueGrammar, DueVocabulary, ItemKind, QueueItem, ERROR_SECONDS,
    GRAMMAR_SECONDS, VOCABULARY_SECONDS,
};

// ============================================================================
// MODE AND CONFIG
// ============================================================================

/// How a built queue is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    /// Strict descending priority order
    Priority,
    /// Descending priority order; the per-kind base bands make the kinds
    /// fall into contiguous blocks without extra shuffling
    Blocks,
    /// Kinds shuffled once, then round-robined so consecutive items differ
    /// in kind whenever more than one kind has items remaining
    #[default]
    Random,
}

/// Tunable parameters for queue building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueConfig {
    /// Per-kind time estimates in seconds
    pub vocabulary_seconds: u32,
    pub grammar_seconds: u32,
    pub error_seconds: u32,
    /// Fixed seed for the kind shuffle; absent means a fresh OS seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            vocabulary_seconds: VOCABULARY_SECONDS,
            grammar_seconds: GRAMMAR_SECONDS,
            error_seconds: ERROR_SECONDS,
            seed: None,
        }
    }
}

/// Per-kind counts and total estimated time for a built queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub total_items: usize,
    pub vocabulary: usize,
    pub grammar: usize,
    pub errors: usize,
    pub total_estimated_seconds: u32,
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds one ranked, interleaved, optionally time-boxed practice queue.
#[derive(Debug, Clone, Default)]
pub struct QueueBuilder {
    config: QueueConfig,
}

impl QueueBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        Self { config }
    }

    /// Score, order, and optionally time-box the given due items.
    ///
    /// Malformed rows (empty source id, non-finite numerics) are skipped
    /// with a warning rather than failing the whole build; one broken row
    /// must not cost a learner their practice session.
    pub fn build(
        &self,
        vocabulary: &[DueVocabulary],
        grammar: &[DueGrammar],
        errors: &[DueError],
        mode: QueueMode,
        time_budget_seconds: Option<u32>,
    ) -> Vec<QueueItem> {
        let vocabulary = self.score_vocabulary(vocabulary);
        let grammar = self.score_grammar(grammar);
        let errors = self.score_errors(errors);

        let ordered = match mode {
            QueueMode::Priority | QueueMode::Blocks => {
                let mut all: Vec<QueueItem> = Vec::new();
                all.extend(vocabulary);
                all.extend(grammar);
                all.extend(errors);
                sort_by_score(&mut all);
                all
            }
            QueueMode::Random => self.interleave(vocabulary, grammar, errors),
        };

        match time_budget_seconds {
            Some(budget) => truncate_to_budget(ordered, budget),
            None => ordered,
        }
    }

    /// Round-robin one item from each non-empty kind group, in a kind order
    /// shuffled once per build.
    fn interleave(
        &self,
        vocabulary: Vec<QueueItem>,
        grammar: Vec<QueueItem>,
        errors: Vec<QueueItem>,
    ) -> Vec<QueueItem> {
        let total = vocabulary.len() + grammar.len() + errors.len();
        let mut groups: Vec<VecDeque<QueueItem>> =
            vec![vocabulary.into(), grammar.into(), errors.into()];
        groups.retain(|group| !group.is_empty());

        match self.config.seed {
            Some(seed) => groups.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => groups.shuffle(&mut rand::thread_rng()),
        }

        let mut out = Vec::with_capacity(total);
        while !groups.is_empty() {
            for group in groups.iter_mut() {
                if let Some(item) = group.pop_front() {
                    out.push(item);
                }
            }
            groups.retain(|group| !group.is_empty());
        }
        out
    }

    fn score_vocabulary(&self, rows: &[DueVocabulary]) -> Vec<QueueItem> {
        let mut items: Vec<QueueItem> = rows
            .iter()
            .filter(|row| {
                let ok = !row.source_id.is_empty()
                    && row.stability.map(f64::is_finite).unwrap_or(true);
                if !ok {
                    tracing::warn!(source = %row.source_id, "skipping malformed due vocabulary row");
                }
                ok
            })
            .map(|row| QueueItem {
                kind: ItemKind::Vocabulary,
                priority_score: priority_score(
                    ItemKind::Vocabulary,
                    row.due_since_days,
                    row.stability,
                    row.lapses,
                ),
                days_overdue: row.due_since_days,
                estimated_seconds: self.config.vocabulary_seconds,
                source_id: row.source_id.clone(),
                metadata: row.metadata.clone(),
            })
            .collect();
        sort_by_score(&mut items);
        items
    }

    fn score_grammar(&self, rows: &[DueGrammar]) -> Vec<QueueItem> {
        let mut items: Vec<QueueItem> = rows
            .iter()
            .filter(|row| {
                let ok = !row.source_id.is_empty() && row.score.is_finite();
                if !ok {
                    tracing::warn!(source = %row.source_id, "skipping malformed due grammar row");
                }
                ok
            })
            .map(|row| QueueItem {
                kind: ItemKind::Grammar,
                priority_score: priority_score(
                    ItemKind::Grammar,
                    row.due_since_days,
                    Some(row.score),
                    row.lapses_equivalent,
                ),
                days_overdue: row.due_since_days,
                estimated_seconds: self.config.grammar_seconds,
                source_id: row.source_id.clone(),
                metadata: row.metadata.clone(),
            })
            .collect();
        sort_by_score(&mut items);
        items
    }

    fn score_errors(&self, rows: &[DueError]) -> Vec<QueueItem> {
        let mut items: Vec<QueueItem> = rows
            .iter()
            .filter(|row| {
                let ok = !row.source_id.is_empty() && row.stability.is_finite();
                if !ok {
                    tracing::warn!(source = %row.source_id, "skipping malformed due error row");
                }
                ok
            })
            .map(|row| QueueItem {
                kind: ItemKind::Error,
                priority_score: priority_score(
                    ItemKind::Error,
                    row.due_since_days,
                    Some(row.stability),
                    row.lapses,
                ),
                days_overdue: row.due_since_days,
                estimated_seconds: self.config.error_seconds,
                source_id: row.source_id.clone(),
                metadata: row.metadata.clone(),
            })
            .collect();
        sort_by_score(&mut items);
        items
    }
}

/// Descending by score; stable, so equal scores keep their input order.
fn sort_by_score(items: &mut [QueueItem]) {
    items.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Keep items while the running estimate fits the budget; everything after
/// the first item that would exceed it is dropped, not deferred.
fn truncate_to_budget(ordered: Vec<QueueItem>, budget_seconds: u32) -> Vec<QueueItem> {
    let mut total = 0u32;
    let mut out = Vec::new();
    for item in ordered {
        if total + item.estimated_seconds > budget_seconds {
            break;
        }
        total += item.estimated_seconds;
        out.push(item);
    }
    out
}

/// Per-kind counts and total estimated time for a built queue.
pub fn summarize(items: &[QueueItem]) -> QueueSummary {
    let mut summary = QueueSummary {
        total_items: items.len(),
        vocabulary: 0,
        grammar: 0,
        errors: 0,
        total_estimated_seconds: 0,
    };
    for item in items {
        match item.kind {
            ItemKind::Vocabulary => summary.vocabulary += 1,
            ItemKind::Grammar => summary.grammar += 1,
            ItemKind::Error => summary.errors += 1,
        }
        summary.total_estimated_seconds += item.estimated_seconds;
    }
    summary
}

// ============================================================================
// TESTS
// ============================================================================
