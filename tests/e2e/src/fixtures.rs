//! Test Data Factory
//!
//! Generates realistic progress records and due-item batches for the
//! journey tests.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use glossa_core::{
    DueError, DueGrammar, DueVocabulary, ProgressRecord, ReviewState, StepPhase,
};

/// Factory for creating test data.
pub struct TestDataFactory;

impl TestDataFactory {
    /// An adaptive-scheduler record that has already graduated.
    pub fn reviewing_adaptive_record(
        item_id: &str,
        stability: f64,
        now: DateTime<Utc>,
    ) -> ProgressRecord {
        let mut record = ProgressRecord::new_adaptive(item_id);
        record.stability = stability;
        record.difficulty = 5.0;
        record.repetitions = 4;
        record.scheduled_interval_days = stability.round() as i32;
        record.review_state = Some(ReviewState::Reviewing);
        record.last_reviewed_at = Some(now - Duration::days(stability.round() as i64));
        record.due_at = Some(now);
        record
    }

    /// A step-scheduler record sitting in the review phase.
    pub fn reviewing_step_record(
        item_id: &str,
        interval_days: i32,
        ease: f64,
        now: DateTime<Utc>,
    ) -> ProgressRecord {
        let mut record = ProgressRecord::new_steps(item_id);
        record.repetitions = 6;
        record.phase = Some(StepPhase::Review);
        record.scheduled_interval_days = interval_days;
        record.ease_factor = Some(ease);
        record.last_reviewed_at = Some(now - Duration::days(interval_days as i64));
        record.due_at = Some(now);
        record
    }

    /// A batch of due vocabulary rows with varied stability and lateness.
    pub fn due_vocabulary_batch(count: usize) -> Vec<DueVocabulary> {
        (0..count)
            .map(|i| DueVocabulary {
                source_id: format!("vocab-{}", i),
                stability: if i % 7 == 0 { None } else { Some((i % 25) as f64) },
                lapses: (i % 4) as i32,
                due_since_days: (i % 10) as i32 - 2,
                metadata: json!({ "word": format!("palabra{}", i) }),
            })
            .collect()
    }

    /// A batch of due grammar-concept rows.
    pub fn due_grammar_batch(count: usize) -> Vec<DueGrammar> {
        (0..count)
            .map(|i| DueGrammar {
                source_id: format!("grammar-{}", i),
                score: (i * 13 % 100) as f64,
                lapses_equivalent: (i % 3) as i32,
                due_since_days: (i % 5) as i32,
                metadata: json!({ "concept": format!("subjunctive-{}", i) }),
            })
            .collect()
    }

    /// A batch of due recorded-error rows.
    pub fn due_error_batch(count: usize) -> Vec<DueError> {
        (0..count)
            .map(|i| DueError {
                source_id: format!("error-{}", i),
                stability: (i % 6) as f64,
                lapses: (i % 5) as i32,
                due_since_days: (i % 8) as i32,
                metadata: json!({ "category": "gender-agreement" }),
            })
            .collect()
    }
}
