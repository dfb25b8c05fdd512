//! External Contracts - The seams to the surrounding application
//!
//! The core neither fetches nor persists anything itself. The request layer
//! implements these traits over its own storage and calls back in. Writers
//! must serialize per item: two concurrent reviews of the same item would
//! race on read-then-write and lose one update.

use crate::progress::{ProgressRecord, ReviewHistoryEntry};
use crate::queue::{DueError, DueGrammar, DueVocabulary, QueueBuilder, QueueItem, QueueMode};

/// Read contract: due items per learner, one call per domain.
///
/// Rows carry opaque `source_id`/`metadata` the queue passes through
/// unchanged. A failed fetch fails the whole queue build; malformed rows
/// inside a successful fetch do not.
pub trait DueItemSource {
    type Error;

    fn fetch_due_vocabulary(&self, learner_id: &str) -> Result<Vec<DueVocabulary>, Self::Error>;
    fn fetch_due_grammar(&self, learner_id: &str) -> Result<Vec<DueGrammar>, Self::Error>;
    fn fetch_due_errors(&self, learner_id: &str) -> Result<Vec<DueError>, Self::Error>;
}

/// Write contract: persists the outcome of one processed review.
///
/// Exactly one history entry is appended per review; entries are never
/// rewritten. Retention and archival live behind this trait, not in the
/// core.
pub trait ProgressStore {
    type Error;

    fn load_progress(
        &self,
        learner_id: &str,
        item_id: &str,
    ) -> Result<Option<ProgressRecord>, Self::Error>;

    fn save_review(
        &mut self,
        learner_id: &str,
        record: &ProgressRecord,
        history: &ReviewHistoryEntry,
    ) -> Result<(), Self::Error>;
}

/// Fetch all three due-item domains for a learner and build the queue.
pub fn build_queue_for_learner<S: DueItemSource>(
    source: &S,
    builder: &QueueBuilder,
    learner_id: &str,
    mode: QueueMode,
    time_budget_seconds: Option<u32>,
) -> Result<Vec<QueueItem>, S::Error> {
    let vocabulary = source.fetch_due_vocabulary(learner_id)?;
    let grammar = source.fetch_due_grammar(learner_id)?;
    let errors = source.fetch_due_errors(learner_id)?;
    Ok(builder.build(&vocabulary, &grammar, &errors, mode, time_budget_seconds))
}
