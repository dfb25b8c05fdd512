//! In-memory implementations of the external contracts.

use std::collections::HashMap;

use glossa_core::{
    DueError, DueGrammar, DueItemSource, DueVocabulary, ProgressRecord, ProgressStore,
    ReviewHistoryEntry,
};

/// In-memory due-item source seeded with fixed batches.
#[derive(Default)]
pub struct MemorySource {
    pub vocabulary: Vec<DueVocabulary>,
    pub grammar: Vec<DueGrammar>,
    pub errors: Vec<DueError>,
}

impl DueItemSource for MemorySource {
    type Error = String;

    fn fetch_due_vocabulary(&self, _learner_id: &str) -> Result<Vec<DueVocabulary>, String> {
        Ok(self.vocabulary.clone())
    }

    fn fetch_due_grammar(&self, _learner_id: &str) -> Result<Vec<DueGrammar>, String> {
        Ok(self.grammar.clone())
    }

    fn fetch_due_errors(&self, _learner_id: &str) -> Result<Vec<DueError>, String> {
        Ok(self.errors.clone())
    }
}

/// In-memory progress store keyed by (learner, item).
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<(String, String), ProgressRecord>,
    history: Vec<ReviewHistoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All history entries appended so far, oldest first.
    pub fn history(&self) -> &[ReviewHistoryEntry] {
        &self.history
    }
}

impl ProgressStore for MemoryStore {
    type Error = String;

    fn load_progress(
        &self,
        learner_id: &str,
        item_id: &str,
    ) -> Result<Option<ProgressRecord>, String> {
        Ok(self
            .records
            .get(&(learner_id.to_string(), item_id.to_string()))
            .cloned())
    }

    fn save_review(
        &mut self,
        learner_id: &str,
        record: &ProgressRecord,
        history: &ReviewHistoryEntry,
    ) -> Result<(), String> {
        self.records.insert(
            (learner_id.to_string(), record.item_id.clone()),
            record.clone(),
        );
        self.history.push(history.clone());
        Ok(())
    }
}
