//! Queue Module
//!
//! Cross-type prioritization and practice-queue assembly:
//! - Priority scoring over due vocabulary, grammar concepts, and recorded
//!   errors
//! - Ordering modes (priority, blocks, random interleave)
//! - Hard truncation to a caller-supplied time budget

mod builder;
mod items;

pub use builder::{summarize, QueueBuilder, QueueConfig, QueueMode, QueueSummary};
pub use items::{
    DueError, DueGrammar, DueVocabulary, ItemKind, QueueItem, BASE_PRIORITY_ERROR,
    BASE_PRIORITY_GRAMMAR, BASE_PRIORITY_VOCABULARY, ERROR_SECONDS, FRAGILITY_CEILING,
    GRAMMAR_SECONDS, LAPSE_BONUS_CAP, LAPSE_BONUS_PER_LAPSE, MAX_PRIORITY_SCORE,
    NEW_ITEM_FRAGILITY_BONUS, OVERDUE_BONUS_CAP, OVERDUE_BONUS_PER_DAY, VOCABULARY_SECONDS,
};
