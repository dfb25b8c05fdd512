//! Journeys across the external contracts: fetch, build, review, persist.

use chrono::{TimeZone, Utc};

use glossa_core::{
    build_queue_for_learner, ProgressRecord, ProgressStore, QueueBuilder, QueueMode, Rating,
    ReviewEvent, SchedulerDispatcher,
};
use glossa_e2e_tests::fixtures::TestDataFactory;
use glossa_e2e_tests::mocks::{MemorySource, MemoryStore};

#[test]
fn practice_session_round_trip() {
    let learner = "learner-ana";
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 7, 45, 0).unwrap();

    let source = MemorySource {
        vocabulary: TestDataFactory::due_vocabulary_batch(4),
        grammar: TestDataFactory::due_grammar_batch(2),
        errors: TestDataFactory::due_error_batch(3),
    };
    let builder = QueueBuilder::new();

    // Build today's queue from the read contracts
    let queue =
        build_queue_for_learner(&source, &builder, learner, QueueMode::Priority, Some(900))
            .unwrap();
    assert!(!queue.is_empty());

    // The learner works the first vocabulary item in the queue
    let first_vocab = queue
        .iter()
        .find(|item| item.source_id.starts_with("vocab-"))
        .unwrap();

    let dispatcher = SchedulerDispatcher::new();
    let mut store = MemoryStore::new();

    let record = store
        .load_progress(learner, &first_vocab.source_id)
        .unwrap()
        .unwrap_or_else(|| ProgressRecord::new_adaptive(&first_vocab.source_id));

    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Good.as_i32(), now))
        .unwrap();
    store
        .save_review(learner, &processed.record, &processed.history)
        .unwrap();

    // The write is visible on reload and the history trail has one entry
    let reloaded = store
        .load_progress(learner, &first_vocab.source_id)
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.repetitions, 1);
    assert_eq!(reloaded.scheduled_interval_days, 3);
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].item_id, first_vocab.source_id);
}

#[test]
fn repeated_sessions_accumulate_history() {
    let learner = "learner-ben";
    let dispatcher = SchedulerDispatcher::new();
    let mut store = MemoryStore::new();
    let mut now = Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap();

    let mut record = ProgressRecord::new_steps("import-brot");
    for rating in [Rating::Good, Rating::Good, Rating::Good] {
        let processed = dispatcher
            .process(&record, &ReviewEvent::new(rating.as_i32(), now))
            .unwrap();
        store
            .save_review(learner, &processed.record, &processed.history)
            .unwrap();
        record = processed.record;
        now = record.due_at.unwrap();
    }

    assert_eq!(store.history().len(), 3);
    let transitions: Vec<&str> = store
        .history()
        .iter()
        .map(|entry| entry.transition.as_str())
        .collect();
    assert_eq!(transitions, vec!["new→learn", "learn→review", "review→review"]);

    // Every entry carries the ease trail, none the stability trail
    assert!(store.history().iter().all(|entry| entry.ease_after.is_some()));
    assert!(store.history().iter().all(|entry| entry.stability_after.is_none()));
}
