//! Queue-building journeys over mixed due-item batches.

use glossa_core::{summarize, ItemKind, QueueBuilder, QueueConfig, QueueMode};
use glossa_e2e_tests::fixtures::TestDataFactory;

#[test]
fn mixed_session_interleaves_all_three_kinds() {
    let builder = QueueBuilder::new();
    let vocabulary = TestDataFactory::due_vocabulary_batch(5);
    let grammar = TestDataFactory::due_grammar_batch(5);
    let errors = TestDataFactory::due_error_batch(5);

    let queue = builder.build(&vocabulary, &grammar, &errors, QueueMode::Random, None);
    assert_eq!(queue.len(), 15);

    // While all three groups have items remaining, kinds never repeat
    for pair in queue.windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind);
    }

    let summary = summarize(&queue);
    assert_eq!(summary.vocabulary, 5);
    assert_eq!(summary.grammar, 5);
    assert_eq!(summary.errors, 5);
}

#[test]
fn priority_session_puts_errors_first_and_repeats_exactly() {
    let builder = QueueBuilder::new();
    let vocabulary = TestDataFactory::due_vocabulary_batch(20);
    let grammar = TestDataFactory::due_grammar_batch(10);
    let errors = TestDataFactory::due_error_batch(10);

    let first = builder.build(&vocabulary, &grammar, &errors, QueueMode::Priority, None);
    let second = builder.build(&vocabulary, &grammar, &errors, QueueMode::Priority, None);
    assert_eq!(first, second);

    for pair in first.windows(2) {
        assert!(pair[0].priority_score >= pair[1].priority_score);
    }
    assert!(first.iter().all(|item| item.priority_score <= 100.0));
    assert_eq!(first[0].kind, ItemKind::Error);
}

#[test]
fn short_session_fits_the_time_budget() {
    let builder = QueueBuilder::new();
    let vocabulary = TestDataFactory::due_vocabulary_batch(100);

    let queue = builder.build(&vocabulary, &[], &[], QueueMode::Priority, Some(60));
    assert!(queue.len() <= 7);
    let total: u32 = queue.iter().map(|item| item.estimated_seconds).sum();
    assert!(total <= 60);
}

#[test]
fn budget_cuts_across_kinds_in_queue_order() {
    let builder = QueueBuilder::new();
    let vocabulary = TestDataFactory::due_vocabulary_batch(10);
    let grammar = TestDataFactory::due_grammar_batch(10);
    let errors = TestDataFactory::due_error_batch(10);

    // Ten minutes: a few grammar drills plus the cheap items at the front
    let queue = builder.build(&vocabulary, &grammar, &errors, QueueMode::Priority, Some(600));
    let summary = summarize(&queue);
    assert!(summary.total_estimated_seconds <= 600);
    assert!(summary.total_items < 30);
    assert!(!queue.is_empty());
}

#[test]
fn seeded_builds_are_stable_across_processes() {
    let config = QueueConfig {
        seed: Some(7),
        ..Default::default()
    };
    let builder = QueueBuilder::with_config(config.clone());
    let vocabulary = TestDataFactory::due_vocabulary_batch(8);
    let grammar = TestDataFactory::due_grammar_batch(8);
    let errors = TestDataFactory::due_error_batch(8);

    let first = builder.build(&vocabulary, &grammar, &errors, QueueMode::Random, None);
    let again = QueueBuilder::with_config(config).build(
        &vocabulary,
        &grammar,
        &errors,
        QueueMode::Random,
        None,
    );
    assert_eq!(first, again);
}

#[test]
fn metadata_survives_the_whole_pipeline() {
    let builder = QueueBuilder::new();
    let vocabulary = TestDataFactory::due_vocabulary_batch(3);

    let queue = builder.build(&vocabulary, &[], &[], QueueMode::Priority, None);
    for item in &queue {
        assert!(item.metadata.get("word").is_some());
        assert!(item.source_id.starts_with("vocab-"));
    }
}
