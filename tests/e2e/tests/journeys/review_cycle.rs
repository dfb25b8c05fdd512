//! Full review-cycle journeys through the dispatcher.

use chrono::{Duration, TimeZone, Utc};

use glossa_core::{
    retrievability, ProgressRecord, Rating, ReviewEvent, ReviewState, ScheduleError,
    SchedulerDispatcher, StepPhase,
};
use glossa_e2e_tests::fixtures::TestDataFactory;

#[test]
fn adaptive_item_grows_through_good_reviews_and_survives_a_lapse() {
    let dispatcher = SchedulerDispatcher::new();
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    let mut record = ProgressRecord::new_adaptive("vocab-casa");
    let mut now = start;
    let mut intervals = Vec::new();

    // Three good reviews, each taken exactly when due
    for _ in 0..3 {
        let processed = dispatcher
            .process(&record, &ReviewEvent::new(Rating::Good.as_i32(), now))
            .unwrap();
        record = processed.record;
        intervals.push(record.scheduled_interval_days);
        now = record.due_at.unwrap();
    }
    assert_eq!(intervals[0], 3);
    assert!(intervals.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(record.repetitions, 3);
    assert_eq!(record.lapses, 0);
    assert_eq!(record.review_state, Some(ReviewState::Reviewing));

    // Recall probability decays between reviews but stays near 0.9 on time
    let on_time = retrievability(record.stability, record.scheduled_interval_days as f64);
    assert!(on_time > 0.85 && on_time <= 1.0);

    // A total failure collapses the interval and bumps the lapse counter
    let stability_before = record.stability;
    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Again.as_i32(), now))
        .unwrap();
    record = processed.record;
    assert_eq!(record.scheduled_interval_days, 0);
    assert_eq!(record.lapses, 1);
    assert_eq!(record.review_state, Some(ReviewState::Relearning));
    assert!(record.stability < stability_before);
    assert!(record.due_at.unwrap() < now + Duration::days(1));

    // Recovery resumes growth
    now = record.due_at.unwrap();
    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Good.as_i32(), now))
        .unwrap();
    assert_eq!(processed.record.review_state, Some(ReviewState::Reviewing));
    assert!(processed.record.scheduled_interval_days >= 1);
}

#[test]
fn step_item_graduates_through_the_default_learning_steps() {
    let dispatcher = SchedulerDispatcher::new();
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

    // Good, Good graduates with the one-day interval
    let mut record = ProgressRecord::new_steps("import-hund");
    let mut now = start;
    for _ in 0..2 {
        let processed = dispatcher
            .process(&record, &ReviewEvent::new(Rating::Good.as_i32(), now))
            .unwrap();
        record = processed.record;
        now = record.due_at.unwrap();
    }
    assert_eq!(record.phase, Some(StepPhase::Review));
    assert_eq!(record.scheduled_interval_days, 1);

    // Good, Easy graduates with the four-day interval
    let mut record = ProgressRecord::new_steps("import-katze");
    let mut now = start;
    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Good.as_i32(), now))
        .unwrap();
    record = processed.record;
    now = record.due_at.unwrap();
    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Easy.as_i32(), now))
        .unwrap();
    assert_eq!(processed.record.phase, Some(StepPhase::Review));
    assert_eq!(processed.record.scheduled_interval_days, 4);
}

#[test]
fn step_item_lapse_takes_the_thirty_percent_penalty() {
    let dispatcher = SchedulerDispatcher::new();
    let now = Utc.with_ymd_and_hms(2026, 4, 10, 18, 30, 0).unwrap();
    let record = TestDataFactory::reviewing_step_record("import-haus", 20, 2.1, now);

    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Again.as_i32(), now))
        .unwrap();
    let lapsed = processed.record;
    assert_eq!(lapsed.phase, Some(StepPhase::Relearn));
    assert!(lapsed.due_at.unwrap() < now + Duration::days(1));
    assert!((lapsed.ease_factor.unwrap() - 1.9).abs() < 1e-9);

    let later = lapsed.due_at.unwrap();
    let processed = dispatcher
        .process(&lapsed, &ReviewEvent::new(Rating::Good.as_i32(), later))
        .unwrap();
    assert_eq!(processed.record.phase, Some(StepPhase::Review));
    assert_eq!(processed.record.scheduled_interval_days, 14);
}

#[test]
fn history_entries_chain_the_full_transition() {
    let dispatcher = SchedulerDispatcher::new();
    let now = Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap();
    let record = TestDataFactory::reviewing_adaptive_record("vocab-arbol", 10.0, now);

    let processed = dispatcher
        .process(&record, &ReviewEvent::new(Rating::Hard.as_i32(), now))
        .unwrap();

    let history = &processed.history;
    assert_eq!(history.item_id, "vocab-arbol");
    assert_eq!(history.transition, "reviewing→relearning");
    assert_eq!(history.interval_days_before, 10);
    assert_eq!(
        history.interval_days_after,
        processed.record.scheduled_interval_days
    );
    assert_eq!(history.stability_before, Some(10.0));
    assert_eq!(history.stability_after, Some(processed.record.stability));
    assert!(history.ease_before.is_none());
    assert_eq!(history.occurred_at, now);
}

#[test]
fn bad_submissions_leave_no_trace() {
    let dispatcher = SchedulerDispatcher::new();
    let now = Utc::now();
    let record = ProgressRecord::new_adaptive("vocab-sol");

    assert!(matches!(
        dispatcher.process(&record, &ReviewEvent::new(7, now)),
        Err(ScheduleError::InvalidRating(7))
    ));
    assert!(matches!(
        dispatcher.process(&record, &ReviewEvent::rated(2)),
        Err(ScheduleError::MissingTimestamp)
    ));

    // The record is exactly as constructed
    assert_eq!(record, ProgressRecord::new_adaptive("vocab-sol"));
}
