//! Unit tests for the rate-limited injection gate.

use crate::helpers::RecordingSink;
use scrollnice::constants::MAX_BATCH_EVENTS;
use scrollnice::injection::{GateOutcome, InjectionGate, WheelBatch};
use scrollnice::types::ScrollDirection;
use std::time::{Duration, Instant};

fn gate(max: u32) -> (InjectionGate, RecordingSink) {
    let sink = RecordingSink::default();
    (InjectionGate::new(Box::new(sink.clone()), max), sink)
}

#[test]
fn test_batch_totals_and_direction() {
    let batch = WheelBatch::notches(4).unwrap();
    assert_eq!(batch.total_delta(), 480);
    assert_eq!(batch.direction(), ScrollDirection::Up);

    let small = WheelBatch::pixels(-1).unwrap();
    assert_eq!(small.events, 1);
    assert!(small.delta < 0);
}

#[test]
fn test_partial_batch_fills_remaining_budget() {
    let (mut gate, sink) = gate(5);
    let now = Instant::now();

    assert_eq!(gate.submit_units(3, now), GateOutcome { emitted: 3, dropped: 0 });
    assert_eq!(gate.remaining_budget(), Some(2));
    assert_eq!(gate.submit_units(-4, now), GateOutcome { emitted: 2, dropped: 2 });
    assert_eq!(*sink.deltas.borrow(), vec![120, 120, 120, -120, -120]);
    assert_eq!(gate.dropped_total(), 2);
}

#[test]
fn test_window_starts_at_first_event_after_rollover() {
    let (mut gate, sink) = gate(1);
    let t0 = Instant::now();

    gate.submit_units(1, t0);
    gate.submit_units(1, t0 + Duration::from_millis(1500));
    // The second window began at 1500 ms, so 2000 ms is still inside it
    gate.submit_units(1, t0 + Duration::from_millis(2000));
    gate.submit_units(1, t0 + Duration::from_millis(2500));
    assert_eq!(sink.deltas.borrow().len(), 3);
}

#[test]
fn test_raising_the_budget_takes_effect_immediately() {
    let (mut gate, _sink) = gate(2);
    let now = Instant::now();
    gate.submit_units(2, now);
    assert_eq!(gate.remaining_budget(), Some(0));

    gate.set_max_events_per_sec(4);
    assert_eq!(gate.max_events_per_sec(), 4);
    assert_eq!(gate.submit_units(5, now).emitted, 2);
}

#[test]
fn test_zero_units_is_a_noop() {
    let (mut gate, sink) = gate(10);
    assert_eq!(gate.submit_units(0, Instant::now()), GateOutcome::default());
    assert!(sink.deltas.borrow().is_empty());
    assert_eq!(gate.failed_total(), 0);
}

#[test]
fn test_large_request_is_capped_by_budget() {
    let (mut gate, sink) = gate(120);
    let outcome = gate.submit_units(-500, Instant::now());
    assert_eq!(outcome, GateOutcome { emitted: 120, dropped: 380 });
    assert_eq!(sink.deltas.borrow().len(), 120);
}

#[test]
fn test_unlimited_budget_still_caps_one_batch() {
    let (mut gate, sink) = gate(0);
    let batch = WheelBatch::split_pixels(2_000_000_000).unwrap();
    assert_eq!(batch.total_delta(), i64::from(i32::MAX));

    let outcome = gate.submit(batch, Instant::now());
    assert_eq!(outcome.emitted, MAX_BATCH_EVENTS);
    assert_eq!(outcome.dropped, batch.event_count() - MAX_BATCH_EVENTS);
    assert_eq!(sink.deltas.borrow().len(), MAX_BATCH_EVENTS as usize);
}

#[test]
fn test_tail_event_counts_against_budget() {
    let (mut gate, sink) = gate(2);
    let batch = WheelBatch::split_pixels(-250).unwrap();
    assert_eq!(batch.event_count(), 3);

    let outcome = gate.submit(batch, Instant::now());
    assert_eq!(outcome, GateOutcome { emitted: 2, dropped: 1 });
    assert_eq!(*sink.deltas.borrow(), vec![-120, -120]);
}
