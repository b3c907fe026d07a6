//! Injection gate - rate-limited forwarding of wheel units to the platform.
//!
//! The gate keeps a one-second window counter. Once the window's budget is
//! spent, further events are dropped (not queued) until the window rolls
//! over, so a burst can never flood the receiving application. Drops and
//! sink failures are not errors: scrolling simply catches up next window.

use crate::constants::{INJECTION_WINDOW_MS, MAX_BATCH_EVENTS, WHEEL_DELTA};
use crate::platform::WheelSink;
use crate::types::{ScrollDirection, pixels_to_wheel_delta};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// A request to emit `events` wheel events of `delta` each, followed by
/// one `tail` event when the total is not a whole number of events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelBatch {
    pub events: u32,
    /// Signed platform delta per event
    pub delta: i32,
    /// Signed delta of a trailing partial event, 0 for none
    pub tail: i32,
}

impl WheelBatch {
    /// `units` whole notches, sign gives direction. None for zero.
    pub fn notches(units: i32) -> Option<Self> {
        (units != 0).then(|| Self {
            events: units.unsigned_abs(),
            delta: units.signum() * WHEEL_DELTA,
            tail: 0,
        })
    }

    /// One event carrying a signed pixel amount.
    pub fn pixels(px: i32) -> Option<Self> {
        (px != 0).then(|| Self {
            events: 1,
            delta: pixels_to_wheel_delta(px),
            tail: 0,
        })
    }

    /// The exact wheel delta of `px` pixels, split into whole notches plus
    /// a partial tail event. None for zero.
    pub fn split_pixels(px: i32) -> Option<Self> {
        let total = pixels_to_wheel_delta(px);
        (total != 0).then(|| Self {
            events: (total / WHEEL_DELTA).unsigned_abs(),
            delta: total.signum() * WHEEL_DELTA,
            tail: total % WHEEL_DELTA,
        })
    }

    /// Number of wheel events the batch emits.
    pub fn event_count(&self) -> u32 {
        self.events + u32::from(self.tail != 0)
    }

    /// Deltas in emission order.
    pub fn deltas(&self) -> impl Iterator<Item = i32> {
        std::iter::repeat_n(self.delta, self.events as usize)
            .chain((self.tail != 0).then_some(self.tail))
    }

    pub fn direction(&self) -> ScrollDirection {
        let signed = if self.events > 0 { self.delta } else { self.tail };
        if signed >= 0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        }
    }

    /// Total signed delta of the batch.
    pub fn total_delta(&self) -> i64 {
        i64::from(self.events) * i64::from(self.delta) + i64::from(self.tail)
    }
}

/// What happened to a submitted batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateOutcome {
    pub emitted: u32,
    pub dropped: u32,
}

pub struct InjectionGate {
    sink: Box<dyn WheelSink>,
    /// 0 disables the budget
    max_events_per_sec: u32,
    window_start: Option<Instant>,
    sent_in_window: u32,
    dropped_total: u64,
    failed_total: u64,
}

impl InjectionGate {
    pub fn new(sink: Box<dyn WheelSink>, max_events_per_sec: u32) -> Self {
        Self {
            sink,
            max_events_per_sec,
            window_start: None,
            sent_in_window: 0,
            dropped_total: 0,
            failed_total: 0,
        }
    }

    pub fn set_max_events_per_sec(&mut self, max: u32) {
        self.max_events_per_sec = max;
    }

    pub fn max_events_per_sec(&self) -> u32 {
        self.max_events_per_sec
    }

    /// Signed notch count convenience wrapper.
    pub fn submit_units(&mut self, units: i32, now: Instant) -> GateOutcome {
        WheelBatch::notches(units)
            .map(|batch| self.submit(batch, now))
            .unwrap_or_default()
    }

    /// Emit a batch within the window budget.
    ///
    /// At most [`MAX_BATCH_EVENTS`] events leave one call even without a
    /// budget; the rest is dropped.
    pub fn submit(&mut self, batch: WheelBatch, now: Instant) -> GateOutcome {
        self.roll_window(now);

        let mut outcome = GateOutcome::default();
        for delta in batch.deltas().take(MAX_BATCH_EVENTS as usize) {
            if self.max_events_per_sec > 0 && self.sent_in_window >= self.max_events_per_sec {
                break;
            }
            if let Err(e) = self.sink.emit_wheel(delta) {
                self.failed_total += 1;
                debug!(error = %e, delta, "Wheel injection failed");
            }
            self.sent_in_window += 1;
            outcome.emitted += 1;
        }
        outcome.dropped = batch.event_count() - outcome.emitted;

        if outcome.dropped > 0 {
            self.dropped_total += u64::from(outcome.dropped);
            trace!(
                dropped = outcome.dropped,
                budget = self.max_events_per_sec,
                "Injection budget exhausted"
            );
        }
        outcome
    }

    fn roll_window(&mut self, now: Instant) {
        let window = Duration::from_millis(INJECTION_WINDOW_MS);
        let expired = match self.window_start {
            Some(start) => now.saturating_duration_since(start) >= window,
            None => true,
        };
        if expired {
            self.window_start = Some(now);
            self.sent_in_window = 0;
        }
    }

    /// Events left in the current window, None when unlimited.
    pub fn remaining_budget(&self) -> Option<u32> {
        (self.max_events_per_sec > 0)
            .then(|| self.max_events_per_sec.saturating_sub(self.sent_in_window))
    }

    pub fn dropped_total(&self) -> u64 {
        self.dropped_total
    }

    pub fn failed_total(&self) -> u64 {
        self.failed_total
    }
}
