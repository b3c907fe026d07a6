//! Timer ticks - drive the velocity curve or the running hold.

use crate::app::ScrollNice;
use crate::constants::HOLD_TICK_FRACTION;
use crate::perf::{HookKind, measure};
use crate::profile_scope;
use crate::router::ZoneHitRouter;
use crate::scroll::{ScrollStrategy, TickInput};
use crate::state_machine::AppState;
use std::time::Instant;
use tracing::trace;

impl ScrollNice {
    /// Timer entry point. Ignored while the timer is meant to be stopped.
    pub fn handle_tick(&mut self, now: Instant) {
        let ((), elapsed_ms) = measure(|| self.tick(now));
        self.system.hook_stats.record(HookKind::Tick, elapsed_ms);
    }

    fn tick(&mut self, now: Instant) {
        profile_scope!("handle_tick");

        if self.scroll.ticking.is_none() {
            return;
        }

        let batch = if self.lifecycle.state() == AppState::Active {
            let pointer = self.scroll.pointer;
            let raw_dy = match (pointer, self.scroll.last_tick_pos) {
                (Some(current), Some(last)) => current.y - last.y,
                _ => 0,
            };
            self.scroll.last_tick_pos = pointer;

            let input = TickInput {
                dy: ZoneHitRouter::suppress_jitter(raw_dy, self.settings.engine.dead_zone_px),
                dt: self.settings.engine.tick_seconds(),
            };
            self.scroll.strategies.velocity.on_tick(input, now)
        } else {
            let input = TickInput {
                dy: 0,
                dt: HOLD_TICK_FRACTION,
            };
            self.scroll.strategies.click_hold.on_tick(input, now)
        };

        if let Some(batch) = batch {
            let outcome = self.scroll.gate.submit(batch, now);
            trace!(
                delta = batch.delta,
                emitted = outcome.emitted,
                dropped = outcome.dropped,
                "Tick batch"
            );
        }
        self.sync_timer();
    }
}
