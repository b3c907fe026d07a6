//! Scroll signal generation.
//!
//! Two interchangeable strategies turn classified input into wheel batches:
//!
//! - `velocity` - continuous, movement-driven velocity curve (Hover/Active)
//! - `click_hold` - discrete click batches and ramping hold-to-scroll
//!
//! The engine picks the strategy from the active zone's [`ScrollMode`];
//! both feed the same injection gate.

mod click_hold;
mod velocity;

pub use click_hold::{ClickHoldScroller, HeldButtons, button_direction};
pub use velocity::VelocityCurve;

use crate::injection::WheelBatch;
use crate::router::ClickEvent;
use crate::settings::Settings;
use crate::types::ScrollMode;
use std::time::{Duration, Instant};

/// Per-tick input handed to a strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Vertical pointer delta since the previous tick, dead zone applied
    pub dy: i32,
    /// Tick length in seconds
    pub dt: f64,
}

/// A scroll signal generator.
pub trait ScrollStrategy {
    /// Reload tuning from a settings snapshot.
    fn configure(&mut self, settings: &Settings);

    /// A button transition inside a zone using this strategy.
    fn on_button(&mut self, click: &ClickEvent, now: Instant) -> Option<WheelBatch>;

    /// A timer tick while the strategy is running.
    fn on_tick(&mut self, input: TickInput, now: Instant) -> Option<WheelBatch>;

    /// Drop all runtime state (accumulators, hold clock).
    fn reset(&mut self);

    /// True while the strategy needs timer ticks on its own account.
    fn wants_ticks(&self) -> bool {
        false
    }

    /// Interval the timer should run at for this strategy.
    fn tick_interval(&self) -> Duration;
}

/// Both strategies, owned by the engine.
#[derive(Debug, Default)]
pub struct Strategies {
    pub velocity: VelocityCurve,
    pub click_hold: ClickHoldScroller,
}

impl Strategies {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut strategies = Self::default();
        strategies.configure(settings);
        strategies
    }

    pub fn configure(&mut self, settings: &Settings) {
        self.velocity.configure(settings);
        self.click_hold.configure(settings);
    }

    /// Strategy responsible for `mode`.
    pub fn for_mode(&mut self, mode: ScrollMode) -> &mut dyn ScrollStrategy {
        if mode.is_motion() {
            &mut self.velocity
        } else {
            &mut self.click_hold
        }
    }

    pub fn reset_all(&mut self) {
        self.velocity.reset();
        self.click_hold.reset();
    }
}
