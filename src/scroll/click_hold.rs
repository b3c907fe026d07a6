//! Discrete click and hold scrolling.
//!
//! Click modes emit the exact wheel delta of `scroll_amount_px` on
//! button-down, as whole notches plus a partial tail event. In the
//! hold mode a button-down starts a hold session: each tick the speed ramps
//! with the time held (capped), feeds a fractional accumulator, and every
//! full threshold's worth is emitted as one wheel batch. Releasing the last
//! held button ends the session.

use super::{ScrollStrategy, TickInput};
use crate::constants::{HOLD_EMIT_THRESHOLD, HOLD_SPEED_CEILING, HOLD_TICK_MS};
use crate::injection::WheelBatch;
use crate::router::ClickEvent;
use crate::settings::Settings;
use crate::types::{ButtonAction, MouseButton, ScrollDirection, ScrollMode};
use std::time::{Duration, Instant};
use tracing::debug;

/// Which buttons are currently down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl HeldButtons {
    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => self.middle = down,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.middle
    }
}

#[derive(Clone, Copy, Debug)]
struct HoldSession {
    direction: ScrollDirection,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct ClickHoldScroller {
    scroll_amount_px: i32,
    base_speed: f64,
    acceleration: f64,
    held: HeldButtons,
    hold: Option<HoldSession>,
    accum: f64,
}

impl Default for ClickHoldScroller {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Direction a button scrolls in for the click and hold modes.
pub fn button_direction(mode: ScrollMode, button: MouseButton) -> Option<ScrollDirection> {
    match (mode, button) {
        (ScrollMode::ClickUpDown | ScrollMode::Hold, MouseButton::Left) => Some(ScrollDirection::Up),
        (ScrollMode::ClickUpDown | ScrollMode::Hold, MouseButton::Right) => {
            Some(ScrollDirection::Down)
        }
        (ScrollMode::ClickDownUp, MouseButton::Left) => Some(ScrollDirection::Down),
        (ScrollMode::ClickDownUp, MouseButton::Right) => Some(ScrollDirection::Up),
        _ => None,
    }
}

impl ClickHoldScroller {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            scroll_amount_px: settings.scroll.scroll_amount_px,
            base_speed: settings.scroll.continuous_base_speed,
            acceleration: settings.scroll.continuous_acceleration,
            held: HeldButtons::default(),
            hold: None,
            accum: 0.0,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    pub fn accumulator(&self) -> f64 {
        self.accum
    }

    pub fn held_buttons(&self) -> HeldButtons {
        self.held
    }

    /// Seconds the current hold has lasted at `now`.
    pub fn held_seconds(&self, now: Instant) -> f64 {
        self.hold
            .map(|h| now.saturating_duration_since(h.started).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Ramped hold speed after `held_seconds`, capped at the ceiling.
    pub fn hold_speed(&self, held_seconds: f64) -> f64 {
        (self.base_speed + self.acceleration * held_seconds).min(HOLD_SPEED_CEILING)
    }

    fn click_batch(&self, direction: ScrollDirection) -> Option<WheelBatch> {
        WheelBatch::split_pixels(direction.sign() * self.scroll_amount_px)
    }

    fn press(&mut self, click: &ClickEvent, now: Instant) -> Option<WheelBatch> {
        match click.mode {
            ScrollMode::Hold => {
                let direction = button_direction(click.mode, click.button)?;
                if let Some(session) = self.hold.as_mut() {
                    session.direction = direction;
                } else {
                    debug!(zone = click.zone, ?direction, "Hold scroll started");
                    self.accum = 0.0;
                    self.hold = Some(HoldSession {
                        direction,
                        started: now,
                    });
                }
                None
            }
            mode if mode.is_split() => {
                if click.button == MouseButton::Middle {
                    return None;
                }
                let half = click.half?;
                self.click_batch(half.direction())
            }
            ScrollMode::ClickUpDown | ScrollMode::ClickDownUp => {
                let direction = button_direction(click.mode, click.button)?;
                self.click_batch(direction)
            }
            _ => None,
        }
    }

    fn release(&mut self) {
        if self.hold.is_none() {
            return;
        }
        // Another button still held keeps the session alive in its direction
        let remaining = if self.held.left {
            Some(ScrollDirection::Up)
        } else if self.held.right {
            Some(ScrollDirection::Down)
        } else {
            None
        };
        match remaining {
            Some(direction) => {
                if let Some(session) = self.hold.as_mut() {
                    session.direction = direction;
                }
            }
            None => {
                debug!("Hold scroll stopped");
                self.reset_hold();
            }
        }
    }

    fn reset_hold(&mut self) {
        self.hold = None;
        self.accum = 0.0;
    }
}

impl ScrollStrategy for ClickHoldScroller {
    fn configure(&mut self, settings: &Settings) {
        self.scroll_amount_px = settings.scroll.scroll_amount_px;
        self.base_speed = settings.scroll.continuous_base_speed;
        self.acceleration = settings.scroll.continuous_acceleration;
    }

    fn on_button(&mut self, click: &ClickEvent, now: Instant) -> Option<WheelBatch> {
        match click.action {
            ButtonAction::Down => {
                self.held.set(click.button, true);
                self.press(click, now)
            }
            ButtonAction::Up => {
                self.held.set(click.button, false);
                self.release();
                None
            }
        }
    }

    fn on_tick(&mut self, input: TickInput, now: Instant) -> Option<WheelBatch> {
        let session = self.hold?;
        let speed = self.hold_speed(self.held_seconds(now));
        self.accum += f64::from(session.direction.sign()) * speed * input.dt;

        let mut events = 0u32;
        let mut sign = 0;
        while self.accum.abs() >= HOLD_EMIT_THRESHOLD {
            sign = if self.accum > 0.0 { 1 } else { -1 };
            self.accum -= f64::from(sign) * HOLD_EMIT_THRESHOLD;
            events += 1;
        }

        WheelBatch::pixels(sign * HOLD_EMIT_THRESHOLD as i32).map(|batch| WheelBatch {
            events,
            ..batch
        })
    }

    fn reset(&mut self) {
        self.held = HeldButtons::default();
        self.reset_hold();
    }

    fn wants_ticks(&self) -> bool {
        self.hold.is_some()
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(HOLD_TICK_MS)
    }
}
