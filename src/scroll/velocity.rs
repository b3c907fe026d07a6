//! Continuous velocity curve.
//!
//! Per tick: dead zone, sensitivity, exponential smoothing, nonlinear
//! acceleration, ceiling clamp, fractional accumulation, quantization into
//! whole wheel units and a per-tick throttle. Cursor movement down yields
//! negative units (scroll down), movement up yields positive units.

use super::{ScrollStrategy, TickInput};
use crate::constants::{MAX_BATCH_EVENTS, VELOCITY_CEILING, VELOCITY_EPSILON, VELOCITY_UNIT};
use crate::injection::WheelBatch;
use crate::router::ClickEvent;
use crate::settings::{EngineTuning, Settings};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct VelocityCurve {
    tuning: EngineTuning,
    v_smooth: f64,
    accum: f64,
}

impl Default for VelocityCurve {
    fn default() -> Self {
        Self::new(EngineTuning::default())
    }
}

impl VelocityCurve {
    pub fn new(tuning: EngineTuning) -> Self {
        Self {
            tuning,
            v_smooth: 0.0,
            accum: 0.0,
        }
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: EngineTuning) {
        self.tuning = tuning;
    }

    /// Feed one tick and return the signed wheel units to emit.
    pub fn update(&mut self, dy_px: i32, dt_sec: f64) -> i32 {
        let dy_px = if dy_px.abs() < self.tuning.dead_zone_px {
            0
        } else {
            dy_px
        };

        let v_raw = f64::from(dy_px) * self.tuning.sensitivity;

        let smoothing = self.tuning.smoothing;
        self.v_smooth = self.v_smooth * smoothing + v_raw * (1.0 - smoothing);

        let mut v_acc = 0.0;
        if self.v_smooth.abs() > VELOCITY_EPSILON {
            v_acc = self.v_smooth.signum()
                * self.v_smooth.abs().powf(self.tuning.acceleration_exponent);
        }

        // Anti-runaway clamp
        let v_acc = v_acc.clamp(-VELOCITY_CEILING, VELOCITY_CEILING);

        self.accum += v_acc * dt_sec;

        // Whole units leave the accumulator, anything past the batch cap is dropped
        let units = self.accum / VELOCITY_UNIT;
        self.accum = units.fract() * VELOCITY_UNIT;
        let limit = f64::from(MAX_BATCH_EVENTS);
        let mut events = -(units.trunc().clamp(-limit, limit) as i32);

        if self.tuning.max_events_per_sec > 0 {
            let max_per_tick = ((f64::from(self.tuning.max_events_per_sec) * dt_sec) as i32).max(1);
            events = events.clamp(-max_per_tick, max_per_tick);
        }

        events
    }

    pub fn smoothed_velocity(&self) -> f64 {
        self.v_smooth
    }

    pub fn accumulator(&self) -> f64 {
        self.accum
    }
}

impl ScrollStrategy for VelocityCurve {
    fn configure(&mut self, settings: &Settings) {
        self.set_tuning(settings.engine.clone());
    }

    fn on_button(&mut self, _click: &ClickEvent, _now: Instant) -> Option<WheelBatch> {
        None
    }

    fn on_tick(&mut self, input: TickInput, _now: Instant) -> Option<WheelBatch> {
        WheelBatch::notches(self.update(input.dy, input.dt))
    }

    fn reset(&mut self) {
        self.v_smooth = 0.0;
        self.accum = 0.0;
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tuning.tick_ms)
    }
}
