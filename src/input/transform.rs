//! Wheel observation - decide whether a physical wheel event is swallowed.

use crate::app::ScrollNice;
use crate::perf::{HookKind, measure};
use crate::profile_scope;
use crate::settings::WheelBlockMode;
use crate::types::WheelSample;
use tracing::info;

impl ScrollNice {
    /// Wheel hook entry point. Returns true to consume the event.
    pub fn handle_wheel(&mut self, sample: &WheelSample) -> bool {
        let (consume, elapsed_ms) = measure(|| self.should_block_wheel(sample));
        self.system.hook_stats.record(HookKind::Wheel, elapsed_ms);
        consume
    }

    /// Block decision for one wheel event.
    ///
    /// Synthetic events (our own included) always pass, as does everything
    /// while disabled, editing, suspended or with the bypass modifier held.
    /// A zone's own setting wins over the global mode while the event is
    /// inside that zone.
    pub fn should_block_wheel(&self, sample: &WheelSample) -> bool {
        profile_scope!("handle_wheel");

        let state = self.lifecycle.state();
        if sample.injected
            || !state.is_enabled()
            || state.is_editing()
            || self.system.fullscreen_suspended
        {
            return false;
        }

        let block = &self.settings.wheel_block;
        if block.bypass_modifier.is_held(&sample.modifiers) {
            return false;
        }

        let zone = self.router.hit_test(sample.position);
        if let Some(over) = zone
            .and_then(|index| self.router.zone(index))
            .and_then(|z| z.block_wheel)
        {
            return over;
        }

        if !block.engaged {
            return false;
        }
        match block.mode {
            WheelBlockMode::Off => false,
            WheelBlockMode::Global => true,
            WheelBlockMode::OutsideZoneOnly => zone.is_none(),
            WheelBlockMode::InsideZoneOnly => zone.is_some(),
        }
    }

    /// Flip the global wheel block, returning whether it is now engaged.
    pub fn toggle_wheel_block(&mut self) -> bool {
        let block = &mut self.settings.wheel_block;
        block.engaged = !block.engaged;
        let engaged = block.engaged;
        info!(engaged, mode = ?block.mode, "Wheel block toggled");
        self.notify_presenters();
        engaged
    }

    pub fn wheel_block_engaged(&self) -> bool {
        self.settings.wheel_block.engaged
    }
}
