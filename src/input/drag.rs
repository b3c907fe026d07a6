//! Pointer moves - zone enter/leave, motion sessions, edit drag and resize.
//!
//! ## Performance Notes
//!
//! This runs for every pointer sample the hook sees, system-wide. Outside
//! edit mode it is one R-tree point query plus a few comparisons and
//! allocates nothing; presenters are only notified when the zone under
//! the pointer changes.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::app::ScrollNice;
use crate::input::InputState;
use crate::input::coords::CoordinateConverter;
use crate::perf::{HookKind, measure};
use crate::profile_scope;
use crate::router::ZoneHitRouter;
use crate::settings::EditBehavior;
use crate::state_machine::Trigger;
use crate::types::Point;
use std::time::Instant;
use tracing::{debug, info};

impl ScrollNice {
    /// Pointer-move hook entry point. Pointer moves are never consumed.
    pub fn handle_pointer_move(&mut self, pt: Point, now: Instant) {
        let ((), elapsed_ms) = measure(|| self.pointer_move(pt, now));
        self.system
            .hook_stats
            .record(HookKind::PointerMove, elapsed_ms);
    }

    fn pointer_move(&mut self, pt: Point, _now: Instant) {
        profile_scope!("handle_pointer_move");

        self.scroll.pointer = Some(pt);
        let state = self.lifecycle.state();
        if !state.is_enabled() || self.check_fullscreen_suspend() {
            return;
        }

        if state.is_editing() {
            if !self.edit.input_state.is_idle() {
                self.update_edit_gesture(pt);
            }
            if self.settings.edit.behavior == EditBehavior::SuspendHitTesting {
                return;
            }
        }

        let route = self.router.route_move(pt);
        let mut transitioned = false;

        if let Some(left) = route.left {
            transitioned |= self.leave_zone(left);
        }
        if let Some(entered) = route.entered {
            transitioned |= self.enter_zone(entered);
        } else if route.inside.is_some() && self.lifecycle.state().is_engaged() {
            let dy = ZoneHitRouter::suppress_jitter(route.dy, self.settings.engine.dead_zone_px);
            if dy != 0 {
                transitioned |= self.fire(Trigger::MovementInZone).is_some();
            }
        }

        if route.changed_zone() && !transitioned {
            self.notify_presenters();
        }
    }

    /// Returns true if a lifecycle transition fired.
    fn enter_zone(&mut self, index: usize) -> bool {
        let Some(mode) = self.router.zone(index).map(|z| z.mode) else {
            return false;
        };
        debug!(zone = index, mode = mode.as_str(), "Entered zone");
        mode.is_motion() && self.fire(Trigger::EnterZone).is_some()
    }

    /// Returns true if a lifecycle transition fired.
    fn leave_zone(&mut self, index: usize) -> bool {
        debug!(zone = index, "Left zone");
        if self.scroll.hold_zone == Some(index) {
            self.end_hold();
        }
        self.fire(Trigger::LeaveZone).is_some()
    }

    /// Suspend zone handling while a fullscreen window is in the foreground.
    /// Returns true while suspended.
    fn check_fullscreen_suspend(&mut self) -> bool {
        let fullscreen = self.settings.exclusions.auto_suspend_fullscreen
            && self.system.display.foreground_is_fullscreen();

        if fullscreen && !self.system.fullscreen_suspended {
            info!("Fullscreen window in foreground, suspending zones");
            self.end_session();
            self.router.reset_tracking();
            self.system.fullscreen_suspended = true;
            self.notify_presenters();
        } else if !fullscreen && self.system.fullscreen_suspended {
            info!("Fullscreen window gone, resuming zones");
            self.system.fullscreen_suspended = false;
        }
        fullscreen
    }

    /// Apply the pointer position to the running drag or resize.
    pub(crate) fn update_edit_gesture(&mut self, pt: Point) {
        profile_scope!("zone_edit");

        match self.edit.input_state {
            InputState::Idle => {}
            InputState::DraggingZone { zone, grab_offset } => {
                let origin = Point::new(pt.x - grab_offset.x, pt.y - grab_offset.y);
                if self.move_zone(zone, origin) {
                    self.notify_presenters();
                }
            }
            InputState::ResizingZone {
                zone,
                start_size,
                start_pos,
            } => {
                let delta = Point::new(pt.x - start_pos.x, pt.y - start_pos.y);
                let (width, height) = CoordinateConverter::resized(start_size, delta);
                if self.resize_zone(zone, width, height) {
                    self.notify_presenters();
                }
            }
        }
    }
}
