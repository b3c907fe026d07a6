//! Button-up handling - hold stop and edit commit.

use crate::app::ScrollNice;
use crate::profile_scope;
use crate::types::{ButtonAction, MouseButton, Point};
use std::time::Instant;

impl ScrollNice {
    pub(crate) fn handle_mouse_up(&mut self, button: MouseButton, pt: Point, now: Instant) {
        profile_scope!("handle_mouse_up");

        self.scroll.pointer = Some(pt);

        // Finalize a drag or resize
        if !self.edit.input_state.is_idle() {
            if button == MouseButton::Left {
                self.update_edit_gesture(pt);
                self.finish_edit_gesture();
            }
            return;
        }

        if !self.lifecycle.state().is_enabled() || self.edit_suspends_hit_testing() {
            return;
        }

        // Releases are routed even outside every zone so a hold always ends
        let Some(click) = self.router.route_button(button, ButtonAction::Up, pt) else {
            return;
        };
        self.dispatch_click(click, now);
    }
}
