//! Button-down handling - click scroll, hold start, edit grab.

use crate::app::ScrollNice;
use crate::input::InputState;
use crate::input::coords::CoordinateConverter;
use crate::perf::{HookKind, measure};
use crate::profile_scope;
use crate::router::ClickEvent;
use crate::scroll::button_direction;
use crate::settings::EditBehavior;
use crate::types::{ButtonAction, MouseButton, Point, ScrollDirection, ScrollMode};
use std::time::Instant;
use tracing::{debug, trace};

impl ScrollNice {
    /// Button hook entry point. Button events are never consumed.
    pub fn handle_button(
        &mut self,
        button: MouseButton,
        action: ButtonAction,
        pt: Point,
        now: Instant,
    ) {
        let ((), elapsed_ms) = measure(|| match action {
            ButtonAction::Down => self.handle_mouse_down(button, pt, now),
            ButtonAction::Up => self.handle_mouse_up(button, pt, now),
        });
        self.system.hook_stats.record(HookKind::Button, elapsed_ms);
    }

    fn handle_mouse_down(&mut self, button: MouseButton, pt: Point, now: Instant) {
        profile_scope!("handle_mouse_down");

        self.scroll.pointer = Some(pt);
        let state = self.lifecycle.state();
        if !state.is_enabled() || self.system.fullscreen_suspended {
            return;
        }

        if self.edit_suspends_hit_testing() {
            if button == MouseButton::Left {
                self.begin_edit_gesture(pt);
            }
            return;
        }

        let Some(click) = self.router.route_button(button, ButtonAction::Down, pt) else {
            return;
        };
        self.dispatch_click(click, now);
    }

    pub(crate) fn edit_suspends_hit_testing(&self) -> bool {
        self.lifecycle.state().is_editing()
            && self.settings.edit.behavior == EditBehavior::SuspendHitTesting
    }

    /// Hand a routed click to the strategy for its zone's mode.
    pub(crate) fn dispatch_click(&mut self, click: ClickEvent, now: Instant) {
        debug!(
            zone = click.zone,
            button = ?click.button,
            action = ?click.action,
            half = ?click.half,
            "Zone click"
        );

        let batch = self
            .scroll
            .strategies
            .for_mode(click.mode)
            .on_button(&click, now);
        if let Some(batch) = batch {
            let outcome = self.scroll.gate.submit(batch, now);
            trace!(emitted = outcome.emitted, dropped = outcome.dropped, "Click batch");
        }

        if click.action == ButtonAction::Down {
            let holding = self.scroll.strategies.click_hold.is_holding();
            let direction = match batch {
                Some(batch) => Some(batch.direction()),
                None if holding && click.mode == ScrollMode::Hold => {
                    button_direction(click.mode, click.button)
                }
                None => None,
            };
            if let Some(direction) = direction {
                self.click_feedback(direction);
            }
        }

        if self.scroll.strategies.click_hold.is_holding() {
            if self.scroll.hold_zone.is_none() {
                self.scroll.hold_zone = Some(click.zone);
            }
        } else {
            self.scroll.hold_zone = None;
        }
        self.sync_timer();
    }

    fn click_feedback(&mut self, direction: ScrollDirection) {
        let sound = &self.settings.sound;
        if !sound.enabled {
            return;
        }
        for presenter in &mut self.system.presenters {
            presenter.click_scrolled(direction, sound);
        }
    }

    /// Grab an unlocked floating zone for dragging, or for resizing when the
    /// press lands on its bottom-right handle.
    fn begin_edit_gesture(&mut self, pt: Point) {
        let Some(index) = self.router.hit_test(pt) else {
            return;
        };
        let Some(zone) = self.router.zone(index) else {
            return;
        };
        if !zone.floating || zone.locked {
            debug!(zone = index, locked = zone.locked, "Zone is not editable");
            return;
        }

        let local = CoordinateConverter::screen_to_zone(pt, zone.rect);
        self.edit.input_state = if CoordinateConverter::is_on_resize_handle(local, zone.rect) {
            InputState::ResizingZone {
                zone: index,
                start_size: (zone.rect.width(), zone.rect.height()),
                start_pos: pt,
            }
        } else {
            InputState::DraggingZone {
                zone: index,
                grab_offset: local,
            }
        };
        debug!(zone = index, gesture = ?self.edit.input_state, "Zone edit started");
    }
}
