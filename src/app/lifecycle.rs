//! Engine lifecycle - construction, state transitions and settings reload.

use super::state::{EditState, ScrollNice, ScrollState, SystemState};
use crate::error::WatchError;
use crate::geometry::{ResolvedZone, ZoneGeometryResolver};
use crate::injection::InjectionGate;
use crate::input::InputState;
use crate::perf::HookStats;
use crate::platform::{Collaborators, PresentationSnapshot, Presenter};
use crate::profile_scope;
use crate::router::ZoneHitRouter;
use crate::scroll::{ScrollStrategy, Strategies};
use crate::settings::Settings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::state_machine::{AppState, LifecycleStateMachine, StateListener, Transition, Trigger};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

impl ScrollNice {
    pub fn new(settings: Settings, platform: Collaborators) -> Self {
        let settings = settings.sanitized();
        let zones = ZoneGeometryResolver::resolve_all(&settings, platform.display.as_ref());

        let mut lifecycle = LifecycleStateMachine::new();
        if !settings.enabled {
            lifecycle.set_enabled(false);
        }

        info!(
            zones = zones.len(),
            mode = settings.scroll.mode.as_str(),
            enabled = settings.enabled,
            "Scroll engine started"
        );

        Self {
            router: ZoneHitRouter::new(zones),
            lifecycle,
            scroll: ScrollState {
                strategies: Strategies::from_settings(&settings),
                gate: InjectionGate::new(platform.sink, settings.engine.max_events_per_sec),
                timer: platform.timer,
                ticking: None,
                pointer: None,
                last_tick_pos: None,
                hold_zone: None,
            },
            edit: EditState::default(),
            system: SystemState {
                display: platform.display,
                presenters: Vec::new(),
                hook_stats: HookStats::new(),
                settings_watcher: None,
                fullscreen_suspended: false,
            },
            settings,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Fire a lifecycle trigger and run the engine-side effects of the
    /// resulting transition.
    pub(crate) fn fire(&mut self, trigger: Trigger) -> Option<Transition> {
        let transition = self.lifecycle.fire(trigger)?;
        self.on_transition(transition);
        Some(transition)
    }

    fn on_transition(&mut self, t: Transition) {
        if t.entered(AppState::Disabled) {
            info!("Scrolling disabled");
        } else if t.left(AppState::Disabled) {
            info!("Scrolling enabled");
        }
        if t.entered(AppState::Edit) {
            info!(behavior = ?self.settings.edit.behavior, "Edit mode on");
        }

        if t.entered(AppState::Active) {
            self.scroll.last_tick_pos = self.scroll.pointer;
        }
        if t.old.is_engaged() && !t.new.is_engaged() {
            self.scroll.strategies.velocity.reset();
        }
        if matches!(t.new, AppState::Disabled | AppState::Edit) {
            self.end_hold();
            self.scroll.strategies.reset_all();
        }
        if t.left(AppState::Edit) {
            self.finish_edit_gesture();
            info!("Edit mode off");
        }
        if t.entered(AppState::Disabled) || t.left(AppState::Disabled) || t.left(AppState::Edit) {
            self.router.reset_tracking();
            self.system.fullscreen_suspended = false;
        }

        self.sync_timer();
        self.notify_presenters();
    }

    /// Interval the timer should run at right now.
    fn desired_tick(&self) -> Option<Duration> {
        let strategies = &self.scroll.strategies;
        if self.lifecycle.state() == AppState::Active {
            Some(strategies.velocity.tick_interval())
        } else if strategies.click_hold.wants_ticks() {
            Some(strategies.click_hold.tick_interval())
        } else {
            None
        }
    }

    /// Start, retune or stop the timer to match what the strategies need.
    pub(crate) fn sync_timer(&mut self) {
        let desired = self.desired_tick();
        if desired == self.scroll.ticking {
            return;
        }
        match desired {
            Some(interval) => {
                debug!(interval_ms = interval.as_millis() as u64, "Tick timer started");
                self.scroll.timer.start_tick(interval);
            }
            None => {
                debug!("Tick timer stopped");
                self.scroll.timer.stop_tick();
            }
        }
        self.scroll.ticking = desired;
    }

    /// End any motion session and any hold.
    pub(crate) fn end_session(&mut self) {
        if self.lifecycle.state().is_engaged() {
            self.fire(Trigger::LeaveZone);
        }
        self.end_hold();
    }

    pub(crate) fn end_hold(&mut self) {
        if self.scroll.strategies.click_hold.is_holding() {
            debug!(zone = ?self.scroll.hold_zone, "Hold ended");
        }
        self.scroll.strategies.click_hold.reset();
        self.scroll.hold_zone = None;
        self.sync_timer();
    }

    pub(crate) fn notify_presenters(&mut self) {
        if self.system.presenters.is_empty() {
            return;
        }
        let snapshot = PresentationSnapshot {
            zones: self.router.zones(),
            state: self.lifecycle.state(),
            active_zone: self.router.current(),
            wheel_block_engaged: self.settings.wheel_block.engaged,
        };
        for presenter in &mut self.system.presenters {
            presenter.present(&snapshot);
        }
    }

    // =========================================================================
    // Control surface
    // =========================================================================

    /// Returns true if the state changed.
    pub fn set_enabled(&mut self, on: bool) -> bool {
        self.settings.enabled = on;
        self.fire(Trigger::SetEnabled(on)).is_some()
    }

    /// Flip enabled/disabled, returning the new enabled flag.
    pub fn toggle_enabled(&mut self) -> bool {
        let on = !self.lifecycle.state().is_enabled();
        self.set_enabled(on);
        on
    }

    /// Enter or leave edit mode, returning whether edit mode is now on.
    pub fn toggle_edit(&mut self) -> bool {
        self.fire(Trigger::ToggleEdit);
        self.lifecycle.state().is_editing()
    }

    /// Replace the whole configuration snapshot.
    pub fn apply_settings(&mut self, settings: Settings) {
        profile_scope!("apply_settings");

        self.end_session();
        self.edit.input_state = InputState::Idle;

        self.settings = settings.sanitized();
        self.scroll.strategies.reset_all();
        self.scroll.strategies.configure(&self.settings);
        self.scroll
            .gate
            .set_max_events_per_sec(self.settings.engine.max_events_per_sec);
        self.system.fullscreen_suspended = false;
        self.resolve_zones();

        info!(
            zones = self.settings.zones.len(),
            mode = self.settings.scroll.mode.as_str(),
            "Settings applied"
        );

        let enabled = self.settings.enabled;
        let transitioned = enabled != self.lifecycle.state().is_enabled() && self.set_enabled(enabled);
        if !transitioned {
            self.notify_presenters();
        }
        self.sync_timer();
    }

    /// Re-resolve zone rectangles, e.g. after a monitor change.
    pub fn refresh_geometry(&mut self) {
        self.end_session();
        self.resolve_zones();
        self.notify_presenters();
    }

    pub(crate) fn resolve_zones(&mut self) {
        let zones = ZoneGeometryResolver::resolve_all(&self.settings, self.system.display.as_ref());
        self.router.set_zones(zones);
    }

    /// Start watching `path` for settings changes.
    pub fn watch_settings(&mut self, path: PathBuf) -> Result<(), WatchError> {
        self.system.settings_watcher = Some(SettingsWatcher::new(path)?);
        Ok(())
    }

    /// Check for settings file changes and reload if needed.
    /// Returns true if new settings were applied.
    pub fn check_settings_reload(&mut self) -> bool {
        let Some(watcher) = self.system.settings_watcher.as_mut() else {
            return false;
        };
        let Some(event) = watcher.poll() else {
            return false;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                let path = watcher.path().to_path_buf();
                info!(path = %path.display(), "Settings file changed, reloading");
                match Settings::load_from(&path) {
                    Ok(settings) => {
                        self.apply_settings(settings);
                        true
                    }
                    Err(e) => {
                        warn!(error = %e, "Settings reload failed, keeping current settings");
                        false
                    }
                }
            }
            SettingsEvent::Deleted => {
                warn!("Settings file deleted, keeping current settings");
                false
            }
            SettingsEvent::Error(e) => {
                error!("Settings watch error: {}", e);
                false
            }
        }
    }

    // =========================================================================
    // Observers and accessors
    // =========================================================================

    pub fn add_state_listener(&mut self, listener: Box<dyn StateListener>) {
        self.lifecycle.add_listener(listener);
    }

    /// Register a presenter and hand it the current snapshot.
    pub fn add_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.system.presenters.push(presenter);
        self.notify_presenters();
    }

    pub fn state(&self) -> AppState {
        self.lifecycle.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn zones(&self) -> &[ResolvedZone] {
        self.router.zones()
    }

    /// Zone under the pointer.
    pub fn active_zone(&self) -> Option<usize> {
        self.router.current()
    }

    /// Interval the tick timer is running at.
    pub fn ticking(&self) -> Option<Duration> {
        self.scroll.ticking
    }

    pub fn edit_gesture(&self) -> InputState {
        self.edit.input_state
    }

    pub fn hook_stats(&self) -> &HookStats {
        &self.system.hook_stats
    }

    /// Wheel events dropped by the injection budget so far.
    pub fn dropped_events(&self) -> u64 {
        self.scroll.gate.dropped_total()
    }

    pub fn is_fullscreen_suspended(&self) -> bool {
        self.system.fullscreen_suspended
    }
}
