//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - Recording collaborators: `RecordingSink`, `ManualTimer`, `FixedDisplay`,
//!   `RecordingPresenter`
//! - `TestSettingsBuilder` - Builder pattern for settings snapshots
//! - `TestEngine` - an engine wired to recording collaborators

use scrollnice::ScrollNice;
use scrollnice::error::InjectionError;
use scrollnice::platform::{
    Collaborators, DisplaySource, PresentationSnapshot, Presenter, TickSource, WheelSink,
};
use scrollnice::settings::{EditBehavior, Settings, SoundSettings, WheelBlockMode};
use scrollnice::state_machine::AppState;
use scrollnice::types::{
    ButtonAction, MouseButton, Point, Rect, ScrollDirection, ScrollMode, ZoneConfig,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

// ============================================================================
// Recording collaborators
// ============================================================================

/// Wheel sink recording every emitted delta.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub deltas: Rc<RefCell<Vec<i32>>>,
}

impl WheelSink for RecordingSink {
    fn emit_wheel(&mut self, delta: i32) -> Result<(), InjectionError> {
        self.deltas.borrow_mut().push(delta);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TimerLog {
    pub running: Option<Duration>,
    pub starts: usize,
    pub stops: usize,
}

/// Timer that only records start/stop calls; tests tick by hand.
#[derive(Clone, Default)]
pub struct ManualTimer {
    pub log: Rc<RefCell<TimerLog>>,
}

impl TickSource for ManualTimer {
    fn start_tick(&mut self, interval: Duration) {
        let mut log = self.log.borrow_mut();
        log.running = Some(interval);
        log.starts += 1;
    }

    fn stop_tick(&mut self) {
        let mut log = self.log.borrow_mut();
        log.running = None;
        log.stops += 1;
    }
}

/// Display with fixed monitors and a switchable fullscreen flag.
#[derive(Clone)]
pub struct FixedDisplay {
    pub monitors: Vec<Rect>,
    pub fullscreen: Rc<Cell<bool>>,
}

impl FixedDisplay {
    pub fn single(width: i32, height: i32) -> Self {
        Self {
            monitors: vec![Rect::from_xywh(0, 0, width, height)],
            fullscreen: Rc::new(Cell::new(false)),
        }
    }
}

impl DisplaySource for FixedDisplay {
    fn work_area(&self, index: usize) -> Option<Rect> {
        self.monitors.get(index).copied()
    }

    fn primary_screen_size(&self) -> Option<(i32, i32)> {
        self.monitors.first().map(|r| (r.width(), r.height()))
    }

    fn foreground_is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }
}

/// One presentation snapshot, owned.
#[derive(Clone, Debug, PartialEq)]
pub struct Presented {
    pub state: AppState,
    pub active_zone: Option<usize>,
    pub zone_count: usize,
    pub zone_rects: Vec<Rect>,
    pub wheel_block_engaged: bool,
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub presented: Rc<RefCell<Vec<Presented>>>,
    pub edited: Rc<RefCell<Vec<(usize, ZoneConfig)>>>,
    pub clicks: Rc<RefCell<Vec<ScrollDirection>>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, snapshot: &PresentationSnapshot<'_>) {
        self.presented.borrow_mut().push(Presented {
            state: snapshot.state,
            active_zone: snapshot.active_zone,
            zone_count: snapshot.zones.len(),
            zone_rects: snapshot.zones.iter().map(|z| z.rect).collect(),
            wheel_block_engaged: snapshot.wheel_block_engaged,
        });
    }

    fn zone_edited(&mut self, index: usize, zone: &ZoneConfig) {
        self.edited.borrow_mut().push((index, zone.clone()));
    }

    fn click_scrolled(&mut self, direction: ScrollDirection, _sound: &SoundSettings) {
        self.clicks.borrow_mut().push(direction);
    }
}

// ============================================================================
// TestSettingsBuilder
// ============================================================================

/// Builder for settings snapshots with deterministic tuning.
///
/// Defaults to no smoothing, unit sensitivity, linear acceleration and no
/// injection budget, so velocity output is easy to predict.
pub struct TestSettingsBuilder {
    settings: Settings,
}

impl Default for TestSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSettingsBuilder {
    pub fn new() -> Self {
        let mut settings = Settings::default();
        settings.zones.clear();
        settings.engine.smoothing = 0.0;
        settings.engine.sensitivity = 1.0;
        settings.engine.acceleration_exponent = 1.0;
        settings.engine.max_events_per_sec = 0;
        Self { settings }
    }

    pub fn with_zone(mut self, zone: ZoneConfig) -> Self {
        self.settings.zones.push(zone);
        self
    }

    pub fn with_mode(mut self, mode: ScrollMode) -> Self {
        self.settings.scroll.mode = mode;
        self
    }

    pub fn with_scroll_amount(mut self, px: i32) -> Self {
        self.settings.scroll.scroll_amount_px = px;
        self
    }

    pub fn with_max_events_per_sec(mut self, max: u32) -> Self {
        self.settings.engine.max_events_per_sec = max;
        self
    }

    pub fn with_wheel_block(mut self, mode: WheelBlockMode, engaged: bool) -> Self {
        self.settings.wheel_block.mode = mode;
        self.settings.wheel_block.engaged = engaged;
        self
    }

    pub fn with_edit_behavior(mut self, behavior: EditBehavior) -> Self {
        self.settings.edit.behavior = behavior;
        self
    }

    pub fn with_fullscreen_suspend(mut self, on: bool) -> Self {
        self.settings.exclusions.auto_suspend_fullscreen = on;
        self
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.settings.sound.enabled = enabled;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.settings.enabled = false;
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

// ============================================================================
// TestEngine
// ============================================================================

/// Engine wired to recording collaborators on a 1920x1080 screen.
pub struct TestEngine {
    pub engine: ScrollNice,
    pub sink: RecordingSink,
    pub timer: ManualTimer,
    pub display: FixedDisplay,
    pub presenter: RecordingPresenter,
    pub t0: Instant,
}

impl TestEngine {
    pub fn new(settings: Settings) -> Self {
        let sink = RecordingSink::default();
        let timer = ManualTimer::default();
        let display = FixedDisplay::single(1920, 1080);
        let presenter = RecordingPresenter::default();

        let mut engine = ScrollNice::new(
            settings,
            Collaborators {
                sink: Box::new(sink.clone()),
                timer: Box::new(timer.clone()),
                display: Box::new(display.clone()),
            },
        );
        engine.add_presenter(Box::new(presenter.clone()));

        Self {
            engine,
            sink,
            timer,
            display,
            presenter,
            t0: Instant::now(),
        }
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        let now = self.t0;
        self.engine.handle_pointer_move(Point::new(x, y), now);
    }

    pub fn press(&mut self, button: MouseButton, x: i32, y: i32, ms: u64) {
        let now = self.at(ms);
        self.engine
            .handle_button(button, ButtonAction::Down, Point::new(x, y), now);
    }

    pub fn release(&mut self, button: MouseButton, x: i32, y: i32, ms: u64) {
        let now = self.at(ms);
        self.engine
            .handle_button(button, ButtonAction::Up, Point::new(x, y), now);
    }

    pub fn tick(&mut self, ms: u64) {
        let now = self.at(ms);
        self.engine.handle_tick(now);
    }

    pub fn deltas(&self) -> Vec<i32> {
        self.sink.deltas.borrow().clone()
    }

    pub fn timer_running(&self) -> Option<Duration> {
        self.timer.log.borrow().running
    }

    pub fn clicks(&self) -> Vec<ScrollDirection> {
        self.presenter.clicks.borrow().clone()
    }

    pub fn last_presented(&self) -> Option<Presented> {
        self.presenter.presented.borrow().last().cloned()
    }
}

/// A floating zone at `(x, y)` with the given size and mode.
pub fn floating(x: i32, y: i32, width: i32, height: i32, mode: ScrollMode) -> ZoneConfig {
    ZoneConfig::floating(x, y, width, height).with_mode(mode)
}
