//! Collaborator interfaces the engine is constructed with.
//!
//! The platform layer (input hook, SendInput-style injection, timers,
//! monitor enumeration, overlay and tray) lives outside this crate. The
//! engine only sees these traits, all called from the single input thread.

use crate::error::InjectionError;
use crate::geometry::ResolvedZone;
use crate::settings::SoundSettings;
use crate::state_machine::AppState;
use crate::types::{Rect, ScrollDirection, ZoneConfig};
use std::time::Duration;

/// Synthetic wheel-event primitive. Fire-and-forget.
pub trait WheelSink {
    /// Emit one wheel event with a signed platform delta.
    fn emit_wheel(&mut self, delta: i32) -> Result<(), InjectionError>;
}

/// Periodic tick source driving the scroll strategies.
///
/// Both calls must be idempotent.
pub trait TickSource {
    fn start_tick(&mut self, interval: Duration);
    fn stop_tick(&mut self);
}

/// Monitor and foreground-window metrics.
pub trait DisplaySource {
    /// Work area of monitor `index` (0 = primary), if it exists.
    fn work_area(&self, index: usize) -> Option<Rect>;

    /// Primary screen size, used when a monitor lookup fails.
    fn primary_screen_size(&self) -> Option<(i32, i32)>;

    /// True when the foreground window covers the whole primary screen.
    fn foreground_is_fullscreen(&self) -> bool {
        false
    }
}

/// Read-only view handed to presentation collaborators.
#[derive(Debug, Clone, Copy)]
pub struct PresentationSnapshot<'a> {
    pub zones: &'a [ResolvedZone],
    pub state: AppState,
    /// Index into `zones` of the zone under the pointer
    pub active_zone: Option<usize>,
    pub wheel_block_engaged: bool,
}

impl PresentationSnapshot<'_> {
    pub fn active(&self) -> Option<&ResolvedZone> {
        self.active_zone.and_then(|i| self.zones.get(i))
    }
}

/// Overlay/tray side of the application.
pub trait Presenter {
    /// Called after every effective transition or zone-set change.
    fn present(&mut self, snapshot: &PresentationSnapshot<'_>);

    /// Called when an edit-mode gesture committed a new zone rectangle.
    fn zone_edited(&mut self, _index: usize, _zone: &ZoneConfig) {}

    /// Called on a press that click-scrolled or started a hold, while click
    /// sounds are enabled. Playing the sound is up to the presenter.
    fn click_scrolled(&mut self, _direction: ScrollDirection, _sound: &SoundSettings) {}
}

/// Collaborator handles the engine is constructed with.
pub struct Collaborators {
    pub sink: Box<dyn WheelSink>,
    pub timer: Box<dyn TickSource>,
    pub display: Box<dyn DisplaySource>,
}

/// Tick source for hosts that drive ticks themselves.
#[derive(Debug, Default)]
pub struct NullTimer;

impl TickSource for NullTimer {
    fn start_tick(&mut self, _interval: Duration) {}
    fn stop_tick(&mut self) {}
}

/// Display source with fixed monitor rectangles.
#[derive(Debug, Clone)]
pub struct StaticDisplay {
    pub monitors: Vec<Rect>,
    pub fullscreen: bool,
}

impl StaticDisplay {
    pub fn single(width: i32, height: i32) -> Self {
        Self {
            monitors: vec![Rect::from_xywh(0, 0, width, height)],
            fullscreen: false,
        }
    }
}

impl DisplaySource for StaticDisplay {
    fn work_area(&self, index: usize) -> Option<Rect> {
        self.monitors.get(index).copied()
    }

    fn primary_screen_size(&self) -> Option<(i32, i32)> {
        self.monitors.first().map(|r| (r.width(), r.height()))
    }

    fn foreground_is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
