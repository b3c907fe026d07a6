//! Application state - the ScrollNice engine struct and its sub-structs.

use crate::injection::InjectionGate;
use crate::input::InputState;
use crate::perf::HookStats;
use crate::platform::{DisplaySource, Presenter, TickSource};
use crate::router::ZoneHitRouter;
use crate::scroll::Strategies;
use crate::settings::Settings;
use crate::settings_watcher::SettingsWatcher;
use crate::state_machine::LifecycleStateMachine;
use crate::types::Point;
use std::time::Duration;

/// The scroll engine.
///
/// One instance is constructed at process start and owns every core part.
/// All entry points are called from the thread running the platform event
/// loop, so no part of it is shared or locked.
pub struct ScrollNice {
    /// Current configuration snapshot, replaced whole on reload
    pub(crate) settings: Settings,
    pub(crate) router: ZoneHitRouter,
    pub(crate) lifecycle: LifecycleStateMachine,
    pub(crate) scroll: ScrollState,
    pub(crate) edit: EditState,
    pub(crate) system: SystemState,
}

// =============================================================================
// Sub-structs
// =============================================================================

/// Scroll generation state - strategies, injection and the tick timer
pub struct ScrollState {
    pub strategies: Strategies,
    pub gate: InjectionGate,
    pub timer: Box<dyn TickSource>,
    /// Interval the timer is running at, None while stopped
    pub ticking: Option<Duration>,
    /// Latest pointer position seen by the hook
    pub pointer: Option<Point>,
    /// Pointer position at the previous velocity tick
    pub last_tick_pos: Option<Point>,
    /// Zone owning the current hold session
    pub hold_zone: Option<usize>,
}

/// Edit-mode state
#[derive(Debug, Default)]
pub struct EditState {
    pub input_state: InputState,
    /// Next zone visited by the round-robin zone toggle
    pub next_toggle: usize,
}

/// Collaborators and bookkeeping outside the scroll path
pub struct SystemState {
    pub display: Box<dyn DisplaySource>,
    pub presenters: Vec<Box<dyn Presenter>>,
    pub hook_stats: HookStats,
    pub settings_watcher: Option<SettingsWatcher>,
    /// Set while a fullscreen foreground window suspends zone handling
    pub fullscreen_suspended: bool,
}
