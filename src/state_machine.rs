//! Application lifecycle state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Any (not Disabled) -> Disabled   SetEnabled(false)
//! Disabled -> Idle                 SetEnabled(true)
//! Idle -> Hover                    EnterZone (motion-driven zones)
//! Hover | Active -> Active         MovementInZone
//! Hover | Active -> Idle           LeaveZone
//! Edit -> Idle                     ToggleEdit
//! Any (not Disabled) -> Edit       ToggleEdit
//! ```
//!
//! Every other (state, trigger) pair is a no-op. Listeners are notified
//! exactly once per effective transition, synchronously, before the
//! triggering call returns.

use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AppState {
    Disabled,
    #[default]
    Idle,
    Hover,
    Active,
    Edit,
}

impl AppState {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit)
    }

    /// Hover or Active: the pointer is engaged with a motion-driven zone.
    pub fn is_engaged(&self) -> bool {
        matches!(self, Self::Hover | Self::Active)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    SetEnabled(bool),
    EnterZone,
    MovementInZone,
    LeaveZone,
    ToggleEdit,
}

/// An effective state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub old: AppState,
    pub new: AppState,
}

impl Transition {
    pub fn left(&self, state: AppState) -> bool {
        self.old == state && self.new != state
    }

    pub fn entered(&self, state: AppState) -> bool {
        self.new == state && self.old != state
    }
}

/// Observer of lifecycle transitions.
pub trait StateListener {
    fn on_transition(&mut self, transition: Transition);
}

impl<F: FnMut(Transition)> StateListener for F {
    fn on_transition(&mut self, transition: Transition) {
        self(transition)
    }
}

#[derive(Default)]
pub struct LifecycleStateMachine {
    state: AppState,
    listeners: Vec<Box<dyn StateListener>>,
}

impl LifecycleStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn add_listener(&mut self, listener: Box<dyn StateListener>) {
        self.listeners.push(listener);
    }

    /// Target state for `trigger` from `state`, or None for a no-op.
    pub fn next_state(state: AppState, trigger: Trigger) -> Option<AppState> {
        use AppState::*;
        let next = match (state, trigger) {
            (Disabled, Trigger::SetEnabled(true)) => Idle,
            (s, Trigger::SetEnabled(false)) if s != Disabled => Disabled,
            (Idle, Trigger::EnterZone) => Hover,
            (Hover | Active, Trigger::MovementInZone) => Active,
            (Hover | Active, Trigger::LeaveZone) => Idle,
            (Edit, Trigger::ToggleEdit) => Idle,
            (s, Trigger::ToggleEdit) if s != Disabled => Edit,
            _ => return None,
        };
        (next != state).then_some(next)
    }

    /// Apply `trigger`, notifying listeners if the state changed.
    pub fn fire(&mut self, trigger: Trigger) -> Option<Transition> {
        let new = Self::next_state(self.state, trigger)?;
        let transition = Transition {
            old: self.state,
            new,
        };
        self.state = new;
        debug!(old = ?transition.old, new = ?transition.new, ?trigger, "State transition");
        for listener in &mut self.listeners {
            listener.on_transition(transition);
        }
        Some(transition)
    }

    pub fn set_enabled(&mut self, on: bool) -> Option<Transition> {
        self.fire(Trigger::SetEnabled(on))
    }

    pub fn toggle_enabled(&mut self) -> Option<Transition> {
        let on = !self.state.is_enabled();
        self.set_enabled(on)
    }

    pub fn toggle_edit(&mut self) -> Option<Transition> {
        self.fire(Trigger::ToggleEdit)
    }
}
