//! Input entry points of the engine.
//!
//! The platform hook calls into these handlers synchronously for every
//! pointer, button and wheel event; the timer calls `handle_tick`. None of
//! them may block, since the hook sits in the system-wide input pipeline.
//!
//! ## Modules
//!
//! - `state` - Edit-mode gesture state machine
//! - `coords` - Screen/zone-local conversion and edit geometry helpers
//! - `drag` - Pointer moves: zone enter/leave, motion sessions, edit drag/resize
//! - `mouse_down` - Button-down handling (click scroll, hold start, edit grab)
//! - `mouse_up` - Button-up handling (hold stop, edit commit)
//! - `transform` - Wheel observation and the block decision
//! - `tick` - Timer ticks driving the active strategy

pub mod coords;
mod drag;
mod mouse_down;
mod mouse_up;
mod state;
mod tick;
mod transform;

pub use state::InputState;
