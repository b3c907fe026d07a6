//! Edit-mode gesture state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> DraggingZone     (left down inside an unlocked floating zone)
//! Idle -> ResizingZone     (left down on the zone's resize handle)
//!
//! Any -> Idle              (left up - commits the edit)
//! ```
//!
//! Only meaningful while the lifecycle is in Edit with hit-testing
//! suspended; leaving Edit always returns this to Idle.

use crate::types::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Moving a floating zone
    DraggingZone {
        zone: usize,
        /// Offset from the zone origin to the pointer at grab time
        grab_offset: Point,
    },

    /// Resizing a floating zone from its bottom-right handle
    ResizingZone {
        zone: usize,
        /// Zone size when the resize started
        start_size: (i32, i32),
        /// Pointer position when the resize started
        start_pos: Point,
    },
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingZone { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingZone { .. })
    }

    /// Zone being edited, if any.
    pub fn zone(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::DraggingZone { zone, .. } | Self::ResizingZone { zone, .. } => Some(*zone),
        }
    }
}
