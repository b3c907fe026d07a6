//! Core types for the zone scrolling pipeline.
//!
//! This module defines the fundamental data structures shared by the
//! geometry resolver, the hit router and the scroll strategies: screen
//! points and rectangles, zone configuration, scroll modes and the raw
//! input samples delivered by the platform hook.

use crate::constants::{
    DEFAULT_EDGE_THICKNESS, DEFAULT_FLOATING_RECT, PIXELS_PER_NOTCH, WHEEL_DELTA,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Screen Geometry
// ============================================================================

/// A point in absolute screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A screen rectangle with half-open bounds: `left..right` x `top..bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Half-open containment: the right and bottom edges are exclusive so
    /// adjacent rectangles never both claim a shared boundary.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }
}

// ============================================================================
// Zone Configuration
// ============================================================================

/// Monitor edge an edge zone is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Extent of an edge zone along its edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneSpan {
    /// Fixed length in pixels
    Fixed { height: i32 },
    /// Percentage of the monitor extent along the edge
    Percent { height_percent: f32 },
}

impl Default for ZoneSpan {
    fn default() -> Self {
        Self::Percent {
            height_percent: 100.0,
        }
    }
}

/// Where a zone lives on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneKind {
    Edge {
        edge: Edge,
        thickness: i32,
        #[serde(flatten)]
        span: ZoneSpan,
    },
    Floating {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl ZoneKind {
    pub fn is_floating(&self) -> bool {
        matches!(self, ZoneKind::Floating { .. })
    }
}

/// How activity inside a zone becomes scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Left click scrolls up, right click scrolls down
    #[default]
    #[serde(alias = "click_lr")]
    ClickUpDown,
    /// Left click scrolls down, right click scrolls up
    #[serde(alias = "click_rl")]
    ClickDownUp,
    /// Left half scrolls up, right half scrolls down
    #[serde(alias = "split_lr")]
    SplitLeftRight,
    /// Top half scrolls up, bottom half scrolls down
    #[serde(alias = "split_tb")]
    SplitTopBottom,
    /// Holding a button scrolls with ramping speed
    #[serde(alias = "continuous")]
    Hold,
    /// Pointer movement drives a velocity curve
    Velocity,
}

impl ScrollMode {
    pub fn is_split(&self) -> bool {
        matches!(self, ScrollMode::SplitLeftRight | ScrollMode::SplitTopBottom)
    }

    /// True for the motion-driven variant (Hover/Active lifecycle).
    pub fn is_motion(&self) -> bool {
        matches!(self, ScrollMode::Velocity)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClickUpDown => "click_up_down",
            Self::ClickDownUp => "click_down_up",
            Self::SplitLeftRight => "split_left_right",
            Self::SplitTopBottom => "split_top_bottom",
            Self::Hold => "hold",
            Self::Velocity => "velocity",
        }
    }
}

/// Declarative configuration of a single zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub kind: ZoneKind,
    /// Monitor index, 0 is the primary monitor
    pub monitor: usize,
    /// Overrides the global scroll mode for this zone
    pub scroll_mode: Option<ScrollMode>,
    /// Suppresses drag/resize in edit mode
    pub locked: bool,
    /// Disabled zones never match a hit test
    pub enabled: bool,
    /// Overrides the global wheel-block decision while the pointer is inside
    pub block_wheel: Option<bool>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::edge(Edge::Right, DEFAULT_EDGE_THICKNESS, ZoneSpan::default())
    }
}

impl ZoneConfig {
    fn with_kind(name: &str, kind: ZoneKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            monitor: 0,
            scroll_mode: None,
            locked: false,
            enabled: true,
            block_wheel: None,
        }
    }

    pub fn edge(edge: Edge, thickness: i32, span: ZoneSpan) -> Self {
        Self::with_kind(
            "Edge",
            ZoneKind::Edge {
                edge,
                thickness,
                span,
            },
        )
    }

    pub fn floating(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::with_kind(
            "Floating",
            ZoneKind::Floating {
                x,
                y,
                width,
                height,
            },
        )
    }

    pub fn default_floating() -> Self {
        let (x, y, w, h) = DEFAULT_FLOATING_RECT;
        Self::floating(x, y, w, h)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_mode(mut self, mode: ScrollMode) -> Self {
        self.scroll_mode = Some(mode);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_block_wheel(mut self, block: bool) -> Self {
        self.block_wheel = Some(block);
        self
    }
}

// ============================================================================
// Raw Input
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Down,
    Up,
}

/// Keyboard modifiers held while a wheel event arrived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub control: bool,
    pub shift: bool,
}

/// A physical (or injected) wheel event observed by the hook.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelSample {
    pub position: Point,
    pub delta: i32,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Set by the platform for synthetic events, including our own
    #[serde(default)]
    pub injected: bool,
}

// ============================================================================
// Scroll Output
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Wheel sign convention: positive deltas scroll up.
    pub fn sign(&self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Which half of a split zone a point falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneHalf {
    Top,
    Bottom,
    Left,
    Right,
}

impl ZoneHalf {
    pub fn direction(&self) -> ScrollDirection {
        match self {
            Self::Top | Self::Left => ScrollDirection::Up,
            Self::Bottom | Self::Right => ScrollDirection::Down,
        }
    }
}

/// Convert a pixel scroll amount into a signed platform wheel delta.
///
/// Saturates instead of overflowing for huge amounts.
pub fn pixels_to_wheel_delta(px: i32) -> i32 {
    let delta = i64::from(px) * i64::from(WHEEL_DELTA) / i64::from(PIXELS_PER_NOTCH);
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
