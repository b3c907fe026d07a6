//! Zone hit routing.
//!
//! Classifies raw pointer samples and button transitions against the
//! resolved zone set. Hit testing goes through the R-tree in
//! [`SpatialIndex`]; the router only tracks which zone the pointer is in,
//! so it can report enter and leave edges. It never touches lifecycle
//! state: the engine decides what a route means.

use crate::geometry::ResolvedZone;
use crate::input::coords::CoordinateConverter;
use crate::spatial_index::SpatialIndex;
use crate::types::{ButtonAction, MouseButton, Point, ScrollMode, ZoneHalf};
use tracing::debug;

/// A button transition resolved against a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// Zone index in configured order
    pub zone: usize,
    pub mode: ScrollMode,
    pub button: MouseButton,
    pub action: ButtonAction,
    /// Pointer position relative to the zone origin
    pub local: Point,
    /// Only classified for split modes
    pub half: Option<ZoneHalf>,
}

/// Outcome of routing one pointer sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveRoute {
    /// Zone the pointer just left
    pub left: Option<usize>,
    /// Zone the pointer just entered
    pub entered: Option<usize>,
    /// Zone under the pointer after this sample
    pub inside: Option<usize>,
    /// Raw vertical delta since the previous sample
    pub dy: i32,
}

impl MoveRoute {
    pub fn changed_zone(&self) -> bool {
        self.left.is_some() || self.entered.is_some()
    }
}

#[derive(Default)]
pub struct ZoneHitRouter {
    zones: Vec<ResolvedZone>,
    index: SpatialIndex,
    current: Option<usize>,
    pressed: Option<usize>,
    last_pos: Option<Point>,
}

impl ZoneHitRouter {
    pub fn new(zones: Vec<ResolvedZone>) -> Self {
        let mut router = Self::default();
        router.set_zones(zones);
        router
    }

    /// Replace the zone set in one step. Tracking is cleared since indices
    /// may now refer to different zones.
    pub fn set_zones(&mut self, zones: Vec<ResolvedZone>) {
        self.index.rebuild(&zones);
        debug!(zones = zones.len(), hittable = self.index.len(), "Zone index rebuilt");
        self.zones = zones;
        self.current = None;
        self.pressed = None;
    }

    pub fn zones(&self) -> &[ResolvedZone] {
        &self.zones
    }

    pub fn zone(&self, index: usize) -> Option<&ResolvedZone> {
        self.zones.get(index)
    }

    /// Zone the pointer is currently in.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last_pos
    }

    /// First enabled zone containing `pt`.
    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        self.index.first_at(pt)
    }

    /// Which half of `zone` a zone-local point falls in. None outside split modes.
    pub fn classify_half(zone: &ResolvedZone, local: Point) -> Option<ZoneHalf> {
        match zone.mode {
            ScrollMode::SplitTopBottom => Some(if local.y < zone.rect.height() / 2 {
                ZoneHalf::Top
            } else {
                ZoneHalf::Bottom
            }),
            ScrollMode::SplitLeftRight => Some(if local.x < zone.rect.width() / 2 {
                ZoneHalf::Left
            } else {
                ZoneHalf::Right
            }),
            _ => None,
        }
    }

    /// Zero out deltas smaller than the dead zone.
    #[inline]
    pub fn suppress_jitter(dy: i32, dead_zone_px: i32) -> i32 {
        if dy.abs() < dead_zone_px { 0 } else { dy }
    }

    pub fn route_move(&mut self, pt: Point) -> MoveRoute {
        let dy = self.last_pos.map(|last| pt.y - last.y).unwrap_or(0);
        self.last_pos = Some(pt);

        let hit = self.hit_test(pt);
        let previous = self.current;
        self.current = hit;

        if hit == previous {
            return MoveRoute {
                inside: hit,
                dy,
                ..MoveRoute::default()
            };
        }
        MoveRoute {
            left: previous,
            entered: hit,
            inside: hit,
            dy,
        }
    }

    /// Resolve a button transition. A release outside every zone is still
    /// routed to the zone that received the press.
    pub fn route_button(
        &mut self,
        button: MouseButton,
        action: ButtonAction,
        pt: Point,
    ) -> Option<ClickEvent> {
        let target = match action {
            ButtonAction::Down => {
                let hit = self.hit_test(pt)?;
                self.pressed = Some(hit);
                hit
            }
            ButtonAction::Up => {
                let target = self.hit_test(pt).or(self.pressed)?;
                self.pressed = None;
                target
            }
        };

        let zone = self.zones.get(target)?;
        let local = CoordinateConverter::screen_to_zone(pt, zone.rect);
        Some(ClickEvent {
            zone: target,
            mode: zone.mode,
            button,
            action,
            local,
            half: Self::classify_half(zone, local),
        })
    }

    /// Forget pointer tracking without touching the zone set.
    pub fn reset_tracking(&mut self) {
        self.current = None;
        self.pressed = None;
        self.last_pos = None;
    }
}
