//! Zone geometry resolution.
//!
//! Turns declarative [`ZoneConfig`]s into absolute screen rectangles against
//! the current monitor work areas. Resolution is pure and idempotent: a
//! floating zone's stored rectangle round-trips unchanged, so edit-mode
//! writes can be re-resolved every cycle.

use crate::constants::{FALLBACK_SCREEN_SIZE, MIN_EDGE_EXTENT, MIN_ZONE_SIZE};
use crate::platform::DisplaySource;
use crate::settings::Settings;
use crate::types::{Edge, Rect, ScrollMode, ZoneConfig, ZoneKind, ZoneSpan};
use tracing::debug;
use uuid::Uuid;

/// A zone with its absolute rectangle and effective scroll mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedZone {
    pub id: Uuid,
    /// Position in configured order (first match wins)
    pub index: usize,
    pub name: String,
    pub rect: Rect,
    pub mode: ScrollMode,
    pub enabled: bool,
    pub locked: bool,
    pub floating: bool,
    pub block_wheel: Option<bool>,
}

pub struct ZoneGeometryResolver;

impl ZoneGeometryResolver {
    /// Absolute rectangle of `zone` inside `work_area`.
    pub fn resolve(zone: &ZoneConfig, work_area: Rect) -> Rect {
        match zone.kind {
            ZoneKind::Edge {
                edge,
                thickness,
                span,
            } => Self::resolve_edge(edge, thickness, span, work_area),
            ZoneKind::Floating {
                x,
                y,
                width,
                height,
            } => Rect::from_xywh(x, y, width.max(MIN_ZONE_SIZE), height.max(MIN_ZONE_SIZE)),
        }
    }

    fn resolve_edge(edge: Edge, thickness: i32, span: ZoneSpan, work_area: Rect) -> Rect {
        let thickness = thickness.max(MIN_EDGE_EXTENT);
        // Extent of the monitor along the anchored edge
        let monitor_extent = if edge.is_vertical() {
            work_area.height()
        } else {
            work_area.width()
        };
        let zone_extent = match span {
            ZoneSpan::Fixed { height } => height,
            ZoneSpan::Percent { height_percent } => {
                (monitor_extent as f64 * f64::from(height_percent) / 100.0).round() as i32
            }
        }
        .clamp(MIN_EDGE_EXTENT, monitor_extent.max(MIN_EDGE_EXTENT));
        let offset = (monitor_extent - zone_extent) / 2;

        match edge {
            Edge::Left => Rect::from_xywh(
                work_area.left,
                work_area.top + offset,
                thickness,
                zone_extent,
            ),
            Edge::Right => Rect::from_xywh(
                work_area.right - thickness,
                work_area.top + offset,
                thickness,
                zone_extent,
            ),
            Edge::Top => Rect::from_xywh(
                work_area.left + offset,
                work_area.top,
                zone_extent,
                thickness,
            ),
            Edge::Bottom => Rect::from_xywh(
                work_area.left + offset,
                work_area.bottom - thickness,
                zone_extent,
                thickness,
            ),
        }
    }

    /// Work area for monitor `index`, degrading to primary-screen metrics
    /// and finally to a built-in screen size.
    pub fn work_area(display: &dyn DisplaySource, index: usize) -> Rect {
        if let Some(area) = display.work_area(index).filter(|r| !r.is_empty()) {
            return area;
        }
        let (w, h) = display
            .primary_screen_size()
            .filter(|&(w, h)| w > 0 && h > 0)
            .unwrap_or(FALLBACK_SCREEN_SIZE);
        debug!(monitor = index, width = w, height = h, "Monitor lookup failed, using screen metrics");
        Rect::from_xywh(0, 0, w, h)
    }

    /// Resolve every configured zone in order.
    pub fn resolve_all(settings: &Settings, display: &dyn DisplaySource) -> Vec<ResolvedZone> {
        settings
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| {
                let area = Self::work_area(display, zone.monitor);
                ResolvedZone {
                    id: zone.id,
                    index,
                    name: zone.name.clone(),
                    rect: Self::resolve(zone, area),
                    mode: settings.mode_for(zone),
                    enabled: zone.enabled,
                    locked: zone.locked,
                    floating: zone.kind.is_floating(),
                    block_wheel: zone.block_wheel,
                }
            })
            .collect()
    }
}
