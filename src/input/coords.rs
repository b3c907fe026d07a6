//! Coordinate conversion between screen space and zone-local space.

use crate::constants::{MIN_ZONE_SIZE, RESIZE_HANDLE_SIZE};
use crate::types::{Point, Rect};

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Screen position relative to the zone origin.
    #[inline]
    pub fn screen_to_zone(pt: Point, zone: Rect) -> Point {
        Point::new(pt.x - zone.left, pt.y - zone.top)
    }

    /// True when a zone-local point lies on the bottom-right resize handle.
    #[inline]
    pub fn is_on_resize_handle(local: Point, zone: Rect) -> bool {
        local.x >= zone.width() - RESIZE_HANDLE_SIZE
            && local.y >= zone.height() - RESIZE_HANDLE_SIZE
            && local.x < zone.width()
            && local.y < zone.height()
    }

    /// Clamp a zone origin so a `width` x `height` zone stays inside `area`.
    pub fn clamp_origin(origin: Point, width: i32, height: i32, area: Rect) -> Point {
        let max_x = (area.right - width).max(area.left);
        let max_y = (area.bottom - height).max(area.top);
        Point::new(
            origin.x.clamp(area.left, max_x),
            origin.y.clamp(area.top, max_y),
        )
    }

    /// Size after dragging the resize handle by `delta`, floored at the minimum.
    pub fn resized(start: (i32, i32), delta: Point) -> (i32, i32) {
        (
            (start.0 + delta.x).max(MIN_ZONE_SIZE),
            (start.1 + delta.y).max(MIN_ZONE_SIZE),
        )
    }
}
