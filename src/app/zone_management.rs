//! Zone management - toggling zones and edit-mode zone mutation.

use super::state::ScrollNice;
use crate::geometry::ZoneGeometryResolver;
use crate::input::coords::CoordinateConverter;
use crate::types::{Point, ZoneConfig, ZoneKind};
use tracing::{debug, info};

impl ScrollNice {
    /// Flip zone `index` on or off, returning its new enabled flag.
    ///
    /// Any running session ends, since the zone set is re-resolved and
    /// pointer tracking starts over.
    pub fn toggle_zone(&mut self, index: usize) -> Option<bool> {
        let enabled = {
            let zone = self.settings.zones.get_mut(index)?;
            zone.enabled = !zone.enabled;
            zone.enabled
        };
        info!(zone = index, enabled, "Zone toggled");

        self.end_session();
        self.resolve_zones();
        self.notify_presenters();
        Some(enabled)
    }

    /// Toggle zones round-robin, one per call.
    pub fn toggle_next_zone(&mut self) -> Option<(usize, bool)> {
        let len = self.settings.zones.len();
        if len == 0 {
            return None;
        }
        let index = self.edit.next_toggle % len;
        self.edit.next_toggle = (index + 1) % len;
        self.toggle_zone(index).map(|enabled| (index, enabled))
    }

    pub fn zone_config(&self, index: usize) -> Option<&ZoneConfig> {
        self.settings.zones.get(index)
    }

    /// Move floating zone `index` so its origin lands at `origin`, kept
    /// inside its monitor's work area. Returns true if it moved.
    pub(crate) fn move_zone(&mut self, index: usize, origin: Point) -> bool {
        let Some(monitor) = self.settings.zones.get(index).map(|z| z.monitor) else {
            return false;
        };
        let area = ZoneGeometryResolver::work_area(self.system.display.as_ref(), monitor);

        let Some(ZoneKind::Floating {
            x,
            y,
            width,
            height,
        }) = self.settings.zones.get_mut(index).map(|z| &mut z.kind)
        else {
            return false;
        };
        let clamped = CoordinateConverter::clamp_origin(origin, *width, *height, area);
        if clamped == Point::new(*x, *y) {
            return false;
        }
        *x = clamped.x;
        *y = clamped.y;

        self.resolve_zones();
        true
    }

    /// Set the size of floating zone `index`. Returns true if it changed.
    pub(crate) fn resize_zone(&mut self, index: usize, new_width: i32, new_height: i32) -> bool {
        let Some(ZoneKind::Floating { width, height, .. }) =
            self.settings.zones.get_mut(index).map(|z| &mut z.kind)
        else {
            return false;
        };
        if (*width, *height) == (new_width, new_height) {
            return false;
        }
        *width = new_width;
        *height = new_height;

        self.resolve_zones();
        true
    }

    /// End the current edit gesture, reporting the edited zone.
    pub(crate) fn finish_edit_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.edit.input_state);
        let Some(index) = gesture.zone() else {
            return;
        };
        if let Some(zone) = self.settings.zones.get(index) {
            debug!(zone = index, kind = ?zone.kind, "Zone edit committed");
            for presenter in &mut self.system.presenters {
                presenter.zone_edited(index, zone);
            }
        }
        self.notify_presenters();
    }
}
