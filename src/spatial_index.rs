//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for zone hit testing.
//! Point queries are O(log n) and respect configured zone order, so the
//! first enabled zone in configuration order wins when zones overlap.

use crate::geometry::ResolvedZone;
use crate::types::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// A spatial entry representing one enabled zone's rectangle.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    /// Zone position in configured order
    pub order: usize,
    pub rect: Rect,
}

impl SpatialEntry {
    pub fn new(order: usize, rect: Rect) -> Self {
        Self { order, rect }
    }

    #[inline]
    pub fn contains_point(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        // rstar envelopes are closed; half-open containment is re-checked on query.
        AABB::from_corners(
            [self.rect.left, self.rect.top],
            [self.rect.right, self.rect.bottom],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

/// Spatial index over resolved zones.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    len: usize,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            len: 0,
        }
    }

    /// Build an index from resolved zones; disabled and empty zones are skipped.
    pub fn from_zones(zones: &[ResolvedZone]) -> Self {
        let mut index = Self::new();
        index.rebuild(zones);
        index
    }

    pub fn rebuild(&mut self, zones: &[ResolvedZone]) {
        let entries: Vec<SpatialEntry> = zones
            .iter()
            .filter(|z| z.enabled && !z.rect.is_empty())
            .map(|z| SpatialEntry::new(z.index, z.rect))
            .collect();
        self.len = entries.len();
        self.tree = RTree::bulk_load(entries);
    }

    /// First zone (in configured order) containing the point.
    pub fn first_at(&self, pt: Point) -> Option<usize> {
        let point_envelope = AABB::from_point([pt.x, pt.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(pt))
            .map(|entry| entry.order)
            .min()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
