//! Hit Index Module
//!
//! R-tree over item rectangles so a pointer-down can be resolved to the item
//! under it in O(log n) instead of scanning every item.

use crate::geometry::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// An item's rectangle as stored in the index.
#[derive(Debug, Clone, Copy)]
pub struct HitEntry {
    pub index: usize,
    pub rect: Rect,
}

impl HitEntry {
    pub fn new(index: usize, rect: Rect) -> Self {
        Self { index, rect }
    }

    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}

impl RTreeObject for HitEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let r = self.rect;
        AABB::from_corners([r.left, r.top], [r.right, r.bottom])
    }
}

/// Spatial index of item rectangles keyed by item index.
pub struct HitIndex {
    tree: RTree<HitEntry>,
}

impl HitIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index where each rectangle's position in `rects` is its index.
    pub fn from_rects<'a, I>(rects: I) -> Self
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut index = Self::new();
        index.rebuild(rects);
        index
    }

    /// All items containing `point`, in ascending index order.
    pub fn query_point(&self, point: Point) -> Vec<usize> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point))
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// The topmost item under `point`. Later items render above earlier ones.
    pub fn topmost_at(&self, point: Point) -> Option<usize> {
        self.query_point(point).last().copied()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Replace every entry. Bulk loading keeps the tree balanced.
    pub fn rebuild<'a, I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let entries: Vec<HitEntry> = rects
            .into_iter()
            .enumerate()
            .map(|(index, rect)| HitEntry::new(index, *rect))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }
}

impl Default for HitIndex {
    fn default() -> Self {
        Self::new()
    }
}
