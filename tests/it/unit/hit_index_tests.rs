//! Unit tests for the item hit index.

use crate::helpers::rows;
use timeline_gestures::geometry::{Point, Rect};
use timeline_gestures::hit_index::HitIndex;

#[test]
fn test_rows_resolve_to_their_index() {
    let index = HitIndex::from_rects(rows(50, 20.0).iter());
    assert_eq!(index.len(), 50);
    assert_eq!(index.topmost_at(Point::new(10.0, 5.0)), Some(0));
    assert_eq!(index.topmost_at(Point::new(10.0, 990.0)), Some(49));
    assert_eq!(index.topmost_at(Point::new(10.0, 1001.0)), None);
}

#[test]
fn test_overlap_prefers_later_item() {
    let mut rects = vec![Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(50.0, 50.0, 150.0, 150.0)];
    let mut index = HitIndex::from_rects(rects.iter());
    assert_eq!(index.topmost_at(Point::new(60.0, 60.0)), Some(1));

    // Moving item 1 away uncovers item 0
    rects[1] = Rect::new(200.0, 200.0, 300.0, 300.0);
    index.rebuild(rects.iter());
    assert_eq!(index.topmost_at(Point::new(60.0, 60.0)), Some(0));
    assert_eq!(index.len(), 2);
}

#[test]
fn test_rebuild_replaces_entries() {
    let mut index = HitIndex::from_rects(rows(3, 10.0).iter());
    index.rebuild(rows(2, 10.0).iter());
    assert_eq!(index.len(), 2);
    assert_eq!(index.query_point(Point::new(1.0, 10.0)), vec![0, 1]);
    assert_eq!(index.topmost_at(Point::new(1.0, 25.0)), None);
}
