//! Sortable list flows.

use crate::helpers::{Recorder, TICK, columns, rows, vertical_region};
use timeline_gestures::auto_scroll::AutoScrollConfig;
use timeline_gestures::geometry::{Axis, Point};
use timeline_gestures::sortable::{SortEnd, SortStart, SortUpdate, SortableConfig, SortableList, reorder};
use timeline_gestures::surface::ScrollParents;
use timeline_gestures::target::{Element, EventTarget};

struct Recorders {
    starts: Recorder<SortStart>,
    updates: Recorder<SortUpdate>,
    ends: Recorder<SortEnd>,
}

fn recorded(config: SortableConfig) -> (SortableList, Recorders) {
    let recorders = Recorders {
        starts: Recorder::new(),
        updates: Recorder::new(),
        ends: Recorder::new(),
    };
    let list = SortableList::new(config)
        .on_start(recorders.starts.sink())
        .on_sort_update(recorders.updates.sink())
        .on_end(recorders.ends.sink());
    (list, recorders)
}

#[test]
fn test_drag_first_item_past_second() {
    let (mut list, rec) = recorded(SortableConfig::new(Axis::Y));
    list.set_items(rows(3, 100.0));

    assert!(list.pointer_down(Point::new(50.0, 10.0), &EventTarget::anonymous()));
    list.pointer_move(Point::new(50.0, 100.0));
    list.pointer_move(Point::new(50.0, 160.0));
    list.pointer_move(Point::new(50.0, 170.0));
    list.pointer_up(Point::new(50.0, 170.0));

    assert_eq!(
        rec.starts.events(),
        vec![SortStart {
            source_index: 0,
            edge_index: 0
        }]
    );
    assert_eq!(
        rec.updates.events(),
        vec![SortUpdate {
            source_index: 0,
            edge_index: 1,
            previous_edge_index: 0
        }]
    );
    assert_eq!(
        rec.ends.events(),
        vec![SortEnd {
            source_index: 0,
            final_index: 1
        }]
    );

    let mut items = vec!["A", "B", "C"];
    let end = rec.ends.last().unwrap();
    reorder(&mut items, end.source_index, end.final_index);
    assert_eq!(items, vec!["B", "A", "C"]);
}

#[test]
fn test_drag_last_item_to_front_horizontally() {
    let (mut list, rec) = recorded(SortableConfig::new(Axis::X));
    list.set_items(columns(4, 50.0));

    assert!(list.pointer_down(Point::new(190.0, 20.0), &EventTarget::anonymous()));
    list.pointer_move(Point::new(5.0, 20.0));
    list.pointer_up(Point::new(5.0, 20.0));

    assert_eq!(rec.updates.len(), 1);
    assert_eq!(rec.ends.last().map(|e| (e.source_index, e.final_index)), Some((3, 0)));
}

#[test]
fn test_returning_to_origin_reports_each_change() {
    let (mut list, rec) = recorded(SortableConfig::new(Axis::Y));
    list.set_items(rows(3, 100.0));

    list.pointer_down(Point::new(50.0, 150.0), &EventTarget::anonymous());
    list.pointer_move(Point::new(50.0, 260.0));
    list.pointer_move(Point::new(50.0, 150.0));
    list.pointer_up(Point::new(50.0, 150.0));

    let slots: Vec<usize> = rec.updates.events().iter().map(|u| u.edge_index).collect();
    assert_eq!(slots, vec![2, 1]);
    assert_eq!(rec.ends.last().map(|e| e.final_index), Some(1));
}

#[test]
fn test_cancel_selector_prevents_sort() {
    let (mut list, rec) = recorded(SortableConfig::new(Axis::Y).with_cancel(".handle-disabled, input"));
    list.set_items(rows(3, 100.0));

    let target = EventTarget::new(vec![
        Element::new("input"),
        Element::new("li").with_class("row"),
    ])
    .in_item(1);
    assert!(!list.pointer_down(Point::new(50.0, 150.0), &target));
    list.pointer_move(Point::new(50.0, 290.0));
    list.pointer_up(Point::new(50.0, 290.0));

    assert_eq!(rec.starts.len(), 0);
    assert_eq!(rec.updates.len(), 0);
    assert_eq!(rec.ends.len(), 0);
    assert_eq!(list.document().active_listeners(), 0);
}

#[test]
fn test_auto_scroll_shifts_edge_index() {
    let surface = vertical_region(0.0);
    let config = SortableConfig::new(Axis::Y).with_auto_scroll(AutoScrollConfig::default());
    let (list, rec) = recorded(config);
    let mut list = list.with_scroll_parents(ScrollParents::both(surface.clone()));
    list.set_items(rows(6, 100.0));

    list.pointer_down(Point::new(50.0, 10.0), &EventTarget::anonymous());
    // 5px from the viewport bottom: past the midpoints at 150..450
    list.pointer_move(Point::new(50.0, 495.0));
    assert_eq!(list.current(), Some((0, 4)));

    // Each tick scrolls 15px; the pointer passes the last midpoint (550)
    // once 60px have scrolled
    list.advance(TICK * 3);
    assert_eq!(list.current(), Some((0, 4)));
    list.advance(TICK);
    assert_eq!(list.current(), Some((0, 5)));

    list.pointer_up(Point::new(50.0, 495.0));
    assert_eq!(rec.ends.last().map(|e| e.final_index), Some(5));
}

#[test]
fn test_auto_scroll_requires_config_section() {
    let surface = vertical_region(0.0);
    let list = SortableList::new(SortableConfig::new(Axis::Y)).with_scroll_parents(ScrollParents::both(surface));
    assert!(list.auto_scroller().is_none());
}
