//! Unit tests for perf module.

use crate::helpers::{rows, vertical_region};
use timeline_gestures::constants::POINTER_MOVE_BUDGET_MS;
use timeline_gestures::dnr::{DnrConfig, DragResizeController};
use timeline_gestures::geometry::{Axis, Coordinates, Point};
use timeline_gestures::perf::{
    OperationStats, ScopedTimer, is_profiling_enabled, set_profiling_enabled,
};
use timeline_gestures::scrollbar::{ScrollbarConfig, SyncedScrollbar};
use timeline_gestures::sortable::{SortableConfig, SortableList};
use timeline_gestures::target::EventTarget;

#[test]
fn test_scoped_timer_creation() {
    // High threshold, so dropping it never warns
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_pointer_handler_timer_uses_budget() {
    let timer = ScopedTimer::for_pointer_handler("pointer_move");
    assert_eq!(timer.threshold_ms(), POINTER_MOVE_BUDGET_MS);
}

#[test]
fn test_over_budget_average() {
    let mut stats = OperationStats::new();
    stats.record(POINTER_MOVE_BUDGET_MS / 2.0);
    assert!(!stats.is_over_budget());
    stats.record(POINTER_MOVE_BUDGET_MS * 3.0);
    assert!(stats.is_over_budget());
}

#[test]
fn test_runtime_toggle() {
    let initial = is_profiling_enabled();
    set_profiling_enabled(!initial);
    assert_eq!(is_profiling_enabled(), !initial);
    set_profiling_enabled(initial);
}

#[test]
fn test_controllers_time_pointer_moves() {
    let mut controller = DragResizeController::new(DnrConfig::new(Coordinates::new(0.0, 0.0, 100.0, 100.0)));
    controller.pointer_down(Point::new(50.0, 50.0), &EventTarget::anonymous());
    for x in [60.0, 70.0, 80.0] {
        controller.pointer_move(Point::new(x, 50.0));
    }
    controller.pointer_up(Point::new(80.0, 50.0));
    assert_eq!(controller.move_stats().count(), 3);
    assert!(controller.move_stats().max_ms() >= controller.move_stats().min_ms());

    let mut list = SortableList::new(SortableConfig::new(Axis::Y));
    list.set_items(rows(3, 100.0));
    list.pointer_down(Point::new(50.0, 10.0), &EventTarget::anonymous());
    list.pointer_move(Point::new(50.0, 160.0));
    list.pointer_up(Point::new(50.0, 160.0));
    assert_eq!(list.move_stats().count(), 1);

    // The final move on pointer up is timed as well
    let mut bar = SyncedScrollbar::new(ScrollbarConfig::new(Axis::Y, 500.0), vertical_region(0.0));
    bar.pointer_down(Point::new(10.0, 20.0));
    bar.pointer_move(Point::new(10.0, 60.0));
    bar.pointer_up(Point::new(10.0, 60.0));
    assert_eq!(bar.move_stats().count(), 2);
}

#[test]
fn test_idle_pointer_moves_are_timed() {
    let mut controller = DragResizeController::new(DnrConfig::new(Coordinates::new(0.0, 0.0, 100.0, 100.0)));
    controller.pointer_move(Point::new(10.0, 10.0));
    assert_eq!(controller.move_stats().count(), 1);
    assert!(controller.move_stats().average() >= 0.0);
}
