//! Drag and resize flows.

use crate::helpers::{Recorder, TICK, path, vertical_region};
use timeline_gestures::auto_scroll::{AutoScrollConfig, EdgeAutoScroller};
use timeline_gestures::dnr::{DnrConfig, DragEvent, DragResizeController, ResizeEdge, ResizeEvent, ResizeHandles};
use timeline_gestures::geometry::{Coordinates, DragAxis, Point, Rect, SizeConstraint};
use timeline_gestures::surface::ScrollParents;
use timeline_gestures::target::{Element, EventTarget};

fn boxed(coords: Coordinates) -> DnrConfig {
    DnrConfig::new(coords)
}

#[test]
fn test_drag_is_clamped_into_bounds() {
    let drags = Recorder::<DragEvent>::new();
    let stops = Recorder::<DragEvent>::new();
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(0.0, 0.0, 200.0, 200.0)).with_bounds(Rect::new(0.0, 0.0, 500.0, 500.0)),
    )
    .on_drag(drags.sink())
    .on_drag_stop(stops.sink());

    assert!(controller.pointer_down(Point::new(100.0, 100.0), &EventTarget::anonymous()));
    controller.pointer_move(Point::new(1100.0, 1100.0));

    assert_eq!(controller.coords(), Coordinates::new(300.0, 300.0, 500.0, 500.0));
    assert_eq!(drags.last().map(|e| e.delta), Some(Point::new(300.0, 300.0)));

    controller.pointer_up(Point::new(1100.0, 1100.0));
    let stop = stops.last().unwrap();
    assert_eq!(stop.coords, Coordinates::new(300.0, 300.0, 500.0, 500.0));
    assert_eq!(stop.delta, Point::new(300.0, 300.0));
}

#[test]
fn test_drag_stays_in_bounds_along_any_path() {
    let bounds = Rect::new(0.0, 0.0, 500.0, 500.0);
    let mut controller =
        DragResizeController::new(boxed(Coordinates::new(100.0, 100.0, 200.0, 150.0)).with_bounds(bounds));

    controller.pointer_down(Point::new(150.0, 120.0), &EventTarget::anonymous());
    for position in path(Point::new(150.0, 120.0), Point::new(-900.0, 1400.0), 40) {
        controller.pointer_move(position);
        assert!(bounds.encloses(&controller.coords().normalized()), "{:?}", controller.coords());
        assert!((controller.coords().width() - 100.0).abs() < 1e-3);
        assert!((controller.coords().height() - 50.0).abs() < 1e-3);
    }
    assert_eq!(controller.coords(), Coordinates::new(0.0, 450.0, 100.0, 500.0));
}

#[test]
fn test_drag_axis_locks_cross_axis() {
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(0.0, 0.0, 50.0, 50.0)).with_drag_axis(DragAxis::X),
    );
    controller.pointer_down(Point::new(10.0, 10.0), &EventTarget::anonymous());
    controller.pointer_move(Point::new(70.0, 90.0));
    assert_eq!(controller.coords(), Coordinates::new(60.0, 0.0, 110.0, 50.0));
}

#[test]
fn test_disabled_drag_does_not_start() {
    let mut controller =
        DragResizeController::new(boxed(Coordinates::new(0.0, 0.0, 50.0, 50.0)).with_drag_enabled(false));
    assert!(!controller.pointer_down(Point::new(10.0, 10.0), &EventTarget::anonymous()));
    assert!(controller.state().is_idle());
}

#[test]
fn test_resize_respects_size_constraint() {
    let size = SizeConstraint {
        min_width: Some(50.0),
        max_width: Some(300.0),
        ..Default::default()
    };
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(100.0, 100.0, 200.0, 200.0))
            .with_resize(true)
            .with_size(size),
    );

    assert!(controller.pointer_down(Point::new(200.0, 150.0), &EventTarget::anonymous()));
    assert_eq!(controller.state().resize_edge(), Some(ResizeEdge::Right));

    for position in path(Point::new(200.0, 150.0), Point::new(900.0, 150.0), 20)
        .into_iter()
        .chain(path(Point::new(900.0, 150.0), Point::new(-600.0, 150.0), 30))
    {
        controller.pointer_move(position);
        let width = controller.coords().width();
        assert!((50.0..=300.0).contains(&width), "width {width} at {position:?}");
        // The anchored edge never moves
        assert_eq!(controller.coords().start_x, 100.0);
    }
}

#[test]
fn test_size_wins_over_bounds() {
    let size = SizeConstraint {
        min_width: Some(150.0),
        ..Default::default()
    };
    let bounds = Rect::new(350.0, 0.0, 500.0, 500.0);
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(360.0, 0.0, 480.0, 100.0))
            .with_bounds(bounds)
            .with_resize(true)
            .with_size(size),
    );
    assert!(controller.begin_resize(ResizeEdge::Left, Point::new(360.0, 50.0)));
    controller.pointer_move(Point::new(420.0, 50.0));

    // Bounds alone would allow 420; the minimum width pushes the edge back out
    assert_eq!(controller.coords().width(), 150.0);
    assert_eq!(controller.coords().start_x, 330.0);
    assert!(controller.coords().start_x < bounds.left);
}

#[test]
fn test_corner_resize_reports_size_change() {
    let starts = Recorder::<ResizeEvent>::new();
    let resizes = Recorder::<ResizeEvent>::new();
    let stops = Recorder::<ResizeEvent>::new();
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(0.0, 0.0, 200.0, 200.0)).with_resize(true),
    )
    .on_resize_start(starts.sink())
    .on_resize(resizes.sink())
    .on_resize_stop(stops.sink());

    assert!(controller.pointer_down(Point::new(201.0, 199.0), &EventTarget::anonymous()));
    assert_eq!(controller.state().resize_edge(), Some(ResizeEdge::BottomRight));
    controller.pointer_move(Point::new(251.0, 229.0));
    controller.pointer_up(Point::new(251.0, 229.0));

    assert_eq!(starts.len(), 1);
    assert_eq!(starts.events()[0].delta, Point::ZERO);
    assert_eq!(resizes.len(), 2);
    let stop = stops.last().unwrap();
    assert_eq!(stop.edge, ResizeEdge::BottomRight);
    assert_eq!(stop.coords, Coordinates::new(0.0, 0.0, 250.0, 230.0));
    assert_eq!(stop.delta, Point::new(50.0, 30.0));
}

#[test]
fn test_disabled_handle_falls_through_to_drag() {
    let handles = ResizeHandles {
        right: true,
        ..ResizeHandles::none()
    };
    let mut controller =
        DragResizeController::new(boxed(Coordinates::new(0.0, 0.0, 100.0, 100.0)).with_resize(handles));

    // Left edge has no handle, so the pointer lands on the body
    assert!(controller.pointer_down(Point::new(2.0, 50.0), &EventTarget::anonymous()));
    assert!(controller.state().is_dragging());
}

#[test]
fn test_cancel_selector_blocks_gesture() {
    let starts = Recorder::<DragEvent>::new();
    let mut controller = DragResizeController::new(
        boxed(Coordinates::new(0.0, 0.0, 100.0, 100.0)).with_cancel("button, .no-drag"),
    )
    .on_drag_start(starts.sink());

    let target = EventTarget::new(vec![
        Element::new("span").with_class("label"),
        Element::new("div").with_class("no-drag"),
        Element::new("div").with_class("box"),
    ]);
    assert!(!controller.pointer_down(Point::new(50.0, 50.0), &target));
    assert!(controller.state().is_idle());
    assert_eq!(controller.document().active_listeners(), 0);
    assert_eq!(starts.len(), 0);

    let plain = EventTarget::new(vec![Element::new("div").with_class("box")]);
    assert!(controller.pointer_down(Point::new(50.0, 50.0), &plain));
    assert_eq!(starts.len(), 1);
}

#[test]
fn test_auto_scroll_moves_dragged_box_with_content() {
    let surface = vertical_region(0.0);
    let scroller = EdgeAutoScroller::with_surfaces(AutoScrollConfig::default(), ScrollParents::both(surface.clone()));
    let mut controller =
        DragResizeController::new(boxed(Coordinates::new(0.0, 0.0, 200.0, 200.0))).with_auto_scroll(scroller);

    controller.pointer_down(Point::new(100.0, 100.0), &EventTarget::anonymous());
    // 5px from the bottom edge: medium band
    controller.pointer_move(Point::new(100.0, 495.0));
    assert_eq!(controller.coords().start_y, 395.0);

    let applied = controller.advance(TICK);
    assert_eq!(applied, Point::new(0.0, 15.0));
    assert_eq!(controller.coords().start_y, 410.0);

    controller.advance(TICK * 2);
    assert_eq!(controller.coords().start_y, 440.0);
}
