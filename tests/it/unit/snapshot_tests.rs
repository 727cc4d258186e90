//! Snapshot tests using the insta crate.
//!
//! These pin the JSON shape of the payloads hosts receive and the settings
//! file format. To update after an intentional change:
//! ```sh
//! cargo insta test --accept
//! ```

use timeline_gestures::dnr::{DnrConfig, DragEvent, DragResizeController, ResizeEdge, ResizeEvent};
use timeline_gestures::geometry::{Axis, Coordinates, Point, Rect};
use timeline_gestures::scrollbar::{ScrollbarConfig, SyncedScrollbar};
use timeline_gestures::settings::InteractionSettings;
use timeline_gestures::sortable::SortUpdate;
use timeline_gestures::target::EventTarget;

use crate::helpers::{Recorder, vertical_region};

#[test]
fn snapshot_coordinates() {
    insta::assert_json_snapshot!(Coordinates::new(10.0, 20.0, 110.0, 220.0), @r###"
    {
      "startX": 10.0,
      "startY": 20.0,
      "endX": 110.0,
      "endY": 220.0
    }
    "###);
}

#[test]
fn snapshot_drag_stop_event() {
    let stops = Recorder::<DragEvent>::new();
    let mut controller = DragResizeController::new(
        DnrConfig::new(Coordinates::new(0.0, 0.0, 200.0, 200.0)).with_bounds(Rect::new(0.0, 0.0, 500.0, 500.0)),
    )
    .on_drag_stop(stops.sink());
    controller.pointer_down(Point::new(100.0, 100.0), &EventTarget::anonymous());
    controller.pointer_up(Point::new(1100.0, 1100.0));

    insta::assert_json_snapshot!(stops.last().unwrap(), @r###"
    {
      "coords": {
        "startX": 300.0,
        "startY": 300.0,
        "endX": 500.0,
        "endY": 500.0
      },
      "delta": {
        "x": 300.0,
        "y": 300.0
      }
    }
    "###);
}

#[test]
fn snapshot_resize_event() {
    let event = ResizeEvent {
        edge: ResizeEdge::TopLeft,
        coords: Coordinates::new(20.0, 10.0, 100.0, 100.0),
        delta: Point::new(-20.0, -10.0),
    };
    insta::assert_json_snapshot!(event, @r###"
    {
      "edge": "topLeft",
      "coords": {
        "startX": 20.0,
        "startY": 10.0,
        "endX": 100.0,
        "endY": 100.0
      },
      "delta": {
        "x": -20.0,
        "y": -10.0
      }
    }
    "###);
}

#[test]
fn snapshot_sort_update() {
    let update = SortUpdate {
        source_index: 0,
        edge_index: 2,
        previous_edge_index: 1,
    };
    insta::assert_json_snapshot!(update, @r###"
    {
      "sourceIndex": 0,
      "edgeIndex": 2,
      "previousEdgeIndex": 1
    }
    "###);
}

#[test]
fn snapshot_scrollbar_layout() {
    let config = ScrollbarConfig::new(Axis::Y, 500.0).with_style("background", "#222");
    let bar = SyncedScrollbar::new(config, vertical_region(0.0));
    insta::assert_json_snapshot!(bar.layout(), @r###"
    {
      "axis": "y",
      "trackExtent": 500.0,
      "thumbOffset": 0.0,
      "thumbExtent": 125.0,
      "visible": true,
      "style": {
        "background": "#222"
      },
      "thumbStyle": {}
    }
    "###);
}

#[test]
fn snapshot_default_settings() {
    let settings = InteractionSettings::default();
    insta::assert_json_snapshot!(settings, @r###"
    {
      "autoScroll": {
        "thresholds": {
          "slow": 20.0,
          "medium": 9.0,
          "fast": 3.0
        },
        "speed": {
          "fast": 30.0,
          "medium": 15.0,
          "slow": 5.0
        },
        "tickMs": 25,
        "withinBounds": false,
        "eventType": "drag"
      },
      "handleSize": 8.0,
      "minThumbExtent": 1.0
    }
    "###);
}
