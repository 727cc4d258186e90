//! Drag-and-resize controller.
//!
//! Tracks one rectangle and turns pointer input into drag and per-edge resize
//! gestures, applying bounds and size constraints before reporting.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging             (pointer down on the body, dragging enabled)
//! Idle -> Resizing(edge)       (pointer down on an active resize handle)
//!
//! Dragging | Resizing -> Idle  (pointer up, or teardown)
//! ```
//!
//! Constraints resolve in one order on every path: bounds first, then the
//! size constraint. When the two disagree the size constraint wins.

use crate::auto_scroll::{EdgeAutoScroller, PointerSource};
use crate::constants::DEFAULT_HANDLE_SIZE;
use crate::event::{Callback, emit};
use crate::geometry::{Axis, Bounds, Coordinates, DragAxis, Point, SizeConstraint, clamp};
use crate::perf::{OperationStats, ScopedTimer};
use crate::session::{Document, GestureSession};
use crate::target::{EventTarget, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const OWNER: &str = "dnr";

/// A resize handle: one edge, or a corner joining two adjacent edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeEdge {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl ResizeEdge {
    pub const EDGES: [ResizeEdge; 4] = [
        ResizeEdge::Top,
        ResizeEdge::Right,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
    ];

    pub const CORNERS: [ResizeEdge; 4] = [
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomRight,
        ResizeEdge::BottomLeft,
    ];

    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    pub fn moves_start_x(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_end_x(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_start_y(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_end_y(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    fn moves_axis(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.moves_start_x() || self.moves_end_x(),
            Axis::Y => self.moves_start_y() || self.moves_end_y(),
        }
    }
}

/// Which edges are interactively resizable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeHandles {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl ResizeHandles {
    pub fn all() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, edge: ResizeEdge) -> bool {
        match edge {
            ResizeEdge::Top => self.top,
            ResizeEdge::Right => self.right,
            ResizeEdge::Bottom => self.bottom,
            ResizeEdge::Left => self.left,
            ResizeEdge::TopLeft => self.top && self.left,
            ResizeEdge::TopRight => self.top && self.right,
            ResizeEdge::BottomRight => self.bottom && self.right,
            ResizeEdge::BottomLeft => self.bottom && self.left,
        }
    }

    /// Every handle that renders: active edges, then derived corners.
    pub fn handles(&self) -> Vec<ResizeEdge> {
        ResizeEdge::EDGES
            .into_iter()
            .chain(ResizeEdge::CORNERS)
            .filter(|edge| self.contains(*edge))
            .collect()
    }
}

impl From<bool> for ResizeHandles {
    fn from(enabled: bool) -> Self {
        if enabled { Self::all() } else { Self::none() }
    }
}

/// `resize` as written in configuration: a switch for all edges, or a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResizeSpec {
    Enabled(bool),
    Handles(ResizeHandles),
}

impl Default for ResizeSpec {
    fn default() -> Self {
        ResizeSpec::Enabled(false)
    }
}

impl From<ResizeSpec> for ResizeHandles {
    fn from(spec: ResizeSpec) -> Self {
        match spec {
            ResizeSpec::Enabled(enabled) => enabled.into(),
            ResizeSpec::Handles(handles) => handles,
        }
    }
}

/// Drag/resize configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnrConfig {
    pub coords: Coordinates,
    pub bounds: Option<Bounds>,
    pub resize: ResizeSpec,
    #[serde(flatten)]
    pub size: SizeConstraint,
    pub drag_axis: DragAxis,
    pub drag_enabled: bool,
    pub cancel: Option<Selector>,
    pub handle_size: f32,
}

impl Default for DnrConfig {
    fn default() -> Self {
        Self {
            coords: Coordinates::default(),
            bounds: None,
            resize: ResizeSpec::default(),
            size: SizeConstraint::default(),
            drag_axis: DragAxis::Both,
            drag_enabled: true,
            cancel: None,
            handle_size: DEFAULT_HANDLE_SIZE,
        }
    }
}

impl DnrConfig {
    pub fn new(coords: Coordinates) -> Self {
        Self {
            coords,
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_resize(mut self, resize: impl Into<ResizeHandles>) -> Self {
        self.resize = ResizeSpec::Handles(resize.into());
        self
    }

    pub fn with_size(mut self, size: SizeConstraint) -> Self {
        self.size = size;
        self
    }

    pub fn with_drag_axis(mut self, axis: DragAxis) -> Self {
        self.drag_axis = axis;
        self
    }

    pub fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    pub fn with_cancel(mut self, selector: &str) -> Self {
        self.cancel = Some(Selector::parse(selector));
        self
    }

    pub fn with_handle_size(mut self, handle_size: f32) -> Self {
        self.handle_size = handle_size;
        self
    }

    pub fn handles(&self) -> ResizeHandles {
        self.resize.into()
    }
}

/// Payload of drag callbacks. `delta` is the translation applied since the
/// gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragEvent {
    pub coords: Coordinates,
    pub delta: Point,
}

/// Payload of resize callbacks. `delta` is the change in width and height
/// since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeEvent {
    pub edge: ResizeEdge,
    pub coords: Coordinates,
    pub delta: Point,
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    Handle(ResizeEdge),
    Body,
    Outside,
}

/// Controller state. Active states own their gesture session.
#[derive(Debug, Default)]
pub enum DnrState {
    #[default]
    Idle,
    Dragging {
        session: GestureSession,
        start: Coordinates,
    },
    Resizing {
        edge: ResizeEdge,
        session: GestureSession,
        start: Coordinates,
    },
}

impl DnrState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// Edge being resized, if any.
    pub fn resize_edge(&self) -> Option<ResizeEdge> {
        match self {
            Self::Resizing { edge, .. } => Some(*edge),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut GestureSession> {
        match self {
            Self::Idle => None,
            Self::Dragging { session, .. } | Self::Resizing { session, .. } => Some(session),
        }
    }
}

#[derive(Default)]
struct DnrCallbacks {
    drag_start: Option<Callback<DragEvent>>,
    drag: Option<Callback<DragEvent>>,
    drag_stop: Option<Callback<DragEvent>>,
    resize_start: Option<Callback<ResizeEvent>>,
    resize: Option<Callback<ResizeEvent>>,
    resize_stop: Option<Callback<ResizeEvent>>,
}

/// Translation on one axis that keeps `[lo, hi]` inside `[bound_lo, bound_hi]`.
///
/// The leading bound is applied last, so a rectangle larger than its bounds
/// is pinned to the leading edge.
fn clamp_translation(lo: f32, hi: f32, delta: f32, bound_lo: f32, bound_hi: f32) -> f32 {
    let mut delta = delta;
    if hi + delta > bound_hi {
        delta = bound_hi - hi;
    }
    if lo + delta < bound_lo {
        delta = bound_lo - lo;
    }
    delta
}

/// Translate `start` by `delta`, restricted to `axis` and kept inside `bounds`.
///
/// Returns the new coordinates and the translation actually applied.
pub fn drag_coords(
    start: Coordinates,
    delta: Point,
    axis: DragAxis,
    bounds: Option<&Bounds>,
) -> (Coordinates, Point) {
    let mut applied = Point::new(
        if axis.allows(Axis::X) { delta.x } else { 0.0 },
        if axis.allows(Axis::Y) { delta.y } else { 0.0 },
    );

    if let Some(bounds) = bounds {
        let rect = start.normalized();
        applied.x = clamp_translation(rect.left, rect.right, applied.x, bounds.left, bounds.right);
        applied.y = clamp_translation(rect.top, rect.bottom, applied.y, bounds.top, bounds.bottom);
    }

    (start.translate(applied), applied)
}

/// Move the corners of `start` that `edge` controls by `delta`, clamp them
/// into `bounds`, then clamp the resulting size into `size` by moving the
/// same corners back toward the anchored opposite edge.
pub fn resize_coords(
    start: Coordinates,
    edge: ResizeEdge,
    delta: Point,
    bounds: Option<&Bounds>,
    size: &SizeConstraint,
) -> Coordinates {
    let mut c = start;
    if edge.moves_start_x() {
        c.start_x += delta.x;
    }
    if edge.moves_end_x() {
        c.end_x += delta.x;
    }
    if edge.moves_start_y() {
        c.start_y += delta.y;
    }
    if edge.moves_end_y() {
        c.end_y += delta.y;
    }

    if let Some(b) = bounds {
        if edge.moves_start_x() {
            c.start_x = clamp(c.start_x, b.left, b.right);
        }
        if edge.moves_end_x() {
            c.end_x = clamp(c.end_x, b.left, b.right);
        }
        if edge.moves_start_y() {
            c.start_y = clamp(c.start_y, b.top, b.bottom);
        }
        if edge.moves_end_y() {
            c.end_y = clamp(c.end_y, b.top, b.bottom);
        }
    }

    for axis in [Axis::X, Axis::Y] {
        if !edge.moves_axis(axis) {
            continue;
        }
        let moves_start = match axis {
            Axis::X => edge.moves_start_x(),
            Axis::Y => edge.moves_start_y(),
        };
        let (anchor, moving) = match (axis, moves_start) {
            (Axis::X, true) => (c.end_x, c.start_x),
            (Axis::X, false) => (c.start_x, c.end_x),
            (Axis::Y, true) => (c.end_y, c.start_y),
            (Axis::Y, false) => (c.start_y, c.end_y),
        };
        let signed = moving - anchor;
        let extent = signed.abs();
        let clamped = size.clamp_extent(axis, extent);
        if clamped == extent {
            continue;
        }
        let direction = if signed != 0.0 {
            signed.signum()
        } else if moves_start {
            -1.0
        } else {
            1.0
        };
        let moved = anchor + direction * clamped;
        match (axis, moves_start) {
            (Axis::X, true) => c.start_x = moved,
            (Axis::X, false) => c.end_x = moved,
            (Axis::Y, true) => c.start_y = moved,
            (Axis::Y, false) => c.end_y = moved,
        }
    }

    c
}

/// Drag and per-edge resize of a single rectangle.
pub struct DragResizeController {
    config: DnrConfig,
    coords: Coordinates,
    state: DnrState,
    document: Document,
    auto_scroll: Option<EdgeAutoScroller>,
    /// Scroll applied to the offset parent during the current gesture.
    scrolled: Point,
    callbacks: DnrCallbacks,
    move_stats: OperationStats,
}

impl DragResizeController {
    pub fn new(config: DnrConfig) -> Self {
        Self::with_document(config, Document::new())
    }

    /// A controller registering its gesture listeners on a shared document.
    pub fn with_document(config: DnrConfig, document: Document) -> Self {
        Self {
            coords: config.coords,
            config,
            state: DnrState::Idle,
            document,
            auto_scroll: None,
            scrolled: Point::ZERO,
            callbacks: DnrCallbacks::default(),
            move_stats: OperationStats::new(),
        }
    }

    /// Scroll the offset parent while a gesture nears its edges.
    pub fn with_auto_scroll(mut self, scroller: EdgeAutoScroller) -> Self {
        self.auto_scroll = Some(scroller);
        self
    }

    pub fn on_drag_start(mut self, callback: impl FnMut(&DragEvent) + Send + 'static) -> Self {
        self.callbacks.drag_start = Some(Box::new(callback));
        self
    }

    pub fn on_drag(mut self, callback: impl FnMut(&DragEvent) + Send + 'static) -> Self {
        self.callbacks.drag = Some(Box::new(callback));
        self
    }

    pub fn on_drag_stop(mut self, callback: impl FnMut(&DragEvent) + Send + 'static) -> Self {
        self.callbacks.drag_stop = Some(Box::new(callback));
        self
    }

    pub fn on_resize_start(mut self, callback: impl FnMut(&ResizeEvent) + Send + 'static) -> Self {
        self.callbacks.resize_start = Some(Box::new(callback));
        self
    }

    pub fn on_resize(mut self, callback: impl FnMut(&ResizeEvent) + Send + 'static) -> Self {
        self.callbacks.resize = Some(Box::new(callback));
        self
    }

    pub fn on_resize_stop(mut self, callback: impl FnMut(&ResizeEvent) + Send + 'static) -> Self {
        self.callbacks.resize_stop = Some(Box::new(callback));
        self
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn state(&self) -> &DnrState {
        &self.state
    }

    pub fn config(&self) -> &DnrConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Timings of `pointer_move` calls.
    pub fn move_stats(&self) -> &OperationStats {
        &self.move_stats
    }

    /// Host-driven update of the rectangle. Ignored mid-gesture.
    pub fn set_coords(&mut self, coords: Coordinates) {
        if !self.state.is_idle() {
            debug!("set_coords ignored during an active gesture");
            return;
        }
        self.coords = coords;
        self.config.coords = coords;
    }

    /// Replace the configuration. Ignored mid-gesture.
    pub fn reconfigure(&mut self, config: DnrConfig) {
        if !self.state.is_idle() {
            debug!("reconfigure ignored during an active gesture");
            return;
        }
        self.coords = config.coords;
        self.config = config;
    }

    /// Handle under `position`. Corners win over edges.
    pub fn handle_at(&self, position: Point) -> Option<ResizeEdge> {
        let handles = self.config.handles();
        let reach = self.config.handle_size / 2.0;
        let c = self.coords;
        let rect = c.normalized();

        let spans_x = position.x >= rect.left - reach && position.x <= rect.right + reach;
        let spans_y = position.y >= rect.top - reach && position.y <= rect.bottom + reach;
        let near_left = (position.x - c.start_x).abs() <= reach && spans_y;
        let near_right = (position.x - c.end_x).abs() <= reach && spans_y;
        let near_top = (position.y - c.start_y).abs() <= reach && spans_x;
        let near_bottom = (position.y - c.end_y).abs() <= reach && spans_x;

        let candidates = [
            (ResizeEdge::TopLeft, near_top && near_left),
            (ResizeEdge::TopRight, near_top && near_right),
            (ResizeEdge::BottomRight, near_bottom && near_right),
            (ResizeEdge::BottomLeft, near_bottom && near_left),
            (ResizeEdge::Top, near_top),
            (ResizeEdge::Right, near_right),
            (ResizeEdge::Bottom, near_bottom),
            (ResizeEdge::Left, near_left),
        ];
        candidates
            .into_iter()
            .find(|(edge, hit)| *hit && handles.contains(*edge))
            .map(|(edge, _)| edge)
    }

    pub fn hit_test(&self, position: Point) -> PointerHit {
        if let Some(edge) = self.handle_at(position) {
            PointerHit::Handle(edge)
        } else if self.coords.normalized().contains(position) {
            PointerHit::Body
        } else {
            PointerHit::Outside
        }
    }

    /// Start a drag or resize depending on what `position` lands on.
    ///
    /// Returns whether a gesture started.
    pub fn pointer_down(&mut self, position: Point, target: &EventTarget) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        if let Some(cancel) = &self.config.cancel {
            if target.closest_matches(cancel) {
                debug!(selector = cancel.as_str(), "pointer down cancelled");
                return false;
            }
        }
        match self.hit_test(position) {
            PointerHit::Handle(edge) => self.begin_resize(edge, position),
            PointerHit::Body => self.begin_drag(position),
            PointerHit::Outside => false,
        }
    }

    /// Start dragging the body from `position`.
    pub fn begin_drag(&mut self, position: Point) -> bool {
        if !self.state.is_idle() || !self.config.drag_enabled {
            return false;
        }
        let start = self.coords;
        self.state = DnrState::Dragging {
            session: GestureSession::begin(&self.document, OWNER, position),
            start,
        };
        self.begin_gesture();
        debug!(?start, "drag started");
        emit(
            &mut self.callbacks.drag_start,
            &DragEvent {
                coords: start,
                delta: Point::ZERO,
            },
        );
        true
    }

    /// Start resizing through the `edge` handle from `position`.
    pub fn begin_resize(&mut self, edge: ResizeEdge, position: Point) -> bool {
        if !self.state.is_idle() || !self.config.handles().contains(edge) {
            return false;
        }
        let start = self.coords;
        self.state = DnrState::Resizing {
            edge,
            session: GestureSession::begin(&self.document, OWNER, position),
            start,
        };
        self.begin_gesture();
        debug!(?edge, ?start, "resize started");
        emit(
            &mut self.callbacks.resize_start,
            &ResizeEvent {
                edge,
                coords: start,
                delta: Point::ZERO,
            },
        );
        true
    }

    /// Document-level pointer move.
    pub fn pointer_move(&mut self, position: Point) {
        let timer = ScopedTimer::for_pointer_handler("dnr_pointer_move");
        self.track_pointer(position);
        self.move_stats.record(timer.elapsed_ms());
    }

    fn track_pointer(&mut self, position: Point) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        let delta = session.track(position);
        self.apply(delta);

        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.update_pointer(PointerSource::Drag, position);
        }
    }

    /// Document-level pointer up. Ends any gesture and reports the result.
    pub fn pointer_up(&mut self, position: Point) {
        let Some(session) = self.state.session_mut() else {
            return;
        };
        let delta = session.track(position);
        self.apply(delta);

        match std::mem::take(&mut self.state) {
            DnrState::Idle => {}
            DnrState::Dragging { start, .. } => {
                let event = DragEvent {
                    coords: self.coords,
                    delta: self.coords_translation(start),
                };
                debug!(coords = ?event.coords, "drag stopped");
                emit(&mut self.callbacks.drag_stop, &event);
            }
            DnrState::Resizing { edge, start, .. } => {
                let event = ResizeEvent {
                    edge,
                    coords: self.coords,
                    delta: size_delta(start, self.coords),
                };
                debug!(?edge, coords = ?event.coords, "resize stopped");
                emit(&mut self.callbacks.resize_stop, &event);
            }
        }
        self.end_gesture();
    }

    /// Advance auto-scroll timers. Scrolling the offset parent moves the
    /// pointer in content space, so the gesture is re-applied.
    pub fn advance(&mut self, elapsed: Duration) -> Point {
        let Some(scroller) = self.auto_scroll.as_mut() else {
            return Point::ZERO;
        };
        let applied = scroller.advance(elapsed);
        if applied.is_zero() {
            return applied;
        }
        self.scrolled = self.scrolled + applied;
        if let Some(session) = self.state.session_mut() {
            let delta = session.last() - session.origin();
            self.apply(delta);
        }
        applied
    }

    /// Drop any gesture without reporting it and stop auto-scrolling.
    pub fn teardown(&mut self) {
        if !self.state.is_idle() {
            debug!("gesture abandoned on teardown");
        }
        self.state = DnrState::Idle;
        self.scrolled = Point::ZERO;
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.teardown();
        }
    }

    fn begin_gesture(&mut self) {
        self.scrolled = Point::ZERO;
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.set_active(true);
        }
    }

    fn end_gesture(&mut self) {
        self.scrolled = Point::ZERO;
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.set_active(false);
        }
    }

    /// Recompute the rectangle for a cumulative pointer delta.
    fn apply(&mut self, pointer_delta: Point) {
        let delta = pointer_delta + self.scrolled;
        match &self.state {
            DnrState::Idle => {}
            DnrState::Dragging { start, .. } => {
                let (coords, applied) = drag_coords(
                    *start,
                    delta,
                    self.config.drag_axis,
                    self.config.bounds.as_ref(),
                );
                self.coords = coords;
                emit(&mut self.callbacks.drag, &DragEvent { coords, delta: applied });
            }
            DnrState::Resizing { edge, start, .. } => {
                let edge = *edge;
                let start = *start;
                let coords = resize_coords(
                    start,
                    edge,
                    delta,
                    self.config.bounds.as_ref(),
                    &self.config.size,
                );
                self.coords = coords;
                emit(
                    &mut self.callbacks.resize,
                    &ResizeEvent {
                        edge,
                        coords,
                        delta: size_delta(start, coords),
                    },
                );
            }
        }
    }

    fn coords_translation(&self, start: Coordinates) -> Point {
        Point::new(
            self.coords.start_x - start.start_x,
            self.coords.start_y - start.start_y,
        )
    }
}

impl Drop for DragResizeController {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn size_delta(start: Coordinates, now: Coordinates) -> Point {
    Point::new(now.width() - start.width(), now.height() - start.height())
}
