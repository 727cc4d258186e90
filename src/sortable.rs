//! Sortable list controller.
//!
//! Turns a pointer drag on one item of an indexed list into a stream of
//! insertion slots. The host renders the list and feeds item rectangles;
//! the controller reports where the dragged item would land and leaves the
//! actual reorder to the host (see [`reorder`]).
//!
//! The slot is computed against a snapshot of the layout taken at pointer
//! down, so siblings shifting to make room during the drag do not feed back
//! into the computation.

use crate::auto_scroll::{AutoScrollConfig, EdgeAutoScroller, PointerSource};
use crate::event::{Callback, emit};
use crate::geometry::{Axis, Point, Rect};
use crate::hit_index::HitIndex;
use crate::perf::{OperationStats, ScopedTimer};
use crate::session::{Document, GestureSession};
use crate::surface::{ElementId, ScrollAncestors, ScrollParents};
use crate::target::{EventTarget, Selector};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const OWNER: &str = "sortable";

/// Sortable list configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SortableConfig {
    /// Primary axis along which items are laid out.
    pub axis: Axis,
    /// Pointer downs inside a matching element never start a sort.
    pub cancel: Option<Selector>,
    /// Edge auto-scroll while sorting; `None` disables it.
    pub auto_scroll: Option<AutoScrollConfig>,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            cancel: None,
            auto_scroll: None,
        }
    }
}

impl SortableConfig {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    pub fn with_cancel(mut self, selector: &str) -> Self {
        self.cancel = Some(Selector::parse(selector));
        self
    }

    pub fn with_auto_scroll(mut self, config: AutoScrollConfig) -> Self {
        self.auto_scroll = Some(config);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStart {
    pub source_index: usize,
    pub edge_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortUpdate {
    pub source_index: usize,
    pub edge_index: usize,
    pub previous_edge_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortEnd {
    pub source_index: usize,
    pub final_index: usize,
}

/// Insertion slot for the item at `source` when the pointer sits at `pointer`
/// on the primary axis: the number of other items whose midpoint it passed.
pub fn edge_index(midpoints: &[f32], source: usize, pointer: f32) -> usize {
    midpoints
        .iter()
        .enumerate()
        .filter(|(index, midpoint)| *index != source && pointer > **midpoint)
        .count()
}

/// Move the element at `from` so it ends up at `to`.
///
/// Out-of-range sources are ignored; targets past the end append.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

struct SortSession {
    gesture: GestureSession,
    source_index: usize,
    edge_index: usize,
    midpoints: Vec<f32>,
    /// Scroll applied to the list since the sort started.
    scrolled: Point,
}

#[derive(Default)]
struct SortCallbacks {
    start: Option<Callback<SortStart>>,
    update: Option<Callback<SortUpdate>>,
    end: Option<Callback<SortEnd>>,
}

/// Drag-to-reorder over an indexed list.
pub struct SortableList {
    config: SortableConfig,
    rects: Vec<Rect>,
    hit_index: HitIndex,
    document: Document,
    session: Option<SortSession>,
    auto_scroll: Option<EdgeAutoScroller>,
    callbacks: SortCallbacks,
    move_stats: OperationStats,
}

impl SortableList {
    pub fn new(config: SortableConfig) -> Self {
        Self::with_document(config, Document::new())
    }

    pub fn with_document(config: SortableConfig, document: Document) -> Self {
        Self {
            config,
            rects: Vec::new(),
            hit_index: HitIndex::new(),
            document,
            session: None,
            auto_scroll: None,
            callbacks: SortCallbacks::default(),
            move_stats: OperationStats::new(),
        }
    }

    /// Resolve auto-scroll surfaces from the list element. Does nothing unless
    /// the configuration carries an auto-scroll section.
    pub fn with_scroll_ancestors(
        self,
        reference: ElementId,
        ancestors: Arc<dyn ScrollAncestors>,
    ) -> Self {
        match self.config.auto_scroll {
            Some(config) => {
                let scroller = EdgeAutoScroller::new(config.active(false), reference, ancestors);
                self.with_auto_scroller(scroller)
            }
            None => self,
        }
    }

    /// Auto-scroll known surfaces. Does nothing unless the configuration
    /// carries an auto-scroll section.
    pub fn with_scroll_parents(self, parents: ScrollParents) -> Self {
        match self.config.auto_scroll {
            Some(config) => {
                let scroller = EdgeAutoScroller::with_surfaces(config.active(false), parents);
                self.with_auto_scroller(scroller)
            }
            None => self,
        }
    }

    /// Use a prepared scroller, e.g. one carrying an `on_scroll` callback.
    pub fn with_auto_scroller(mut self, mut scroller: EdgeAutoScroller) -> Self {
        scroller.set_active(false);
        self.auto_scroll = Some(scroller);
        self
    }

    pub fn on_start(mut self, callback: impl FnMut(&SortStart) + Send + 'static) -> Self {
        self.callbacks.start = Some(Box::new(callback));
        self
    }

    pub fn on_sort_update(mut self, callback: impl FnMut(&SortUpdate) + Send + 'static) -> Self {
        self.callbacks.update = Some(Box::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl FnMut(&SortEnd) + Send + 'static) -> Self {
        self.callbacks.end = Some(Box::new(callback));
        self
    }

    /// Replace the rendered item rectangles; index `i` is item `i`.
    ///
    /// A sort in progress keeps using the layout captured at its start.
    pub fn set_items(&mut self, rects: Vec<Rect>) {
        self.hit_index.rebuild(rects.iter());
        self.rects = rects;
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn is_sorting(&self) -> bool {
        self.session.is_some()
    }

    /// Source and current slot of the sort in progress.
    pub fn current(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|session| (session.source_index, session.edge_index))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn move_stats(&self) -> &OperationStats {
        &self.move_stats
    }

    pub fn auto_scroller(&self) -> Option<&EdgeAutoScroller> {
        self.auto_scroll.as_ref()
    }

    /// Start sorting the item under the pointer. Returns whether a sort began.
    pub fn pointer_down(&mut self, position: Point, target: &EventTarget) -> bool {
        if self.session.is_some() {
            return false;
        }
        if let Some(cancel) = &self.config.cancel {
            if target.closest_matches(cancel) {
                debug!(selector = cancel.as_str(), "sort cancelled by selector");
                return false;
            }
        }

        let source = target
            .item
            .or_else(|| self.hit_index.topmost_at(position))
            .filter(|index| *index < self.rects.len());
        let Some(source_index) = source else {
            return false;
        };

        let axis = self.config.axis;
        self.session = Some(SortSession {
            gesture: GestureSession::begin(&self.document, OWNER, position),
            source_index,
            edge_index: source_index,
            midpoints: self.rects.iter().map(|rect| rect.midpoint(axis)).collect(),
            scrolled: Point::ZERO,
        });
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.set_active(true);
        }

        debug!(source_index, "sort started");
        emit(
            &mut self.callbacks.start,
            &SortStart {
                source_index,
                edge_index: source_index,
            },
        );
        true
    }

    pub fn pointer_move(&mut self, position: Point) {
        let timer = ScopedTimer::for_pointer_handler("sortable_pointer_move");
        self.track_pointer(position);
        self.move_stats.record(timer.elapsed_ms());
    }

    fn track_pointer(&mut self, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.gesture.track(position);
        self.refresh_edge_index();

        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.update_pointer(PointerSource::Drag, position);
        }
    }

    pub fn pointer_up(&mut self, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.gesture.track(position);
        self.refresh_edge_index();

        if let Some(session) = self.session.take() {
            let event = SortEnd {
                source_index: session.source_index,
                final_index: session.edge_index,
            };
            debug!(source = event.source_index, final_index = event.final_index, "sort ended");
            emit(&mut self.callbacks.end, &event);
        }
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.set_active(false);
        }
    }

    /// Advance auto-scroll timers and re-derive the slot under the pointer.
    pub fn advance(&mut self, elapsed: Duration) -> Point {
        let Some(scroller) = self.auto_scroll.as_mut() else {
            return Point::ZERO;
        };
        let applied = scroller.advance(elapsed);
        if applied.is_zero() {
            return applied;
        }
        if let Some(session) = self.session.as_mut() {
            session.scrolled = session.scrolled + applied;
            self.refresh_edge_index();
        }
        applied
    }

    /// Abandon any sort without reporting it and stop auto-scrolling.
    pub fn teardown(&mut self) {
        if self.session.take().is_some() {
            debug!("sort abandoned on teardown");
        }
        if let Some(scroller) = self.auto_scroll.as_mut() {
            scroller.teardown();
        }
    }

    fn refresh_edge_index(&mut self) {
        let axis = self.config.axis;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let pointer = session.gesture.last().along(axis) + session.scrolled.along(axis);
        let next = edge_index(&session.midpoints, session.source_index, pointer);
        if next == session.edge_index {
            return;
        }

        let event = SortUpdate {
            source_index: session.source_index,
            edge_index: next,
            previous_edge_index: session.edge_index,
        };
        session.edge_index = next;
        debug!(source = event.source_index, edge = next, "sort slot changed");
        emit(&mut self.callbacks.update, &event);
    }
}

impl Drop for SortableList {
    fn drop(&mut self) {
        self.teardown();
    }
}
