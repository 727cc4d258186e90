//! Custom scrollbar kept in sync with a target scroll surface.
//!
//! Two update paths exist and neither feeds into the other: the host calls
//! [`SyncedScrollbar::on_target_scroll`] when the target scrolls natively,
//! and thumb drags write the target's offset directly. Thumb geometry is
//! always derived from the target, never stored.

use crate::constants::MIN_THUMB_EXTENT;
use crate::event::{Callback, emit};
use crate::geometry::{Axis, Point, clamp};
use crate::perf::{OperationStats, ScopedTimer};
use crate::session::{Document, GestureSession};
use crate::surface::{ScrollSyncState, SharedSurface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const OWNER: &str = "scrollbar";

/// Style overrides forwarded verbatim to the renderer.
pub type StyleMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarConfig {
    pub axis: Axis,
    /// Length of the track in pixels.
    pub track_extent: f32,
    /// Fixed thumb length; derived from the target when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_size: Option<f32>,
    /// Smallest derived thumb length.
    #[serde(default = "default_min_thumb_extent")]
    pub min_thumb_extent: f32,
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default)]
    pub thumb_style: StyleMap,
}

fn default_min_thumb_extent() -> f32 {
    MIN_THUMB_EXTENT
}

impl ScrollbarConfig {
    pub fn new(axis: Axis, track_extent: f32) -> Self {
        Self {
            axis,
            track_extent,
            thumb_size: None,
            min_thumb_extent: MIN_THUMB_EXTENT,
            style: StyleMap::new(),
            thumb_style: StyleMap::new(),
        }
    }

    pub fn with_thumb_size(mut self, thumb_size: f32) -> Self {
        self.thumb_size = Some(thumb_size);
        self
    }

    pub fn with_min_thumb_extent(mut self, min_thumb_extent: f32) -> Self {
        self.min_thumb_extent = min_thumb_extent;
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_thumb_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.thumb_style.insert(key.into(), value.into());
        self
    }
}

/// Offset written to the target by a thumb drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarScroll {
    pub axis: Axis,
    pub scroll_offset: f32,
}

/// What the host should render for the track and thumb.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarLayout {
    pub axis: Axis,
    pub track_extent: f32,
    pub thumb_offset: f32,
    pub thumb_extent: f32,
    /// False when the target has nothing to scroll.
    pub visible: bool,
    pub style: StyleMap,
    pub thumb_style: StyleMap,
}

/// Thumb length for a target state: the fixed `thumb_size` if configured,
/// otherwise the visible fraction of the track, never below the configured
/// minimum.
pub fn thumb_extent_for(state: &ScrollSyncState, config: &ScrollbarConfig) -> f32 {
    if let Some(size) = config.thumb_size {
        return size;
    }
    let track_extent = config.track_extent;
    if state.content_extent <= 0.0 {
        return track_extent.max(config.min_thumb_extent);
    }
    let extent = state.viewport_extent / state.content_extent * track_extent;
    extent.min(track_extent).max(config.min_thumb_extent)
}

/// Thumb position along the track for a target state.
pub fn thumb_offset_for(state: &ScrollSyncState, track_extent: f32, thumb_extent: f32) -> f32 {
    let max_offset = state.max_offset();
    if max_offset <= 0.0 {
        return 0.0;
    }
    let travel = (track_extent - thumb_extent).max(0.0);
    clamp(state.scroll_offset / max_offset, 0.0, 1.0) * travel
}

/// Target pixels per pixel of thumb movement.
///
/// Zero when either the target or the thumb cannot move.
pub fn drag_ratio_for(state: &ScrollSyncState, track_extent: f32, thumb_extent: f32) -> f32 {
    let travel = track_extent - thumb_extent;
    if travel <= 0.0 {
        return 0.0;
    }
    state.max_offset() / travel
}

struct ThumbDrag {
    gesture: GestureSession,
    initial_offset: f32,
    drag_ratio: f32,
}

pub struct SyncedScrollbar {
    config: ScrollbarConfig,
    target: SharedSurface,
    document: Document,
    thumb_offset: f32,
    thumb_extent: f32,
    drag: Option<ThumbDrag>,
    on_scroll: Option<Callback<ScrollbarScroll>>,
    move_stats: OperationStats,
}

impl SyncedScrollbar {
    pub fn new(config: ScrollbarConfig, target: SharedSurface) -> Self {
        Self::with_document(config, target, Document::new())
    }

    pub fn with_document(config: ScrollbarConfig, target: SharedSurface, document: Document) -> Self {
        let mut scrollbar = Self {
            config,
            target,
            document,
            thumb_offset: 0.0,
            thumb_extent: 0.0,
            drag: None,
            on_scroll: None,
            move_stats: OperationStats::new(),
        };
        scrollbar.on_target_scroll();
        scrollbar
    }

    /// Called after every offset this scrollbar writes to the target.
    pub fn on_scroll(mut self, callback: impl FnMut(&ScrollbarScroll) + Send + 'static) -> Self {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &ScrollbarConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Timings of thumb moves, including the final move on pointer up.
    pub fn move_stats(&self) -> &OperationStats {
        &self.move_stats
    }

    /// Resize the track and re-derive the thumb.
    pub fn set_track_extent(&mut self, track_extent: f32) {
        self.config.track_extent = track_extent;
        self.on_target_scroll();
    }

    fn target_state(&self) -> ScrollSyncState {
        self.target.lock().sync_state(self.config.axis)
    }

    /// Target→thumb path: re-derive the thumb from the target's current state.
    pub fn on_target_scroll(&mut self) {
        let state = self.target_state();
        self.thumb_extent = thumb_extent_for(&state, &self.config);
        self.thumb_offset = thumb_offset_for(&state, self.config.track_extent, self.thumb_extent);
    }

    pub fn thumb_extent(&self) -> f32 {
        self.thumb_extent
    }

    pub fn thumb_offset(&self) -> f32 {
        self.thumb_offset
    }

    pub fn drag_ratio(&self) -> f32 {
        drag_ratio_for(&self.target_state(), self.config.track_extent, self.thumb_extent)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Thumb→target path, step one: remember where the drag started.
    pub fn pointer_down(&mut self, position: Point) {
        if self.drag.is_some() {
            return;
        }
        let state = self.target_state();
        let drag_ratio = drag_ratio_for(&state, self.config.track_extent, self.thumb_extent);
        debug!(axis = ?self.config.axis, drag_ratio, "thumb drag started");
        self.drag = Some(ThumbDrag {
            gesture: GestureSession::begin(&self.document, OWNER, position),
            initial_offset: state.scroll_offset,
            drag_ratio,
        });
    }

    pub fn pointer_move(&mut self, position: Point) {
        let timer = ScopedTimer::for_pointer_handler("scrollbar_pointer_move");
        self.drag_thumb(position);
        self.move_stats.record(timer.elapsed_ms());
    }

    fn drag_thumb(&mut self, position: Point) {
        let axis = self.config.axis;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = drag.gesture.track(position).along(axis);

        let offset = {
            let mut target = self.target.lock();
            let max = target.max_scroll_offset(axis);
            let offset = clamp(drag.initial_offset + delta * drag.drag_ratio, 0.0, max);
            target.set_scroll_offset(axis, offset);
            target.scroll_offset(axis)
        };

        // The write came from this scrollbar, so the thumb follows directly
        // instead of waiting for the target's scroll notification.
        self.on_target_scroll();
        emit(
            &mut self.on_scroll,
            &ScrollbarScroll {
                axis,
                scroll_offset: offset,
            },
        );
    }

    pub fn pointer_up(&mut self, position: Point) {
        if self.drag.is_none() {
            return;
        }
        self.pointer_move(position);
        self.drag = None;
        debug!(axis = ?self.config.axis, "thumb drag ended");
    }

    pub fn layout(&self) -> ScrollbarLayout {
        ScrollbarLayout {
            axis: self.config.axis,
            track_extent: self.config.track_extent,
            thumb_offset: self.thumb_offset,
            thumb_extent: self.thumb_extent,
            visible: self.target_state().is_scrollable(),
            style: self.config.style.clone(),
            thumb_style: self.config.thumb_style.clone(),
        }
    }

    pub fn teardown(&mut self) {
        self.drag = None;
    }
}

impl Drop for SyncedScrollbar {
    fn drop(&mut self) {
        self.teardown();
    }
}
