//! Scrollable surfaces supplied by the host.
//!
//! The engine never owns a real viewport. Hosts implement [`ScrollSurface`]
//! for whatever backs their scroll containers and share it as a
//! [`SharedSurface`] between the host, the auto-scroller and the scrollbar.
//! [`ScrollRegion`] is a plain in-memory implementation.

use crate::geometry::{Axis, Rect, clamp};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A scrollable container as seen by the interaction engine.
pub trait ScrollSurface: Send {
    /// Visible rectangle, in the pointer coordinate space.
    fn rect(&self) -> Rect;

    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Total scrollable content extent on `axis`.
    fn content_extent(&self, axis: Axis) -> f32;

    /// Visible extent on `axis`.
    fn viewport_extent(&self, axis: Axis) -> f32;

    /// Native relative scroll.
    fn scroll_by(&mut self, axis: Axis, by: f32);

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32);

    /// Largest reachable scroll offset on `axis`.
    fn max_scroll_offset(&self, axis: Axis) -> f32 {
        (self.content_extent(axis) - self.viewport_extent(axis)).max(0.0)
    }

    fn sync_state(&self, axis: Axis) -> ScrollSyncState {
        ScrollSyncState {
            scroll_offset: self.scroll_offset(axis),
            content_extent: self.content_extent(axis),
            viewport_extent: self.viewport_extent(axis),
        }
    }
}

/// A surface shared between the host and one or more controllers.
pub type SharedSurface = Arc<Mutex<dyn ScrollSurface>>;

/// Wrap a concrete surface for sharing.
pub fn share<S: ScrollSurface + 'static>(surface: S) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}

/// Scroll metrics read from a surface for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSyncState {
    pub scroll_offset: f32,
    pub content_extent: f32,
    pub viewport_extent: f32,
}

impl ScrollSyncState {
    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    pub fn is_scrollable(&self) -> bool {
        self.max_offset() > 0.0
    }
}

/// Opaque identity of a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Nearest scrollable ancestors of an element, one per axis.
#[derive(Clone, Default)]
pub struct ScrollParents {
    pub horizontal: Option<SharedSurface>,
    pub vertical: Option<SharedSurface>,
}

impl ScrollParents {
    pub fn get(&self, axis: Axis) -> Option<&SharedSurface> {
        match axis {
            Axis::X => self.horizontal.as_ref(),
            Axis::Y => self.vertical.as_ref(),
        }
    }

    /// The same surface scrolling on both axes.
    pub fn both(surface: SharedSurface) -> Self {
        Self {
            horizontal: Some(surface.clone()),
            vertical: Some(surface),
        }
    }
}

impl std::fmt::Debug for ScrollParents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollParents")
            .field("horizontal", &self.horizontal.is_some())
            .field("vertical", &self.vertical.is_some())
            .finish()
    }
}

/// Host lookup from an element to its nearest scrollable ancestors.
pub trait ScrollAncestors: Send + Sync {
    fn scroll_parents(&self, element: ElementId) -> ScrollParents;
}

/// A lookup that always answers with the same surfaces.
#[derive(Clone, Default)]
pub struct FixedScrollParents(pub ScrollParents);

impl ScrollAncestors for FixedScrollParents {
    fn scroll_parents(&self, _element: ElementId) -> ScrollParents {
        self.0.clone()
    }
}

/// In-memory scroll container that clamps like a browser viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRegion {
    rect: Rect,
    content: (f32, f32),
    offset: (f32, f32),
}

impl ScrollRegion {
    /// A region whose visible rectangle is `rect` and whose content measures
    /// `content_width` by `content_height`.
    pub fn new(rect: Rect, content_width: f32, content_height: f32) -> Self {
        Self {
            rect,
            content: (content_width, content_height),
            offset: (0.0, 0.0),
        }
    }

    pub fn with_offset(mut self, axis: Axis, offset: f32) -> Self {
        self.set_scroll_offset(axis, offset);
        self
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.set_scroll_offset(Axis::X, self.offset.0);
        self.set_scroll_offset(Axis::Y, self.offset.1);
    }
}

impl ScrollSurface for ScrollRegion {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.offset.0,
            Axis::Y => self.offset.1,
        }
    }

    fn content_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.content.0,
            Axis::Y => self.content.1,
        }
    }

    fn viewport_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.rect.width(),
            Axis::Y => self.rect.height(),
        }
    }

    fn scroll_by(&mut self, axis: Axis, by: f32) {
        let current = self.scroll_offset(axis);
        self.set_scroll_offset(axis, current + by);
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32) {
        let clamped = clamp(offset, 0.0, self.max_scroll_offset(axis));
        match axis {
            Axis::X => self.offset.0 = clamped,
            Axis::Y => self.offset.1 = clamped,
        }
    }
}
