//! Headless direct-manipulation engine for timeline editors.
//!
//! The host owns rendering and the event loop. It feeds pointer events,
//! item rectangles and scroll surfaces into the controllers here and gets
//! plain-data callbacks back:
//!
//! - [`dnr::DragResizeController`] drags a box and resizes it by its edges
//!   and corners under bounds and size constraints
//! - [`sortable::SortableList`] reports the insertion slot while an item of a
//!   list is dragged
//! - [`auto_scroll::EdgeAutoScroller`] scrolls the nearest scrollable
//!   ancestors while the pointer is close to their edges
//! - [`scrollbar::SyncedScrollbar`] keeps a custom scrollbar thumb in sync
//!   with a scroll surface in both directions
//!
//! Timers are logical. Hosts call `advance(elapsed)` from their loop and tests
//! drive time by hand.

pub mod auto_scroll;
pub mod constants;
pub mod dnr;
pub mod error;
pub mod event;
pub mod geometry;
pub mod hit_index;
pub mod logging;
pub mod perf;
pub mod scrollbar;
pub mod session;
pub mod settings;
pub mod settings_watcher;
pub mod sortable;
pub mod surface;
pub mod target;

pub use auto_scroll::{AutoScrollConfig, EdgeAutoScroller, PointerSource};
pub use dnr::{DnrConfig, DragResizeController};
pub use error::{ConfigError, ConfigResult};
pub use geometry::{Axis, Bounds, Coordinates, Point, Rect};
pub use scrollbar::{ScrollbarConfig, SyncedScrollbar};
pub use settings::InteractionSettings;
pub use sortable::{SortableConfig, SortableList};
pub use surface::{ScrollRegion, ScrollSurface, SharedSurface};
