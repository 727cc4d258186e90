//! Interaction-wide constants.
//!
//! Centralizes magic numbers for gesture handling so the controllers and the
//! settings defaults agree on one set of values.

// ============================================================================
// Edge Auto-Scroll
// ============================================================================

/// Interval between auto-scroll ticks in milliseconds
pub const AUTO_SCROLL_TICK_MS: u64 = 25;

/// Distance (px) from an edge inside which the fast speed applies
pub const DEFAULT_FAST_THRESHOLD: f32 = 3.0;

/// Distance (px) from an edge inside which the medium speed applies
pub const DEFAULT_MEDIUM_THRESHOLD: f32 = 9.0;

/// Distance (px) from an edge inside which scrolling starts at all
pub const DEFAULT_SLOW_THRESHOLD: f32 = 20.0;

/// Pixels scrolled per tick in the fast band
pub const FAST_SCROLL_SPEED: f32 = 30.0;

/// Pixels scrolled per tick in the medium band
pub const MEDIUM_SCROLL_SPEED: f32 = 15.0;

/// Pixels scrolled per tick in the slow band
pub const SLOW_SCROLL_SPEED: f32 = 5.0;

// ============================================================================
// Drag & Resize
// ============================================================================

/// Width of the hit strip centred on each resize edge
pub const DEFAULT_HANDLE_SIZE: f32 = 8.0;

// ============================================================================
// Scrollbar
// ============================================================================

/// Smallest thumb extent the scrollbar will render
pub const MIN_THUMB_EXTENT: f32 = 1.0;

// ============================================================================
// Profiling
// ============================================================================

/// Budget for a single pointer-move handler before it is reported as slow
pub const POINTER_MOVE_BUDGET_MS: f64 = 4.0;
