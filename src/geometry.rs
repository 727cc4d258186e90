//! Geometry primitives shared by every gesture controller.
//!
//! Everything in here is pure and total: no function panics, including
//! `clamp` with an inverted range (see [`clamp`]).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// Bound `value` to `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics. With `min > max` the upper bound
/// is applied last and wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// A zero-length range maps everything to `0`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp((value - a) / (b - a), 0.0, 1.0)
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis restriction for drag translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAxis {
    X,
    Y,
    #[default]
    Both,
}

impl DragAxis {
    pub fn allows(self, axis: Axis) -> bool {
        match self {
            DragAxis::Both => true,
            DragAxis::X => axis == Axis::X,
            DragAxis::Y => axis == Axis::Y,
        }
    }
}

/// A pointer position or a 2D delta, in the host's pointer coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// A point with `value` on `axis` and zero on the other.
    #[inline]
    pub fn on_axis(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => Self::new(value, 0.0),
            Axis::Y => Self::new(0.0, value),
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle given by its four edges.
///
/// Also used as the clamp region for drag and resize gestures (`Bounds`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Clamp region for a dragged or resized rectangle.
pub type Bounds = Rect;

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Point, width: f32, height: f32) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Leading edge on `axis` (left or top).
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing edge on `axis` (right or bottom).
    pub fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    pub fn midpoint(&self, axis: Axis) -> f32 {
        lerp(self.start(axis), self.end(axis), 0.5)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.contains_horizontally(point.x) && self.contains_vertically(point.y)
    }

    #[inline]
    pub fn contains_horizontally(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    #[inline]
    pub fn contains_vertically(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn encloses(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }
}

/// Rectangle corners in the coordinate space of the offset parent.
///
/// Start and end may invert mid-gesture; width and height are always reported
/// as absolute differences.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

impl Coordinates {
    pub const fn new(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    pub fn width(&self) -> f32 {
        (self.end_x - self.start_x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.end_y - self.start_y).abs()
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
        }
    }

    pub fn translate(&self, by: Point) -> Self {
        Self::new(
            self.start_x + by.x,
            self.start_y + by.y,
            self.end_x + by.x,
            self.end_y + by.y,
        )
    }

    /// The rectangle covered by these corners, whatever their order.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            self.start_x.min(self.end_x),
            self.start_y.min(self.end_y),
            self.start_x.max(self.end_x),
            self.start_y.max(self.end_y),
        )
    }
}

/// Optional minimum and maximum extents for a resized rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeConstraint {
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
}

impl SizeConstraint {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Clamp `extent` on `axis` into this constraint.
    ///
    /// Minimum is applied before maximum, so an inverted pair resolves to the
    /// maximum.
    pub fn clamp_extent(&self, axis: Axis, extent: f32) -> f32 {
        let (min, max) = match axis {
            Axis::X => (self.min_width, self.max_width),
            Axis::Y => (self.min_height, self.max_height),
        };
        let mut value = extent;
        if let Some(min) = min {
            value = value.max(min);
        }
        if let Some(max) = max {
            value = value.min(max);
        }
        value
    }
}
