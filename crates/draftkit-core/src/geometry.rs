//! Geometric primitives for shape rendering and placement.
//!
//! This module provides the geometric types used by shape plugins and the
//! render core to position primitives and to answer bounding-box queries.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in item-local or diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Matrix`] - A 2D affine transformation used to place item containers
//!
//! # Coordinate System
//!
//! Draftkit uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Shape plugins draw in item-local coordinates: the item's top-left corner
//! is `(0, 0)` and its bottom-right corner is `(width, height)`.

use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use draftkit_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds describe where a primitive is placed (the `bounds` argument of the
/// primitive operations) and what a bounding-box query returns.
///
/// # Examples
///
/// ```
/// # use draftkit_core::geometry::Bounds;
/// let bounds = Bounds::new(10.0, 20.0, 100.0, 40.0);
/// assert_eq!(bounds.right(), 110.0);
/// assert_eq!(bounds.bottom(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Zero-sized bounds at the origin, returned for elements without geometry.
    pub const EMPTY: Bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Creates bounds from the top-left corner and a width and height
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates the smallest bounds that contains every given point.
    ///
    /// Returns `None` when the iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| {
            let bounds = Self {
                min_x: point.x,
                min_y: point.y,
                max_x: point.x,
                max_y: point.y,
            };
            Some(match acc {
                Some(acc) => acc.merge(&bounds),
                None => bounds,
            })
        })
    }

    /// Returns the left edge
    pub fn x(self) -> f32 {
        self.min_x
    }

    /// Returns the top edge
    pub fn y(self) -> f32 {
        self.min_y
    }

    /// Returns the right edge
    pub fn right(self) -> f32 {
        self.max_x
    }

    /// Returns the bottom edge
    pub fn bottom(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns true if the bounds cover no area
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Returns the four corners, clockwise from the top-left
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use draftkit_core::geometry::Bounds;
    /// let header = Bounds::new(0.0, 0.0, 100.0, 30.0);
    /// let content = Bounds::new(10.0, 40.0, 120.0, 80.0);
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Shrinks the bounds by `amount` on every side, never below zero size
    pub fn deflate(&self, amount: f32) -> Self {
        let width = (self.width() - 2.0 * amount).max(0.0);
        let height = (self.height() - 2.0 * amount).max(0.0);
        Self::new(self.min_x + amount, self.min_y + amount, width, height)
    }
}

/// A 2D affine transformation `[a c e; b d f; 0 0 1]`, using SVG's
/// `matrix(a b c d e f)` component order.
///
/// # Examples
///
/// ```
/// # use draftkit_core::geometry::{Matrix, Point};
/// let matrix = Matrix::translate(10.0, 5.0);
/// let moved = matrix.transform_point(Point::new(1.0, 1.0));
/// assert_eq!(moved, Point::new(11.0, 6.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// A pure translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::IDENTITY
        }
    }

    /// A rotation by `degrees` (clockwise in screen space) about `center`
    pub fn rotate_about(degrees: f32, center: Point) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotation = Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        };
        Self::translate(center.x, center.y)
            .multiply(&rotation)
            .multiply(&Self::translate(-center.x, -center.y))
    }

    /// Scales and translates `from` onto `to`.
    ///
    /// An axis along which `from` has no extent keeps a scale of one and is
    /// only translated.
    pub fn fit(from: Bounds, to: Bounds) -> Self {
        let scale = |source: f32, target: f32| {
            if source.abs() > f32::EPSILON {
                target / source
            } else {
                1.0
            }
        };
        let a = scale(from.width(), to.width());
        let d = scale(from.height(), to.height());
        Self {
            a,
            d,
            e: to.min_x - from.min_x * a,
            f: to.min_y - from.min_y * d,
            ..Self::IDENTITY
        }
    }

    /// Returns `self * other`: `other` is applied first
    pub fn multiply(&self, other: &Matrix) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns the six components in SVG `matrix(...)` order
    pub fn components(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn transform_point(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    /// Returns the axis-aligned box around the four transformed corners
    pub fn transform_bounds(&self, bounds: Bounds) -> Bounds {
        if self.is_identity() {
            return bounds;
        }

        Bounds::from_points(bounds.corners().map(|corner| self.transform_point(corner)))
            .unwrap_or(bounds)
    }
}
