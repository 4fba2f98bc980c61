// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point, and cleanup of raw polylines.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use smallvec::SmallVec;

use crate::common::COINCIDENT_EPSILON;
use crate::Vec2;

/// A 2D point.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

/// A polyline after [`dedup_points`]; short lines stay on the stack.
pub type Polyline = SmallVec<[Point; 16]>;

impl Point {
    /// The point (0, 0).
    pub const ZERO: Point = Point::new(0., 0.);

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Convert this point into a `Vec2`.
    #[inline(always)]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// Unit vector pointing from `self` towards `other`.
    ///
    /// Returns [`Vec2::ZERO`] if the points are closer than the coincidence
    /// tolerance.
    #[inline]
    pub fn unit_to(self, other: Point) -> Vec2 {
        (other - self).unit_or_zero()
    }

    /// Reflect `other` through `self`, giving `2 * self - other`.
    #[inline]
    pub fn reflect(self, other: Point) -> Point {
        self + (self - other)
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

}

/// Remove adjacent vertices that coincide with their predecessor.
///
/// Two vertices coincide when they are closer than
/// [`COINCIDENT_EPSILON`]. Non-finite vertices are dropped as well, since
/// they cannot take part in any segment.
pub fn dedup_points(points: &[Point]) -> Polyline {
    let mut result = Polyline::new();
    for &p in points {
        if !p.is_finite() {
            continue;
        }
        match result.last() {
            Some(&last) if last.distance(p) < COINCIDENT_EPSILON => (),
            _ => result.push(p),
        }
    }
    result
}

impl From<(f64, f64)> for Point {
    #[inline(always)]
    fn from(v: (f64, f64)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    #[inline(always)]
    fn from(v: Point) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x + other.x, self.y + other.y);
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x - other.x, self.y - other.y);
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline(always)]
    fn from(p: Point) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline(always)]
    fn from(p: mint::Point2<f64>) -> Point {
        Point { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Vec2::new(10., 0.),
            Point::new(-10., 0.)
        );
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn distance() {
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(0., 5.);
        assert_eq!(p1.distance(p2), 5.);

        let p1 = Point::new(-11., 1.);
        let p2 = Point::new(-7., -2.);
        assert_eq!(p1.distance(p2), 5.);
    }

    #[test]
    fn unit_between_points() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        let u = a.unit_to(b);
        assert!((u.hypot() - 1.0).abs() < 1e-12);
        assert_eq!(a.unit_to(a), Vec2::ZERO);
    }

    #[test]
    fn reflection() {
        let end = Point::new(2.0, 3.0);
        assert_eq!(end.reflect(Point::new(1.0, 1.0)), Point::new(3.0, 5.0));
    }

    #[test]
    fn dedup_collapses_adjacent_duplicates() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1e-8, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let out = dedup_points(&pts);
        assert_eq!(
            out.as_slice(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0)
            ]
        );
    }

    #[test]
    fn dedup_drops_non_finite() {
        let pts = [
            Point::new(f64::NAN, 0.0),
            Point::new(1.0, 2.0),
            Point::new(f64::INFINITY, 0.0),
        ];
        assert_eq!(dedup_points(&pts).as_slice(), &[Point::new(1.0, 2.0)]);
    }

    #[test]
    fn display() {
        let p = Point::new(0.12345, 9.87654);
        assert_eq!(format!("{p:.2}"), "(0.12, 9.88)");
    }
}
