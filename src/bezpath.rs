// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths made of lines and cubic segments.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::{CubicBez, Point, Rect};

/// A path of line and cubic Bézier segments, possibly with multiple subpaths.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

impl PathEl {
    /// The end point of this element, if it has one.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::CurveTo(_, _, p) => Some(p),
            PathEl::ClosePath => None,
        }
    }
}

impl BezPath {
    /// Create a new path.
    #[inline]
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    #[inline]
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    #[inline]
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a cubic segment's control and end points onto the path.
    ///
    /// The cubic's start point is assumed to be the current point.
    pub fn cubic_to(&mut self, c: CubicBez) {
        self.push(PathEl::CurveTo(c.p1, c.p2, c.p3));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(*el, PathEl::LineTo(..) | PathEl::CurveTo(..)))
    }

    /// The last point of the path, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.0.iter().rev().find_map(PathEl::end_point)
    }

    /// The rectangle enclosing every point of the path, control points
    /// included.
    ///
    /// A Bézier segment lies within the convex hull of its control points,
    /// so this is a conservative bounding box. Returns `None` for a path
    /// without points.
    pub fn control_box(&self) -> Option<Rect> {
        Rect::enclosing(self.0.iter().flat_map(|el| {
            let pts: [Option<Point>; 3] = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => [Some(p), None, None],
                PathEl::CurveTo(p1, p2, p3) => [Some(p1), Some(p2), Some(p3)],
                PathEl::ClosePath => [None, None, None],
            };
            pts.into_iter().flatten()
        }))
    }

    /// Convert the path to an SVG path string representation.
    ///
    /// The current implementation doesn't take any special care to produce a
    /// short string (reducing precision, using relative movement).
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        for el in self.elements() {
            write_svg_el(&mut result, el);
        }
        result
    }
}

fn write_svg_el(out: &mut String, el: &PathEl) {
    if !out.is_empty() {
        out.push(' ');
    }
    // Writing into a `String` cannot fail.
    let _ = match *el {
        PathEl::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
        PathEl::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
        PathEl::CurveTo(p1, p2, p3) => write!(
            out,
            "C{},{} {},{} {},{}",
            p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        ),
        PathEl::ClosePath => write!(out, "Z"),
    };
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = core::iter::Cloned<core::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().cloned()
    }
}

impl IntoIterator for BezPath {
    type Item = PathEl;
    type IntoIter = alloc::vec::IntoIter<PathEl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        let vec: Vec<PathEl> = iter.into_iter().collect();
        BezPath::from_vec(vec)
    }
}
