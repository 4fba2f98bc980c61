// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control points for a smooth curve through a sequence of points.
//!
//! Each segment between two consecutive vertices becomes a cubic Bézier
//! whose control points are derived from the vertex and its neighbours,
//! after Maxim Shemanarev's "Interpolation with Bezier Curves"
//! (<http://www.antigrain.com/research/bezier_interpolation/>).

use crate::{CubicBez, Point};

/// The Bézier control points incident to one vertex of a spline.
///
/// `prev` belongs to the segment arriving at the vertex, `next` to the
/// segment leaving it. Either is `None` at an open end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoints {
    /// Control point of the incoming segment.
    pub prev: Option<Point>,
    /// Control point of the outgoing segment.
    pub next: Option<Point>,
}

/// Four consecutive points around one segment.
///
/// `p1` and `p2` are the segment ends, `p0` and `p3` the neighbours used
/// to estimate tangents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentWindow {
    /// The vertex before the segment.
    pub p0: Point,
    /// Segment start.
    pub p1: Point,
    /// Segment end.
    pub p2: Point,
    /// The vertex after the segment.
    pub p3: Point,
}

impl SegmentWindow {
    /// The window for the segment starting at vertex `i`.
    ///
    /// On an open sequence the missing neighbour beyond either end is a
    /// virtual point, the adjacent vertex reflected through the end vertex.
    /// On a closed sequence indices wrap around.
    ///
    /// `points` must hold at least two points and `i` must name a segment:
    /// `i + 1 < points.len()` when open, `i < points.len()` when closed.
    pub fn new(points: &[Point], i: usize, closed: bool) -> SegmentWindow {
        let n = points.len();
        if closed {
            return SegmentWindow {
                p0: points[(i + n - 1) % n],
                p1: points[i],
                p2: points[(i + 1) % n],
                p3: points[(i + 2) % n],
            };
        }
        let p1 = points[i];
        let p2 = points[i + 1];
        let p0 = if i == 0 { p1.reflect(p2) } else { points[i - 1] };
        let p3 = if i + 2 < n { points[i + 2] } else { p2.reflect(p1) };
        SegmentWindow { p0, p1, p2, p3 }
    }

    /// Solve for the two control points of the segment.
    ///
    /// `smoothness` in `(0, 1]` scales how far the control points reach
    /// from their vertex. The first returned point is the "next" control of
    /// `p1`, the second the "prev" control of `p2`.
    pub fn control_points(&self, smoothness: f64) -> (Point, Point) {
        let SegmentWindow { p0, p1, p2, p3 } = *self;
        let c1 = p0.midpoint(p1);
        let c2 = p1.midpoint(p2);
        let c3 = p2.midpoint(p3);

        let len1 = p0.distance(p1);
        let len2 = p1.distance(p2);
        let len3 = p2.distance(p3);

        // Blend the midpoints by relative edge length so uneven spacing
        // does not overshoot.
        let k1 = ratio(len1, len2);
        let k2 = ratio(len2, len3);
        let m1 = c1.lerp(c2, k1);
        let m2 = c2.lerp(c3, k2);

        let ctrl1 = p1 + (c2 - m1) * smoothness;
        let ctrl2 = p2 + (c2 - m2) * smoothness;
        (ctrl1, ctrl2)
    }

    /// The cubic Bézier for this segment.
    pub fn to_cubic(&self, smoothness: f64) -> CubicBez {
        let (ctrl1, ctrl2) = self.control_points(smoothness);
        CubicBez::new(self.p1, ctrl1, ctrl2, self.p2)
    }
}

#[inline]
fn ratio(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum > 0.0 {
        a / sum
    } else {
        0.5
    }
}
