// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smooth splines through polylines.
//!
//! A [`SmoothSpline`] replaces every segment of a polyline with a cubic
//! Bézier (see [`SegmentWindow`]) and records, per vertex, the incident
//! control points and the tangent of the smoothed curve, and per segment,
//! its arc length. These are the inputs of the offset-curve stage.

use alloc::vec::Vec;

use crate::common::clamp_smoothness;
use crate::point::{dedup_points, Polyline};
use crate::{BezPath, ControlPoints, CubicBez, Point, SegmentWindow, Vec2};

/// Distance by which the synthetic boundary points extend an open polyline
/// beyond its ends.
pub const DEFAULT_EXTENSION: f64 = 200.0;

/// Options for building a [`SmoothSpline`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineBuilder {
    smoothness: Option<f64>,
    closed: bool,
    extension: f64,
}

impl Default for SplineBuilder {
    fn default() -> Self {
        SplineBuilder {
            smoothness: None,
            closed: false,
            extension: DEFAULT_EXTENSION,
        }
    }
}

impl SplineBuilder {
    /// An open, unsmoothed builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing coefficient.
    ///
    /// `None` keeps straight segments. Values are clamped into `(0, 1]`.
    pub fn smoothness(mut self, smoothness: Option<f64>) -> Self {
        self.smoothness = smoothness.map(clamp_smoothness);
        self
    }

    /// Treat the polyline as a closed loop.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Set the extension distance of the synthetic boundary points.
    ///
    /// Non-positive or non-finite values fall back to [`DEFAULT_EXTENSION`].
    pub fn extension(mut self, extension: f64) -> Self {
        self.extension = if extension.is_finite() && extension > 0.0 {
            extension
        } else {
            DEFAULT_EXTENSION
        };
        self
    }

    /// Build the spline through `points`.
    ///
    /// Adjacent duplicate points are removed first. Fewer than two distinct
    /// points give an empty spline.
    pub fn build(&self, points: &[Point]) -> SmoothSpline {
        let points = dedup_points(points);
        let n = points.len();
        if n < 2 {
            log::trace!("spline: {n} distinct points, nothing to build");
            return SmoothSpline::default();
        }
        // Two points close into a degenerate loop, so they stay open.
        let closed = self.closed && n > 2;
        let spline = match self.smoothness {
            Some(k) if n > 2 => {
                if closed {
                    SmoothSpline::closed_curve(points, k)
                } else {
                    SmoothSpline::open_curve(points, k, self.extension)
                }
            }
            _ => SmoothSpline::straight(points, closed),
        };
        log::trace!(
            "spline: {} vertices, {} segments, smooth={}, length={}",
            spline.points.len(),
            spline.lengths.len(),
            spline.is_smooth(),
            spline.total_length()
        );
        spline
    }
}

/// A smoothed polyline with per-vertex tangents and per-segment lengths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothSpline {
    points: Polyline,
    controls: Vec<ControlPoints>,
    lengths: Vec<f64>,
    tangents: Vec<Vec2>,
    closed: bool,
}

impl SmoothSpline {
    /// Build an open spline with the default extension distance.
    ///
    /// Shorthand for `SplineBuilder::new().smoothness(smoothness).build(points)`.
    pub fn build(points: &[Point], smoothness: Option<f64>) -> SmoothSpline {
        SplineBuilder::new().smoothness(smoothness).build(points)
    }

    /// Straight segments between the vertices.
    fn straight(points: Polyline, closed: bool) -> SmoothSpline {
        let n = points.len();
        let n_segs = if closed { n } else { n - 1 };
        let lengths = (0..n_segs)
            .map(|i| points[i].distance(points[(i + 1) % n]))
            .collect();
        let tangents = (0..n).map(|i| chord_tangent(&points, i, closed)).collect();
        SmoothSpline {
            controls: alloc::vec![ControlPoints::default(); n],
            points,
            lengths,
            tangents,
            closed,
        }
    }

    /// Open curve, stabilized at both ends by synthetic extension points.
    fn open_curve(points: Polyline, k: f64, extension: f64) -> SmoothSpline {
        let n = points.len();
        let mut ext = Vec::with_capacity(n + 2);
        ext.push(points[0] + points[1].unit_to(points[0]) * extension);
        ext.extend_from_slice(&points);
        ext.push(points[n - 1] + points[n - 2].unit_to(points[n - 1]) * extension);

        // Every real vertex sits between two extended segments, so it gets
        // both of its control points.
        let mut ext_controls = alloc::vec![ControlPoints::default(); n + 2];
        for i in 0..=n {
            let (c1, c2) = SegmentWindow::new(&ext, i, false).control_points(k);
            ext_controls[i].next = Some(c1);
            ext_controls[i + 1].prev = Some(c2);
        }
        let controls = ext_controls[1..=n].to_vec();
        SmoothSpline::from_controls(points, controls, false)
    }

    /// Closed curve, indices wrap around.
    fn closed_curve(points: Polyline, k: f64) -> SmoothSpline {
        let n = points.len();
        let mut controls = alloc::vec![ControlPoints::default(); n];
        for i in 0..n {
            let (c1, c2) = SegmentWindow::new(&points, i, true).control_points(k);
            controls[i].next = Some(c1);
            controls[(i + 1) % n].prev = Some(c2);
        }
        SmoothSpline::from_controls(points, controls, true)
    }

    fn from_controls(points: Polyline, controls: Vec<ControlPoints>, closed: bool) -> SmoothSpline {
        let n = points.len();
        let n_segs = if closed { n } else { n - 1 };
        let lengths = (0..n_segs)
            .map(|i| {
                let j = (i + 1) % n;
                let c = CubicBez::new(
                    points[i],
                    controls[i].next.unwrap_or(points[i]),
                    controls[j].prev.unwrap_or(points[j]),
                    points[j],
                );
                c.arclen_estimate()
            })
            .collect();
        let tangents = (0..n)
            .map(|i| {
                let p = points[i];
                let t = match controls[i] {
                    ControlPoints {
                        prev: Some(prev),
                        next: Some(next),
                    } => prev.unit_to(next),
                    ControlPoints {
                        prev: None,
                        next: Some(next),
                    } => p.unit_to(next),
                    ControlPoints {
                        prev: Some(prev),
                        next: None,
                    } => prev.unit_to(p),
                    ControlPoints {
                        prev: None,
                        next: None,
                    } => Vec2::ZERO,
                };
                if t == Vec2::ZERO {
                    chord_tangent(&points, i, closed)
                } else {
                    t
                }
            })
            .collect();
        SmoothSpline {
            points,
            controls,
            lengths,
            tangents,
            closed,
        }
    }

    /// The vertices, after deduplication.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Control points incident to each vertex.
    ///
    /// Both are `None` for straight splines.
    #[inline]
    pub fn control_points(&self) -> &[ControlPoints] {
        &self.controls
    }

    /// Arc length of each segment.
    ///
    /// An open spline of `n` vertices has `n - 1` segments, a closed one `n`.
    #[inline]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Unit tangent of the smoothed curve at each vertex.
    #[inline]
    pub fn tangents(&self) -> &[Vec2] {
        &self.tangents
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Whether the spline wraps around.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the segments are curves rather than straight lines.
    pub fn is_smooth(&self) -> bool {
        self.controls.iter().any(|c| c.next.is_some())
    }

    /// Whether there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// The cubic Bézier of each segment.
    ///
    /// Straight segments come out as cubics with their control points on
    /// the end points.
    pub fn segments(&self) -> impl Iterator<Item = CubicBez> + '_ {
        let n = self.points.len();
        (0..self.lengths.len()).map(move |i| {
            let j = (i + 1) % n;
            CubicBez::new(
                self.points[i],
                self.controls[i].next.unwrap_or(self.points[i]),
                self.controls[j].prev.unwrap_or(self.points[j]),
                self.points[j],
            )
        })
    }

    /// The smoothed centerline as a path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.is_empty() {
            return path;
        }
        path.move_to(self.points[0]);
        let smooth = self.is_smooth();
        for c in self.segments() {
            if smooth {
                path.cubic_to(c);
            } else {
                path.line_to(c.p3);
            }
        }
        if self.closed {
            path.close_path();
        }
        path
    }
}

/// Draw a smooth curve through `points` directly.
///
/// Unlike [`SmoothSpline`], open ends use reflected virtual neighbours
/// rather than extension points. With fewer than three points, or no
/// smoothness, the result is a straight polyline. Points are used as
/// given; callers deduplicate first. Fewer than two points give an empty
/// path.
pub fn smooth_path(points: &[Point], smoothness: Option<f64>, closed: bool) -> BezPath {
    let mut path = BezPath::new();
    append_smooth(&mut path, points, smoothness, closed, true);
    if closed && points.len() > 2 {
        path.close_path();
    }
    path
}

/// Append a smooth curve through `points` to `path`.
///
/// With `move_to` unset, the curve continues the current subpath from
/// `points[0]`, which callers arrange to be the current point.
pub(crate) fn append_smooth(
    path: &mut BezPath,
    points: &[Point],
    smoothness: Option<f64>,
    closed: bool,
    move_to: bool,
) {
    let n = points.len();
    if n < 2 {
        return;
    }
    if move_to {
        path.move_to(points[0]);
    }
    let n_segs = if closed && n > 2 { n } else { n - 1 };
    match smoothness.map(clamp_smoothness) {
        Some(k) if n > 2 => {
            let closed = n_segs == n;
            for i in 0..n_segs {
                path.cubic_to(SegmentWindow::new(points, i, closed).to_cubic(k));
            }
        }
        _ => {
            for i in 0..n_segs {
                path.line_to(points[(i + 1) % n]);
            }
        }
    }
}

/// Tangent of a polyline at a vertex: the unit bisector of the incoming
/// and outgoing directions.
pub(crate) fn chord_tangent(points: &[Point], i: usize, closed: bool) -> Vec2 {
    let n = points.len();
    let incoming = if i > 0 {
        points[i - 1].unit_to(points[i])
    } else if closed {
        points[n - 1].unit_to(points[0])
    } else {
        Vec2::ZERO
    };
    let outgoing = if i + 1 < n {
        points[i].unit_to(points[i + 1])
    } else if closed {
        points[i].unit_to(points[0])
    } else {
        Vec2::ZERO
    };
    let bisector = (incoming + outgoing).unit_or_zero();
    if bisector != Vec2::ZERO {
        bisector
    } else if outgoing != Vec2::ZERO {
        outgoing
    } else {
        incoming
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{ParamCurveArclen, PathEl};

    fn assert_near(v0: Vec2, v1: Vec2, epsilon: f64) {
        assert!((v1 - v0).hypot() < epsilon, "{v0:?} != {v1:?}");
    }

    #[test]
    fn too_few_points() {
        assert!(SmoothSpline::build(&[], Some(0.5)).is_empty());
        let single = SmoothSpline::build(&[Point::new(1.0, 1.0)], Some(0.5));
        assert!(single.is_empty());
        assert!(single.tangents().is_empty());
        assert!(single.to_path().elements().is_empty());
    }

    #[test]
    fn two_points_are_straight() {
        let pts = [Point::new(3.0, 4.0), Point::new(6.0, 8.0)];
        for smoothness in [None, Some(0.5), Some(1.0)] {
            let spline = SmoothSpline::build(&pts, smoothness);
            assert_eq!(spline.segment_lengths(), &[5.0]);
            assert_eq!(spline.tangents().len(), 2);
            for &t in spline.tangents() {
                assert_near(t, Vec2::new(0.6, 0.8), 1e-12);
            }
            assert!(!spline.is_smooth());
        }
    }

    #[test]
    fn duplicates_are_removed() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let spline = SmoothSpline::build(&pts, Some(0.5));
        assert_eq!(spline.points().len(), 2);
        assert_eq!(spline.segment_lengths(), &[10.0]);
    }

    #[test]
    fn straight_line_has_straight_tangents() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
        ];
        let spline = SmoothSpline::build(&pts, Some(0.5));
        assert!(spline.is_smooth());
        assert_eq!(spline.control_points().len(), 3);
        assert_eq!(spline.segment_lengths().len(), 2);
        for &t in spline.tangents() {
            assert_near(t, Vec2::new(1.0, 0.0), 1e-12);
        }
        for &len in spline.segment_lengths() {
            assert!((len - 50.0).abs() < 1e-6, "{len}");
        }
        assert!((spline.total_length() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn every_vertex_gets_both_controls() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 30.0),
            Point::new(80.0, -10.0),
            Point::new(120.0, 20.0),
        ];
        let spline = SmoothSpline::build(&pts, Some(0.8));
        for c in spline.control_points() {
            assert!(c.prev.is_some() && c.next.is_some());
        }
        for &t in spline.tangents() {
            assert!((t.hypot() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tangents_follow_travel_direction() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 40.0),
            Point::new(60.0, 0.0),
        ];
        let spline = SmoothSpline::build(&pts, Some(1.0));
        let t = spline.tangents();
        assert!(t[0].x > 0.0 && t[0].y > 0.0);
        // The peak of a symmetric bump is horizontal.
        assert_near(t[1], Vec2::new(1.0, 0.0), 1e-9);
        assert!(t[2].x > 0.0 && t[2].y < 0.0);
    }

    #[test]
    fn lengths_match_adaptive_arclen() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pts: Vec<Point> = (0..6)
                .map(|i| Point::new(i as f64 * 40.0, rng.random_range(-30.0..30.0)))
                .collect();
            let spline = SmoothSpline::build(&pts, Some(rng.random_range(0.1..1.0)));
            for (c, &len) in spline.segments().zip(spline.segment_lengths()) {
                let precise = c.arclen(1e-9);
                assert!((precise - len).abs() / precise < 0.05, "{precise} vs {len}");
                // Never shorter than the chord.
                assert!(len >= c.p0.distance(c.p3) - 1e-6);
            }
        }
    }

    #[test]
    fn unsmoothed_polyline() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let spline = SmoothSpline::build(&pts, None);
        assert_eq!(spline.segment_lengths(), &[10.0, 10.0]);
        let s = 0.5f64.sqrt();
        assert_near(spline.tangents()[0], Vec2::new(1.0, 0.0), 1e-12);
        assert_near(spline.tangents()[1], Vec2::new(s, s), 1e-12);
        assert_near(spline.tangents()[2], Vec2::new(0.0, 1.0), 1e-12);
        let path = spline.to_path();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(pts[0]),
                PathEl::LineTo(pts[1]),
                PathEl::LineTo(pts[2]),
            ]
        );
    }

    #[test]
    fn closed_spline_wraps() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let spline = SplineBuilder::new()
            .smoothness(Some(0.5))
            .closed(true)
            .build(&pts);
        assert!(spline.is_closed());
        assert_eq!(spline.segment_lengths().len(), 4);
        let lengths = spline.segment_lengths();
        for &len in lengths {
            assert!((len - lengths[0]).abs() < 1e-9);
        }
        let path = spline.to_path();
        assert_eq!(path.elements().len(), 6);
        assert_eq!(path.elements()[5], PathEl::ClosePath);
    }

    #[test]
    fn open_builder_ignores_closing_for_two_points() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let spline = SplineBuilder::new().closed(true).build(&pts);
        assert!(!spline.is_closed());
        assert_eq!(spline.segment_lengths(), &[10.0]);
    }

    #[test]
    fn extension_changes_end_controls_only_slightly() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 20.0),
            Point::new(100.0, 0.0),
        ];
        let near = SplineBuilder::new()
            .smoothness(Some(0.5))
            .extension(10.0)
            .build(&pts);
        let far = SplineBuilder::new().smoothness(Some(0.5)).build(&pts);
        assert_eq!(near.points(), far.points());
        assert_ne!(near.control_points()[0], far.control_points()[0]);
        // The middle vertex only sees its real neighbours.
        assert_eq!(near.control_points()[1], far.control_points()[1]);
    }

    #[test]
    fn smooth_path_open_and_closed() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
        ];
        let open = smooth_path(&pts, Some(0.5), false);
        assert_eq!(open.elements().len(), 3);
        assert_eq!(open.elements()[0], PathEl::MoveTo(pts[0]));
        assert!(matches!(open.elements()[2], PathEl::CurveTo(_, _, p) if p == pts[2]));

        let closed = smooth_path(&pts, Some(0.5), true);
        assert_eq!(closed.elements().len(), 5);
        assert!(matches!(closed.elements()[3], PathEl::CurveTo(_, _, p) if p == pts[0]));
        assert_eq!(closed.elements()[4], PathEl::ClosePath);

        let straight = smooth_path(&pts[..2], Some(0.5), false);
        assert_eq!(
            straight.elements(),
            &[PathEl::MoveTo(pts[0]), PathEl::LineTo(pts[1])]
        );
        assert!(smooth_path(&pts[..1], Some(0.5), false).elements().is_empty());
    }
}
