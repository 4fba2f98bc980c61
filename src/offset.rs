// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tapered offset curves on both sides of a spline.
//!
//! Each vertex is pushed sideways along the normal of its tangent, by a
//! width that starts at the maximum on the first vertex and shrinks
//! linearly with the arc length travelled, down to a floor at the last
//! vertex. The two resulting point sequences are the edges of a ribbon
//! that is widest at its tail.

use alloc::vec::Vec;

use crate::spline::chord_tangent;
use crate::{Point, SmoothSpline, Vec2};

/// The narrowest a tapered ribbon gets, as a fraction of its maximum width.
pub const TAPER_FLOOR_RATIO: f64 = 0.2;

/// Left and right edges of a tapered ribbon.
///
/// All three vectors have one entry per vertex of the source polyline.
/// "Left" is the side of the anti-clockwise normal of the direction of
/// travel (in a y-up frame).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetCurves {
    /// Points on the left side.
    pub left: Vec<Point>,
    /// Points on the right side.
    pub right: Vec<Point>,
    /// Offset distance at each vertex.
    pub widths: Vec<f64>,
}

impl OffsetCurves {
    /// Offset the vertices of a spline, using its tangents and lengths.
    pub fn from_spline(spline: &SmoothSpline, max_width: f64) -> OffsetCurves {
        offset_curves(
            spline.points(),
            spline.tangents(),
            spline.segment_lengths(),
            max_width,
        )
    }

    /// Number of offset vertices on each side.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether no offsets were produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// The width a ribbon tapers down to at its far end.
#[inline]
pub fn taper_floor(max_width: f64) -> f64 {
    max_width * TAPER_FLOOR_RATIO
}

/// Widths at each vertex of an open polyline with the given segment
/// lengths.
///
/// The result has one more entry than `segment_lengths`. The first width
/// is `max_width`; later ones fall linearly in the travelled arc length
/// towards [`taper_floor`], reaching it at the last vertex.
pub fn taper_widths(segment_lengths: &[f64], max_width: f64) -> Vec<f64> {
    let total: f64 = segment_lengths.iter().sum();
    let floor = taper_floor(max_width);
    let mut widths = Vec::with_capacity(segment_lengths.len() + 1);
    widths.push(max_width);
    let mut traveled = 0.0;
    for &len in segment_lengths {
        traveled += len;
        let w = if total > 0.0 {
            floor + (max_width - floor) * (1.0 - traveled / total)
        } else {
            max_width
        };
        widths.push(w);
    }
    widths
}

/// Compute the left and right offset points of an open polyline.
///
/// `tangents` must have one entry per point and `segment_lengths` one
/// fewer, as produced by [`SmoothSpline`]. If the lengths disagree, or
/// there are fewer than two points, the result is empty.
pub fn offset_curves(
    points: &[Point],
    tangents: &[Vec2],
    segment_lengths: &[f64],
    max_width: f64,
) -> OffsetCurves {
    let n = points.len();
    if n < 2 || tangents.len() != n || segment_lengths.len() != n - 1 {
        log::debug!(
            "offset: mismatched inputs ({n} points, {} tangents, {} lengths), skipping",
            tangents.len(),
            segment_lengths.len()
        );
        return OffsetCurves::default();
    }

    let widths = taper_widths(segment_lengths, max_width);
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    for i in 0..n {
        // The bisector of the adjacent chords points along the direction of
        // travel even where the polyline doubles back.
        let reference = chord_tangent(points, i, false);
        let normal = oriented_tangent(tangents[i], reference).turn_90();
        let p = points[i];
        left.push(p + normal * widths[i]);
        right.push(p - normal * widths[i]);
    }
    log::trace!("offset: {n} vertices, widths {} to {}", widths[0], widths[n - 1]);
    OffsetCurves {
        left,
        right,
        widths,
    }
}

/// Orient a tangent along the reference direction of travel.
///
/// A tangent is ambiguous up to sign; it is flipped when it makes more
/// than a quarter turn with `reference`. A zero tangent is replaced by the
/// reference direction.
///
/// The tangents of a [`SmoothSpline`] already point along the polyline,
/// within a quarter turn of the bisector of the adjacent chords, so with
/// that bisector as reference they are kept as they are.
pub fn oriented_tangent(tangent: Vec2, reference: Vec2) -> Vec2 {
    let t = tangent.unit_or_zero();
    if t == Vec2::ZERO {
        return reference.unit_or_zero();
    }
    if t.dot(reference) < 0.0 {
        -t
    } else {
        t
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn straight_line(n: usize, spacing: f64) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64 * spacing, 0.0)).collect()
    }

    #[test]
    fn taper_is_monotone() {
        let pts = straight_line(5, 25.0);
        let spline = SmoothSpline::build(&pts, Some(0.5));
        let offsets = OffsetCurves::from_spline(&spline, 20.0);
        let w = &offsets.widths;
        assert_eq!(w.len(), 5);
        assert!((w[0] - 20.0).abs() < 1e-12);
        for pair in w.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "{w:?}");
        }
        assert!((w[4] - taper_floor(20.0)).abs() < 1e-9);
        assert!((w[2] - 12.0).abs() < 1e-6);
    }

    #[test]
    fn floor_is_a_fifth_of_max() {
        assert!((taper_floor(20.0) - 4.0).abs() < 1e-12);
        assert!((taper_floor(5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_keeps_max_width() {
        assert_eq!(taper_widths(&[0.0, 0.0], 6.0), alloc::vec![6.0, 6.0, 6.0]);
    }

    #[test]
    fn mismatched_inputs_are_a_no_op() {
        let pts = straight_line(3, 10.0);
        let t = [Vec2::new(1.0, 0.0); 3];
        assert!(offset_curves(&pts, &t[..2], &[10.0, 10.0], 5.0).is_empty());
        assert!(offset_curves(&pts, &t, &[10.0], 5.0).is_empty());
        assert!(offset_curves(&pts[..1], &t[..1], &[], 5.0).is_empty());
    }

    #[test]
    fn left_is_anticlockwise_of_travel() {
        let pts = straight_line(2, 10.0);
        let t = [Vec2::new(1.0, 0.0); 2];
        let offsets = offset_curves(&pts, &t, &[10.0], 5.0);
        assert_eq!(offsets.left[0], Point::new(0.0, 5.0));
        assert_eq!(offsets.right[0], Point::new(0.0, -5.0));
        assert_eq!(offsets.left[1], Point::new(10.0, 1.0));
        assert_eq!(offsets.right[1], Point::new(10.0, -1.0));
    }

    #[test]
    fn backwards_tangents_are_flipped() {
        let pts = straight_line(2, 10.0);
        let forward = offset_curves(&pts, &[Vec2::new(1.0, 0.0); 2], &[10.0], 5.0);
        let backward = offset_curves(&pts, &[Vec2::new(-1.0, 0.0); 2], &[10.0], 5.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn orientation_across_the_branch_cut() {
        // Angles of 179 and -179 degrees differ by two degrees, not 358.
        let t = Vec2::from_angle(179f64.to_radians());
        let r = Vec2::from_angle(-179f64.to_radians());
        assert!((oriented_tangent(t, r) - t).hypot() < 1e-12);
        assert!((oriented_tangent(-t, r) - t).hypot() < 1e-12);
        let up = oriented_tangent(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert!((up - Vec2::new(0.0, 1.0)).hypot() < 1e-12);
    }

    fn left_side_signs(spline: &SmoothSpline, offsets: &OffsetCurves) -> Vec<bool> {
        spline
            .points()
            .iter()
            .zip(spline.tangents())
            .zip(&offsets.left)
            .map(|((&p, &t), &l)| t.cross(l - p) > 0.0)
            .collect()
    }

    #[test]
    fn left_stays_left_around_a_hairpin() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(90.0, 5.0),
        ];
        for smoothness in [None, Some(0.8)] {
            let spline = SmoothSpline::build(&pts, smoothness);
            let offsets = OffsetCurves::from_spline(&spline, 10.0);
            assert_eq!(left_side_signs(&spline, &offsets), [true, true, true]);
        }
        // The turning vertex is pushed off the anticlockwise side of travel.
        let spline = SmoothSpline::build(&pts, Some(0.8));
        let offsets = OffsetCurves::from_spline(&spline, 10.0);
        assert!(offsets.left[1].y > 0.0);
        assert!(offsets.right[1].y < 0.0);
    }

    #[test]
    fn left_stays_left_on_random_doubling_back() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let n = rng.random_range(3..12);
            let pts: Vec<Point> = (0..n)
                .map(|_| {
                    Point::new(
                        rng.random_range(-100.0..100.0),
                        rng.random_range(-100.0..100.0),
                    )
                })
                .collect();
            let smoothness = if rng.random_bool(0.2) {
                None
            } else {
                Some(rng.random_range(0.1..1.0))
            };
            let spline = SmoothSpline::build(&pts, smoothness);
            let offsets = OffsetCurves::from_spline(&spline, 8.0);
            let signs = left_side_signs(&spline, &offsets);
            assert!(signs.iter().all(|&s| s), "{pts:?} {smoothness:?} {signs:?}");
        }
    }

    #[test]
    fn offsets_are_equidistant_and_opposite() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..50 {
            let n = rng.random_range(2..10);
            let mut x = 0.0;
            let pts: Vec<Point> = (0..n)
                .map(|_| {
                    x += rng.random_range(5.0..60.0);
                    Point::new(x, rng.random_range(-40.0..40.0))
                })
                .collect();
            let smoothness = if rng.random_bool(0.2) {
                None
            } else {
                Some(rng.random_range(0.0..1.0))
            };
            let spline = SmoothSpline::build(&pts, smoothness);
            let max_width = rng.random_range(1.0..30.0);
            let offsets = OffsetCurves::from_spline(&spline, max_width);
            assert_eq!(offsets.len(), spline.points().len());
            for (i, &p) in spline.points().iter().enumerate() {
                let w = offsets.widths[i];
                let l = offsets.left[i] - p;
                let r = offsets.right[i] - p;
                assert!((l.hypot() - w).abs() < 1e-9);
                assert!((r.hypot() - w).abs() < 1e-9);
                // Opposite sides of the tangent line.
                let t = spline.tangents()[i];
                assert!(t.cross(l) * t.cross(r) < 0.0);
                assert!(w <= max_width + 1e-12 && w >= taper_floor(max_width) - 1e-9);
            }
        }
    }
}
