// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use crate::common::{ARCLEN_FLAT_THRESHOLD, ARCLEN_LOG_EPSILON};
use crate::{ParamCurve, ParamCurveArclen, Point};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct QuadBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Closed-form arc length.
    ///
    /// Integrates `|B'(t)|` analytically; see
    /// <https://math.stackexchange.com/questions/12186>. When the second
    /// derivative vanishes the curve is a line traversed at constant speed
    /// and the chord length is returned. A small epsilon inside the
    /// logarithms keeps the near-straight case finite.
    pub fn arclen_closed_form(&self) -> f64 {
        let v = 2.0 * (self.p1 - self.p0);
        let w = (self.p2 - self.p1) - (self.p1 - self.p0);

        let uu = 4.0 * w.hypot2();
        if uu < ARCLEN_FLAT_THRESHOLD {
            return self.p0.distance(self.p2);
        }

        let vv = 4.0 * v.dot(w);
        let ww = v.hypot2();

        let t1 = 2.0 * (uu * (uu + vv + ww)).sqrt();
        let t2 = 2.0 * uu + vv;
        let t3 = vv * vv - 4.0 * uu * ww;
        let t4 = 2.0 * (uu * ww).sqrt();

        let eps = ARCLEN_LOG_EPSILON;
        (t1 * t2 - t3 * (t2 + t1 + eps).ln() - (vv * t4 - t3 * (vv + t4 + eps).ln()))
            / (8.0 * uu.powf(1.5))
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveArclen for QuadBez {
    /// The closed form is exact up to the logarithm epsilon, so `accuracy`
    /// is ignored.
    fn arclen(&self, _accuracy: f64) -> f64 {
        self.arclen_closed_form()
    }
}
