// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow styles, arrowheads, tail caps and the trend-arrow outline.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use arrayvec::ArrayVec;

use crate::common::is_drawable_width;
use crate::offset::oriented_tangent;
use crate::spline::append_smooth;
use crate::{BezPath, OffsetCurves, Point, SmoothSpline, SplineBuilder, Vec2};

/// How the end of a line is decorated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ArrowStyle {
    /// A stroked line ending in a dart-shaped head.
    #[default]
    Classic,
    /// A stroked line ending in a triangular head.
    Sharp,
    /// A filled ribbon that tapers from the tail towards a kite-shaped head.
    Trend,
}

impl ArrowStyle {
    /// The lowercase name of the style.
    pub fn as_str(self) -> &'static str {
        match self {
            ArrowStyle::Classic => "classic",
            ArrowStyle::Sharp => "sharp",
            ArrowStyle::Trend => "trend",
        }
    }
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`ArrowStyle`] from a string fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseArrowStyleError {
    /// The input was empty or only whitespace.
    #[error("empty arrow style")]
    Empty,
    /// The input named no known style.
    #[error("unknown arrow style `{0}`, expected one of: classic, sharp, trend")]
    Unknown(String),
}

impl FromStr for ArrowStyle {
    type Err = ParseArrowStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseArrowStyleError::Empty);
        }
        [ArrowStyle::Classic, ArrowStyle::Sharp, ArrowStyle::Trend]
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseArrowStyleError::Unknown(s.to_string()))
    }
}

/// Outline of an arrowhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadShape {
    /// Two barbs swept back from the tip; five points on a ribbon.
    Kite,
    /// Straight sides from the base to the tip; three points on a ribbon.
    Sharp,
}

/// Geometry of one style's arrowhead.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadSpec {
    /// Outline kind.
    pub shape: HeadShape,
    /// Angle in degrees between the forward direction and each barb.
    pub barb_angle: f64,
}

/// Arrowhead and tail configuration, keyed by [`ArrowStyle`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowStyleTable {
    /// Head of [`ArrowStyle::Classic`].
    pub classic: HeadSpec,
    /// Head of [`ArrowStyle::Sharp`].
    pub sharp: HeadSpec,
    /// Head of [`ArrowStyle::Trend`].
    pub trend: HeadSpec,
    /// Head size as a multiple of the line width, before clamping.
    pub head_ratio: f64,
    /// Smallest head size.
    pub min_head: f64,
    /// Largest head size.
    pub max_head: f64,
    /// Depth of the tail notch as a multiple of the line width.
    pub tail_ratio: f64,
}

impl Default for ArrowStyleTable {
    fn default() -> Self {
        ArrowStyleTable {
            classic: HeadSpec {
                shape: HeadShape::Kite,
                barb_angle: 135.0,
            },
            sharp: HeadSpec {
                shape: HeadShape::Sharp,
                barb_angle: 150.0,
            },
            trend: HeadSpec {
                shape: HeadShape::Kite,
                barb_angle: 135.0,
            },
            head_ratio: 1.5,
            min_head: 8.0,
            max_head: 20.0,
            tail_ratio: 0.8,
        }
    }
}

impl ArrowStyleTable {
    /// The head of a style.
    pub fn head(&self, style: ArrowStyle) -> &HeadSpec {
        match style {
            ArrowStyle::Classic => &self.classic,
            ArrowStyle::Sharp => &self.sharp,
            ArrowStyle::Trend => &self.trend,
        }
    }

    /// Distance from the last vertex to the tip of the head.
    pub fn head_size(&self, line_width: f64) -> f64 {
        (line_width * self.head_ratio).clamp(self.min_head, self.max_head)
    }

    /// Depth of the tail notch.
    pub fn tail_notch(&self, line_width: f64) -> f64 {
        line_width * self.tail_ratio
    }
}

/// The five points of the notched cut closing a ribbon's tail.
///
/// Ordered from the left edge, through two points set back from the edges
/// by `notch` against the direction of travel, and the centerline vertex,
/// to the right edge.
pub fn tail_cap(left: Point, center: Point, right: Point, notch: f64) -> ArrayVec<Point, 5> {
    let mut tail = ArrayVec::new();
    tail.push(left);
    tail.push(left + (center - left).unit_or_zero().rotate_deg(-90.0) * notch);
    tail.push(center);
    tail.push(right + (center - right).unit_or_zero().rotate_deg(90.0) * notch);
    tail.push(right);
    tail
}

/// Points of an arrowhead closing a ribbon at `end`.
///
/// `tangent` is the unit direction of travel at `end`, and `right`/`left`
/// the ribbon edges there. The points run from the right edge, around the
/// tip, to the left edge.
pub fn ribbon_head(
    spec: &HeadSpec,
    end: Point,
    tangent: Vec2,
    size: f64,
    right: Point,
    left: Point,
) -> ArrayVec<Point, 5> {
    let v = tangent * size;
    let mut head = ArrayVec::new();
    head.push(right);
    if spec.shape == HeadShape::Kite {
        head.push(end + v.rotate_deg(-spec.barb_angle));
    }
    head.push(end + v);
    if spec.shape == HeadShape::Kite {
        head.push(end + v.rotate_deg(spec.barb_angle));
    }
    head.push(left);
    head
}

/// A closed arrowhead for the end of a stroked line.
///
/// A kite head is a dart with its notch on `end`; a sharp head a triangle.
pub fn line_head(spec: &HeadSpec, end: Point, tangent: Vec2, size: f64) -> BezPath {
    let v = tangent.unit_or_zero() * size;
    let mut path = BezPath::new();
    if v == Vec2::ZERO {
        return path;
    }
    path.move_to(end + v.rotate_deg(-spec.barb_angle));
    path.line_to(end + v);
    path.line_to(end + v.rotate_deg(spec.barb_angle));
    if spec.shape == HeadShape::Kite {
        path.line_to(end);
    }
    path.close_path();
    path
}

/// Geometry of a trend arrow, from the smoothed centerline to the final
/// closed outline.
#[derive(Clone, Debug)]
pub struct TrendOutline {
    /// The smoothed centerline.
    pub spline: SmoothSpline,
    /// Tapered ribbon edges.
    pub offsets: OffsetCurves,
    /// Tail cap points, see [`tail_cap`].
    pub tail: ArrayVec<Point, 5>,
    /// Arrowhead points, see [`ribbon_head`].
    pub head: ArrayVec<Point, 5>,
    /// The closed outline, ready to fill.
    pub path: BezPath,
}

/// Build the outline of a trend arrow along `points`.
///
/// The ribbon starts `max_width` wide on each side of the first vertex and
/// tapers towards the last, where `style`'s head takes over. The head and
/// the tail notch are sized from `line_width`. The outline
/// runs from the right edge's start along the smoothed right edge, around
/// the head, back along the smoothed left edge and through the tail cap to
/// the start.
///
/// Returns `None` when either width is not a finite positive number or
/// fewer than two distinct points remain.
pub fn trend_outline(
    points: &[Point],
    line_width: f64,
    max_width: f64,
    smoothness: Option<f64>,
    style: ArrowStyle,
    table: &ArrowStyleTable,
) -> Option<TrendOutline> {
    if !is_drawable_width(line_width) || !is_drawable_width(max_width) {
        log::debug!("trend arrow: widths {line_width}/{max_width} not drawable, skipping");
        return None;
    }
    let spline = SplineBuilder::new().smoothness(smoothness).build(points);
    if spline.is_empty() {
        log::debug!("trend arrow: fewer than two distinct points, skipping");
        return None;
    }
    let offsets = OffsetCurves::from_spline(&spline, max_width);
    if offsets.is_empty() {
        return None;
    }

    let pts = spline.points();
    let n = pts.len();
    let end_tangent = oriented_tangent(spline.tangents()[n - 1], pts[n - 1] - pts[n - 2]);
    let tail = tail_cap(
        offsets.left[0],
        pts[0],
        offsets.right[0],
        table.tail_notch(line_width),
    );
    let head = ribbon_head(
        table.head(style),
        pts[n - 1],
        end_tangent,
        table.head_size(line_width),
        offsets.right[n - 1],
        offsets.left[n - 1],
    );

    let mut path = BezPath::new();
    path.move_to(offsets.right[0]);
    append_smooth(&mut path, &offsets.right, smoothness, false, false);
    for &p in &head[1..] {
        path.line_to(p);
    }
    let mut left_back = offsets.left.clone();
    left_back.reverse();
    append_smooth(&mut path, &left_back, smoothness, false, false);
    for &p in &tail[1..] {
        path.line_to(p);
    }
    path.close_path();

    Some(TrendOutline {
        spline,
        offsets,
        tail,
        head,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathEl;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn parse_styles() {
        assert_eq!("classic".parse::<ArrowStyle>(), Ok(ArrowStyle::Classic));
        assert_eq!(" Sharp ".parse::<ArrowStyle>(), Ok(ArrowStyle::Sharp));
        assert_eq!("TREND".parse::<ArrowStyle>(), Ok(ArrowStyle::Trend));
        assert_eq!("".parse::<ArrowStyle>(), Err(ParseArrowStyleError::Empty));
        let err = "curly".parse::<ArrowStyle>().unwrap_err();
        assert_eq!(err, ParseArrowStyleError::Unknown("curly".into()));
        assert_eq!(
            err.to_string(),
            "unknown arrow style `curly`, expected one of: classic, sharp, trend"
        );
        assert_eq!(ArrowStyle::Trend.to_string(), "trend");
    }

    #[test]
    fn head_size_is_clamped() {
        let table = ArrowStyleTable::default();
        assert!((table.head_size(2.0) - 8.0).abs() < 1e-12);
        assert!((table.head_size(10.0) - 15.0).abs() < 1e-12);
        assert!((table.head_size(40.0) - 20.0).abs() < 1e-12);
        assert!((table.tail_notch(10.0) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn tail_notch_points_backwards() {
        let tail = tail_cap(
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, -10.0),
            8.0,
        );
        assert_eq!(tail.len(), 5);
        assert_near(tail[1], Point::new(-8.0, 10.0), 1e-12);
        assert_near(tail[3], Point::new(-8.0, -10.0), 1e-12);
        assert_eq!(tail[2], Point::new(0.0, 0.0));
    }

    #[test]
    fn kite_and_sharp_heads() {
        let table = ArrowStyleTable::default();
        let end = Point::new(100.0, 0.0);
        let right = Point::new(100.0, -2.0);
        let left = Point::new(100.0, 2.0);
        let t = Vec2::new(1.0, 0.0);

        let kite = ribbon_head(table.head(ArrowStyle::Trend), end, t, 15.0, right, left);
        assert_eq!(kite.len(), 5);
        assert_eq!(kite[0], right);
        assert_near(kite[2], Point::new(115.0, 0.0), 1e-12);
        // Barbs sweep back on the matching side.
        assert!(kite[1].y < 0.0 && kite[1].x < 100.0);
        assert!(kite[3].y > 0.0 && kite[3].x < 100.0);
        assert_eq!(kite[4], left);

        let sharp = ribbon_head(table.head(ArrowStyle::Sharp), end, t, 15.0, right, left);
        assert_eq!(sharp.as_slice(), &[right, Point::new(115.0, 0.0), left]);
    }

    #[test]
    fn line_heads() {
        let table = ArrowStyleTable::default();
        let end = Point::new(0.0, 0.0);
        let t = Vec2::new(0.0, 1.0);
        let dart = line_head(table.head(ArrowStyle::Classic), end, t, 10.0);
        assert_eq!(dart.elements().len(), 5);
        assert!(matches!(dart.elements()[1], PathEl::LineTo(p) if (p.y - 10.0).abs() < 1e-12));
        assert_eq!(dart.elements()[3], PathEl::LineTo(end));
        let triangle = line_head(table.head(ArrowStyle::Sharp), end, t, 10.0);
        assert_eq!(triangle.elements().len(), 4);
        assert!(line_head(&table.sharp, end, Vec2::ZERO, 10.0).elements().is_empty());
    }

    #[test]
    fn outline_is_one_closed_subpath() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
        ];
        let table = ArrowStyleTable::default();
        let outline = trend_outline(&pts, 10.0, 10.0, Some(0.5), ArrowStyle::Trend, &table)
            .expect("valid input");
        let els = outline.path.elements();
        let moves = els.iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count();
        assert_eq!(moves, 1);
        assert_eq!(els[0], PathEl::MoveTo(outline.offsets.right[0]));
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        // The tail ends where the outline started.
        assert_eq!(
            els[els.len() - 2],
            PathEl::LineTo(outline.offsets.right[0])
        );
        // Two curves per edge, four lines around the head, four in the tail.
        let curves = els.iter().filter(|el| matches!(el, PathEl::CurveTo(..))).count();
        let lines = els.iter().filter(|el| matches!(el, PathEl::LineTo(_))).count();
        assert_eq!(curves, 4);
        assert_eq!(lines, 8);
    }

    #[test]
    fn ribbon_width_is_independent_of_line_width() {
        let pts = [Point::new(0.0, 0.0), Point::new(80.0, 0.0)];
        let table = ArrowStyleTable::default();
        let outline = trend_outline(&pts, 4.0, 20.0, None, ArrowStyle::Trend, &table)
            .expect("valid input");
        assert!((outline.offsets.widths[0] - 20.0).abs() < 1e-12);
        assert!((outline.offsets.left[0].y - 20.0).abs() < 1e-12);
        // Head and notch still follow the line width.
        assert!((outline.head[2].x - (80.0 + table.head_size(4.0))).abs() < 1e-9);
        assert!((outline.tail[1].x + table.tail_notch(4.0)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_give_nothing() {
        let table = ArrowStyleTable::default();
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let style = ArrowStyle::Trend;
            assert!(trend_outline(&pts, width, 5.0, None, style, &table).is_none());
            assert!(trend_outline(&pts, 5.0, width, None, style, &table).is_none());
        }
        let dup = [Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
        assert!(trend_outline(&dup, 5.0, 5.0, None, ArrowStyle::Trend, &table).is_none());
    }

    #[test]
    fn curved_outline_heads_along_end_tangent() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 40.0),
            Point::new(80.0, 40.0),
            Point::new(120.0, 0.0),
        ];
        let table = ArrowStyleTable::default();
        let outline = trend_outline(&pts, 6.0, 6.0, Some(0.8), ArrowStyle::Trend, &table)
            .expect("valid input");
        let tip = outline.head[2];
        let end = pts[3];
        assert!((tip.distance(end) - table.head_size(6.0)).abs() < 1e-9);
        // Heading down and to the right, like the last segment.
        assert!(tip.x > end.x && tip.y < end.y);
    }
}
