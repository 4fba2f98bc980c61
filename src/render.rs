// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing primitives and the polyline-to-arrow pipeline.
//!
//! [`render_arrow`] turns a polyline and a set of [`ArrowOptions`] into a
//! [`RenderPath`], a flat list of [`DrawCommand`]s that any 2D canvas can
//! replay through the [`Canvas`] trait.

use alloc::string::String;
use alloc::vec::Vec;

use crate::arrow::{line_head, trend_outline};
use crate::common::{clamp_smoothness, is_drawable_width};
use crate::offset::oriented_tangent;
use crate::{
    dedup_points, smooth_path, ArrowStyle, ArrowStyleTable, BezPath, PathEl, Point, Rect,
    SegmentWindow, Vec2,
};

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb8(0, 0, 0);

    /// A color from its four components.
    #[inline]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// An opaque color.
    #[inline]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// One drawing primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawCommand {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Line from the current point.
    LineTo(Point),
    /// Cubic Bézier from the current point, through two control points.
    CurveTo(Point, Point, Point),
    /// Close the current subpath.
    ClosePath,
    /// Set the color used by the following fills.
    SetFillStyle(Color),
    /// Set the color used by the following strokes.
    SetStrokeStyle(Color),
    /// Fill the current path with the given opacity.
    Fill(f64),
    /// Stroke the current path with the given opacity.
    Stroke(f64),
}

impl DrawCommand {
    /// The geometric element of this command, if it is one.
    pub fn path_el(&self) -> Option<PathEl> {
        match *self {
            DrawCommand::MoveTo(p) => Some(PathEl::MoveTo(p)),
            DrawCommand::LineTo(p) => Some(PathEl::LineTo(p)),
            DrawCommand::CurveTo(p1, p2, p3) => Some(PathEl::CurveTo(p1, p2, p3)),
            DrawCommand::ClosePath => Some(PathEl::ClosePath),
            _ => None,
        }
    }
}

impl From<PathEl> for DrawCommand {
    fn from(el: PathEl) -> Self {
        match el {
            PathEl::MoveTo(p) => DrawCommand::MoveTo(p),
            PathEl::LineTo(p) => DrawCommand::LineTo(p),
            PathEl::CurveTo(p1, p2, p3) => DrawCommand::CurveTo(p1, p2, p3),
            PathEl::ClosePath => DrawCommand::ClosePath,
        }
    }
}

/// A 2D drawing surface that [`RenderPath`]s can be replayed onto.
///
/// The methods mirror the HTML canvas path API.
pub trait Canvas {
    /// Start a new subpath.
    fn move_to(&mut self, p: Point);
    /// Add a line to the current subpath.
    fn line_to(&mut self, p: Point);
    /// Add a cubic Bézier to the current subpath.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);
    /// Close the current subpath.
    fn close_path(&mut self);
    /// Set the fill color.
    fn set_fill_style(&mut self, color: Color);
    /// Set the stroke color.
    fn set_stroke_style(&mut self, color: Color);
    /// Fill the current path.
    fn fill(&mut self, opacity: f64);
    /// Stroke the current path.
    fn stroke(&mut self, opacity: f64);
}

/// An ordered list of drawing primitives.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPath(Vec<DrawCommand>);

impl RenderPath {
    /// An empty list.
    #[inline]
    pub fn new() -> RenderPath {
        RenderPath::default()
    }

    /// Append one command.
    #[inline]
    pub fn push(&mut self, cmd: DrawCommand) {
        self.0.push(cmd);
    }

    /// Append the elements of a path as geometry commands.
    pub fn append_path(&mut self, path: &BezPath) {
        self.0.extend(path.elements().iter().map(|&el| DrawCommand::from(el)));
    }

    /// The commands, in drawing order.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.0
    }

    /// Number of commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Issue every command to `canvas`, in order.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for cmd in &self.0 {
            match *cmd {
                DrawCommand::MoveTo(p) => canvas.move_to(p),
                DrawCommand::LineTo(p) => canvas.line_to(p),
                DrawCommand::CurveTo(p1, p2, p3) => canvas.curve_to(p1, p2, p3),
                DrawCommand::ClosePath => canvas.close_path(),
                DrawCommand::SetFillStyle(c) => canvas.set_fill_style(c),
                DrawCommand::SetStrokeStyle(c) => canvas.set_stroke_style(c),
                DrawCommand::Fill(opacity) => canvas.fill(opacity),
                DrawCommand::Stroke(opacity) => canvas.stroke(opacity),
            }
        }
    }

    /// The geometry commands as a [`BezPath`], dropping style and paint.
    pub fn to_bez_path(&self) -> BezPath {
        self.0.iter().filter_map(DrawCommand::path_el).collect()
    }

    /// The geometry as an SVG path string.
    pub fn to_svg_path(&self) -> String {
        self.to_bez_path().to_svg()
    }

    /// The rectangle enclosing every point of the geometry, control
    /// points included.
    pub fn control_box(&self) -> Option<Rect> {
        self.to_bez_path().control_box()
    }
}

impl Canvas for RenderPath {
    fn move_to(&mut self, p: Point) {
        self.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(DrawCommand::LineTo(p));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.push(DrawCommand::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(DrawCommand::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(DrawCommand::SetStrokeStyle(color));
    }

    fn fill(&mut self, opacity: f64) {
        self.push(DrawCommand::Fill(opacity));
    }

    fn stroke(&mut self, opacity: f64) {
        self.push(DrawCommand::Stroke(opacity));
    }
}

/// Resolved options for drawing one line or arrow.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowOptions {
    /// Line width. Also sizes arrowheads and the tail notch.
    pub line_width: f64,
    /// Widest half-width of a trend ribbon, `None` to use the line width.
    pub max_width: Option<f64>,
    /// Smoothing coefficient, `None` for straight segments.
    pub smoothness: Option<f64>,
    /// How the line is decorated.
    pub arrow_style: ArrowStyle,
    /// Whether the line is a closed loop. Closed lines get no arrowhead.
    pub closed: bool,
    /// Stroke color.
    pub line_color: Color,
    /// Fill color of a trend ribbon.
    pub fill_color: Color,
    /// Stroke opacity.
    pub line_opacity: f64,
    /// Fill opacity of a trend ribbon.
    pub fill_opacity: f64,
    /// Arrowhead and tail geometry.
    pub style_table: ArrowStyleTable,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        ArrowOptions {
            line_width: 1.0,
            max_width: None,
            smoothness: None,
            arrow_style: ArrowStyle::Classic,
            closed: false,
            line_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_opacity: 1.0,
            fill_opacity: 1.0,
            style_table: ArrowStyleTable::default(),
        }
    }
}

impl ArrowOptions {
    /// Options with the given line width and defaults otherwise.
    pub fn new(line_width: f64) -> Self {
        ArrowOptions {
            line_width,
            ..Default::default()
        }
    }

    /// Builder method for setting the line width.
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Builder method for setting the widest half-width of a trend ribbon.
    pub fn with_max_width(mut self, max_width: impl Into<Option<f64>>) -> Self {
        self.max_width = max_width.into();
        self
    }

    /// The widest half-width of a trend ribbon.
    pub fn ribbon_width(&self) -> f64 {
        self.max_width.unwrap_or(self.line_width)
    }

    /// Builder method for setting the smoothing coefficient.
    pub fn with_smoothness(mut self, smoothness: impl Into<Option<f64>>) -> Self {
        self.smoothness = smoothness.into();
        self
    }

    /// Builder method for setting the arrow style.
    pub fn with_arrow_style(mut self, style: ArrowStyle) -> Self {
        self.arrow_style = style;
        self
    }

    /// Builder method for closing the line into a loop.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Builder method for setting the stroke color and opacity.
    pub fn with_line(mut self, color: Color, opacity: f64) -> Self {
        self.line_color = color;
        self.line_opacity = opacity;
        self
    }

    /// Builder method for setting the fill color and opacity.
    pub fn with_fill(mut self, color: Color, opacity: f64) -> Self {
        self.fill_color = color;
        self.fill_opacity = opacity;
        self
    }

    /// Builder method for replacing the arrowhead geometry.
    pub fn with_style_table(mut self, table: ArrowStyleTable) -> Self {
        self.style_table = table;
        self
    }
}

/// Draw a polyline as a line or arrow.
///
/// An open line in the trend style becomes a filled, stroked ribbon (see
/// [`trend_outline`](crate::trend_outline)). Every other line is stroked
/// along its smoothed centerline and, unless closed, capped with a filled
/// arrowhead in the line color.
///
/// Nothing is drawn for a line width that is not a finite positive number,
/// or for fewer than two distinct points.
pub fn render_arrow(points: &[Point], opts: &ArrowOptions) -> RenderPath {
    let mut out = RenderPath::new();
    if !is_drawable_width(opts.line_width) {
        log::debug!("render: line width {} is not drawable, skipping", opts.line_width);
        return out;
    }

    if opts.arrow_style == ArrowStyle::Trend && !opts.closed {
        if let Some(outline) = trend_outline(
            points,
            opts.line_width,
            opts.ribbon_width(),
            opts.smoothness,
            opts.arrow_style,
            &opts.style_table,
        ) {
            out.push(DrawCommand::SetFillStyle(opts.fill_color));
            out.push(DrawCommand::SetStrokeStyle(opts.line_color));
            out.append_path(&outline.path);
            out.push(DrawCommand::Fill(opts.fill_opacity));
            out.push(DrawCommand::Stroke(opts.line_opacity));
        }
        return out;
    }

    let pts = dedup_points(points);
    let n = pts.len();
    if n < 2 {
        log::debug!("render: fewer than two distinct points, skipping");
        return out;
    }
    out.push(DrawCommand::SetStrokeStyle(opts.line_color));
    out.append_path(&smooth_path(&pts, opts.smoothness, opts.closed));
    out.push(DrawCommand::Stroke(opts.line_opacity));

    if !opts.closed {
        let table = &opts.style_table;
        let head = line_head(
            table.head(opts.arrow_style),
            pts[n - 1],
            end_tangent(&pts, opts.smoothness),
            table.head_size(opts.line_width),
        );
        if !head.is_empty() {
            out.push(DrawCommand::SetFillStyle(opts.line_color));
            out.append_path(&head);
            out.push(DrawCommand::Fill(opts.line_opacity));
        }
    }
    log::trace!("render: {} commands", out.len());
    out
}

/// Direction in which the drawn centerline arrives at its last vertex.
fn end_tangent(pts: &[Point], smoothness: Option<f64>) -> Vec2 {
    let n = pts.len();
    let chord = pts[n - 1] - pts[n - 2];
    match smoothness.map(clamp_smoothness) {
        Some(k) if n > 2 => {
            let (_, ctrl) = SegmentWindow::new(pts, n - 2, false).control_points(k);
            oriented_tangent(pts[n - 1] - ctrl, chord)
        }
        _ => chord.unit_or_zero(),
    }
}
