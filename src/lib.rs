// Copyright 2026 the Trend Arrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smoothed polylines and tapered trend arrows.
//!
//! This crate turns an ordered list of 2D points into either a smooth curve
//! made of cubic Béziers, or a "trend arrow": a filled ribbon that follows
//! the smoothed polyline, tapers from its tail towards its end, and finishes
//! in an arrowhead. It is pure geometry; the output is a list of drawing
//! primitives ([`RenderPath`]) to be replayed onto a canvas, or the raw
//! intermediate data for callers that draw it themselves.
//!
//! # Examples
//!
//! Drawing a trend arrow:
//! ```
//! use trend_arrow::{render_arrow, ArrowOptions, ArrowStyle, Point};
//!
//! let points = [Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)];
//! let opts = ArrowOptions::new(10.0)
//!     .with_arrow_style(ArrowStyle::Trend)
//!     .with_smoothness(0.5);
//! let path = render_arrow(&points, &opts);
//! let bbox = path.control_box().unwrap();
//! assert!(bbox.x0 < 0.0 && bbox.x1 > 100.0);
//! ```
//!
//! The geometry behind it:
//! ```
//! use trend_arrow::{OffsetCurves, Point, SmoothSpline};
//!
//! let points = [Point::new(0.0, 0.0), Point::new(40.0, 30.0), Point::new(90.0, 10.0)];
//! let spline = SmoothSpline::build(&points, Some(0.6));
//! assert_eq!(spline.segment_lengths().len(), 2);
//! let offsets = OffsetCurves::from_spline(&spline, 8.0);
//! assert_eq!(offsets.left.len(), 3);
//! assert!((offsets.widths[0] - 8.0).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The `alloc` crate is used regardless.
//!
//! [`libm`]: https://docs.rs/libm

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("trend-arrow requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod arrow;
mod bezpath;
pub mod common;
mod control;
mod cubicbez;
pub mod offset;
mod param_curve;
mod point;
mod quadbez;
mod rect;
mod render;
mod spline;
mod vec2;

pub use crate::arrow::*;
pub use crate::bezpath::*;
pub use crate::control::*;
pub use crate::cubicbez::*;
pub use crate::offset::{offset_curves, OffsetCurves};
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::render::*;
pub use crate::spline::{smooth_path, SmoothSpline, SplineBuilder, DEFAULT_EXTENSION};
pub use crate::vec2::*;

/// Smallest smoothing coefficient; requests at or below zero use this.
pub const MIN_SMOOTHNESS: f64 = 1e-3;
