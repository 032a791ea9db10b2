//!
//! # quill_canvas
//!
//! `quill_canvas` is the vector graphics model used by the quill rendering pipeline. It describes
//! shapes as layered graphic paths, compiles those paths down to lists of Bezier curves, and
//! provides the curve-level operations (splitting, flattening, offsetting, signed-distance
//! queries) that the rasterizers in `quill_raster` are built on.
//!
//! The main types are `GraphicPath`, which is built up using pen commands in the style of most
//! 2D canvas APIs, and `BezierCurve`, a linear, quadratic or cubic curve segment tagged with the
//! color channels it is active in when rendering multi-channel signed distance fields.
//!
//! Glyph outlines arrive as sequences of `BezierPoint`s (anchors and control points); the
//! `contour_from_points` function assembles them into closed, colorized contours. This crate has
//! no opinion about pixels: producing coverage masks, SDF images or composited bitmaps from the
//! curves is the job of `quill_raster`.
//!

#![warn(bare_trait_objects)]

/// Points, vectors, rectangles and affine transforms
pub mod geometry;

/// Bezier curve mathematics: primitives, curves and closed contours
pub mod bezier;

mod path;
mod color;

pub use self::path::*;
pub use self::color::*;
