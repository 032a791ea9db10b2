//!
//! # quill_raster
//!
//! `quill_raster` turns the vector graphics model of `quill_canvas` - and PNG image files - into
//! GPU-ready pixel data. It provides three engines:
//!
//! * A coverage rasterizer that fills contours into 8-bit alpha masks using 5x vertically
//!   super-sampled scanline fills.
//! * A signed-distance-field rasterizer that computes, at every pixel, the signed distance to
//!   the nearest curve of a contour, for scalable glyph rendering.
//! * A PNG decoder that reads non-interlaced true-color and greyscale PNG files and produces
//!   linear premultiplied scRGB pixel buffers (half-float RGBA), honoring the file's color
//!   space metadata.
//!
//! Pixels are stored in `Pixmap`s: simple 2D views over a buffer with an explicit stride, so
//! that sub-images can share storage with a larger atlas texture. The compositor blends filled
//! paths onto `ScRgba16` pixmaps with the usual premultiplied over-operator.
//!

#![warn(bare_trait_objects)]

/// Pixmaps and the pixel formats stored in them
pub mod pixel;

/// Color space matrices and transfer functions
pub mod color;

/// The coverage and signed-distance-field rasterizers and the compositor
pub mod raster;

/// Image decoding (PNG)
pub mod codec;
