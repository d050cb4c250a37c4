//! # Glyph Rasterizers
//!
//! The printer's built-in character tables cannot draw arbitrary scripts, so
//! every line of text is drawn into a [`PixelBuffer`] locally. This module
//! defines the narrow contract the rest of the crate uses for that and
//! provides two backends:
//!
//! | Backend | Source | Scripts | Deterministic |
//! |---------|--------|---------|---------------|
//! | [`SpleenRasterizer`] | Built-in Spleen 12x24 bitmap font | Latin | Yes |
//! | [`TtfRasterizer`] | Any TTF/OTF file loaded at runtime | Whatever the font covers | Per font |
//!
//! Neither backend shapes text. Scripts that need reordering or conjunct
//! formation get one glyph per code point, which degrades visually but never
//! fails.

pub mod spleen;
pub mod ttf;

pub use spleen::SpleenRasterizer;
pub use ttf::TtfRasterizer;

use serde::{Deserialize, Serialize};

use crate::render::buffer::PixelBuffer;

/// Stroke weight of drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    /// Font size in dots
    pub size: f32,
    pub weight: Weight,
    /// Keep partial glyph coverage as gray ink instead of thresholding it
    pub anti_alias: bool,
}

impl GlyphStyle {
    pub fn new(size: f32, weight: Weight) -> Self {
        Self {
            size,
            weight,
            anti_alias: true,
        }
    }
}

/// Measures and draws text in device dots.
///
/// `draw` places the text's baseline at `y` and its left edge at `x`.
/// Both may be negative or past the buffer edge; pixels outside are clipped.
pub trait GlyphRasterizer {
    /// Advance width of `text` at `size` dots.
    fn measure(&self, text: &str, size: f32) -> f32;

    /// Advance width of `text` as `draw` would lay it out at `weight`.
    ///
    /// Backends with a separate bold face override this; the default
    /// ignores the weight.
    fn measure_weighted(&self, text: &str, size: f32, _weight: Weight) -> f32 {
        self.measure(text, size)
    }

    /// Draw `text` into `buffer`, darkening pixels in place.
    fn draw(&self, buffer: &mut PixelBuffer, text: &str, x: f32, y: f32, style: GlyphStyle);
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for &R {
    fn measure(&self, text: &str, size: f32) -> f32 {
        (**self).measure(text, size)
    }

    fn measure_weighted(&self, text: &str, size: f32, weight: Weight) -> f32 {
        (**self).measure_weighted(text, size, weight)
    }

    fn draw(&self, buffer: &mut PixelBuffer, text: &str, x: f32, y: f32, style: GlyphStyle) {
        (**self).draw(buffer, text, x, y, style)
    }
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<R> {
    fn measure(&self, text: &str, size: f32) -> f32 {
        (**self).measure(text, size)
    }

    fn measure_weighted(&self, text: &str, size: f32, weight: Weight) -> f32 {
        (**self).measure_weighted(text, size, weight)
    }

    fn draw(&self, buffer: &mut PixelBuffer, text: &str, x: f32, y: f32, style: GlyphStyle) {
        (**self).draw(buffer, text, x, y, style)
    }
}
