//! TrueType/OpenType backend.
//!
//! Loads a font at runtime with `ab_glyph`, so receipts can carry any script
//! the font covers (a Devanagari face for Hindi menus, for example).
//! Coverage becomes gray ink when anti-aliasing is on; the encoder prints any
//! non-blank pixel, so soft edges thicken strokes slightly.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont};

use super::{GlyphRasterizer, GlyphStyle, Weight};
use crate::error::PrinterError;
use crate::render::buffer::{INK, PixelBuffer};

/// Rasterizer over one regular face and an optional bold face.
///
/// Without a bold face, bold text is double-struck one dot to the right.
#[derive(Clone)]
pub struct TtfRasterizer {
    regular: FontArc,
    bold: Option<FontArc>,
}

impl std::fmt::Debug for TtfRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfRasterizer")
            .field("bold_face", &self.bold.is_some())
            .finish()
    }
}

impl TtfRasterizer {
    /// Load the regular face from font bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Font`] if the data is not a usable font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PrinterError> {
        Ok(Self {
            regular: load(data)?,
            bold: None,
        })
    }

    /// Load the regular face from a font file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PrinterError> {
        Self::from_bytes(read(path.as_ref())?)
    }

    /// Use a dedicated bold face instead of double striking.
    pub fn with_bold_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PrinterError> {
        self.bold = Some(load(read(path.as_ref())?)?);
        Ok(self)
    }

    fn face(&self, weight: Weight) -> (&FontArc, bool) {
        match (weight, &self.bold) {
            (Weight::Bold, Some(bold)) => (bold, false),
            (Weight::Bold, None) => (&self.regular, true),
            (Weight::Regular, _) => (&self.regular, false),
        }
    }

    /// Glyph ids with their x offsets, plus the total advance.
    fn layout(font: &FontArc, text: &str, size: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = font.as_scaled(size);
        let mut glyphs = Vec::new();
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }
}

impl GlyphRasterizer for TtfRasterizer {
    fn measure(&self, text: &str, size: f32) -> f32 {
        self.measure_weighted(text, size, Weight::Regular)
    }

    fn measure_weighted(&self, text: &str, size: f32, weight: Weight) -> f32 {
        let (font, _) = self.face(weight);
        Self::layout(font, text, size).1
    }

    fn draw(&self, buffer: &mut PixelBuffer, text: &str, x: f32, y: f32, style: GlyphStyle) {
        let (font, double_strike) = self.face(style.weight);
        let (glyphs, _) = Self::layout(font, text, style.size);
        let strikes = if double_strike { 2 } else { 1 };

        for (id, offset) in glyphs {
            let glyph = id.with_scale_and_position(style.size, ab_glyph::point(x + offset, y));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let level = ink_level(coverage, style.anti_alias);
                if level == 0 {
                    return;
                }
                let gx = px as i32 + bounds.min.x as i32;
                let gy = py as i32 + bounds.min.y as i32;
                for strike in 0..strikes {
                    buffer.ink(gx + strike, gy, level);
                }
            });
        }
    }
}

/// Map glyph coverage to an ink level.
fn ink_level(coverage: f32, anti_alias: bool) -> u8 {
    let coverage = coverage.clamp(0.0, 1.0);
    if anti_alias {
        (coverage * INK as f32).round() as u8
    } else if coverage >= 0.5 {
        INK
    } else {
        0
    }
}

fn read(path: &Path) -> Result<Vec<u8>, PrinterError> {
    std::fs::read(path)
        .map_err(|e| PrinterError::Font(format!("Failed to read {}: {}", path.display(), e)))
}

fn load(data: Vec<u8>) -> Result<FontArc, PrinterError> {
    FontArc::try_from_vec(data).map_err(|e| PrinterError::Font(format!("Invalid font: {}", e)))
}
