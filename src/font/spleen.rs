//! Spleen bitmap font backend.
//!
//! Scales the 12x24 Spleen glyphs to the requested size with nearest
//! neighbour sampling. Every character advances by half the font size, so
//! measurements are exact and platform independent, which makes this the
//! backend used for tests and golden output.

use std::sync::{Mutex, OnceLock, PoisonError};

use spleen_font::{FONT_12X24, PSF2Font};

use super::{GlyphRasterizer, GlyphStyle, Weight};
use crate::render::buffer::{INK, PixelBuffer};

const SRC_WIDTH: usize = 12;
const SRC_HEIGHT: usize = 24;

/// Rows of the 24-row source cell above the baseline.
const SRC_ASCENT: usize = 19;

/// Parsed once; glyph lookup needs `&mut` for its internal cache.
static SPLEEN_12X24: OnceLock<Option<Mutex<PSF2Font<'static>>>> = OnceLock::new();

/// The shared font, or `None` if it failed to parse.
fn spleen_12x24() -> Option<&'static Mutex<PSF2Font<'static>>> {
    SPLEEN_12X24
        .get_or_init(|| PSF2Font::new(FONT_12X24).ok().map(Mutex::new))
        .as_ref()
}

/// Bitmap font rasterizer backed by Spleen 12x24.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpleenRasterizer;

impl SpleenRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Cell size in dots for a font size: (advance, height).
    pub fn cell(size: f32) -> (usize, usize) {
        let height = (size.round() as usize).max(1);
        let width = ((size / 2.0).round() as usize).max(1);
        (width, height)
    }
}

impl GlyphRasterizer for SpleenRasterizer {
    fn measure(&self, text: &str, size: f32) -> f32 {
        let (advance, _) = Self::cell(size);
        (text.chars().count() * advance) as f32
    }

    fn draw(&self, buffer: &mut PixelBuffer, text: &str, x: f32, y: f32, style: GlyphStyle) {
        let (cell_w, cell_h) = Self::cell(style.size);
        let ascent = (cell_h * SRC_ASCENT).div_ceil(SRC_HEIGHT) as i32;
        let top = y.round() as i32 - ascent;
        let strikes = if style.weight == Weight::Bold { 2 } else { 1 };

        // A font that fails to parse draws boxes for every character
        let mut font = spleen_12x24().map(|f| f.lock().unwrap_or_else(PoisonError::into_inner));

        let mut left = x.round() as i32;
        for ch in text.chars() {
            let bitmap = font
                .as_deref_mut()
                .and_then(|f| source_glyph(f, ch))
                .unwrap_or_else(box_glyph);

            for dy in 0..cell_h {
                let sy = dy * SRC_HEIGHT / cell_h;
                for dx in 0..cell_w {
                    let sx = dx * SRC_WIDTH / cell_w;
                    if bitmap[sy * SRC_WIDTH + sx] {
                        for strike in 0..strikes {
                            buffer.ink(left + dx as i32 + strike, top + dy as i32, INK);
                        }
                    }
                }
            }

            left += cell_w as i32;
        }
    }
}

/// Read one 12x24 glyph as a flat on/off grid.
fn source_glyph(font: &mut PSF2Font, ch: char) -> Option<Vec<bool>> {
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;

    let mut bitmap = vec![false; SRC_WIDTH * SRC_HEIGHT];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < SRC_HEIGHT && col_x < SRC_WIDTH {
                bitmap[row_y * SRC_WIDTH + col_x] = on;
            }
        }
    }
    Some(bitmap)
}

/// Outline box drawn for characters the font lacks.
fn box_glyph() -> Vec<bool> {
    let mut bitmap = vec![false; SRC_WIDTH * SRC_HEIGHT];
    for x in 1..SRC_WIDTH - 1 {
        bitmap[4 * SRC_WIDTH + x] = true;
        bitmap[(SRC_ASCENT - 1) * SRC_WIDTH + x] = true;
    }
    for y in 4..SRC_ASCENT {
        bitmap[y * SRC_WIDTH + 1] = true;
        bitmap[y * SRC_WIDTH + SRC_WIDTH - 2] = true;
    }
    bitmap
}
