//! # Strip Builder
//!
//! Draws each receipt section into its own [`PixelBuffer`], full printer
//! width and exactly as tall as its content.
//!
//! ## Item Rows
//!
//! The name column wraps independently; quantity, rate and total are drawn
//! once, on the baseline of the first name line:
//!
//! ```text
//! y=28  Amul butter amul     3    90   270
//! y=56  butter amul butter
//! y=84  butter
//! ```

use super::buffer::{INK, PixelBuffer, check_width};
use super::wrap::wrap;
use crate::error::PrinterError;
use crate::font::{GlyphRasterizer, GlyphStyle, Weight};
use crate::printer::{ReceiptLayout, TextStyle};
use crate::receipt::{LineItem, Section};

/// Builds strips for one printer width and layout.
pub struct StripBuilder<'a, R: GlyphRasterizer + ?Sized> {
    rasterizer: &'a R,
    layout: &'a ReceiptLayout,
    width: usize,
}

impl<'a, R: GlyphRasterizer + ?Sized> StripBuilder<'a, R> {
    /// ## Errors
    ///
    /// Returns [`PrinterError::Layout`] if `width` is not a positive multiple
    /// of 8.
    pub fn new(rasterizer: &'a R, layout: &'a ReceiptLayout, width: usize) -> Result<Self, PrinterError> {
        check_width(width)?;
        Ok(Self {
            rasterizer,
            layout,
            width,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Build the strip for any section.
    pub fn build(&self, section: &Section<'_>) -> Result<PixelBuffer, PrinterError> {
        match section {
            Section::Text { text, style } => self.text(text, *style),
            Section::Divider => self.divider(),
            Section::ColumnHeader => self.column_header(),
            Section::Item(item) => self.item_row(item),
            Section::GrandTotal(total) => self.grand_total(*total),
        }
    }

    /// Wrapped text, one line per `size + leading` rows, each line centered
    /// or flush left.
    pub fn text(&self, text: &str, style: TextStyle) -> Result<PixelBuffer, PrinterError> {
        let lines = wrap(
            text,
            |s| self.rasterizer.measure_weighted(s, style.size, style.weight),
            self.width as f32,
        );
        let line_height = self.layout.line_height(style.size);
        let height = strip_height(lines.len(), line_height, self.layout.text_padding)?;
        let mut buffer = PixelBuffer::new(self.width, height)?;

        let glyph = GlyphStyle::new(style.size, style.weight);
        let mut y = line_height as f32;
        for line in &lines {
            let x = if style.center {
                self.centered_x(line, style.size, style.weight)
            } else {
                0.0
            };
            self.rasterizer.draw(&mut buffer, line, x, y, glyph);
            y += line_height as f32;
        }

        Ok(buffer)
    }

    /// Horizontal rule centered in a short strip.
    pub fn divider(&self) -> Result<PixelBuffer, PrinterError> {
        let height = self.layout.divider_height;
        let thickness = self.layout.divider_thickness;
        let mut buffer = PixelBuffer::new(self.width, height)?;
        let top = (height / 2).saturating_sub(thickness / 2);
        buffer.fill_rect(0, top, self.width, thickness, INK);
        Ok(buffer)
    }

    /// Bold column labels at fixed offsets.
    pub fn column_header(&self) -> Result<PixelBuffer, PrinterError> {
        let layout = self.layout;
        let mut buffer = PixelBuffer::new(self.width, layout.header_height)?;
        let glyph = GlyphStyle::new(layout.header_size, Weight::Bold);

        for (label, &x) in layout.header_labels.iter().zip(&layout.header_offsets) {
            self.rasterizer
                .draw(&mut buffer, label, x as f32, layout.header_baseline, glyph);
        }

        Ok(buffer)
    }

    /// One item: wrapped name on the left, numbers pinned to the first line.
    pub fn item_row(&self, item: &LineItem) -> Result<PixelBuffer, PrinterError> {
        let layout = self.layout;
        let size = layout.item_size;
        let lines = wrap(&item.name, |s| self.rasterizer.measure(s, size), layout.name_width);

        // An empty name still gets one row so the numbers stay visible
        let rows = lines.len().max(1);
        let height = strip_height(rows, layout.row_line_height, layout.row_padding)?;
        let mut buffer = PixelBuffer::new(self.width, height)?;
        let glyph = GlyphStyle::new(size, Weight::Regular);

        let mut y = layout.row_baseline;
        for line in &lines {
            self.rasterizer.draw(&mut buffer, line, 0.0, y, glyph);
            y += layout.row_line_height as f32;
        }

        let numbers = [u64::from(item.quantity), item.rate, item.line_total()];
        for (value, &x) in numbers.iter().zip(&layout.column_offsets) {
            self.rasterizer
                .draw(&mut buffer, &value.to_string(), x as f32, layout.row_baseline, glyph);
        }

        Ok(buffer)
    }

    /// `TOTAL  <n>` in large bold type, centered.
    pub fn grand_total(&self, total: u64) -> Result<PixelBuffer, PrinterError> {
        let layout = self.layout;
        let mut buffer = PixelBuffer::new(self.width, layout.total_height)?;
        let text = format!("{}  {}", layout.total_label, total);
        let x = self.centered_x(&text, layout.total_size, Weight::Bold);
        self.rasterizer.draw(
            &mut buffer,
            &text,
            x,
            layout.total_baseline,
            GlyphStyle::new(layout.total_size, Weight::Bold),
        );
        Ok(buffer)
    }

    /// Left edge that centers `text`. Negative when the text overflows.
    fn centered_x(&self, text: &str, size: f32, weight: Weight) -> f32 {
        (self.width as f32 - self.rasterizer.measure_weighted(text, size, weight)) / 2.0
    }
}

/// `rows * row_height + padding`, failing instead of wrapping.
fn strip_height(rows: usize, row_height: usize, padding: usize) -> Result<usize, PrinterError> {
    rows.checked_mul(row_height)
        .and_then(|h| h.checked_add(padding))
        .ok_or_else(|| {
            PrinterError::Layout(format!(
                "{} rows of {} dots plus {} padding overflows",
                rows, row_height, padding
            ))
        })
}
