//! # Pixel Buffer
//!
//! A fixed-width grayscale canvas for one receipt strip.
//!
//! Each pixel holds an ink level: [`BLANK`] (0) is unprinted paper, anything
//! else will be burned by the print head. Anti-aliased glyph edges leave
//! intermediate values behind; the raster encoder treats every non-blank
//! pixel as ink, exactly like a white bitmap background where any
//! non-white pixel prints.

use image::{GrayImage, Luma};

use crate::error::PrinterError;

/// Background value of a fresh buffer.
pub const BLANK: u8 = 0;

/// Full ink.
pub const INK: u8 = 255;

/// Tallest strip the raster command's 16-bit height field can describe.
pub const MAX_HEIGHT: usize = u16::MAX as usize;

/// # Pixel Buffer
///
/// Row-major ink levels, `width * height` bytes.
///
/// The width is checked at construction: it must be a positive multiple of
/// 8 so every row packs into whole bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a blank buffer.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Layout`] if `width` is zero or not a multiple
    /// of 8, or if `height` exceeds [`MAX_HEIGHT`]. Nothing is allocated on
    /// error.
    pub fn new(width: usize, height: usize) -> Result<Self, PrinterError> {
        check_width(width)?;
        if height > MAX_HEIGHT {
            return Err(PrinterError::Layout(format!(
                "strip height {} exceeds {} rows",
                height, MAX_HEIGHT
            )));
        }
        let len = width.checked_mul(height).ok_or_else(|| {
            PrinterError::Layout(format!("strip of {}x{} dots is too large", width, height))
        })?;
        Ok(Self {
            width,
            height,
            data: vec![BLANK; len],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw ink levels, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One row of ink levels.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Ink level at (x, y). Out-of-bounds reads are blank.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            BLANK
        }
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Darken a pixel to at least `value`, clipping signed coordinates.
    ///
    /// Overlapping glyphs accumulate rather than erase each other.
    pub fn ink(&mut self, x: i32, y: i32, value: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let px = &mut self.data[y * self.width + x];
            *px = (*px).max(value);
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, value: u8) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(self.height)..y_end {
            let start = row * self.width;
            self.data[start + x.min(x_end)..start + x_end].fill(value);
        }
    }

    /// True if no pixel carries ink.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&px| px == BLANK)
    }

    /// True if any pixel in row `y` carries ink.
    pub fn row_has_ink(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().any(|&px| px != BLANK)
    }

    /// Convert to a grayscale image for previews (ink = black, paper = white).
    pub fn to_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for (i, &px) in self.data.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, Luma([INK - px]));
        }
        img
    }
}

/// Reject widths the raster encoder cannot pack into whole bytes.
pub fn check_width(width: usize) -> Result<(), PrinterError> {
    if width == 0 || width % 8 != 0 {
        return Err(PrinterError::Layout(format!(
            "strip width must be a positive multiple of 8 dots, got {}",
            width
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_blank() {
        let buffer = PixelBuffer::new(384, 12).unwrap();
        assert_eq!(buffer.width(), 384);
        assert_eq!(buffer.height(), 12);
        assert_eq!(buffer.data().len(), 384 * 12);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_rejects_unaligned_width() {
        assert!(matches!(PixelBuffer::new(383, 10), Err(PrinterError::Layout(_))));
        assert!(matches!(PixelBuffer::new(0, 10), Err(PrinterError::Layout(_))));
        assert!(PixelBuffer::new(8, 0).is_ok());
    }

    #[test]
    fn test_rejects_oversized_height() {
        assert!(PixelBuffer::new(384, MAX_HEIGHT).is_ok());
        assert!(matches!(
            PixelBuffer::new(384, MAX_HEIGHT + 1),
            Err(PrinterError::Layout(_))
        ));
        assert!(matches!(
            PixelBuffer::new(8, usize::MAX),
            Err(PrinterError::Layout(_))
        ));
        // Product overflows even though the height is in range
        assert!(matches!(
            PixelBuffer::new(usize::MAX & !7, 2),
            Err(PrinterError::Layout(_))
        ));
    }

    #[test]
    fn test_ink_keeps_darkest_value() {
        let mut buffer = PixelBuffer::new(8, 1).unwrap();
        buffer.ink(3, 0, 200);
        buffer.ink(3, 0, 100);
        assert_eq!(buffer.get(3, 0), 200);
    }

    #[test]
    fn test_ink_clips_out_of_bounds() {
        let mut buffer = PixelBuffer::new(8, 2).unwrap();
        buffer.ink(-1, 0, INK);
        buffer.ink(0, -1, INK);
        buffer.ink(8, 0, INK);
        buffer.ink(0, 2, INK);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = PixelBuffer::new(16, 4).unwrap();
        buffer.fill_rect(12, 2, 10, 10, INK);
        assert_eq!(buffer.get(11, 2), BLANK);
        assert_eq!(buffer.get(12, 2), INK);
        assert_eq!(buffer.get(15, 3), INK);
        assert!(!buffer.row_has_ink(1));
        assert!(buffer.row_has_ink(2));

        buffer.fill_rect(0, 1, usize::MAX, usize::MAX, INK);
        assert!(buffer.row_has_ink(1));
        assert!(!buffer.row_has_ink(0));
    }

    #[test]
    fn test_to_image_inverts() {
        let mut buffer = PixelBuffer::new(8, 1).unwrap();
        buffer.set(0, 0, INK);
        let img = buffer.to_image();
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
    }
}
