//! # Raster Graphics Command (GS v 0)
//!
//! Every receipt strip reaches the printer as one "print raster bit image"
//! command. Nothing is printed with the printer's own font tables.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 384 dots max)
//!   │
//!   │   ████████  ← Each dot is ~0.125mm (203 DPI)
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```

use super::commands::{GS, u16_le};
use crate::error::PrinterError;
use crate::render::buffer::PixelBuffer;
use crate::render::pack;

/// Mode selector `m` for normal (1x1) density.
pub const MODE_NORMAL: u8 = 0x00;

/// Length of the command header preceding the bitmap payload.
pub const HEADER_LEN: usize = 8;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode, always [`MODE_NORMAL`]
/// - `xL, xH`: Width in bytes, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Packed bitmap, k = width_bytes × height
///
/// ## Example
///
/// ```
/// use rasterslip::protocol::graphics;
///
/// let data = vec![0x00; 48 * 12];
/// let cmd = graphics::raster(48, 12, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 12, 0]);
/// assert_eq!(cmd.len(), 8 + 48 * 12);
/// ```
pub fn raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == width_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * height as usize,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(HEADER_LEN + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(MODE_NORMAL);
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

/// The payload of one raster command: dimensions plus the packed bitmap.
///
/// A pure value. It is built from a [`PixelBuffer`], turned into bytes once,
/// and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterCommand {
    /// Width in bytes (`width_dots / 8`)
    pub width_bytes: u16,
    /// Height in dots
    pub height: u16,
    /// Packed bitmap, `width_bytes * height` bytes
    pub data: Vec<u8>,
}

impl RasterCommand {
    /// Pack a strip and check that its dimensions fit the 16-bit header fields.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Layout`] when the width in bytes or the height
    /// exceeds `u16::MAX`.
    pub fn from_buffer(buffer: &PixelBuffer) -> Result<Self, PrinterError> {
        let width_bytes = u16::try_from(buffer.width() / 8).map_err(|_| {
            PrinterError::Layout(format!(
                "strip width {} dots does not fit a raster header",
                buffer.width()
            ))
        })?;
        let height = u16::try_from(buffer.height()).map_err(|_| {
            PrinterError::Layout(format!(
                "strip height {} dots does not fit a raster header",
                buffer.height()
            ))
        })?;

        Ok(Self {
            width_bytes,
            height,
            data: pack::pack(buffer),
        })
    }

    /// Width in dots covered by this command.
    pub fn width_dots(&self) -> usize {
        self.width_bytes as usize * 8
    }

    /// Frame as `1D 76 30 00 wL wH hL hH <payload>`.
    pub fn to_bytes(&self) -> Vec<u8> {
        raster(self.width_bytes, self.height, &self.data)
    }
}

// ============================================================================
// TESTS
// ============================================================================
