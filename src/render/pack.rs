//! # Raster Packing
//!
//! Converts a [`PixelBuffer`] into the 1-bit, row-major, MSB-first layout the
//! raster command expects.
//!
//! ```text
//! pixels:  █ ░ ░ █ █ ░ ░ █   → 0b1001_1001 = 0x99
//! bit:     7 6 5 4 3 2 1 0
//! ```
//!
//! A pixel is ink when its value differs from [`BLANK`] at all, so
//! anti-aliased fringes print as solid dots.

use super::buffer::{BLANK, PixelBuffer};

/// Pack a buffer into `(width / 8) * height` bytes.
///
/// The buffer width is a multiple of 8 by construction. Should a trailing
/// group of fewer than 8 pixels ever exist, it is dropped rather than padded.
pub fn pack(buffer: &PixelBuffer) -> Vec<u8> {
    let width_bytes = buffer.width() / 8;
    let mut out = Vec::with_capacity(width_bytes * buffer.height());

    for y in 0..buffer.height() {
        for group in buffer.row(y).chunks_exact(8) {
            out.push(pack_group(group));
        }
    }

    out
}

/// Pack 8 horizontal pixels into one byte, leftmost pixel in bit 7.
#[inline]
fn pack_group(group: &[u8]) -> u8 {
    group.iter().enumerate().fold(0u8, |byte, (i, &px)| {
        if px != BLANK { byte | (1 << (7 - i)) } else { byte }
    })
}
