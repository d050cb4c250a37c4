//! # Printer Control Commands
//!
//! Control bytes for the ESC/POS-style dialect spoken by 58mm Bluetooth
//! receipt printers.
//!
//! Only three control shapes are needed because every piece of receipt
//! content travels as a raster image (see [`super::graphics`]):
//!
//! | Command | Hex | Purpose |
//! |---------|-----|---------|
//! | Reset | `1B 40` | Once per session, before anything else |
//! | Raster image | `1D 76 30 00 ...` | One per strip |
//! | Line feed | `0A` | Repeated at the end of a receipt |
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix, used by raster graphics
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Reset Printer (ESC @)
///
/// Clears the print buffer and restores power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use rasterslip::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Line Feed (LF), repeated `lines` times
///
/// Advances the paper so the last strip clears the tear bar.
///
/// ## Example
///
/// ```
/// use rasterslip::protocol::commands;
///
/// assert_eq!(commands::feed(3), vec![0x0A, 0x0A, 0x0A]);
/// ```
#[inline]
pub fn feed(lines: usize) -> Vec<u8> {
    vec![LF; lines]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use rasterslip::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]); // 384 = 0x0180
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
