//! # Printer Protocol Implementation
//!
//! Byte-exact command builders for the raster dialect of 58mm receipt
//! printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Reset, line feed and byte-order helpers
//! - [`graphics`]: The raster bit image command and its payload type
//!
//! ## Usage Example
//!
//! ```
//! use rasterslip::protocol::{commands, graphics};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reset());
//!
//! // A 384-dot wide, 12-row strip of vertical stripes
//! let strip = vec![0xAA; 48 * 12];
//! data.extend(graphics::raster(48, 12, &strip));
//!
//! data.extend(commands::feed(4));
//! ```

pub mod commands;
pub mod graphics;
