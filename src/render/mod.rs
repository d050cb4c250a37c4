//! # Rendering Module
//!
//! Turns receipt sections into packed monochrome raster data.
//!
//! ```text
//! text ──► wrap ──► StripBuilder ──► PixelBuffer ──► pack ──► bytes
//!                       ▲
//!               GlyphRasterizer
//! ```
//!
//! ## Modules
//!
//! - [`wrap`]: Greedy word wrap against a measured width
//! - [`buffer`]: Fixed-width grayscale pixel buffer
//! - [`strip`]: One buffer per receipt section
//! - [`pack`]: 1-bit MSB-first packing
//! - [`preview`]: Whole-receipt PNG previews
//!
//! ## Usage Example
//!
//! ```
//! use rasterslip::font::SpleenRasterizer;
//! use rasterslip::printer::ReceiptLayout;
//! use rasterslip::render::{pack, strip::StripBuilder};
//!
//! let layout = ReceiptLayout::default();
//! let font = SpleenRasterizer::new();
//! let builder = StripBuilder::new(&font, &layout, 384)?;
//!
//! let strip = builder.text("HELLO", layout.title)?;
//! let bytes = pack::pack(&strip);
//! assert_eq!(bytes.len(), 48 * strip.height());
//! # Ok::<(), rasterslip::PrinterError>(())
//! ```

pub mod buffer;
pub mod pack;
pub mod preview;
pub mod strip;
pub mod wrap;

pub use buffer::PixelBuffer;
pub use strip::StripBuilder;
