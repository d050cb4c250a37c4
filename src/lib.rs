//! # Rasterslip - Raster Receipt Printing
//!
//! Rasterslip prints retail receipts on 58mm thermal printers by drawing
//! every line of text locally and sending it as a monochrome raster image.
//! The printer's built-in fonts are never used, so any script the glyph
//! rasterizer can draw (Devanagari item names, for example) prints
//! correctly.
//!
//! - **Rendering**: word wrap, per-section pixel strips, 1-bit packing
//! - **Protocol**: reset, raster image (`GS v 0`) and line feed commands
//! - **Transport**: Bluetooth RFCOMM serial communication
//! - **Composer**: connection state machine and fixed receipt layout
//!
//! ## Quick Start
//!
//! ```no_run
//! use rasterslip::{
//!     composer::ReceiptComposer,
//!     font::SpleenRasterizer,
//!     receipt::{LineItem, Receipt},
//!     transport::RfcommTransport,
//! };
//!
//! let mut composer = ReceiptComposer::new(RfcommTransport::new(), SpleenRasterizer::new())?;
//! composer.connect("66:32:78:9C:A9:80")?;
//!
//! composer.print_receipt(&Receipt {
//!     header: "SHOP".to_string(),
//!     bill_number: "30674".to_string(),
//!     date: "19/01/26 09:15 AM".to_string(),
//!     items: vec![LineItem::new("Masala chai", 2, 15)],
//!     grand_total: 30,
//! })?;
//!
//! # Ok::<(), rasterslip::PrinterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`composer`] | Print session state machine |
//! | [`receipt`] | Receipt data and section order |
//! | [`render`] | Wrap, strips, packing, previews |
//! | [`font`] | Glyph rasterizer contract and backends |
//! | [`protocol`] | Printer command builders |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Printer and layout configuration |
//! | [`error`] | Error types |

pub mod composer;
pub mod error;
pub mod font;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use composer::{PrinterState, ReceiptComposer};
pub use error::PrinterError;
pub use printer::{PRINTER_WIDTH, PrinterConfig, ReceiptLayout};
pub use receipt::{LineItem, Receipt};
pub use transport::{RfcommTransport, Transport};
