//! # Printer Module
//!
//! Printer hardware specifications and receipt template geometry.
//!
//! ## Modules
//!
//! - [`config`]: Printer and layout configuration

pub mod config;

pub use config::{PRINTER_WIDTH, PrinterConfig, ReceiptLayout, TextStyle};
