//! # Error Types
//!
//! This module defines error types used throughout the rasterslip library.
//!
//! Every error is fatal for the operation that raised it. Nothing in the
//! library retries; errors propagate to the caller of
//! [`ReceiptComposer::print_receipt`](crate::composer::ReceiptComposer::print_receipt)
//! or whichever entry point was used.

use thiserror::Error;

/// Main error type for rasterslip operations
#[derive(Debug, Error)]
pub enum PrinterError {
    /// The transport could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// A write to an established transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// A strip or printer geometry the raster command cannot represent
    /// (width not a multiple of 8, dimensions overflowing the header fields)
    #[error("Layout constraint violation: {0}")]
    Layout(String),

    /// A command was emitted before the composer reached `Connected`
    #[error("Not connected: {0}")]
    NotConnected(String),

    /// Font file could not be loaded or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Preview image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
