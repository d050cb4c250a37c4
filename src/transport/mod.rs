//! # Printer Transport Layer
//!
//! Byte-stream backends that carry commands to the printer.
//!
//! ## Available Transports
//!
//! - [`bluetooth`]: Bluetooth RFCOMM serial port (Linux)
//! - [`memory`]: Records commands in memory, with failure injection
//!
//! Transports are assumed reliable and in order. They never retry; the
//! first failure is returned to the caller.

pub mod bluetooth;
pub mod memory;

pub use bluetooth::RfcommTransport;
pub use memory::MemoryTransport;

use crate::error::PrinterError;

/// A connection-oriented byte stream to one printer.
///
/// The connection closes when the transport is dropped.
pub trait Transport {
    /// Open the connection.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Connection`] if the printer is unreachable.
    fn connect(&mut self, address: &str) -> Result<(), PrinterError>;

    /// Write one complete command, blocking until it is accepted.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Transport`] on any write failure, or
    /// [`PrinterError::NotConnected`] if `connect` has not succeeded.
    fn write_all(&mut self, data: &[u8]) -> Result<(), PrinterError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self, address: &str) -> Result<(), PrinterError> {
        (**self).connect(address)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), PrinterError> {
        (**self).write_all(data)
    }
}
