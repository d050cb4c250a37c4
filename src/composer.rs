//! # Receipt Composer
//!
//! Drives a whole print session: connect once, then print any number of
//! receipts strip by strip over the same connection.
//!
//! ## State Machine
//!
//! ```text
//!            connect()            print_receipt()          ok
//!   Idle ─────────────► Connected ───────────────► Printing ───► Done
//!                          ▲                          │           │
//!                          │      print_receipt()     │ failure   │
//!                          │ ◄────────────────────────┼───────────┘
//!                          │                          ▼
//!                          └──────── connect() ───── Error
//! ```
//!
//! Each strip is built, packed, framed and written before the next one is
//! started. The first failure aborts the receipt and leaves the composer in
//! `Error`; nothing is retried. Only an explicit `connect` leaves `Error`.

use log::{debug, info, warn};

use crate::error::PrinterError;
use crate::font::GlyphRasterizer;
use crate::printer::{PrinterConfig, ReceiptLayout};
use crate::protocol::commands;
use crate::protocol::graphics::RasterCommand;
use crate::receipt::Receipt;
use crate::render::strip::StripBuilder;
use crate::transport::Transport;

/// Where a composer is in its print session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterState {
    /// No connection yet
    Idle,
    /// Connected and reset, ready to print
    Connected,
    /// A receipt is being written
    Printing,
    /// The last receipt printed completely; ready for another
    Done,
    /// A connection or write failed; reconnect to continue
    Error,
}

/// # Receipt Composer
///
/// Owns one transport and one glyph rasterizer. A single receipt is in
/// flight at a time; callers sharing a printer serialize their calls.
///
/// ## Example
///
/// ```
/// use rasterslip::composer::{PrinterState, ReceiptComposer};
/// use rasterslip::font::SpleenRasterizer;
/// use rasterslip::receipt::{LineItem, Receipt};
/// use rasterslip::transport::MemoryTransport;
///
/// let mut composer = ReceiptComposer::new(MemoryTransport::new(), SpleenRasterizer::new())?;
/// composer.connect("memory")?;
///
/// let receipt = Receipt {
///     header: "SHOP".to_string(),
///     bill_number: "1".to_string(),
///     date: "19/01/26".to_string(),
///     items: vec![LineItem::new("Tea", 2, 15)],
///     grand_total: 30,
/// };
/// composer.print_receipt(&receipt)?;
/// assert_eq!(composer.state(), PrinterState::Done);
/// # Ok::<(), rasterslip::PrinterError>(())
/// ```
#[derive(Debug)]
pub struct ReceiptComposer<T: Transport, R: GlyphRasterizer> {
    transport: T,
    rasterizer: R,
    config: PrinterConfig,
    layout: ReceiptLayout,
    state: PrinterState,
}

impl<T: Transport, R: GlyphRasterizer> ReceiptComposer<T, R> {
    /// Composer for the 58mm printer with the default layout.
    pub fn new(transport: T, rasterizer: R) -> Result<Self, PrinterError> {
        Self::with_config(transport, rasterizer, PrinterConfig::MM58, ReceiptLayout::default())
    }

    /// ## Errors
    ///
    /// Returns [`PrinterError::Layout`] if the printer width cannot be
    /// packed into whole raster bytes.
    pub fn with_config(
        transport: T,
        rasterizer: R,
        config: PrinterConfig,
        layout: ReceiptLayout,
    ) -> Result<Self, PrinterError> {
        config.validate()?;
        Ok(Self {
            transport,
            rasterizer,
            config,
            layout,
            state: PrinterState::Idle,
        })
    }

    pub fn state(&self) -> PrinterState {
        self.state
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn layout(&self) -> &ReceiptLayout {
        &self.layout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, closing the session.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Open the connection and reset the printer.
    ///
    /// Allowed from any state; from `Connected` or `Done` it reconnects.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Connection`] if the transport cannot be opened,
    /// [`PrinterError::Transport`] if the reset cannot be written. A
    /// failed first connection leaves the composer `Idle`; any other
    /// failure leaves it in `Error`.
    pub fn connect(&mut self, address: &str) -> Result<(), PrinterError> {
        if let Err(e) = self.transport.connect(address) {
            warn!("Connection to {} failed: {}", address, e);
            if self.state != PrinterState::Idle {
                self.state = PrinterState::Error;
            }
            return Err(e);
        }

        self.state = PrinterState::Connected;
        self.emit(&commands::reset())?;
        info!("Printer at {} connected and reset", address);
        Ok(())
    }

    /// Print one receipt in the fixed section order, then feed the paper.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::NotConnected`] unless the composer is `Connected` or
    /// `Done`. Any strip or write failure aborts the remaining strips and
    /// leaves the composer in `Error`.
    pub fn print_receipt(&mut self, receipt: &Receipt) -> Result<(), PrinterError> {
        match self.state {
            PrinterState::Connected | PrinterState::Done => {}
            state => {
                return Err(PrinterError::NotConnected(format!(
                    "cannot print while {:?}",
                    state
                )));
            }
        }

        self.state = PrinterState::Printing;
        info!(
            "Printing bill {} ({} items)",
            receipt.bill_number,
            receipt.items.len()
        );

        let result = self.print_sections(receipt);
        if let Err(e) = &result {
            warn!("Receipt {} aborted: {}", receipt.bill_number, e);
            self.state = PrinterState::Error;
            return result;
        }

        self.state = PrinterState::Done;
        info!("Bill {} printed", receipt.bill_number);
        Ok(())
    }

    fn print_sections(&mut self, receipt: &Receipt) -> Result<(), PrinterError> {
        let builder = StripBuilder::new(
            &self.rasterizer,
            &self.layout,
            self.config.width_dots as usize,
        )?;

        for section in receipt.sections(&self.layout) {
            let strip = builder.build(&section)?;
            let command = RasterCommand::from_buffer(&strip)?;
            debug!(
                "{} strip: {} rows, {} payload bytes",
                section.name(),
                command.height,
                command.data.len()
            );
            self.transport.write_all(&command.to_bytes())?;
        }

        self.transport.write_all(&commands::feed(self.layout.feed_lines))
    }

    /// Write one command, dropping to `Error` on failure.
    fn emit(&mut self, bytes: &[u8]) -> Result<(), PrinterError> {
        self.transport.write_all(bytes).inspect_err(|e| {
            warn!("Write of {} bytes failed: {}", bytes.len(), e);
            self.state = PrinterState::Error;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::SpleenRasterizer;
    use crate::receipt::LineItem;
    use crate::transport::MemoryTransport;

    fn receipt() -> Receipt {
        Receipt {
            header: "SHOP".to_string(),
            bill_number: "1".to_string(),
            date: "19/01/26".to_string(),
            items: vec![LineItem::new("A", 2, 50)],
            grand_total: 100,
        }
    }

    fn composer(transport: MemoryTransport) -> ReceiptComposer<MemoryTransport, SpleenRasterizer> {
        ReceiptComposer::new(transport, SpleenRasterizer::new()).unwrap()
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(composer(MemoryTransport::new()).state(), PrinterState::Idle);
    }

    #[test]
    fn test_rejects_unaligned_printer_width() {
        let config = PrinterConfig {
            width_dots: 380,
            width_bytes: 47,
            ..PrinterConfig::MM58
        };
        let result = ReceiptComposer::with_config(
            MemoryTransport::new(),
            SpleenRasterizer::new(),
            config,
            ReceiptLayout::default(),
        );
        assert!(matches!(result, Err(PrinterError::Layout(_))));
    }

    #[test]
    fn test_connect_sends_reset() {
        let mut c = composer(MemoryTransport::new());
        c.connect("printer").unwrap();
        assert_eq!(c.state(), PrinterState::Connected);
        assert_eq!(c.transport().commands(), &[vec![0x1Bu8, 0x40]]);
    }

    #[test]
    fn test_print_before_connect_is_usage_error() {
        let mut c = composer(MemoryTransport::new());
        let err = c.print_receipt(&receipt()).unwrap_err();
        assert!(matches!(err, PrinterError::NotConnected(_)));
        assert_eq!(c.state(), PrinterState::Idle);
        assert!(c.transport().commands().is_empty());
    }

    #[test]
    fn test_failed_first_connection_stays_idle() {
        let mut c = composer(MemoryTransport::new().refusing_connection());
        assert!(matches!(c.connect("printer"), Err(PrinterError::Connection(_))));
        assert_eq!(c.state(), PrinterState::Idle);
    }

    #[test]
    fn test_failed_reset_enters_error() {
        let mut c = composer(MemoryTransport::new().failing_on_write(1));
        assert!(matches!(c.connect("printer"), Err(PrinterError::Transport(_))));
        assert_eq!(c.state(), PrinterState::Error);
    }

    #[test]
    fn test_prints_and_reuses_connection() {
        let mut c = composer(MemoryTransport::new());
        c.connect("printer").unwrap();
        c.print_receipt(&receipt()).unwrap();
        assert_eq!(c.state(), PrinterState::Done);

        // reset + 11 strips + feed
        assert_eq!(c.transport().commands().len(), 13);

        c.print_receipt(&receipt()).unwrap();
        assert_eq!(c.state(), PrinterState::Done);
        // No second reset
        assert_eq!(c.transport().commands().len(), 25);
    }

    #[test]
    fn test_write_failure_aborts_receipt() {
        let mut c = composer(MemoryTransport::new().failing_on_write(3));
        c.connect("printer").unwrap();
        let err = c.print_receipt(&receipt()).unwrap_err();

        assert!(matches!(err, PrinterError::Transport(_)));
        assert_eq!(c.state(), PrinterState::Error);
        assert_eq!(c.transport().attempts(), 3);
        assert_eq!(c.transport().commands().len(), 2);
    }

    #[test]
    fn test_error_requires_reconnect() {
        let mut c = composer(MemoryTransport::new().failing_on_write(2));
        c.connect("printer").unwrap();
        assert!(c.print_receipt(&receipt()).is_err());

        assert!(matches!(
            c.print_receipt(&receipt()),
            Err(PrinterError::NotConnected(_))
        ));

        c.connect("printer").unwrap();
        assert_eq!(c.state(), PrinterState::Connected);
        c.print_receipt(&receipt()).unwrap();
        assert_eq!(c.state(), PrinterState::Done);
    }
}
