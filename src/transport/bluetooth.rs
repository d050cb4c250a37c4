//! # Bluetooth RFCOMM Transport
//!
//! Talks to a printer over the Bluetooth Serial Port Profile through a Linux
//! RFCOMM tty.
//!
//! ## Addressing
//!
//! `connect` accepts either a device path (`/dev/rfcomm0`) or the printer's
//! MAC address. A MAC is resolved to a device that is already bound to it,
//! by reading `/proc/net/rfcomm`. Pairing and binding are left to the system:
//!
//! ```bash
//! $ bluetoothctl pair 66:32:78:9C:A9:80
//! $ sudo rfcomm bind 0 66:32:78:9C:A9:80
//! # This creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so binary raster data passes through
//! unmodified:
//!
//! - **No input processing**, including XON/XOFF flow control
//! - **No output processing**: OPOST off (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**
//!
//! ## Chunked Writes
//!
//! Large commands are written in 4096-byte chunks with a short pause
//! between them so the printer's receive buffer keeps up.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use super::Transport;
use crate::error::PrinterError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// Kernel table of bound RFCOMM devices
const PROC_RFCOMM: &str = "/proc/net/rfcomm";

/// # Bluetooth Printer Transport
///
/// ## Example
///
/// ```no_run
/// use rasterslip::protocol::commands;
/// use rasterslip::transport::{RfcommTransport, Transport};
///
/// let mut transport = RfcommTransport::new();
/// transport.connect("66:32:78:9C:A9:80")?;
/// transport.write_all(&commands::reset())?;
///
/// # Ok::<(), rasterslip::PrinterError>(())
/// ```
#[derive(Debug)]
pub struct RfcommTransport {
    file: Option<File>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl Default for RfcommTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RfcommTransport {
    /// Create an unconnected transport.
    pub fn new() -> Self {
        Self {
            file: None,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }

    /// Set the chunk size for large writes.
    ///
    /// Larger chunks are faster but may overflow the Bluetooth buffer.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// True once `connect` has succeeded.
    pub fn is_connected(&self) -> bool {
        self.file.is_some()
    }
}

impl Transport for RfcommTransport {
    fn connect(&mut self, address: &str) -> Result<(), PrinterError> {
        let device = resolve_device(address)?;
        let path = Path::new(&device);

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            PrinterError::Connection(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_tty_raw(&file)?;

        info!("Connected to {} via {}", address, path.display());
        self.file = Some(file);
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), PrinterError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| PrinterError::NotConnected("RFCOMM transport".to_string()))?;

        if data.len() <= self.chunk_size {
            file.write_all(data)
                .map_err(|e| PrinterError::Transport(format!("Write failed: {}", e)))?;
        } else {
            debug!("Writing {} bytes in {}-byte chunks", data.len(), self.chunk_size);
            for chunk in data.chunks(self.chunk_size) {
                file.write_all(chunk)
                    .map_err(|e| PrinterError::Transport(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        file.flush()
            .map_err(|e| PrinterError::Transport(format!("Flush failed: {}", e)))
    }
}

/// Turn a device path or MAC address into a device path.
fn resolve_device(address: &str) -> Result<String, PrinterError> {
    if !is_valid_mac(address) {
        return Ok(address.to_string());
    }

    let table = fs::read_to_string(PROC_RFCOMM).map_err(|e| {
        PrinterError::Connection(format!("Cannot read {}: {}", PROC_RFCOMM, e))
    })?;

    find_rfcomm_for_mac(&table, address)
        .filter(|device| Path::new(device).exists())
        .ok_or_else(|| {
            PrinterError::Connection(format!(
                "No RFCOMM device bound to {}. Bind one with: sudo rfcomm bind 0 {}",
                address.to_uppercase(),
                address.to_uppercase()
            ))
        })
}

/// Configure an open tty for raw binary I/O.
///
/// XON/XOFF must be off because 0x11 and 0x13 occur in raster data.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), PrinterError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    // Regular files (useful for capturing output) are not ttys
    if unsafe { libc::isatty(fd) } != 1 {
        debug!("fd {} is not a tty, skipping raw mode", fd);
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(PrinterError::Connection(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(PrinterError::Connection(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), PrinterError> {
    Ok(())
}

// ============================================================================
// RFCOMM HELPERS
// ============================================================================

/// Validate a Bluetooth MAC address format (XX:XX:XX:XX:XX:XX).
pub fn is_valid_mac(mac: &str) -> bool {
    let parts: Vec<&str> = mac.split(':').collect();
    if parts.len() != 6 {
        return false;
    }
    parts
        .iter()
        .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Find the device bound to `mac` in a `/proc/net/rfcomm` listing.
///
/// Lines look like `rfcomm0: 66:32:78:9C:A9:80 channel 1 clean`.
pub fn find_rfcomm_for_mac(table: &str, mac: &str) -> Option<String> {
    let mac_upper = mac.to_uppercase();
    table
        .lines()
        .filter(|line| line.to_uppercase().contains(&mac_upper))
        .find_map(|line| line.split(':').next())
        .map(|name| format!("/dev/{}", name.trim()))
}

// ============================================================================
// TESTS
// ============================================================================
