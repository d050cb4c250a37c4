//! In-memory transport.
//!
//! Keeps every write as a separate command, which is what tests and the
//! `--output` dump of the binary need. Failures can be injected for the
//! connection or for a specific write.

use super::Transport;
use crate::error::PrinterError;

/// Records commands instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    address: Option<String>,
    commands: Vec<Vec<u8>>,
    attempts: usize,
    refuse_connection: bool,
    fail_on_write: Option<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `connect` fail.
    pub fn refusing_connection(mut self) -> Self {
        self.refuse_connection = true;
        self
    }

    /// Make the `n`-th write (1-based, counted across the transport's life)
    /// fail.
    pub fn failing_on_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    /// Address passed to the last successful `connect`.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Commands written so far, one entry per write.
    pub fn commands(&self) -> &[Vec<u8>] {
        &self.commands
    }

    /// Number of writes attempted, including a failed one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// All written bytes, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.commands.concat()
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self, address: &str) -> Result<(), PrinterError> {
        if self.refuse_connection {
            return Err(PrinterError::Connection(format!("{} refused the connection", address)));
        }
        self.address = Some(address.to_string());
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), PrinterError> {
        if self.address.is_none() {
            return Err(PrinterError::NotConnected("memory transport".to_string()));
        }
        self.attempts += 1;
        if self.fail_on_write == Some(self.attempts) {
            return Err(PrinterError::Transport(format!(
                "injected failure on write {}",
                self.attempts
            )));
        }
        self.commands.push(data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes() {
        let mut t = MemoryTransport::new();
        t.connect("mem").unwrap();
        t.write_all(&[1, 2]).unwrap();
        t.write_all(&[3]).unwrap();
        assert_eq!(t.commands(), &[vec![1u8, 2], vec![3u8]]);
        assert_eq!(t.bytes(), vec![1, 2, 3]);
        assert_eq!(t.address(), Some("mem"));
    }

    #[test]
    fn test_write_before_connect() {
        let mut t = MemoryTransport::new();
        assert!(matches!(t.write_all(&[1]), Err(PrinterError::NotConnected(_))));
    }

    #[test]
    fn test_refused_connection() {
        let mut t = MemoryTransport::new().refusing_connection();
        assert!(matches!(t.connect("mem"), Err(PrinterError::Connection(_))));
    }

    #[test]
    fn test_injected_write_failure() {
        let mut t = MemoryTransport::new().failing_on_write(2);
        t.connect("mem").unwrap();
        t.write_all(&[1]).unwrap();
        assert!(matches!(t.write_all(&[2]), Err(PrinterError::Transport(_))));
        assert_eq!(t.commands().len(), 1);
        assert_eq!(t.attempts(), 2);
    }
}
