//! Mock byte-oriented host input for testing and development.

use crate::{Result, traits::LineSource};
use tokio::sync::mpsc;

/// Mock line transport controlled through a [`MockLineSourceHandle`].
///
/// Bytes queue up individually so the controller's one-byte-per-poll
/// accumulation is exercised exactly as with a real UART.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockLineSource;
/// use latchkey_hardware::traits::LineSource;
///
/// let (mut source, handle) = MockLineSource::new();
/// handle.send_line("12:45 29/01/26").unwrap();
///
/// let mut received = Vec::new();
/// while let Some(byte) = source.poll_byte().unwrap() {
///     received.push(byte);
/// }
/// assert_eq!(received, b"12:45 29/01/26\n");
/// ```
#[derive(Debug)]
pub struct MockLineSource {
    /// Channel receiver for incoming bytes
    byte_rx: mpsc::UnboundedReceiver<u8>,
}

impl MockLineSource {
    /// Create a new mock line source together with its control handle.
    pub fn new() -> (Self, MockLineSourceHandle) {
        let (byte_tx, byte_rx) = mpsc::unbounded_channel();
        (Self { byte_rx }, MockLineSourceHandle { byte_tx })
    }
}

impl LineSource for MockLineSource {
    fn poll_byte(&mut self) -> Result<Option<u8>> {
        match self.byte_rx.try_recv() {
            Ok(byte) => Ok(Some(byte)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected("line input channel closed"),
            ),
        }
    }
}

/// Handle for feeding bytes into a [`MockLineSource`].
#[derive(Debug, Clone)]
pub struct MockLineSourceHandle {
    byte_tx: mpsc::UnboundedSender<u8>,
}

impl MockLineSourceHandle {
    /// Send raw bytes as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the source side has been dropped.
    pub fn send_bytes(&self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.byte_tx
                .send(byte)
                .map_err(|_| crate::HardwareError::disconnected("line source dropped"))?;
        }
        Ok(())
    }

    /// Send a text line followed by a `\n` terminator.
    ///
    /// # Errors
    ///
    /// Returns an error if the source side has been dropped.
    pub fn send_line(&self, line: &str) -> Result<()> {
        self.send_bytes(line.as_bytes())?;
        self.send_bytes(b"\n")
    }
}
