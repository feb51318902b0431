//! Mock proximity-card reader for testing and development.

use crate::{Result, traits::CardReader};
use tokio::sync::mpsc;

/// Mock card reader controlled through a [`MockCardReaderHandle`].
///
/// Presented cards queue up in an internal channel; each `poll_card` drains
/// at most one. The mock also counts `release` calls so tests can verify
/// the controller's session discipline.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockCardReader;
/// use latchkey_hardware::traits::CardReader;
///
/// let (mut reader, handle) = MockCardReader::new();
///
/// handle.present_card(vec![0x04, 0xAB, 0xCD, 0xEF]).unwrap();
///
/// let card = reader.poll_card().unwrap();
/// assert_eq!(card, Some(vec![0x04, 0xAB, 0xCD, 0xEF]));
/// reader.release().unwrap();
/// assert_eq!(reader.releases(), 1);
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    /// Channel receiver for presented cards
    card_rx: mpsc::UnboundedReceiver<Vec<u8>>,

    /// Number of release (halt) calls observed
    releases: usize,
}

impl MockCardReader {
    /// Create a new mock reader together with its control handle.
    pub fn new() -> (Self, MockCardReaderHandle) {
        let (card_tx, card_rx) = mpsc::unbounded_channel();

        let reader = Self {
            card_rx,
            releases: 0,
        };

        (reader, MockCardReaderHandle { card_tx })
    }

    /// Number of times the controller released the reader session.
    pub fn releases(&self) -> usize {
        self.releases
    }
}

impl CardReader for MockCardReader {
    fn poll_card(&mut self) -> Result<Option<Vec<u8>>> {
        match self.card_rx.try_recv() {
            Ok(uid) => Ok(Some(uid)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected("card reader event channel closed"),
            ),
        }
    }

    fn release(&mut self) -> Result<()> {
        self.releases += 1;
        Ok(())
    }
}

/// Handle for presenting cards to a [`MockCardReader`].
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    card_tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl MockCardReaderHandle {
    /// Present a card with the given identifier bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader side has been dropped.
    pub fn present_card(&self, uid: Vec<u8>) -> Result<()> {
        self.card_tx
            .send(uid)
            .map_err(|_| crate::HardwareError::disconnected("card reader dropped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_without_card_returns_none() {
        let (mut reader, _handle) = MockCardReader::new();
        assert!(reader.poll_card().unwrap().is_none());
    }

    #[test]
    fn test_presented_cards_arrive_in_order() {
        let (mut reader, handle) = MockCardReader::new();
        handle.present_card(vec![0x01, 0x02, 0x03, 0x04]).unwrap();
        handle.present_card(vec![0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

        assert_eq!(
            reader.poll_card().unwrap(),
            Some(vec![0x01, 0x02, 0x03, 0x04])
        );
        assert_eq!(
            reader.poll_card().unwrap(),
            Some(vec![0xAA, 0xBB, 0xCC, 0xDD])
        );
        assert!(reader.poll_card().unwrap().is_none());
    }

    #[test]
    fn test_poll_after_handle_dropped_is_error() {
        let (mut reader, handle) = MockCardReader::new();
        drop(handle);
        assert!(reader.poll_card().is_err());
    }

    #[test]
    fn test_release_counter() {
        let (mut reader, _handle) = MockCardReader::new();
        reader.release().unwrap();
        reader.release().unwrap();
        assert_eq!(reader.releases(), 2);
    }
}
