//! Mock keypad for testing and development.

use crate::{Result, traits::Keypad};
use tokio::sync::mpsc;

/// Mock keypad over a configurable key alphabet.
///
/// The alphabet is a constructor parameter, mirroring the contract that the
/// key set (not the scan matrix) is what the controller depends on. The
/// handle refuses to enqueue keys outside the alphabet.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockKeypad;
/// use latchkey_hardware::traits::Keypad;
///
/// const KEYS: &[char] = &['1', '2', '3', '4'];
///
/// let (mut keypad, handle) = MockKeypad::new(KEYS);
///
/// handle.press('1').unwrap();
/// handle.press('2').unwrap();
/// assert!(handle.press('x').is_err()); // outside the alphabet
///
/// assert_eq!(keypad.poll_key().unwrap(), Some('1'));
/// assert_eq!(keypad.poll_key().unwrap(), Some('2'));
/// assert_eq!(keypad.poll_key().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated key presses
    key_rx: mpsc::UnboundedReceiver<char>,
}

impl MockKeypad {
    /// Create a new mock keypad accepting only the given alphabet.
    pub fn new(alphabet: &'static [char]) -> (Self, MockKeypadHandle) {
        let (key_tx, key_rx) = mpsc::unbounded_channel();

        (Self { key_rx }, MockKeypadHandle { key_tx, alphabet })
    }
}

impl Keypad for MockKeypad {
    fn poll_key(&mut self) -> Result<Option<char>> {
        match self.key_rx.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected("keypad event channel closed"),
            ),
        }
    }
}

/// Handle for simulating key presses on a [`MockKeypad`].
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    key_tx: mpsc::UnboundedSender<char>,
    alphabet: &'static [char],
}

impl MockKeypadHandle {
    /// Simulate a single key press.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::InvalidData` if the key is not part of the
    /// keypad's alphabet, or a disconnection error if the keypad side has
    /// been dropped.
    pub fn press(&self, key: char) -> Result<()> {
        if !self.alphabet.contains(&key) {
            return Err(crate::HardwareError::invalid_data(format!(
                "Key '{key}' is not on this keypad"
            )));
        }
        self.key_tx
            .send(key)
            .map_err(|_| crate::HardwareError::disconnected("keypad dropped"))
    }

    /// Simulate pressing a whole sequence of keys.
    ///
    /// # Errors
    ///
    /// Stops at the first key that fails to enqueue.
    pub fn press_sequence(&self, keys: &str) -> Result<()> {
        for key in keys.chars() {
            self.press(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[char] = &['1', '2', '3', '4', '5', '6', '7', '8', '9'];

    #[test]
    fn test_poll_without_press_returns_none() {
        let (mut keypad, _handle) = MockKeypad::new(KEYS);
        assert_eq!(keypad.poll_key().unwrap(), None);
    }

    #[test]
    fn test_press_sequence_arrives_in_order() {
        let (mut keypad, handle) = MockKeypad::new(KEYS);
        handle.press_sequence("73").unwrap();

        assert_eq!(keypad.poll_key().unwrap(), Some('7'));
        assert_eq!(keypad.poll_key().unwrap(), Some('3'));
        assert_eq!(keypad.poll_key().unwrap(), None);
    }

    #[test]
    fn test_key_outside_alphabet_rejected() {
        let (_keypad, handle) = MockKeypad::new(KEYS);
        assert!(handle.press('0').is_err());
        assert!(handle.press('*').is_err());
    }

    #[test]
    fn test_poll_after_handle_dropped_is_error() {
        let (mut keypad, handle) = MockKeypad::new(KEYS);
        drop(handle);
        assert!(keypad.poll_key().is_err());
    }
}
