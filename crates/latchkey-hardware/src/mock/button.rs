//! Mock push button for testing and development.

use crate::{Result, traits::Button};
use tokio::sync::mpsc;

/// Mock momentary button controlled through a [`MockButtonHandle`].
///
/// Each injected press is reported by exactly one `poll_pressed` call.
/// Debounce is deliberately absent here; the controller owns that policy.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockButton;
/// use latchkey_hardware::traits::Button;
///
/// let (mut button, handle) = MockButton::new();
///
/// assert!(!button.poll_pressed().unwrap());
/// handle.press().unwrap();
/// assert!(button.poll_pressed().unwrap());
/// assert!(!button.poll_pressed().unwrap());
/// ```
#[derive(Debug)]
pub struct MockButton {
    /// Channel receiver for simulated presses
    press_rx: mpsc::UnboundedReceiver<()>,
}

impl MockButton {
    /// Create a new mock button together with its control handle.
    pub fn new() -> (Self, MockButtonHandle) {
        let (press_tx, press_rx) = mpsc::unbounded_channel();
        (Self { press_rx }, MockButtonHandle { press_tx })
    }
}

impl Button for MockButton {
    fn poll_pressed(&mut self) -> Result<bool> {
        match self.press_rx.try_recv() {
            Ok(()) => Ok(true),
            Err(mpsc::error::TryRecvError::Empty) => Ok(false),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected("button event channel closed"),
            ),
        }
    }
}

/// Handle for simulating presses on a [`MockButton`].
#[derive(Debug, Clone)]
pub struct MockButtonHandle {
    press_tx: mpsc::UnboundedSender<()>,
}

impl MockButtonHandle {
    /// Simulate one button press.
    ///
    /// # Errors
    ///
    /// Returns an error if the button side has been dropped.
    pub fn press(&self) -> Result<()> {
        self.press_tx
            .send(())
            .map_err(|_| crate::HardwareError::disconnected("button dropped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_press_reported_once() {
        let (mut button, handle) = MockButton::new();
        handle.press().unwrap();
        handle.press().unwrap();

        assert!(button.poll_pressed().unwrap());
        assert!(button.poll_pressed().unwrap());
        assert!(!button.poll_pressed().unwrap());
    }

    #[test]
    fn test_poll_after_handle_dropped_is_error() {
        let (mut button, handle) = MockButton::new();
        drop(handle);
        assert!(button.poll_pressed().is_err());
    }
}
