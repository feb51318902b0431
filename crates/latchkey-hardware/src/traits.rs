//! Hardware device trait definitions.
//!
//! These traits establish the contract between the controller core and its
//! peripherals. Every input method is a non-blocking poll: call it once per
//! loop iteration, get back at most one discrete event, never wait. This is
//! what lets four independent input sources and one renderer share a single
//! cooperative loop without stalling each other.

use crate::error::Result;
use crate::types::LockPosition;

/// Proximity-card reader abstraction.
///
/// The physical transceiver (field activation, anti-collision, framing) is
/// entirely behind this seam; the controller only sees identifier bytes.
///
/// # Examples
///
/// ```no_run
/// use latchkey_hardware::traits::CardReader;
/// use latchkey_hardware::error::Result;
///
/// fn check_for_card<R: CardReader>(reader: &mut R) -> Result<Option<Vec<u8>>> {
///     let card = reader.poll_card()?;
///     // Release the session whether or not a card was read, so the
///     // transceiver never desynchronizes.
///     reader.release()?;
///     Ok(card)
/// }
/// ```
pub trait CardReader: Send {
    /// Poll for a newly presented card.
    ///
    /// Returns `Ok(Some(bytes))` with the card's identifier bytes if a new
    /// card is in the field, `Ok(None)` otherwise. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a communication
    /// error occurs.
    fn poll_card(&mut self) -> Result<Option<Vec<u8>>>;

    /// Release the current reader session (halt/stop the selected card).
    ///
    /// Must be safe to call after every poll attempt, whether or not a card
    /// was read; skipping it can desynchronize the transceiver.
    ///
    /// # Errors
    ///
    /// Returns an error if the halt command cannot be delivered. Callers
    /// should log and continue; this is never fatal to the loop.
    fn release(&mut self) -> Result<()>;
}

/// Keypad abstraction emitting single key events from a finite alphabet.
///
/// The underlying scan matrix size is a hardware detail; the contract is
/// only "one character per poll, drawn from the configured alphabet".
pub trait Keypad: Send {
    /// Poll for a newly pressed key.
    ///
    /// Returns `Ok(Some(key))` for at most one new key per call,
    /// `Ok(None)` when nothing was pressed. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a communication
    /// error occurs.
    fn poll_key(&mut self) -> Result<Option<char>>;
}

/// Momentary push button collapsed to a boolean per poll.
///
/// Debounce is *not* this trait's job; the controller applies a shared
/// debounce clock across its buttons.
pub trait Button: Send {
    /// Poll the button, returning `true` if a press was registered since
    /// the previous poll.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input cannot be read.
    fn poll_pressed(&mut self) -> Result<bool>;
}

/// Byte-oriented host input used for clock update lines.
///
/// The transport (UART, USB-CDC, whatever carries the text) is behind this
/// seam; the controller accumulates bytes into lines itself.
pub trait LineSource: Send {
    /// Poll for the next available input byte.
    ///
    /// Returns `Ok(Some(byte))` for at most one byte per call, `Ok(None)`
    /// when no input is pending. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is disconnected.
    fn poll_byte(&mut self) -> Result<Option<u8>>;
}

/// Two-line fixed-width text display.
///
/// The controller writes whole lines; padding, truncation and the bus
/// protocol are the implementation's concern.
pub trait TextDisplay: Send {
    /// Write one full line of text at the given row (0-based).
    ///
    /// Text longer than the display width is truncated; shorter text is
    /// padded with spaces so stale characters never show through.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is out of range or the device cannot be
    /// written.
    fn write_line(&mut self, line: usize, text: &str) -> Result<()>;
}

/// Lock actuator with two discrete positions.
///
/// Both commands are idempotent: commanding the position the actuator is
/// already in is a no-op, not an error.
pub trait LockActuator: Send {
    /// Drive the actuator to the locked position.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator cannot be commanded.
    fn lock(&mut self) -> Result<()>;

    /// Drive the actuator to the unlocked position.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator cannot be commanded.
    fn unlock(&mut self) -> Result<()>;

    /// Last commanded position.
    fn position(&self) -> LockPosition;
}
