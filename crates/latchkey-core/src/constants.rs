//! Build-time configuration for the latchkey access controller.
//!
//! Everything here is fixed at compile time per the controller's design:
//! hold durations, poll timeouts, debounce and scroll cadence, the code
//! length and key alphabet, line-buffer capacity, display geometry, and the
//! authorized credential lists. There is no runtime configuration surface.
//!
//! # Timing Model
//!
//! All durations are consumed as elapsed-time checks inside the cooperative
//! control loop; nothing ever sleeps on them. A "hold" is how long a result
//! overlay stays on the display before the controller returns to idle.
//!
//! ```
//! use latchkey_core::constants::{DENY_HOLD, UNLOCK_HOLD};
//!
//! // The lock stays open strictly longer than a denial is shown.
//! assert!(UNLOCK_HOLD > DENY_HOLD);
//! ```

use std::time::Duration;

// ============================================================================
// Hold durations and timeouts
// ============================================================================

/// How long the lock stays in the unlocked position after a grant.
pub const UNLOCK_HOLD: Duration = Duration::from_secs(5);

/// How long a denial/rejection/timeout overlay stays visible.
///
/// Shared across all denial reasons (wrong code, bad update line, entry
/// timeout); the original firmware used one constant for all of them.
pub const DENY_HOLD: Duration = Duration::from_secs(3);

/// Maximum time the controller waits for a full code to be keyed in.
pub const CODE_ENTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum time the controller waits for a clock update line from the host.
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Input cadence
// ============================================================================

/// Minimum interval between accepted presses of *either* mode button.
///
/// The debounce clock is shared by both buttons so contact bounce on one
/// cannot double-fire through the other.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Interval between banner scroll steps on the idle display.
pub const SCROLL_INTERVAL: Duration = Duration::from_millis(400);

// ============================================================================
// Code entry
// ============================================================================

/// Number of key presses that make up one access code.
pub const CODE_LENGTH: usize = 2;

/// Keys the code-entry adapter accepts.
///
/// The physical keypad is a reduced matrix, but the matrix size is a pin
/// budget artifact, not a logical constraint; the alphabet is the contract.
pub const KEY_ALPHABET: &[char] = &['1', '2', '3', '4', '5', '6', '7', '8', '9'];

// ============================================================================
// Clock update line
// ============================================================================

/// Exact length of a clock update line: `"HH:MM DD/MM/YY"`.
pub const CLOCK_LINE_LEN: usize = 14;

/// Capacity of the line accumulator; longer input without a terminator is
/// reported as an overflow.
pub const LINE_CAPACITY: usize = 32;

// ============================================================================
// Display geometry and idle content
// ============================================================================

/// Number of display lines.
pub const DISPLAY_LINES: usize = 2;

/// Number of characters per display line.
pub const DISPLAY_COLUMNS: usize = 16;

/// Banner text scrolled on the second idle line. The trailing separator
/// keeps the wrap point readable.
pub const BANNER_TEXT: &str = "PRESENT CARD OR PRESS A MODE KEY * ";

/// Clock shown before the first successful update.
pub const DEFAULT_TIME: &str = "00:00";

/// Date shown before the first successful update.
pub const DEFAULT_DATE: &str = "01/01/26";

// ============================================================================
// Credentials
// ============================================================================

/// Authorized numeric codes, each exactly [`CODE_LENGTH`] digits.
pub const AUTHORIZED_CODES: &[&str] = &["12", "73"];

/// Authorized card identifiers, canonical uppercase hex.
pub const AUTHORIZED_CARDS: &[&str] = &["F1061B06", "04A1B2C3"];
