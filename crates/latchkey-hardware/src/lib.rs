//! Hardware device abstraction layer for the latchkey access controller.
//!
//! This crate provides trait-based abstractions for the peripherals the
//! controller polls: the proximity-card reader, the keypad, the two mode
//! buttons, the host line input, the two-line text display, and the lock
//! actuator. The traits enable substitution between mock implementations
//! (for development and testing) and real hardware drivers.
//!
//! # Design Philosophy
//!
//! - **Poll-first**: every input operation is a synchronous, non-blocking
//!   poll that returns at most one discrete event. The controller runs a
//!   single cooperative loop with no suspension points, so there are no
//!   blocking reads anywhere in these seams.
//! - **Bounded time**: each poll completes in bounded time; waiting is the
//!   controller's job, expressed as elapsed-time checks.
//! - **Error-aware**: all operations return [`Result<T>`][error::Result]
//!   with detailed failure information.
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides channel-driven simulated devices. Each input
//! device is paired with a handle that injects events programmatically:
//!
//! ```
//! use latchkey_hardware::mock::MockCardReader;
//! use latchkey_hardware::traits::CardReader;
//!
//! let (mut reader, handle) = MockCardReader::new();
//!
//! // Nothing presented yet
//! assert!(reader.poll_card().unwrap().is_none());
//!
//! handle.present_card(vec![0xF1, 0x06, 0x1B, 0x06]).unwrap();
//! assert_eq!(
//!     reader.poll_card().unwrap(),
//!     Some(vec![0xF1, 0x06, 0x1B, 0x06])
//! );
//! ```

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{Button, CardReader, Keypad, LineSource, LockActuator, TextDisplay};
pub use types::LockPosition;
