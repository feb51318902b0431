//! Mock device implementations for testing and development.
//!
//! Every input device is paired with a handle that injects events through a
//! channel; polls drain the channel without blocking, so the mocks satisfy
//! the same non-blocking contract as real drivers. The display and lock
//! mocks record what the controller commanded so tests can assert on it.

pub mod button;
pub mod card;
pub mod display;
pub mod keypad;
pub mod line;
pub mod lock;

// Re-export commonly used types
pub use button::{MockButton, MockButtonHandle};
pub use card::{MockCardReader, MockCardReaderHandle};
pub use display::MockTextDisplay;
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use line::{MockLineSource, MockLineSourceHandle};
pub use lock::MockLock;
