//! The access-control core: a cooperative finite-state scheduler.
//!
//! Everything runs inside a single non-blocking control loop
//! ([`Controller::poll`]): four input adapters (card reader, keypad, mode
//! buttons, host line input) are polled in a fixed order, the pure
//! transition table in [`rules`] decides what each event means in the
//! current [`SystemState`], and the controller applies the resulting
//! effects to the display and the lock actuator. All waiting is expressed
//! as elapsed-time checks; every flow returns to `Idle` on its own.

pub mod code;
pub mod controller;
pub mod credentials;
pub mod debounce;
pub mod display;
pub mod line;
pub mod rules;
pub mod state;

pub use controller::{Controller, ControllerConfig, ControllerError, Devices, ModeFlags, Result};
pub use credentials::CredentialStore;
pub use state::{StateMachine, StateTransition, SystemState};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
