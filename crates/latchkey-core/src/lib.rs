//! Core domain types and configuration for the latchkey access controller.
//!
//! This crate holds everything shared between the controller and the
//! hardware seams: the credential identifier types, the displayed clock
//! pair and its strict line parser, the error taxonomy, and the build-time
//! configuration constants.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
