//! Common types shared across hardware device implementations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete lock positions.
///
/// The actuator is only ever commanded to one of these two positions; no
/// intermediate angle is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPosition {
    /// Bolt engaged, door held shut.
    Locked,

    /// Bolt withdrawn, door free to open.
    Unlocked,
}

impl LockPosition {
    /// Returns `true` if the position is `Locked`.
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, LockPosition::Locked)
    }

    /// Returns `true` if the position is `Unlocked`.
    #[must_use]
    pub fn is_unlocked(self) -> bool {
        matches!(self, LockPosition::Unlocked)
    }
}

impl fmt::Display for LockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockPosition::Locked => write!(f, "locked"),
            LockPosition::Unlocked => write!(f, "unlocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_position_predicates() {
        assert!(LockPosition::Locked.is_locked());
        assert!(!LockPosition::Locked.is_unlocked());
        assert!(LockPosition::Unlocked.is_unlocked());
    }

    #[test]
    fn test_lock_position_serialization() {
        let json = serde_json::to_string(&LockPosition::Unlocked).unwrap();
        assert_eq!(json, "\"unlocked\"");

        let back: LockPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LockPosition::Unlocked);
    }
}
