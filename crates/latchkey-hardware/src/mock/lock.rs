//! Mock lock actuator for testing and development.

use crate::{Result, traits::LockActuator, types::LockPosition};

/// Mock actuator that records every commanded position.
///
/// Commands are idempotent like the real driver: repeating the current
/// position succeeds and is still recorded, so tests can verify the
/// controller commands each transition exactly once.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockLock;
/// use latchkey_hardware::traits::LockActuator;
/// use latchkey_hardware::types::LockPosition;
///
/// let mut lock = MockLock::new();
/// assert_eq!(lock.position(), LockPosition::Locked);
///
/// lock.unlock().unwrap();
/// lock.lock().unwrap();
/// assert_eq!(
///     lock.commands(),
///     &[LockPosition::Unlocked, LockPosition::Locked]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockLock {
    position: LockPosition,
    commands: Vec<LockPosition>,
}

impl MockLock {
    /// Create a new mock lock, starting locked.
    pub fn new() -> Self {
        Self {
            position: LockPosition::Locked,
            commands: Vec::new(),
        }
    }

    /// Every position commanded so far, in order.
    pub fn commands(&self) -> &[LockPosition] {
        &self.commands
    }
}

impl Default for MockLock {
    fn default() -> Self {
        Self::new()
    }
}

impl LockActuator for MockLock {
    fn lock(&mut self) -> Result<()> {
        self.position = LockPosition::Locked;
        self.commands.push(LockPosition::Locked);
        Ok(())
    }

    fn unlock(&mut self) -> Result<()> {
        self.position = LockPosition::Unlocked;
        self.commands.push(LockPosition::Unlocked);
        Ok(())
    }

    fn position(&self) -> LockPosition {
        self.position
    }
}
