//! Access controller state machine.
//!
//! The controller is a cooperative finite-state scheduler: exactly one
//! [`SystemState`] is active at a time, and the state together with its
//! entry timestamp is the machine's whole context. Transitions are
//! unconditional here; which transitions *happen* is decided by the pure
//! rules table in [`crate::rules`], so the machine itself only guarantees
//! the invariant that `current` and `entered_at` change atomically together.
//!
//! # States
//!
//! - `Idle`: ambient UI shown, card and mode buttons accepted
//! - `CardGranted` / `CardDenied`: card authentication result, held on
//!   screen for a fixed duration
//! - `CodeEntry`: collecting keypad digits
//! - `CodeGranted` / `CodeDenied`: code authentication result (timeout of
//!   the entry window also lands in `CodeDenied`)
//! - `UpdateWaiting`: collecting a clock update line from the host
//! - `UpdateAccepted` / `UpdateRejected` / `UpdateTimedOut`: update result
//!
//! Every non-`Idle` state auto-returns to `Idle` (directly or through a
//! result state) by elapsed-time checks; the machine can never get stuck.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Maximum number of state transitions to keep in history.
///
/// A full card flow is 2 transitions and a full code flow is 3, so 64
/// entries cover more than 20 recent interactions at negligible memory
/// cost. History is a debugging aid, not an audit log.
const MAX_HISTORY_SIZE: usize = 64;

/// All states of the access-control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    /// Resting state: idle composite on the display, card and mode-button
    /// input accepted.
    Idle,

    /// Authorized card seen; lock is open until the unlock hold expires.
    CardGranted,

    /// Unknown card seen; denial overlay until the deny hold expires.
    CardDenied,

    /// Collecting code digits from the keypad.
    CodeEntry,

    /// Authorized code entered; lock is open until the unlock hold expires.
    CodeGranted,

    /// Wrong code entered, or the entry window timed out.
    CodeDenied,

    /// Waiting for a clock update line from the host.
    UpdateWaiting,

    /// Update line parsed; the displayed clock has been replaced.
    UpdateAccepted,

    /// Update line malformed (or overflowed); clock untouched.
    UpdateRejected,

    /// No update line arrived within the update window.
    UpdateTimedOut,
}

impl SystemState {
    /// Returns `true` for the resting state.
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, SystemState::Idle)
    }

    /// Returns `true` while the lock is commanded open.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, SystemState::CardGranted | SystemState::CodeGranted)
    }

    /// Returns `true` for states that only wait out a hold before going
    /// back to `Idle` (no input adapter is active in them).
    #[must_use]
    pub fn is_result(self) -> bool {
        !matches!(
            self,
            SystemState::Idle | SystemState::CodeEntry | SystemState::UpdateWaiting
        )
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            SystemState::Idle => "Idle",
            SystemState::CardGranted => "CardGranted",
            SystemState::CardDenied => "CardDenied",
            SystemState::CodeEntry => "CodeEntry",
            SystemState::CodeGranted => "CodeGranted",
            SystemState::CodeDenied => "CodeDenied",
            SystemState::UpdateWaiting => "UpdateWaiting",
            SystemState::UpdateAccepted => "UpdateAccepted",
            SystemState::UpdateRejected => "UpdateRejected",
            SystemState::UpdateTimedOut => "UpdateTimedOut",
        };
        write!(f, "{}", state_str)
    }
}

/// One recorded state transition.
///
/// The `timestamp` field is not serialized as `Instant` is process
/// specific; on deserialization it is set to the time of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: SystemState,

    /// The state transitioned to.
    pub to: SystemState,

    /// When the transition occurred.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    /// Create a new transition record stamped with the current time.
    pub fn new(from: SystemState, to: SystemState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    /// Duration since this transition occurred.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// The state context: current state plus its entry timestamp.
///
/// Owned exclusively by the controller; `transition` is the only mutation
/// and stamps `entered_at` together with `current`, never one without the
/// other. A bounded history of recent transitions is kept for debugging.
pub struct StateMachine {
    /// Current state.
    current: SystemState,

    /// When the current state was entered.
    entered_at: Instant,

    /// History of state transitions (limited to MAX_HISTORY_SIZE).
    history: VecDeque<StateTransition>,
}

impl StateMachine {
    /// Create a new machine in `Idle`.
    pub fn new() -> Self {
        Self {
            current: SystemState::Idle,
            entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Current state.
    pub fn current(&self) -> SystemState {
        self.current
    }

    /// Time elapsed since the current state was entered.
    pub fn elapsed_in_state(&self) -> Duration {
        self.entered_at.elapsed()
    }

    /// Unconditionally enter `next`, stamping the entry time.
    ///
    /// No display or actuator action is implied; callers perform side
    /// effects explicitly around the transition. Returns the recorded
    /// transition.
    pub fn transition(&mut self, next: SystemState) -> StateTransition {
        let transition = StateTransition::new(self.current, next);

        self.current = next;
        self.entered_at = Instant::now();
        self.add_to_history(transition.clone());

        transition
    }

    /// Recent transitions, oldest to newest.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// The most recent `count` transitions, oldest first.
    pub fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    fn add_to_history(&mut self, transition: StateTransition) {
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_machine_starts_idle() {
        let machine = StateMachine::new();
        assert_eq!(machine.current(), SystemState::Idle);
        assert_eq!(machine.history().len(), 0);
    }

    #[test]
    fn test_transition_updates_state_and_timestamp() {
        let mut machine = StateMachine::new();
        thread::sleep(Duration::from_millis(30));

        let before = machine.elapsed_in_state();
        let transition = machine.transition(SystemState::CodeEntry);

        assert_eq!(machine.current(), SystemState::CodeEntry);
        assert_eq!(transition.from, SystemState::Idle);
        assert_eq!(transition.to, SystemState::CodeEntry);
        // entry timestamp was re-stamped together with the state
        assert!(machine.elapsed_in_state() < before);
    }

    #[test]
    fn test_elapsed_in_state_grows() {
        let machine = StateMachine::new();
        thread::sleep(Duration::from_millis(50));
        assert!(machine.elapsed_in_state() >= Duration::from_millis(50));
    }

    #[test]
    fn test_history_records_transitions_in_order() {
        let mut machine = StateMachine::new();
        machine.transition(SystemState::CodeEntry);
        machine.transition(SystemState::CodeGranted);
        machine.transition(SystemState::Idle);

        let history: Vec<_> = machine.history().iter().collect();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].to, SystemState::CodeEntry);
        assert_eq!(history[1].to, SystemState::CodeGranted);
        assert_eq!(history[2].to, SystemState::Idle);
    }

    #[test]
    fn test_history_size_limit() {
        let mut machine = StateMachine::new();
        for _ in 0..100 {
            machine.transition(SystemState::CardDenied);
            machine.transition(SystemState::Idle);
        }
        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_last_transitions_returns_most_recent() {
        let mut machine = StateMachine::new();
        machine.transition(SystemState::CardGranted);
        machine.transition(SystemState::Idle);
        machine.transition(SystemState::UpdateWaiting);

        let last_two = machine.last_transitions(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].to, SystemState::Idle);
        assert_eq!(last_two[1].to, SystemState::UpdateWaiting);
    }

    #[test]
    fn test_state_predicates() {
        assert!(SystemState::Idle.is_idle());
        assert!(SystemState::CardGranted.is_granted());
        assert!(SystemState::CodeGranted.is_granted());
        assert!(!SystemState::CodeDenied.is_granted());

        assert!(SystemState::CardDenied.is_result());
        assert!(SystemState::UpdateTimedOut.is_result());
        assert!(!SystemState::Idle.is_result());
        assert!(!SystemState::CodeEntry.is_result());
        assert!(!SystemState::UpdateWaiting.is_result());
    }

    #[test]
    fn test_state_display_formatting() {
        assert_eq!(SystemState::Idle.to_string(), "Idle");
        assert_eq!(SystemState::UpdateTimedOut.to_string(), "UpdateTimedOut");
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&SystemState::UpdateWaiting).unwrap();
        assert_eq!(json, "\"update_waiting\"");

        let back: SystemState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SystemState::UpdateWaiting);
    }

    #[test]
    fn test_transition_elapsed_time() {
        let transition = StateTransition::new(SystemState::Idle, SystemState::CodeEntry);
        thread::sleep(Duration::from_millis(30));
        assert!(transition.elapsed() >= Duration::from_millis(30));
    }
}
