//! The transition table as a pure function.
//!
//! Every behavior of the controller is one row here: given the current
//! state and a trigger (an adapter event or the elapsed-time check),
//! [`decide`] returns the next state and the side effects the controller
//! must perform, or `None` when the trigger is simply dropped in that
//! state. Because the function is pure, the whole table is testable
//! without any devices or clocks.
//!
//! Ordering is the controller's job: adapter triggers are evaluated before
//! the timeout trigger within one loop iteration, and at most one trigger
//! is applied per iteration.

use latchkey_core::ClockStamp;
use serde::{Deserialize, Serialize};

use crate::display::Overlay;
use crate::state::SystemState;

/// A single discrete input to the state machine.
///
/// The first six come from input adapters; `Timeout` is synthesized by the
/// controller when the current state's time budget has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Card adapter read a card that is in the credential store.
    CardAuthorized,

    /// Card adapter read a card that is not in the credential store
    /// (or could not render a valid identifier from it).
    CardUnauthorized,

    /// Debounced press of the code-entry mode button.
    ModeButton,

    /// Debounced press of the clock-update mode button.
    UpdateButton,

    /// Code buffer filled with an authorized code.
    CodeAuthorized,

    /// Code buffer filled with anything else.
    CodeUnauthorized,

    /// Host line parsed into a valid clock stamp.
    LineParsed(ClockStamp),

    /// Host line malformed, or the line buffer overflowed.
    LineMalformed,

    /// The current state's time budget elapsed.
    Timeout,
}

/// A side effect the controller must perform around a transition.
///
/// Effects are explicit: [`crate::state::StateMachine::transition`] itself
/// never touches the display or the actuator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Command the actuator to the unlocked position.
    Unlock,

    /// Command the actuator to the locked position.
    Lock,

    /// Show a two-line overlay in place of the idle composite.
    ShowOverlay(Overlay),

    /// Resume the idle composite (banner restarts from its beginning).
    ClearOverlay,

    /// Replace the displayed clock with a freshly parsed stamp.
    SetClock(ClockStamp),

    /// Set or clear the password-entry mode flag.
    SetPasswordMode(bool),

    /// Set or clear the clock-update mode flag.
    SetUpdateMode(bool),

    /// Empty the code buffer before collecting a new code.
    ClearCodeBuffer,

    /// Empty the line buffer before collecting a new line.
    ClearLineBuffer,
}

/// The result of one table row: where to go and what to do on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// State to enter.
    pub next: SystemState,

    /// Effects to apply, in order, before the transition is recorded.
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn new(next: SystemState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }
}

/// Evaluate one trigger against the current state.
///
/// Returns `None` when the trigger is not meaningful in this state (the
/// event is dropped, no transition occurs). Every `(state, Timeout)` pair
/// for a non-`Idle` state returns `Some`, which is what guarantees the
/// loop always finds its way back to `Idle`.
#[must_use]
pub fn decide(state: SystemState, trigger: Trigger) -> Option<Outcome> {
    use Effect::*;
    use SystemState::*;
    use Trigger::*;

    let outcome = match (state, trigger) {
        // Idle: authentication entry points
        (Idle, CardAuthorized) => {
            Outcome::new(CardGranted, vec![ShowOverlay(Overlay::CardGranted), Unlock])
        }
        (Idle, CardUnauthorized) => {
            Outcome::new(CardDenied, vec![ShowOverlay(Overlay::CardDenied)])
        }
        (Idle, ModeButton) => Outcome::new(
            CodeEntry,
            vec![
                ClearCodeBuffer,
                ShowOverlay(Overlay::CodePrompt),
                SetPasswordMode(true),
            ],
        ),
        (Idle, UpdateButton) => Outcome::new(
            UpdateWaiting,
            vec![
                ClearLineBuffer,
                ShowOverlay(Overlay::UpdatePrompt),
                SetUpdateMode(true),
            ],
        ),

        // Code entry: full-buffer comparison or entry timeout
        (CodeEntry, CodeAuthorized) => {
            Outcome::new(CodeGranted, vec![ShowOverlay(Overlay::CodeGranted), Unlock])
        }
        (CodeEntry, CodeUnauthorized) => {
            Outcome::new(CodeDenied, vec![ShowOverlay(Overlay::CodeDenied)])
        }
        (CodeEntry, Timeout) => Outcome::new(CodeDenied, vec![ShowOverlay(Overlay::CodeTimeout)]),

        // Update wait: parsed line, malformed line, or update timeout
        (UpdateWaiting, LineParsed(stamp)) => Outcome::new(
            UpdateAccepted,
            vec![SetClock(stamp), ShowOverlay(Overlay::UpdateAccepted)],
        ),
        (UpdateWaiting, LineMalformed) => {
            Outcome::new(UpdateRejected, vec![ShowOverlay(Overlay::UpdateRejected)])
        }
        (UpdateWaiting, Timeout) => {
            Outcome::new(UpdateTimedOut, vec![ShowOverlay(Overlay::UpdateTimedOut)])
        }

        // Result states: wait out the hold, then restore the idle composite
        (CardGranted, Timeout) => Outcome::new(Idle, vec![Lock, ClearOverlay]),
        (CardDenied, Timeout) => Outcome::new(Idle, vec![ClearOverlay]),
        (CodeGranted, Timeout) => {
            Outcome::new(Idle, vec![Lock, SetPasswordMode(false), ClearOverlay])
        }
        (CodeDenied, Timeout) => Outcome::new(Idle, vec![SetPasswordMode(false), ClearOverlay]),
        (UpdateAccepted | UpdateRejected | UpdateTimedOut, Timeout) => {
            Outcome::new(Idle, vec![SetUpdateMode(false), ClearOverlay])
        }

        // Anything else is dropped input
        _ => return None,
    };

    Some(outcome)
}
