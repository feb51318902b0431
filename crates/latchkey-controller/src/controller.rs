//! The cooperative control loop.
//!
//! [`Controller::poll`] is one loop iteration. The order inside it is
//! fixed and is itself a correctness property: idle rendering first, then
//! the card adapter, the buttons, the code-entry adapter, the line
//! adapter, and the elapsed-time check last. Only the adapter matching the
//! current state does meaningful work, every adapter consumes at most one
//! discrete event, and the first trigger found ends the iteration, so at
//! most one state transition happens per call and nothing ever blocks.
//!
//! Input that arrives while its adapter is inactive is drained from the
//! device and dropped, exactly as a card waved at a busy reader is.

use std::time::Duration;

use latchkey_core::{
    AccessCode, CardId, ClockStamp,
    constants::{
        BANNER_TEXT, CODE_ENTRY_TIMEOUT, CODE_LENGTH, DEBOUNCE_INTERVAL, DENY_HOLD,
        DISPLAY_COLUMNS, KEY_ALPHABET, LINE_CAPACITY, SCROLL_INTERVAL, UNLOCK_HOLD,
        UPDATE_TIMEOUT,
    },
};
use latchkey_hardware::{
    Button, CardReader, HardwareError, Keypad, LineSource, LockActuator, TextDisplay,
};
use tracing::{debug, info, warn};

use crate::code::CodeBuffer;
use crate::credentials::CredentialStore;
use crate::debounce::Debouncer;
use crate::display::IdlePanel;
use crate::line::{LineAssembler, LineEvent};
use crate::rules::{self, Effect, Trigger};
use crate::state::{StateMachine, SystemState};

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Errors that can escape one loop iteration.
///
/// Only genuine device faults surface here; every authentication,
/// parsing, and timeout failure is absorbed into a denial or rejection
/// state per the error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// A device could not be polled or commanded.
    #[error("Hardware fault: {0}")]
    Hardware(#[from] HardwareError),
}

/// Loop timing, fixed at build time.
///
/// `Default` is exactly the constants in `latchkey_core::constants`; tests
/// substitute shorter durations to exercise the elapsed-time transitions
/// without multi-second sleeps.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long the lock stays open after a grant.
    pub unlock_hold: Duration,

    /// How long a denial/rejection overlay stays visible.
    pub deny_hold: Duration,

    /// Entry window for a full code.
    pub code_entry_timeout: Duration,

    /// Window for a host clock line.
    pub update_timeout: Duration,

    /// Banner scroll cadence.
    pub scroll_interval: Duration,

    /// Shared button debounce interval.
    pub debounce_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            unlock_hold: UNLOCK_HOLD,
            deny_hold: DENY_HOLD,
            code_entry_timeout: CODE_ENTRY_TIMEOUT,
            update_timeout: UPDATE_TIMEOUT,
            scroll_interval: SCROLL_INTERVAL,
            debounce_interval: DEBOUNCE_INTERVAL,
        }
    }
}

/// Mode flags suppressing the idle composite during foreground
/// interactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    /// Set while a code entry interaction is in progress.
    pub password_mode: bool,

    /// Set while a clock update interaction is in progress.
    pub update_mode: bool,
}

impl ModeFlags {
    /// Whether any foreground interaction is in progress.
    #[must_use]
    pub fn any(self) -> bool {
        self.password_mode || self.update_mode
    }
}

/// The peripherals one controller drives.
///
/// Grouped so wiring reads field-by-field at the call site instead of as
/// a seven-argument constructor.
pub struct Devices<R, K, M, U, L, D, A> {
    /// Proximity-card reader.
    pub card_reader: R,

    /// Code-entry keypad.
    pub keypad: K,

    /// Button starting code entry.
    pub mode_button: M,

    /// Button starting a clock update.
    pub update_button: U,

    /// Host byte input for clock lines.
    pub line_source: L,

    /// Two-line text display.
    pub display: D,

    /// Lock actuator.
    pub lock: A,
}

/// The access controller: state machine, adapters, renderer and actuator
/// discipline behind a single non-blocking [`poll`](Controller::poll).
pub struct Controller<R, K, M, U, L, D, A> {
    machine: StateMachine,
    store: CredentialStore,
    config: ControllerConfig,
    flags: ModeFlags,
    clock: ClockStamp,
    code: CodeBuffer,
    line: LineAssembler,
    panel: IdlePanel,
    debouncer: Debouncer,

    card_reader: R,
    keypad: K,
    mode_button: M,
    update_button: U,
    line_source: L,
    display: D,
    lock: A,
}

impl<R, K, M, U, L, D, A> Controller<R, K, M, U, L, D, A>
where
    R: CardReader,
    K: Keypad,
    M: Button,
    U: Button,
    L: LineSource,
    D: TextDisplay,
    A: LockActuator,
{
    /// Create a controller in `Idle` with empty buffers and the default
    /// clock strings.
    pub fn new(
        devices: Devices<R, K, M, U, L, D, A>,
        store: CredentialStore,
        config: ControllerConfig,
    ) -> Self {
        let panel = IdlePanel::new(BANNER_TEXT, DISPLAY_COLUMNS, config.scroll_interval);
        let debouncer = Debouncer::new(config.debounce_interval);

        Self {
            machine: StateMachine::new(),
            store,
            config,
            flags: ModeFlags::default(),
            clock: ClockStamp::default(),
            code: CodeBuffer::new(CODE_LENGTH),
            line: LineAssembler::new(LINE_CAPACITY),
            panel,
            debouncer,
            card_reader: devices.card_reader,
            keypad: devices.keypad,
            mode_button: devices.mode_button,
            update_button: devices.update_button,
            line_source: devices.line_source,
            display: devices.display,
            lock: devices.lock,
        }
    }

    /// Start from a given clock instead of the default strings.
    #[must_use]
    pub fn with_clock(mut self, clock: ClockStamp) -> Self {
        self.clock = clock;
        self
    }

    /// Run one loop iteration.
    ///
    /// Completes in bounded time, performs at most one state transition,
    /// and never blocks.
    ///
    /// # Errors
    ///
    /// Returns an error only for device faults (disconnected peripherals,
    /// failed display/actuator commands). Authentication failures, bad
    /// input and timeouts are absorbed into denial/rejection states.
    pub fn poll(&mut self) -> Result<()> {
        if self.machine.current().is_idle() && !self.flags.any() {
            self.panel.render(&mut self.display, &self.clock)?;
        }

        if let Some(trigger) = self.poll_card()? {
            return self.apply(trigger);
        }
        if let Some(trigger) = self.poll_buttons()? {
            return self.apply(trigger);
        }
        if let Some(trigger) = self.poll_keypad()? {
            return self.apply(trigger);
        }
        if let Some(trigger) = self.poll_line()? {
            return self.apply(trigger);
        }
        if let Some(trigger) = self.check_timeout() {
            return self.apply(trigger);
        }
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> SystemState {
        self.machine.current()
    }

    /// Time spent in the current state.
    pub fn elapsed_in_state(&self) -> Duration {
        self.machine.elapsed_in_state()
    }

    /// The displayed clock.
    pub fn clock(&self) -> &ClockStamp {
        &self.clock
    }

    /// Current mode flags.
    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    /// The state machine, including its transition history.
    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    /// The display device (tests inspect mock contents through this).
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The lock actuator.
    pub fn lock(&self) -> &A {
        &self.lock
    }

    /// The card reader.
    pub fn card_reader(&self) -> &R {
        &self.card_reader
    }

    /// Poll the card reader. Active only in `Idle`; cards presented in any
    /// other state are read, released and dropped.
    fn poll_card(&mut self) -> Result<Option<Trigger>> {
        let Some(bytes) = self.card_reader.poll_card()? else {
            return Ok(None);
        };

        // Halt the reader session after every read attempt, win or lose;
        // a skipped halt desynchronizes the transceiver.
        if let Err(e) = self.card_reader.release() {
            warn!(error = %e, "card reader release failed");
        }

        if !self.machine.current().is_idle() {
            debug!("card presented while busy, dropped");
            return Ok(None);
        }

        match CardId::from_bytes(&bytes) {
            Ok(card) if self.store.is_card_authorized(&card) => {
                info!(card = %card, "card authorized");
                Ok(Some(Trigger::CardAuthorized))
            }
            Ok(card) => {
                info!(card = %card, "card not authorized");
                Ok(Some(Trigger::CardUnauthorized))
            }
            Err(e) => {
                warn!(error = %e, "unreadable card identifier");
                Ok(Some(Trigger::CardUnauthorized))
            }
        }
    }

    /// Poll both mode buttons with the shared debounce clock. Active only
    /// in `Idle`; presses in any other state are drained and dropped.
    fn poll_buttons(&mut self) -> Result<Option<Trigger>> {
        let mode = self.mode_button.poll_pressed()?;
        let update = self.update_button.poll_pressed()?;

        if !self.machine.current().is_idle() {
            if mode || update {
                debug!("button press while busy, dropped");
            }
            return Ok(None);
        }

        if mode && self.debouncer.accept() {
            return Ok(Some(Trigger::ModeButton));
        }
        if update && self.debouncer.accept() {
            return Ok(Some(Trigger::UpdateButton));
        }
        Ok(None)
    }

    /// Poll the keypad. Active only in `CodeEntry`; at most one key per
    /// iteration is appended, and the buffer is compared only once full.
    fn poll_keypad(&mut self) -> Result<Option<Trigger>> {
        let Some(key) = self.keypad.poll_key()? else {
            return Ok(None);
        };

        if self.machine.current() != SystemState::CodeEntry {
            debug!("key press while not collecting a code, dropped");
            return Ok(None);
        }

        if !KEY_ALPHABET.contains(&key) {
            warn!("key outside the configured alphabet, ignored");
            return Ok(None);
        }

        self.code.push(key);
        if !self.code.is_full() {
            return Ok(None);
        }

        match AccessCode::new(self.code.as_str()) {
            Ok(code) if self.store.is_code_authorized(&code) => {
                info!("code authorized");
                Ok(Some(Trigger::CodeAuthorized))
            }
            Ok(_) => {
                info!("code not authorized");
                Ok(Some(Trigger::CodeUnauthorized))
            }
            Err(e) => {
                warn!(error = %e, "collected keys do not form a valid code");
                Ok(Some(Trigger::CodeUnauthorized))
            }
        }
    }

    /// Poll the host line input. Active only in `UpdateWaiting`; one byte
    /// per iteration feeds the assembler.
    fn poll_line(&mut self) -> Result<Option<Trigger>> {
        let Some(byte) = self.line_source.poll_byte()? else {
            return Ok(None);
        };

        if self.machine.current() != SystemState::UpdateWaiting {
            debug!("host byte while not updating, dropped");
            return Ok(None);
        }

        match self.line.push(byte) {
            None => Ok(None),
            Some(LineEvent::Overflow) => {
                warn!(capacity = LINE_CAPACITY, "clock line overflowed");
                Ok(Some(Trigger::LineMalformed))
            }
            Some(LineEvent::Line(text)) => match ClockStamp::parse(&text) {
                Ok(stamp) => Ok(Some(Trigger::LineParsed(stamp))),
                Err(e) => {
                    info!(error = %e, "clock line rejected");
                    Ok(Some(Trigger::LineMalformed))
                }
            },
        }
    }

    /// Synthesize `Timeout` when the current state's budget has elapsed.
    /// Evaluated last, so an adapter event in the same iteration wins.
    fn check_timeout(&self) -> Option<Trigger> {
        let budget = self.state_budget(self.machine.current())?;
        (self.machine.elapsed_in_state() >= budget).then_some(Trigger::Timeout)
    }

    /// Time budget for a state: entry/update windows for the collecting
    /// states, unlock hold for granted states, the shared deny hold for
    /// every result state. `Idle` has none.
    fn state_budget(&self, state: SystemState) -> Option<Duration> {
        match state {
            SystemState::Idle => None,
            SystemState::CodeEntry => Some(self.config.code_entry_timeout),
            SystemState::UpdateWaiting => Some(self.config.update_timeout),
            SystemState::CardGranted | SystemState::CodeGranted => Some(self.config.unlock_hold),
            SystemState::CardDenied
            | SystemState::CodeDenied
            | SystemState::UpdateAccepted
            | SystemState::UpdateRejected
            | SystemState::UpdateTimedOut => Some(self.config.deny_hold),
        }
    }

    /// Look the trigger up in the rules table, run the effects, record the
    /// transition.
    fn apply(&mut self, trigger: Trigger) -> Result<()> {
        let current = self.machine.current();
        let Some(outcome) = rules::decide(current, trigger) else {
            debug!(state = %current, "trigger dropped by rules");
            return Ok(());
        };

        for effect in outcome.effects {
            self.run_effect(effect)?;
        }

        let transition = self.machine.transition(outcome.next);
        info!(from = %transition.from, to = %transition.to, "state transition");
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Unlock => {
                self.lock.unlock()?;
                info!("lock opened");
            }
            Effect::Lock => {
                self.lock.lock()?;
                info!("lock closed");
            }
            Effect::ShowOverlay(overlay) => overlay.show(&mut self.display)?,
            Effect::ClearOverlay => self.panel.reset(),
            Effect::SetClock(stamp) => {
                info!(clock = %stamp, "display clock updated");
                self.clock = stamp;
            }
            Effect::SetPasswordMode(on) => self.flags.password_mode = on,
            Effect::SetUpdateMode(on) => self.flags.update_mode = on,
            Effect::ClearCodeBuffer => self.code.clear(),
            Effect::ClearLineBuffer => self.line.clear(),
        }
        Ok(())
    }
}
