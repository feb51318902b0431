//! Demo binary: the access controller wired to mock devices.
//!
//! Runs the cooperative control loop on a tokio interval tick and scripts
//! one pass through each main flow: an authorized card, a code entry, a
//! wrong code, and a host clock update. Watch it with
//! `RUST_LOG=info cargo run -p latchkey-cli`.

use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use latchkey_controller::{Controller, ControllerConfig, CredentialStore, Devices, SystemState};
use latchkey_core::ClockStamp;
use latchkey_core::constants::{DISPLAY_COLUMNS, DISPLAY_LINES, KEY_ALPHABET};
use latchkey_hardware::mock::{
    MockButton, MockCardReader, MockKeypad, MockLineSource, MockLock, MockTextDisplay,
};

/// Loop tick; mock polls are cheap, so a fast tick keeps the demo snappy.
const TICK: Duration = Duration::from_millis(10);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (card_reader, card) = MockCardReader::new();
    let (keypad, keys) = MockKeypad::new(KEY_ALPHABET);
    let (mode_button, mode) = MockButton::new();
    let (update_button, update) = MockButton::new();
    let (line_source, host) = MockLineSource::new();

    let devices = Devices {
        card_reader,
        keypad,
        mode_button,
        update_button,
        line_source,
        display: MockTextDisplay::new(DISPLAY_LINES, DISPLAY_COLUMNS),
        lock: MockLock::new(),
    };

    let store = CredentialStore::from_constants()?;
    info!(
        codes = store.code_count(),
        cards = store.card_count(),
        "credential store loaded"
    );

    // Short holds so the whole scripted demo fits in a few seconds.
    let config = ControllerConfig {
        unlock_hold: Duration::from_millis(600),
        deny_hold: Duration::from_millis(400),
        code_entry_timeout: Duration::from_millis(1500),
        update_timeout: Duration::from_millis(1500),
        ..ControllerConfig::default()
    };
    // The real device boots with placeholder clock strings until the host
    // sends an update; the demo starts from the wall clock instead.
    let mut controller =
        Controller::new(devices, store, config).with_clock(ClockStamp::now());

    // The script injects one event per step, keyed to the loop tick count.
    let mut ticker = tokio::time::interval(TICK);
    let mut last_state = controller.state();

    for tick in 0u32..600 {
        ticker.tick().await;

        match tick {
            // Authorized card: unlock, hold, relock.
            20 => card.present_card(vec![0xF1, 0x06, 0x1B, 0x06])?,
            // Code entry with the authorized code "12".
            120 => mode.press()?,
            135 => keys.press('1')?,
            150 => keys.press('2')?,
            // Code entry with the wrong code "99".
            250 => mode.press()?,
            265 => keys.press_sequence("99")?,
            // Host clock update.
            360 => update.press()?,
            380 => host.send_line("12:45 29/01/26")?,
            _ => {}
        }

        controller.poll()?;

        if controller.state() != last_state {
            show_display(&controller);
            last_state = controller.state();
        }

        // Demo complete once the update flow has settled back to idle.
        if tick > 400 && controller.state() == SystemState::Idle {
            break;
        }
    }

    info!(clock = %controller.clock(), "final displayed clock");
    for transition in controller.machine().history() {
        info!(from = %transition.from, to = %transition.to, "visited");
    }
    Ok(())
}

/// Print the mock display contents framed like the real two-line panel.
fn show_display(
    controller: &Controller<
        MockCardReader,
        MockKeypad,
        MockButton,
        MockButton,
        MockLineSource,
        MockTextDisplay,
        MockLock,
    >,
) {
    for line in controller.display().lines() {
        info!(display = %format!("|{line}|"));
    }
}
