//! Display rendering: the idle composite and the result overlays.
//!
//! There are exactly two render paths and they are mutually exclusive. The
//! idle composite (clock line plus a scrolling banner) is redrawn every
//! idle iteration, with the banner advancing only on its own cadence. An
//! overlay is written once on entering a non-idle state and left untouched
//! until the state changes. The panel owns nothing but its scroll cursor
//! and cadence; every other timing decision lives in the controller.

use std::time::{Duration, Instant};

use latchkey_core::ClockStamp;
use latchkey_hardware::{Result, TextDisplay};
use serde::{Deserialize, Serialize};

/// The two-line status messages shown in place of the idle composite.
///
/// Each variant maps to fixed text, so what the user sees is decided
/// entirely by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Authorized card: the door is open.
    CardGranted,

    /// Unknown card.
    CardDenied,

    /// Code entry in progress.
    CodePrompt,

    /// Authorized code: the door is open.
    CodeGranted,

    /// Wrong code.
    CodeDenied,

    /// Code entry window expired.
    CodeTimeout,

    /// Waiting for a clock line from the host.
    UpdatePrompt,

    /// Clock line accepted.
    UpdateAccepted,

    /// Clock line malformed.
    UpdateRejected,

    /// No clock line arrived in time.
    UpdateTimedOut,
}

impl Overlay {
    /// The two display lines for this overlay, top first.
    #[must_use]
    pub fn lines(self) -> [&'static str; 2] {
        match self {
            Overlay::CardGranted => ["ACCESS GRANTED", "DOOR OPEN"],
            Overlay::CardDenied => ["ACCESS DENIED", "UNKNOWN CARD"],
            Overlay::CodePrompt => ["ENTER CODE", ""],
            Overlay::CodeGranted => ["ACCESS GRANTED", "DOOR OPEN"],
            Overlay::CodeDenied => ["ACCESS DENIED", "WRONG CODE"],
            Overlay::CodeTimeout => ["ACCESS DENIED", "ENTRY TIMEOUT"],
            Overlay::UpdatePrompt => ["CLOCK UPDATE", "SEND TIME/DATE"],
            Overlay::UpdateAccepted => ["CLOCK UPDATE", "ACCEPTED"],
            Overlay::UpdateRejected => ["CLOCK UPDATE", "BAD FORMAT"],
            Overlay::UpdateTimedOut => ["CLOCK UPDATE", "NO INPUT"],
        }
    }

    /// Write both overlay lines to the display.
    ///
    /// # Errors
    ///
    /// Propagates display write failures.
    pub fn show<D: TextDisplay>(self, display: &mut D) -> Result<()> {
        let [top, bottom] = self.lines();
        display.write_line(0, top)?;
        display.write_line(1, bottom)
    }
}

/// The idle composite: clock on the first line, scrolling banner on the
/// second.
///
/// The panel owns the scroll cursor and its cadence. The cursor wraps
/// modulo the banner length and is reset to zero whenever the idle display
/// resumes after a non-idle interaction, so the banner always restarts
/// from its beginning.
#[derive(Debug, Clone)]
pub struct IdlePanel {
    /// Banner characters (indexed, since the window wraps mid-text).
    banner: Vec<char>,

    /// Visible window width.
    columns: usize,

    /// Interval between scroll steps.
    scroll_interval: Duration,

    /// Offset of the window start into the banner.
    cursor: usize,

    /// When the banner last advanced; `None` right after a reset.
    last_scroll: Option<Instant>,
}

impl IdlePanel {
    /// Create a panel over the given banner text.
    pub fn new(banner: &str, columns: usize, scroll_interval: Duration) -> Self {
        Self {
            banner: banner.chars().collect(),
            columns,
            scroll_interval,
            cursor: 0,
            last_scroll: None,
        }
    }

    /// Current scroll offset into the banner.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restart the banner from its beginning.
    ///
    /// Called when the idle display resumes after any non-idle interaction.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.last_scroll = None;
    }

    /// Draw one idle frame: always the clock line, and the banner window,
    /// advancing the cursor only when the scroll interval has elapsed.
    ///
    /// # Errors
    ///
    /// Propagates display write failures.
    pub fn render<D: TextDisplay>(&mut self, display: &mut D, clock: &ClockStamp) -> Result<()> {
        display.write_line(0, &clock.to_string())?;

        match self.last_scroll {
            None => {
                // First frame after a reset: draw without advancing.
                self.last_scroll = Some(Instant::now());
            }
            Some(last) if last.elapsed() >= self.scroll_interval => {
                self.cursor = (self.cursor + 1) % self.banner.len().max(1);
                self.last_scroll = Some(Instant::now());
            }
            Some(_) => {}
        }

        display.write_line(1, &self.window())
    }

    /// The `columns`-wide slice of the banner at the current cursor,
    /// wrapping around the end.
    fn window(&self) -> String {
        if self.banner.is_empty() {
            return String::new();
        }
        (0..self.columns)
            .map(|i| self.banner[(self.cursor + i) % self.banner.len()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_hardware::mock::MockTextDisplay;
    use std::thread;

    fn panel(interval_ms: u64) -> IdlePanel {
        IdlePanel::new("HELLO * ", 4, Duration::from_millis(interval_ms))
    }

    #[test]
    fn test_overlay_lines_fit_sixteen_columns() {
        let overlays = [
            Overlay::CardGranted,
            Overlay::CardDenied,
            Overlay::CodePrompt,
            Overlay::CodeGranted,
            Overlay::CodeDenied,
            Overlay::CodeTimeout,
            Overlay::UpdatePrompt,
            Overlay::UpdateAccepted,
            Overlay::UpdateRejected,
            Overlay::UpdateTimedOut,
        ];
        for overlay in overlays {
            for line in overlay.lines() {
                assert!(line.len() <= 16, "'{line}' wider than the display");
            }
        }
    }

    #[test]
    fn test_overlay_show_writes_both_lines() {
        let mut display = MockTextDisplay::new(2, 16);
        Overlay::CardDenied.show(&mut display).unwrap();
        assert_eq!(display.line(0).unwrap().trim_end(), "ACCESS DENIED");
        assert_eq!(display.line(1).unwrap().trim_end(), "UNKNOWN CARD");
    }

    #[test]
    fn test_first_render_draws_clock_and_banner_start() {
        let mut display = MockTextDisplay::new(2, 16);
        let mut panel = panel(1000);
        panel
            .render(&mut display, &ClockStamp::default())
            .unwrap();

        assert_eq!(display.line(0).unwrap().trim_end(), "00:00 01/01/26");
        assert!(display.line(1).unwrap().starts_with("HELL"));
        assert_eq!(panel.cursor(), 0);
    }

    #[test]
    fn test_banner_advances_only_after_interval() {
        let mut display = MockTextDisplay::new(2, 16);
        let mut panel = panel(40);
        let clock = ClockStamp::default();

        panel.render(&mut display, &clock).unwrap();
        panel.render(&mut display, &clock).unwrap();
        assert_eq!(panel.cursor(), 0); // interval not yet elapsed

        thread::sleep(Duration::from_millis(60));
        panel.render(&mut display, &clock).unwrap();
        assert_eq!(panel.cursor(), 1);
        assert!(display.line(1).unwrap().starts_with("ELLO"));
    }

    #[test]
    fn test_banner_window_wraps_modulo_length() {
        let mut display = MockTextDisplay::new(2, 16);
        let mut panel = panel(1);
        let clock = ClockStamp::default();

        // Walk the cursor through a full banner cycle.
        panel.render(&mut display, &clock).unwrap();
        for _ in 0..8 {
            thread::sleep(Duration::from_millis(3));
            panel.render(&mut display, &clock).unwrap();
        }
        assert_eq!(panel.cursor(), 0); // 8 steps over an 8-char banner
    }

    #[test]
    fn test_reset_restarts_banner() {
        let mut display = MockTextDisplay::new(2, 16);
        let mut panel = panel(1);
        let clock = ClockStamp::default();

        panel.render(&mut display, &clock).unwrap();
        thread::sleep(Duration::from_millis(5));
        panel.render(&mut display, &clock).unwrap();
        assert_ne!(panel.cursor(), 0);

        panel.reset();
        assert_eq!(panel.cursor(), 0);
        panel.render(&mut display, &clock).unwrap();
        assert_eq!(panel.cursor(), 0); // first frame after reset never advances
    }
}
