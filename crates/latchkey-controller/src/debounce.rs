//! Shared-clock button debounce.

use std::time::{Duration, Instant};

/// Debounce policy shared by both mode buttons.
///
/// A press is accepted only if at least the configured interval has
/// elapsed since the last *accepted* press of either button; rejected
/// presses do not restart the interval. One instance serves all buttons,
/// which is what prevents contact bounce on one from double-firing
/// through the other.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Offer a press; returns `true` and stamps the shared clock if the
    /// press is accepted.
    pub fn accept(&mut self) -> bool {
        let now = Instant::now();
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.accept());
    }

    #[test]
    fn test_bounce_within_interval_rejected() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.accept());
        assert!(!debouncer.accept());
        assert!(!debouncer.accept());
    }

    #[test]
    fn test_press_after_interval_accepted() {
        let mut debouncer = Debouncer::new(Duration::from_millis(30));
        assert!(debouncer.accept());
        thread::sleep(Duration::from_millis(50));
        assert!(debouncer.accept());
    }

    #[test]
    fn test_rejected_press_does_not_restart_interval() {
        let mut debouncer = Debouncer::new(Duration::from_millis(60));
        assert!(debouncer.accept());
        thread::sleep(Duration::from_millis(40));
        assert!(!debouncer.accept()); // still inside the interval
        thread::sleep(Duration::from_millis(30));
        // 70ms since the accepted press; the rejected one did not count.
        assert!(debouncer.accept());
    }
}
