//! Mock fixed-width text display for testing and development.

use crate::{HardwareError, Result, traits::TextDisplay};

/// Mock two-line display that records what the controller wrote.
///
/// Text is padded or truncated to the configured width on every write,
/// matching the contract of a character LCD: stale characters never show
/// through a shorter write.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockTextDisplay;
/// use latchkey_hardware::traits::TextDisplay;
///
/// let mut display = MockTextDisplay::new(2, 16);
/// display.write_line(0, "ACCESS GRANTED").unwrap();
///
/// assert_eq!(display.line(0).unwrap(), "ACCESS GRANTED  ");
/// assert_eq!(display.line(1).unwrap(), "                ");
/// ```
#[derive(Debug, Clone)]
pub struct MockTextDisplay {
    /// Characters per line.
    columns: usize,

    /// Current contents, one padded string per line.
    buffer: Vec<String>,

    /// Total number of write_line calls, for cadence assertions.
    writes: usize,
}

impl MockTextDisplay {
    /// Create a display with the given geometry, blank everywhere.
    pub fn new(lines: usize, columns: usize) -> Self {
        Self {
            columns,
            buffer: vec![" ".repeat(columns); lines],
            writes: 0,
        }
    }

    /// Current contents of a line, exactly `columns` characters.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.buffer.get(line).map(String::as_str)
    }

    /// Contents of every line, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    /// Number of writes performed since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TextDisplay for MockTextDisplay {
    fn write_line(&mut self, line: usize, text: &str) -> Result<()> {
        let lines = self.buffer.len();
        let slot = self.buffer.get_mut(line).ok_or_else(|| {
            HardwareError::invalid_data(format!("line {line} out of range ({lines} lines)"))
        })?;

        let mut rendered: String = text.chars().take(self.columns).collect();
        while rendered.chars().count() < self.columns {
            rendered.push(' ');
        }
        *slot = rendered;
        self.writes += 1;
        Ok(())
    }
}
