//! Bounded line assembly for host clock input.
//!
//! Bytes arrive one per poll from the line source; this accumulator turns
//! them into whole lines. Overflow (capacity exhausted before a terminator)
//! is an explicit event rather than a panic or silent truncation, and the
//! buffer resets itself so the next line starts clean.

/// Event produced by feeding one byte into the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A terminator arrived; here is the completed line (without it).
    Line(String),

    /// Capacity was exhausted before any terminator.
    Overflow,
}

/// Bounded byte accumulator for one line of host input.
///
/// `\n` terminates a line, `\r` is skipped so CRLF hosts work unchanged.
/// Bytes that are not valid UTF-8 survive into the completed line as
/// replacement characters and fail parsing downstream, which is the right
/// outcome for garbage input.
#[derive(Debug, Clone)]
pub struct LineAssembler {
    buf: Vec<u8>,
    capacity: usize,
}

impl LineAssembler {
    /// Create an empty assembler with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Feed one byte; returns an event when a line completes or overflows.
    pub fn push(&mut self, byte: u8) -> Option<LineEvent> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let line = String::from_utf8_lossy(&self.buf).into_owned();
                self.buf.clear();
                Some(LineEvent::Line(line))
            }
            _ => {
                if self.buf.len() >= self.capacity {
                    self.buf.clear();
                    return Some(LineEvent::Overflow);
                }
                self.buf.push(byte);
                None
            }
        }
    }

    /// Number of bytes accumulated toward the current line.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard any partial line.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(assembler: &mut LineAssembler, bytes: &[u8]) -> Vec<LineEvent> {
        bytes.iter().filter_map(|&b| assembler.push(b)).collect()
    }

    #[test]
    fn test_line_completed_on_terminator() {
        let mut assembler = LineAssembler::new(32);
        let events = feed(&mut assembler, b"12:45 29/01/26\n");
        assert_eq!(events, vec![LineEvent::Line("12:45 29/01/26".to_string())]);
        assert!(assembler.is_empty());
    }

    #[test]
    fn test_carriage_return_is_skipped() {
        let mut assembler = LineAssembler::new(32);
        let events = feed(&mut assembler, b"ab\r\n");
        assert_eq!(events, vec![LineEvent::Line("ab".to_string())]);
    }

    #[test]
    fn test_overflow_reported_and_buffer_reset() {
        let mut assembler = LineAssembler::new(4);
        let events = feed(&mut assembler, b"abcdef");
        assert_eq!(events, vec![LineEvent::Overflow]);
        // The byte that triggered the overflow is discarded with the rest;
        // accumulation restarts with the following byte.
        assert_eq!(assembler.len(), 1);
    }

    #[test]
    fn test_empty_line() {
        let mut assembler = LineAssembler::new(8);
        let events = feed(&mut assembler, b"\n");
        assert_eq!(events, vec![LineEvent::Line(String::new())]);
    }

    #[test]
    fn test_clear_discards_partial_line() {
        let mut assembler = LineAssembler::new(8);
        feed(&mut assembler, b"12:");
        assembler.clear();
        let events = feed(&mut assembler, b"ok\n");
        assert_eq!(events, vec![LineEvent::Line("ok".to_string())]);
    }

    #[test]
    fn test_two_lines_back_to_back() {
        let mut assembler = LineAssembler::new(8);
        let events = feed(&mut assembler, b"a\nb\n");
        assert_eq!(
            events,
            vec![
                LineEvent::Line("a".to_string()),
                LineEvent::Line("b".to_string()),
            ]
        );
    }
}
