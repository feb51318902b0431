//! Bounded code-entry buffer.

/// Ordered sequence of entered keys, bounded to the configured code length.
///
/// The buffer is cleared on entering code entry, appended to one key per
/// poll, and compared in full only once full; partial contents are never
/// checked against the store.
#[derive(Debug, Clone)]
pub struct CodeBuffer {
    keys: String,
    capacity: usize,
}

impl CodeBuffer {
    /// Create an empty buffer for codes of `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one key if capacity remains; returns `false` when full.
    pub fn push(&mut self, key: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Whether the configured number of keys has been collected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.keys.chars().count() >= self.capacity
    }

    /// Number of keys collected so far.
    pub fn len(&self) -> usize {
        self.keys.chars().count()
    }

    /// Whether no keys have been collected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The collected keys.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.keys
    }

    /// Discard all collected keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
