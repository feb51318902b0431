use crate::{
    Result,
    constants::{CLOCK_LINE_LEN, CODE_LENGTH, DEFAULT_DATE, DEFAULT_TIME, KEY_ALPHABET},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Minimum card identifier length in hex characters (2 bytes).
pub const MIN_CARD_HEX_LENGTH: usize = 4;

/// Maximum card identifier length in hex characters (10 bytes).
pub const MAX_CARD_HEX_LENGTH: usize = 20;

/// Proximity-card identifier in canonical uppercase-hex form.
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when comparing identifiers during authentication.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Create a card identifier from a hex string.
    ///
    /// The input is normalized (trimmed and converted to uppercase) before
    /// validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCardFormat` if:
    /// - The length is not between 4 and 20 hex characters
    /// - Any character is not a hex digit
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim().to_uppercase();

        let len = id.len();
        if !(MIN_CARD_HEX_LENGTH..=MAX_CARD_HEX_LENGTH).contains(&len) {
            return Err(Error::InvalidCardFormat(format!(
                "Card id must be {MIN_CARD_HEX_LENGTH}-{MAX_CARD_HEX_LENGTH} hex chars, got {len}"
            )));
        }

        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidCardFormat(format!(
                "Card id must be hex, got '{id}'"
            )));
        }

        Ok(CardId(id))
    }

    /// Create a card identifier from the raw bytes a reader yields.
    ///
    /// Each byte is rendered as two uppercase hex characters; this is the
    /// canonical form the credential store compares against.
    ///
    /// # Errors
    /// Returns `Error::InvalidCardFormat` if the byte count is not between
    /// 2 and 10.
    ///
    /// # Examples
    ///
    /// ```
    /// use latchkey_core::CardId;
    ///
    /// let id = CardId::from_bytes(&[0xF1, 0x06, 0x1B, 0x06]).unwrap();
    /// assert_eq!(id.as_str(), "F1061B06");
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Self::new(&hex)
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CardId::new(s)
    }
}

/// Constant-time comparison implementation for CardId.
impl PartialEq for CardId {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl std::hash::Hash for CardId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Numeric access code of exactly [`CODE_LENGTH`] keys.
///
/// # Security
/// Like [`CardId`], comparison is constant-time.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct AccessCode(String);

impl AccessCode {
    /// Create an access code with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeFormat` if:
    /// - The length is not exactly [`CODE_LENGTH`]
    /// - Any character is outside the configured key alphabet
    pub fn new(code: &str) -> Result<Self> {
        if code.len() != CODE_LENGTH {
            return Err(Error::InvalidCodeFormat(format!(
                "Code must be exactly {CODE_LENGTH} keys, got {}",
                code.len()
            )));
        }

        if let Some(c) = code.chars().find(|c| !KEY_ALPHABET.contains(c)) {
            return Err(Error::InvalidCodeFormat(format!(
                "Key '{c}' is not in the keypad alphabet"
            )));
        }

        Ok(AccessCode(code.to_string()))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccessCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AccessCode::new(s)
    }
}

/// Constant-time comparison implementation for AccessCode.
impl PartialEq for AccessCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl std::hash::Hash for AccessCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// The time/date pair shown on the idle display.
///
/// Mutated only by a successful clock update parse; the renderer reads it
/// every idle iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockStamp {
    /// Displayed time, always `"HH:MM"`.
    time: String,

    /// Displayed date, always `"DD/MM/YY"`.
    date: String,
}

impl ClockStamp {
    /// Parse a host clock line in the exact format `"HH:MM DD/MM/YY"`.
    ///
    /// The contract is positional: exactly 14 ASCII characters, `:` at
    /// offset 2, a single space at offset 5, `/` at offsets 8 and 11,
    /// digits everywhere else. Digit *values* are not range-checked; the
    /// line layout is the whole contract.
    ///
    /// # Errors
    /// Returns `Error::InvalidClockLine` describing the first violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use latchkey_core::ClockStamp;
    ///
    /// let stamp = ClockStamp::parse("12:45 29/01/26").unwrap();
    /// assert_eq!(stamp.time(), "12:45");
    /// assert_eq!(stamp.date(), "29/01/26");
    ///
    /// assert!(ClockStamp::parse("12:45  29/01/2").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let bytes = line.as_bytes();
        if bytes.len() != CLOCK_LINE_LEN {
            return Err(Error::InvalidClockLine {
                message: format!("expected {CLOCK_LINE_LEN} chars, got {}", bytes.len()),
            });
        }

        for (i, &b) in bytes.iter().enumerate() {
            let ok = match i {
                2 => b == b':',
                5 => b == b' ',
                8 | 11 => b == b'/',
                _ => b.is_ascii_digit(),
            };
            if !ok {
                return Err(Error::InvalidClockLine {
                    message: format!("unexpected character '{}' at offset {i}", bytes[i] as char),
                });
            }
        }

        Ok(ClockStamp {
            time: line[0..5].to_string(),
            date: line[6..14].to_string(),
        })
    }

    /// Build a stamp from the current local wall clock.
    #[must_use]
    pub fn now() -> Self {
        let now = chrono::Local::now();
        ClockStamp {
            time: now.format("%H:%M").to_string(),
            date: now.format("%d/%m/%y").to_string(),
        }
    }

    /// Displayed time (`"HH:MM"`).
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Displayed date (`"DD/MM/YY"`).
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }
}

impl Default for ClockStamp {
    fn default() -> Self {
        ClockStamp {
            time: DEFAULT_TIME.to_string(),
            date: DEFAULT_DATE.to_string(),
        }
    }
}

impl fmt::Display for ClockStamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.time, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("F1061B06", "F1061B06")]
    #[case("f1061b06", "F1061B06")] // normalized to uppercase
    #[case("  04a1b2c3  ", "04A1B2C3")] // trimmed
    #[case("ABCD", "ABCD")] // minimum length
    fn test_card_id_valid(#[case] input: &str, #[case] expected: &str) {
        let id = CardId::new(input).unwrap();
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("AB")] // too short
    #[case("0123456789012345678901")] // too long
    #[case("F106XX06")] // non-hex
    fn test_card_id_invalid(#[case] input: &str) {
        assert!(CardId::new(input).is_err());
    }

    #[test]
    fn test_card_id_from_bytes() {
        let id = CardId::from_bytes(&[0xF1, 0x06, 0x1B, 0x06]).unwrap();
        assert_eq!(id.as_str(), "F1061B06");

        // Single byte is below the minimum identifier size
        assert!(CardId::from_bytes(&[0xF1]).is_err());
    }

    #[test]
    fn test_card_id_equality_ignores_source_case() {
        let a = CardId::new("f1061b06").unwrap();
        let b = CardId::new("F1061B06").unwrap();
        assert_eq!(a, b);
    }

    #[rstest]
    #[case("12")]
    #[case("73")]
    #[case("99")]
    fn test_access_code_valid(#[case] input: &str) {
        let code = AccessCode::new(input).unwrap();
        assert_eq!(code.as_str(), input);
    }

    #[rstest]
    #[case("1")] // too short
    #[case("123")] // too long
    #[case("1a")] // not in alphabet
    #[case("10")] // '0' is not on the reduced keypad
    fn test_access_code_invalid(#[case] input: &str) {
        assert!(AccessCode::new(input).is_err());
    }

    #[test]
    fn test_clock_stamp_parse_valid() {
        let stamp = ClockStamp::parse("12:45 29/01/26").unwrap();
        assert_eq!(stamp.time(), "12:45");
        assert_eq!(stamp.date(), "29/01/26");
        assert_eq!(stamp.to_string(), "12:45 29/01/26");
    }

    #[rstest]
    #[case("12:45 29/01/2")] // too short
    #[case("12:45 29/01/260")] // too long
    #[case("12:45-29/01/26")] // wrong separator at offset 5
    #[case("1245  29/01/26")] // ':' missing
    #[case("12:45 29-01-26")] // wrong date separators
    #[case("ab:45 29/01/26")] // non-digit
    #[case("")]
    fn test_clock_stamp_parse_invalid(#[case] input: &str) {
        assert!(ClockStamp::parse(input).is_err());
    }

    #[test]
    fn test_clock_stamp_layout_only_contract() {
        // Out-of-range values still parse; only the layout is checked.
        assert!(ClockStamp::parse("29:99 99/99/99").is_ok());
    }

    #[test]
    fn test_clock_stamp_now_matches_line_layout() {
        // The wall-clock stamp renders in the exact host-line format, so
        // it round-trips through the strict parser.
        let now = ClockStamp::now();
        let parsed = ClockStamp::parse(&now.to_string()).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_clock_stamp_default() {
        let stamp = ClockStamp::default();
        assert_eq!(stamp.time(), "00:00");
        assert_eq!(stamp.date(), "01/01/26");
    }

    #[test]
    fn test_clock_stamp_serialization() {
        let stamp = ClockStamp::parse("12:45 29/01/26").unwrap();
        let json = serde_json::to_string(&stamp).unwrap();
        assert!(json.contains("\"12:45\""));

        let back: ClockStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamp);
    }
}
