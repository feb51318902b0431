use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Credential errors
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid code format: {0}")]
    InvalidCodeFormat(String),

    // Clock update line errors
    #[error("Invalid clock line: {message}")]
    InvalidClockLine { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::InvalidCardFormat("too short".to_string());
        assert_eq!(err.to_string(), "Invalid card format: too short");

        let err = Error::InvalidClockLine {
            message: "expected 14 chars, got 5".to_string(),
        };
        assert!(err.to_string().contains("14 chars"));
    }
}
