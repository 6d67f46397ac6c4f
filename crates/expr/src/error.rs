use thiserror::Error;

/// Error returned when expression text cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid expression: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the parser's description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
