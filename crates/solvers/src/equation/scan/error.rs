use thiserror::Error;

use crate::equation::BracketError;

/// Errors that can occur during a bracket scan.
#[derive(Debug, Error)]
pub enum Error {
    #[error("interval contains a non-finite endpoint: [{start}, {end}]")]
    NonFiniteInterval { start: f64, end: f64 },

    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),
}
