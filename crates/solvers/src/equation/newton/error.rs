use rootline_core::Evaluation;
use thiserror::Error;

/// Errors that can occur during Newton iteration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("derivative estimate is zero at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("derivative estimate is non-finite at x = {x}")]
    NonFiniteDerivative { x: f64 },

    #[error("iterate left the finite range: {x}")]
    NonFiniteIterate { x: f64 },

    #[error("f({x}) evaluated to {evaluation:?}")]
    UnusableSample { x: f64, evaluation: Evaluation },
}
