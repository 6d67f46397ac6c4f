use rootline_core::Evaluation;
use thiserror::Error;

/// Errors that can occur during bisection solving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("midpoint {x} evaluated to {evaluation:?}")]
    UnusableSample { x: f64, evaluation: Evaluation },
}
