use crate::Evaluation;

/// A real function of one variable.
///
/// Evaluation never fails in the `Result` sense: every anomaly, including a
/// malformed definition, is reported through [`Evaluation`].
///
/// Closures `Fn(f64) -> f64` implement `Function` directly, with their raw
/// output classified by [`Evaluation::from_f64`].
pub trait Function {
    /// Evaluates the function at `x`.
    fn evaluate(&self, x: f64) -> Evaluation;
}

impl<F> Function for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Evaluation {
        Evaluation::from_f64(self(x))
    }
}
