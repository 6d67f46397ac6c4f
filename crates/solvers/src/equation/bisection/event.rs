use rootline_core::Evaluation;

/// Iteration event emitted by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Search bracket before this iteration shrinks it.
    pub bracket: [f64; 2],

    /// The midpoint that was evaluated.
    pub x: f64,

    /// Evaluation at the midpoint.
    pub evaluation: Evaluation,
}
