/// Iteration event emitted by the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Current iterate.
    pub x: f64,

    /// `f(x)` at the current iterate.
    pub value: f64,

    /// Forward-difference estimate of `f'(x)`.
    pub derivative: f64,
}
