/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Best estimate of the root.
    pub x: f64,

    /// Width of the bracket that `x` is the midpoint of.
    pub width: f64,

    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl Solution {
    pub(super) fn new(status: Status, x: f64, width: f64, iters: usize) -> Self {
        Self {
            status,
            x,
            width,
            iters,
        }
    }

    /// A root found exactly on a bracket endpoint.
    pub(super) fn exact(x: f64) -> Self {
        Self::new(Status::Converged, x, 0.0, 0)
    }
}
