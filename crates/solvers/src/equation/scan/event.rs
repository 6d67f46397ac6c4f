use rootline_core::Evaluation;

/// Event emitted by the scan for each sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Sample index, starting at 0 on the first endpoint.
    pub index: usize,

    /// The sampled point.
    pub x: f64,

    /// The function evaluation at `x`.
    pub evaluation: Evaluation,
}
