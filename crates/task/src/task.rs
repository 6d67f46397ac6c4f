use serde::{Deserialize, Serialize};

/// A unit of work: find a root of `expression` between two points.
///
/// Field names match the task intake JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveTask {
    pub id: i64,

    /// Expression text, optionally an equation containing one `=`.
    pub expression: String,

    /// Where the scan starts.
    pub point_a: f64,

    /// Where the scan ends. May lie below `point_a`.
    pub point_b: f64,

    /// Time budget in seconds, measured from acceptance.
    pub ttl: f64,
}
