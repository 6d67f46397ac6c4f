use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{SolveOutcome, Status};

/// The persisted state of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    pub status: Status,

    /// Failure detail for `RuntimeFailure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Only set when the status is `Completed`.
    pub completed_at: Option<Timestamp>,

    pub newton_result: Option<f64>,
    pub bisection_result: Option<f64>,
}

impl TaskRecord {
    /// A record marking `id` as taken by a worker.
    #[must_use]
    pub fn processing(id: i64) -> Self {
        Self {
            id,
            status: Status::Processing,
            message: None,
            completed_at: None,
            newton_result: None,
            bisection_result: None,
        }
    }

    /// The terminal record for `outcome`, with results rounded to 3 decimals.
    #[must_use]
    pub fn from_outcome(id: i64, outcome: &SolveOutcome, finished_at: Timestamp) -> Self {
        let status = outcome.status();
        let (newton, bisection) = outcome.results();
        let message = match outcome {
            SolveOutcome::RuntimeFailure { message } => Some(message.clone()),
            _ => None,
        };

        Self {
            id,
            status,
            message,
            completed_at: (status == Status::Completed).then_some(finished_at),
            newton_result: newton.map(round3),
            bisection_result: bisection.map(round3),
        }
    }
}

#[allow(clippy::float_cmp)]
fn round3(value: f64) -> f64 {
    let scaled = (value * 1e3).round();
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled / 1e3;
    // Collapse -0.0 so tiny negative roots report as 0.
    if rounded == 0.0 { 0.0 } else { rounded }
}
