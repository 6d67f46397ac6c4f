use std::fmt;

use serde::{Deserialize, Serialize};

/// The final result of solving one task.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Both solvers ran within the TTL. Either result may be absent if that
    /// solver failed on its own.
    Completed {
        newton: Option<f64>,
        bisection: Option<f64>,
    },

    /// The scan found no sign change in the interval.
    NoRootInInterval,

    /// The expression could not be parsed.
    InvalidExpression,

    /// The TTL elapsed. Carries whatever results finished; both are absent
    /// when the solve was cut short.
    TtlExceeded {
        newton: Option<f64>,
        bisection: Option<f64>,
    },

    /// An unexpected fault, caught at the controller boundary.
    RuntimeFailure { message: String },
}

impl SolveOutcome {
    /// Returns the status reported for this outcome.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Completed { .. } => Status::Completed,
            Self::NoRootInInterval => Status::NoRootInInterval,
            Self::InvalidExpression => Status::InvalidExpression,
            Self::TtlExceeded { .. } => Status::TtlExceeded,
            Self::RuntimeFailure { .. } => Status::RuntimeFailure,
        }
    }

    /// Returns the `(newton, bisection)` results, absent where not computed.
    #[must_use]
    pub fn results(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Completed { newton, bisection } | Self::TtlExceeded { newton, bisection } => {
                (*newton, *bisection)
            }
            Self::NoRootInInterval | Self::InvalidExpression | Self::RuntimeFailure { .. } => {
                (None, None)
            }
        }
    }
}

/// Task status vocabulary exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Queued,
    Processing,
    Completed,
    NoRootInInterval,
    InvalidExpression,
    TtlExceeded,
    RuntimeFailure,
}

impl Status {
    /// Returns the snake_case name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::NoRootInInterval => "no_root_in_interval",
            Self::InvalidExpression => "invalid_expression",
            Self::TtlExceeded => "ttl_exceeded",
            Self::RuntimeFailure => "runtime_failure",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
