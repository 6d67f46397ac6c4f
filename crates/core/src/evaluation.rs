/// The outcome of evaluating a function at a single point.
///
/// `Invalid` only arises when the function text cannot be parsed, never from
/// arithmetic. `Infinite` and `Undefined` only arise from arithmetic on an
/// already valid function and are ordinary values, not faults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// A finite real value.
    Value(f64),

    /// Division by zero or overflow. The sign is not tracked.
    Infinite,

    /// An indeterminate form such as `0/0` or `log(-1)`.
    Undefined,

    /// The function text could not be parsed.
    Invalid,
}

impl Evaluation {
    /// Classifies a raw float: NaN is `Undefined`, ±inf is `Infinite`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self::Undefined
        } else if value.is_infinite() {
            Self::Infinite
        } else {
            Self::Value(value)
        }
    }

    /// Returns the finite value, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Infinite | Self::Undefined | Self::Invalid => None,
        }
    }

    /// Returns true if this is a parse failure.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl From<f64> for Evaluation {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}
