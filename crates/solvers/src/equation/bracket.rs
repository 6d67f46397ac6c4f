use thiserror::Error;

/// Errors that can occur when creating a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// One or both endpoints or values are non-finite.
    #[error("non-finite endpoint or value")]
    NonFinite,

    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,

    /// Values do not change sign and neither is zero.
    #[error("no sign change")]
    NoSignChange,
}

/// An interval whose endpoint values straddle zero.
///
/// Either the signs at `left` and `right` differ, or one endpoint value is
/// exactly zero. Endpoints are always ordered with `left < right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
    right_sign: Sign,
}

impl Bracket {
    /// Creates a bracket from two points and the function values there.
    ///
    /// Points may be given in either order; values travel with their points.
    ///
    /// # Errors
    ///
    /// Returns a [`BracketError`] if any input is non-finite, the points are
    /// equal, or the values do not straddle zero.
    pub fn new(points: [f64; 2], values: [f64; 2]) -> Result<Self, BracketError> {
        if points.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(BracketError::NonFinite);
        }

        let ([left, right], [left_value, right_value]) = if points[0] <= points[1] {
            (points, values)
        } else {
            ([points[1], points[0]], [values[1], values[0]])
        };

        #[allow(clippy::float_cmp)]
        if left == right {
            return Err(BracketError::ZeroWidth);
        }

        let left_sign = Sign::of(left_value);
        let right_sign = Sign::of(right_value);
        if !left_sign.straddles(right_sign) {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left,
            right,
            left_sign,
            right_sign,
        })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Returns the sign of the function value at `left`.
    #[must_use]
    pub fn left_sign(&self) -> Sign {
        self.left_sign
    }

    /// Returns the sign of the function value at `right`.
    #[must_use]
    pub fn right_sign(&self) -> Sign {
        self.right_sign
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// The sign of a function value for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Returns the sign of a finite value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Returns true if a root lies between values of sign `self` and `other`.
    #[must_use]
    pub fn straddles(self, other: Sign) -> bool {
        self == Sign::Zero || other == Sign::Zero || self != other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn new_orders_points_with_their_values() {
        let bracket = Bracket::new([3.0, 1.0], [5.0, -1.0]).expect("valid bracket");
        assert_relative_eq!(bracket.left(), 1.0);
        assert_relative_eq!(bracket.right(), 3.0);
        assert_eq!(bracket.left_sign(), Sign::Negative);
        assert_eq!(bracket.right_sign(), Sign::Positive);
        assert_relative_eq!(bracket.midpoint(), 2.0);
        assert_relative_eq!(bracket.width(), 2.0);
        assert_eq!(bracket.as_array(), [1.0, 3.0]);
    }

    #[test]
    fn new_rejects_non_finite() {
        assert_eq!(
            Bracket::new([f64::NAN, 1.0], [-1.0, 1.0]),
            Err(BracketError::NonFinite)
        );
        assert_eq!(
            Bracket::new([0.0, 1.0], [-1.0, f64::INFINITY]),
            Err(BracketError::NonFinite)
        );
    }

    #[test]
    fn new_rejects_zero_width() {
        assert_eq!(
            Bracket::new([2.0, 2.0], [-1.0, 1.0]),
            Err(BracketError::ZeroWidth)
        );
    }

    #[test]
    fn new_rejects_no_sign_change() {
        assert_eq!(
            Bracket::new([0.0, 1.0], [2.0, 3.0]),
            Err(BracketError::NoSignChange)
        );
    }

    #[test]
    fn zero_endpoint_is_a_bracket() {
        let bracket = Bracket::new([1.99, 2.0], [-0.0399, 0.0]).expect("zero endpoint");
        assert_eq!(bracket.right_sign(), Sign::Zero);
    }

    #[test]
    fn sign_of_values() {
        assert_eq!(Sign::of(2.0), Sign::Positive);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert!(Sign::Negative.straddles(Sign::Positive));
        assert!(Sign::Zero.straddles(Sign::Zero));
        assert!(!Sign::Positive.straddles(Sign::Positive));
    }
}
