use thiserror::Error;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: Option<usize>,
}

/// Errors that can occur when validating a bisection solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iters: None,
        }
    }
}

impl Config {
    /// Creates a config with a validated tolerance and a derived iteration cap.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not finite and strictly positive.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        Ok(Self {
            tolerance,
            max_iters: None,
        })
    }

    /// Replaces the derived iteration cap with a fixed one.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self {
            max_iters: Some(max_iters),
            ..self
        }
    }

    /// Returns the half-width below which the midpoint is accepted.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the fixed iteration cap, if one was set.
    #[must_use]
    pub fn max_iters(&self) -> Option<usize> {
        self.max_iters
    }
}
