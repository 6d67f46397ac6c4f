use thiserror::Error;

/// Configuration for the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    step: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("derivative step must be finite and positive")]
    Step,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            step: 1e-5,
            max_iters: 200,
        }
    }
}

impl Config {
    /// Creates a config with validated tolerance and derivative step.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite and strictly positive.
    pub fn new(tolerance: f64, step: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step);
        }
        Ok(Self {
            tolerance,
            step,
            max_iters,
        })
    }

    /// Replaces the iteration cap.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns the step length and residual magnitude accepted as converged.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the forward-difference step `h`.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}
