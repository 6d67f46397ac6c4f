use thiserror::Error;

/// Configuration for the bracket scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step: f64,
}

/// Errors that can occur when validating a scan config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be finite and positive")]
    Step,
}

impl Default for Config {
    fn default() -> Self {
        Self { step: 0.01 }
    }
}

impl Config {
    /// Creates a config with a validated step.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and strictly positive.
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step);
        }
        Ok(Self { step })
    }

    /// Returns the absolute distance between consecutive samples.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}
