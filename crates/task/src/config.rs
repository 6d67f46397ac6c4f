use rootline_solvers::equation::{bisection, newton, scan};
use thiserror::Error;

/// Solver settings applied to every task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    pub(crate) scan: scan::Config,
    pub(crate) bisection: bisection::Config,
    pub(crate) newton: newton::Config,
    pub(crate) preempt: bool,
}

/// Errors that can occur when building a [`SolveConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid scan config: {0}")]
    Scan(#[from] scan::ConfigError),

    #[error("invalid bisection config: {0}")]
    Bisection(#[from] bisection::ConfigError),

    #[error("invalid newton config: {0}")]
    Newton(#[from] newton::ConfigError),
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            scan: scan::Config::default(),
            bisection: bisection::Config::default(),
            newton: newton::Config::default(),
            preempt: false,
        }
    }
}

impl SolveConfig {
    /// Creates a config from the tunable solver parameters.
    ///
    /// The Newton derivative step stays at its default.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is rejected by its solver.
    pub fn new(
        step: f64,
        bisection_tol: f64,
        newton_tol: f64,
        newton_max_iters: usize,
    ) -> Result<Self, ConfigError> {
        let newton_step = newton::Config::default().step();
        Ok(Self {
            scan: scan::Config::new(step)?,
            bisection: bisection::Config::new(bisection_tol)?,
            newton: newton::Config::new(newton_tol, newton_step, newton_max_iters)?,
            preempt: false,
        })
    }

    /// Enables or disables the deadline check inside the solver loops.
    ///
    /// Preemption is off by default, so the TTL is checked only after both
    /// solvers finish and a late result keeps its values.
    #[must_use]
    pub fn with_preemption(self, preempt: bool) -> Self {
        Self { preempt, ..self }
    }

    #[must_use]
    pub fn preempt(&self) -> bool {
        self.preempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matches_default_for_default_values() {
        let config = SolveConfig::new(0.01, 1e-4, 1e-4, 200).expect("valid config");
        assert_eq!(config, SolveConfig::default());
        assert!(!config.preempt());
        assert!(config.with_preemption(true).preempt());
    }

    #[test]
    fn new_reports_which_solver_rejected() {
        assert!(matches!(
            SolveConfig::new(0.0, 1e-4, 1e-4, 200),
            Err(ConfigError::Scan(_))
        ));
        assert!(matches!(
            SolveConfig::new(0.01, -1.0, 1e-4, 200),
            Err(ConfigError::Bisection(_))
        ));
        assert!(matches!(
            SolveConfig::new(0.01, 1e-4, f64::NAN, 200),
            Err(ConfigError::Newton(_))
        ));
    }
}
