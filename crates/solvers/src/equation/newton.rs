//! Newton-Raphson iteration with a forward-difference derivative.
//!
//! Each iteration estimates `f'(x)` as `(f(x + h) - f(x)) / h` and steps to
//! `x - f(x) / f'(x)`. The solve converges when the step length or the
//! magnitude of `f` at the new iterate drops below [`Config::tolerance`].
//!
//! Unlike bisection, Newton can diverge or cycle, so the iteration count is
//! capped by [`Config::max_iters`] and hitting the cap is reported as
//! [`Status::MaxIters`].
//!
//! # Observer Events
//!
//! One [`Event`] is emitted per iteration, after the derivative is estimated
//! and before the step is taken.

mod config;
mod error;
mod event;
mod solution;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use rootline_core::{Function, Observer};

/// Control actions supported by the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the current iterate.
    StopEarly,
}

/// Refines `x0` toward a root of `f` using Newton-Raphson.
///
/// # Errors
///
/// Returns an error if the initial guess is non-finite, an evaluation is not
/// a finite value, the derivative estimate is zero or non-finite, or a step
/// leaves the finite range.
pub fn solve<Obs>(
    f: &impl Function,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: Observer<Event, Action>,
{
    if !x0.is_finite() {
        return Err(Error::NonFiniteIterate { x: x0 });
    }

    let h = config.step();
    let mut x = x0;
    let mut fx = sample(f, x)?;

    for iter in 1..=config.max_iters() {
        let derivative = (sample(f, x + h)? - fx) / h;

        let event = Event {
            iter,
            x,
            value: fx,
            derivative,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, x, fx, iter));
        }

        #[allow(clippy::float_cmp)]
        if derivative == 0.0 {
            return Err(Error::ZeroDerivative { x });
        }
        if !derivative.is_finite() {
            return Err(Error::NonFiniteDerivative { x });
        }

        let next = x - fx / derivative;
        if !next.is_finite() {
            return Err(Error::NonFiniteIterate { x: next });
        }

        let step = (next - x).abs();
        x = next;
        fx = sample(f, x)?;

        if step < config.tolerance() || fx.abs() < config.tolerance() {
            return Ok(Solution::new(Status::Converged, x, fx, iter));
        }
    }

    Ok(Solution::new(Status::MaxIters, x, fx, config.max_iters()))
}

/// Runs Newton-Raphson without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved(f: &impl Function, x0: f64, config: &Config) -> Result<Solution, Error> {
    solve(f, x0, config, ())
}

/// Evaluates `f` at `x`, requiring a finite value.
fn sample(f: &impl Function, x: f64) -> Result<f64, Error> {
    let evaluation = f.evaluate(x);
    evaluation
        .value()
        .ok_or(Error::UnusableSample { x, evaluation })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rootline_core::Evaluation;
    use rootline_expr::Formula;

    fn newton(text: &str, x0: f64) -> Result<Solution, Error> {
        solve_unobserved(&Formula::compile(text), x0, &Config::default())
    }

    #[test]
    fn finds_square_root() {
        let solution = newton("x^2 - 4", 1.995).expect("converges");
        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn converges_from_a_distant_guess() {
        let solution = newton("x^3 - 2*x - 5", 10.0).expect("converges");
        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 2.094_551_481_542_327, epsilon = 1e-4);
        assert!(solution.iters > 1);
    }

    #[test]
    fn flat_function_has_zero_derivative() {
        let result = newton("5", 1.0);
        assert!(matches!(result, Err(Error::ZeroDerivative { .. })));
    }

    #[test]
    fn cycling_sequence_hits_cap() {
        // Newton maps x to -x on sign(x) * sqrt(|x|), so iterates oscillate.
        let cycle = |x: f64| x.signum() * x.abs().sqrt();
        let config = Config::default().with_max_iters(25);
        let solution = solve_unobserved(&cycle, 1.0, &config).expect("stays finite");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 25);
    }

    #[test]
    fn unusable_sample_is_an_error() {
        let result = newton("log(x)", -1.0);
        assert!(matches!(
            result,
            Err(Error::UnusableSample {
                evaluation: Evaluation::Undefined,
                ..
            })
        ));
    }

    #[test]
    fn invalid_formula_is_an_error() {
        let result = newton("x +* 2", 0.0);
        assert!(matches!(
            result,
            Err(Error::UnusableSample {
                evaluation: Evaluation::Invalid,
                ..
            })
        ));
    }

    #[test]
    fn non_finite_guess_is_rejected() {
        assert!(matches!(
            newton("x", f64::NAN),
            Err(Error::NonFiniteIterate { .. })
        ));
    }

    #[test]
    fn observer_sees_each_iteration_and_can_stop() {
        let f = Formula::compile("x^3 - 2*x - 5");
        let mut seen = Vec::new();
        let observer = |event: &Event| {
            seen.push(event.iter);
            (event.iter == 2).then_some(Action::StopEarly)
        };

        let solution = solve(&f, 10.0, &Config::default(), observer).expect("stops cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 2);
        assert_eq!(seen, vec![1, 2]);
    }
}
