//! Bisection on a bracketed interval.
//!
//! Each iteration evaluates the midpoint and keeps the half whose endpoint
//! values still straddle zero. The solve converges when half the bracket
//! width drops below [`Config::tolerance`], returning the midpoint.
//!
//! The iteration count is capped. Unless [`Config::with_max_iters`] sets the
//! cap, it is derived from the bracket width and tolerance as
//! `ceil(log2(width / tolerance)) + 4`, which leaves room for the last few
//! halvings to be lost to rounding. The solve also ends early if the midpoint
//! can no longer be distinguished from an endpoint.
//!
//! # Observer Events
//!
//! One [`Event`] is emitted per midpoint evaluation. Returning
//! [`Action::StopEarly`] ends the solve with [`Status::StoppedByObserver`].

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use rootline_core::{Function, Observer};

use super::{Bracket, Sign};

/// Extra iterations allowed beyond the ideal halving count.
const ITER_SLACK: usize = 4;

/// Halvings needed to shrink the widest finite interval to the smallest
/// subnormal spacing.
const MAX_DERIVED_ITERS: usize = 2_100;

/// Finds a root of `f` inside `bracket` using bisection.
///
/// An endpoint whose value is exactly zero is returned immediately.
///
/// # Errors
///
/// Returns [`Error::UnusableSample`] if a midpoint evaluates to anything other
/// than a finite value.
pub fn solve<Obs>(
    f: &impl Function,
    bracket: &Bracket,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: Observer<Event, Action>,
{
    if bracket.left_sign() == Sign::Zero {
        return Ok(Solution::exact(bracket.left()));
    }
    if bracket.right_sign() == Sign::Zero {
        return Ok(Solution::exact(bracket.right()));
    }

    let max_iters = config
        .max_iters()
        .unwrap_or_else(|| derived_max_iters(bracket.width(), config.tolerance()));

    let mut left = bracket.left();
    let mut right = bracket.right();
    let left_sign = bracket.left_sign();

    for iter in 1..=max_iters {
        let mid = 0.5 * (left + right);
        if 0.5 * (right - left) < config.tolerance() {
            return Ok(Solution::new(Status::Converged, mid, right - left, iter - 1));
        }
        if mid <= left || mid >= right {
            return Ok(Solution::new(Status::MaxIters, mid, right - left, iter - 1));
        }

        let evaluation = f.evaluate(mid);

        let event = Event {
            iter,
            bracket: [left, right],
            x: mid,
            evaluation,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(
                Status::StoppedByObserver,
                mid,
                right - left,
                iter,
            ));
        }

        let value = evaluation
            .value()
            .ok_or(Error::UnusableSample { x: mid, evaluation })?;

        match Sign::of(value) {
            Sign::Zero => return Ok(Solution::new(Status::Converged, mid, 0.0, iter)),
            sign if sign == left_sign => left = mid,
            _ => right = mid,
        }
    }

    let mid = 0.5 * (left + right);
    let status = if 0.5 * (right - left) < config.tolerance() {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(Solution::new(status, mid, right - left, max_iters))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// Returns [`Error::UnusableSample`] if a midpoint evaluates to anything other
/// than a finite value.
pub fn solve_unobserved(
    f: &impl Function,
    bracket: &Bracket,
    config: &Config,
) -> Result<Solution, Error> {
    solve(f, bracket, config, ())
}

/// Iteration cap implied by the bracket width and tolerance.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn derived_max_iters(width: f64, tolerance: f64) -> usize {
    let halvings = (width / tolerance).log2().ceil();
    if halvings.is_nan() || halvings <= 0.0 {
        ITER_SLACK
    } else {
        (halvings as usize).min(MAX_DERIVED_ITERS) + ITER_SLACK
    }
}
