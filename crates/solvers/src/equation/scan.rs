//! Bracket search by fixed-step scanning.
//!
//! The scan walks from the first interval endpoint toward the second in
//! increments of [`Config::step`], evaluating the function at each sample and
//! stopping at the first pair of consecutive samples whose values straddle
//! zero. Reversed intervals are scanned downward; the reported [`Bracket`] is
//! always ordered.
//!
//! # Sign policy
//!
//! Only finite values count as sign evidence. `Infinite` and `Undefined`
//! samples are skipped, and the last finite sample is carried across them, so
//! a gap of anomalies between two opposite-signed values still yields a
//! bracket. An `Invalid` sample ends the scan with
//! [`Outcome::InvalidExpression`].
//!
//! # Observer Events
//!
//! One [`Event`] is emitted per sample, before the sample is interpreted.
//! Returning [`Action::StopEarly`] ends the scan with
//! [`Outcome::StoppedByObserver`].

mod config;
mod error;
mod event;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;

use rootline_core::{Evaluation, Function, Observer};

use super::{Bracket, Sign};

/// Control actions supported by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop scanning immediately.
    StopEarly,
}

/// The result of a bracket scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Consecutive samples straddle zero.
    Found(Bracket),

    /// The interval was exhausted without a sign change.
    NotFound,

    /// The function could not be parsed.
    InvalidExpression,

    /// An observer stopped the scan.
    StoppedByObserver,
}

/// Scans `interval` for a sub-interval that brackets a root of `f`.
///
/// The scan never evaluates beyond the second endpoint; the final sample is
/// placed exactly on it.
///
/// # Errors
///
/// Returns [`Error::NonFiniteInterval`] if either endpoint is non-finite.
pub fn find_bracket<Obs>(
    f: &impl Function,
    interval: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Outcome, Error>
where
    Obs: Observer<Event, Action>,
{
    let [start, end] = interval;
    if !start.is_finite() || !end.is_finite() {
        return Err(Error::NonFiniteInterval { start, end });
    }

    let span = end - start;
    let direction = if span < 0.0 { -1.0 } else { 1.0 };
    let last = sample_count(span.abs(), config.step());

    let mut previous: Option<(f64, f64)> = None;

    for index in 0..=last {
        let x = if index == last {
            end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let offset = config.step() * index as f64;
            start + direction * offset
        };

        let evaluation = f.evaluate(x);

        let event = Event {
            index,
            x,
            evaluation,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Outcome::StoppedByObserver);
        }

        let value = match evaluation {
            Evaluation::Value(value) => value,
            Evaluation::Infinite | Evaluation::Undefined => continue,
            Evaluation::Invalid => return Ok(Outcome::InvalidExpression),
        };

        if let Some((prev_x, prev_value)) = previous
            && Sign::of(prev_value).straddles(Sign::of(value))
        {
            let bracket = Bracket::new([prev_x, x], [prev_value, value])?;
            return Ok(Outcome::Found(bracket));
        }

        previous = Some((x, value));
    }

    Ok(Outcome::NotFound)
}

/// Runs the scan without observation.
///
/// # Errors
///
/// Returns [`Error::NonFiniteInterval`] if either endpoint is non-finite.
pub fn find_bracket_unobserved(
    f: &impl Function,
    interval: [f64; 2],
    config: &Config,
) -> Result<Outcome, Error> {
    find_bracket(f, interval, config, ())
}

/// Index of the sample placed on the far endpoint.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_count(width: f64, step: f64) -> usize {
    // Saturates for intervals too wide to enumerate; an observer bounds those.
    (width / step).ceil() as usize
}
