//! Solvers for `f(x) = 0` on a single real variable.
//!
//! # Solvers
//!
//! - [`scan`]: steps across an interval to locate a [`Bracket`]
//! - [`bisection`]: guaranteed convergence on a bracket
//! - [`newton`]: fast local convergence from an initial guess
//!
//! Every solver caps its iteration count, so none of them can loop forever
//! when floating-point rounding prevents strict convergence.

mod bracket;

pub mod bisection;
pub mod newton;
pub mod scan;

pub use bracket::{Bracket, BracketError, Sign};
