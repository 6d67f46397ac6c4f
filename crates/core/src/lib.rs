//! Core traits and types for Rootline.
//!
//! This crate defines the shared abstractions that the expression evaluator,
//! the solvers, and the task controller build on:
//!
//! - [`Function`]: a real function of one variable
//! - [`Evaluation`]: the tagged outcome of evaluating a [`Function`] at a point
//! - [`Observer`]: receives solver events and optionally returns control actions

mod evaluation;
mod function;
mod observer;

pub use evaluation::Evaluation;
pub use function::Function;
pub use observer::Observer;
