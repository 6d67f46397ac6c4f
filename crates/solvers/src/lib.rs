//! Numerical root-finding solvers for Rootline.
//!
//! All solvers work on any [`Function`] and report progress to an
//! [`Observer`], which may stop the iteration early. See [`equation`].
//!
//! [`Function`]: rootline_core::Function
//! [`Observer`]: rootline_core::Observer

pub mod equation;
