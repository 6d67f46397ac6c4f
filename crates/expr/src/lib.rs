//! Expressions over a single free variable `x`.
//!
//! Text is parsed once into a typed [`Expr`] tree, then evaluated at any
//! number of points. Evaluation never panics or returns an error: division by
//! zero, indeterminate forms, and parse failures are all reported through
//! [`Evaluation`].
//!
//! ```
//! use rootline_core::{Evaluation, Function};
//! use rootline_expr::{Formula, normalize};
//!
//! let formula = Formula::compile(normalize("x^2 = 4"));
//! assert_eq!(formula.evaluate(2.0), Evaluation::Value(0.0));
//! assert_eq!(Formula::compile("x +* 2").evaluate(1.0), Evaluation::Invalid);
//! ```

mod ast;
mod error;
mod eval;
mod formula;
mod normalize;
mod parser;

pub use ast::{BinaryOp, Expr, Func, UnaryOp};
pub use error::ParseError;
pub use formula::{Expression, Formula, evaluate};
pub use normalize::normalize;

pub use rootline_core::Evaluation;
