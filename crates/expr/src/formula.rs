use rootline_core::{Evaluation, Function};

use crate::{ast::Expr, error::ParseError, parser};

/// A successfully parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Expr,
}

impl Expression {
    /// Parses expression text over the free variable `x`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed expression.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text).map(|root| Self { root })
    }

    /// Returns the root of the parsed tree.
    #[must_use]
    pub fn root(&self) -> &Expr {
        &self.root
    }
}

impl Function for Expression {
    fn evaluate(&self, x: f64) -> Evaluation {
        self.root.eval(x)
    }
}

/// Expression text compiled once, valid or not.
///
/// A formula whose text fails to parse keeps the failure and evaluates to
/// [`Evaluation::Invalid`] at every point, so callers never re-parse.
#[derive(Debug, Clone)]
pub struct Formula {
    source: String,
    compiled: Result<Expression, ParseError>,
}

impl Formula {
    /// Parses `source` and caches the result.
    pub fn compile(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Expression::parse(&source);
        Self { source, compiled }
    }

    /// Returns the text the formula was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed expression, if parsing succeeded.
    #[must_use]
    pub fn expression(&self) -> Option<&Expression> {
        self.compiled.as_ref().ok()
    }

    /// Returns the parse failure, if parsing failed.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        self.compiled.as_ref().err()
    }
}

impl Function for Formula {
    fn evaluate(&self, x: f64) -> Evaluation {
        match &self.compiled {
            Ok(expression) => expression.evaluate(x),
            Err(_) => Evaluation::Invalid,
        }
    }
}

/// Parses `text` and evaluates it at `x` in one step.
///
/// Prefer [`Formula`] when evaluating the same text repeatedly.
#[must_use]
pub fn evaluate(text: &str, x: f64) -> Evaluation {
    match Expression::parse(text) {
        Ok(expression) => expression.evaluate(x),
        Err(_) => Evaluation::Invalid,
    }
}
