use rootline_core::Evaluation;

use crate::ast::{BinaryOp, Expr, Func, UnaryOp};

/// Arithmetic anomaly raised while evaluating a subtree.
///
/// Ordered so that `Undefined` wins when both operands are anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Anomaly {
    Infinite,
    Undefined,
}

type Eval = Result<f64, Anomaly>;

impl Expr {
    /// Evaluates the tree with the free variable bound to `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> Evaluation {
        match self.value(x) {
            Ok(v) => Evaluation::Value(v),
            Err(Anomaly::Infinite) => Evaluation::Infinite,
            Err(Anomaly::Undefined) => Evaluation::Undefined,
        }
    }

    fn value(&self, x: f64) -> Eval {
        match self {
            Self::Constant(c) => classify(*c),
            Self::Variable => classify(x),
            Self::Unary(UnaryOp::Neg, operand) => operand.value(x).map(|v| -v),
            Self::Binary(op, lhs, rhs) => match (lhs.value(x), rhs.value(x)) {
                (Ok(l), Ok(r)) => binary(*op, l, r),
                (Err(a), Err(b)) => Err(a.max(b)),
                (Err(a), Ok(_)) | (Ok(_), Err(a)) => Err(a),
            },
            Self::Call(func, arg) => call(*func, arg.value(x)?),
        }
    }
}

#[allow(clippy::float_cmp)]
fn binary(op: BinaryOp, l: f64, r: f64) -> Eval {
    match op {
        BinaryOp::Add => classify(l + r),
        BinaryOp::Sub => classify(l - r),
        BinaryOp::Mul => classify(l * r),
        BinaryOp::Div if r == 0.0 => {
            if l == 0.0 {
                Err(Anomaly::Undefined)
            } else {
                Err(Anomaly::Infinite)
            }
        }
        BinaryOp::Div => classify(l / r),
        BinaryOp::Pow if l == 0.0 && r < 0.0 => Err(Anomaly::Infinite),
        BinaryOp::Pow => classify(l.powf(r)),
    }
}

fn call(func: Func, v: f64) -> Eval {
    match func {
        Func::Ln | Func::Log10 | Func::Log2 if v <= 0.0 => Err(Anomaly::Undefined),
        Func::Sqrt if v < 0.0 => Err(Anomaly::Undefined),
        Func::Sin => classify(v.sin()),
        Func::Cos => classify(v.cos()),
        Func::Tan => classify(v.tan()),
        Func::Asin => classify(v.asin()),
        Func::Acos => classify(v.acos()),
        Func::Atan => classify(v.atan()),
        Func::Sinh => classify(v.sinh()),
        Func::Cosh => classify(v.cosh()),
        Func::Tanh => classify(v.tanh()),
        Func::Exp => classify(v.exp()),
        Func::Ln => classify(v.ln()),
        Func::Log10 => classify(v.log10()),
        Func::Log2 => classify(v.log2()),
        Func::Sqrt => classify(v.sqrt()),
        Func::Abs => classify(v.abs()),
    }
}

fn classify(v: f64) -> Eval {
    if v.is_nan() {
        Err(Anomaly::Undefined)
    } else if v.is_infinite() {
        Err(Anomaly::Infinite)
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::parser::parse;

    fn eval(text: &str, x: f64) -> Evaluation {
        parse(text).expect("valid expression").eval(x)
    }

    fn value(text: &str, x: f64) -> f64 {
        eval(text, x)
            .value()
            .unwrap_or_else(|| panic!("{text:?} at {x} should be finite"))
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_relative_eq!(value("x^2 - 4", 3.0), 5.0);
        assert_relative_eq!(value("-x^2", 3.0), -9.0);
        assert_relative_eq!(value("2^3^2", 0.0), 512.0);
        assert_relative_eq!(value("(x + 1) * (x - 1) / 2", 3.0), 4.0);
    }

    #[test]
    fn evaluates_transcendentals() {
        assert_relative_eq!(value("sin(pi / 2)", 0.0), 1.0);
        assert_relative_eq!(value("exp(x) - e", 1.0), 0.0, epsilon = 1e-15);
        assert_relative_eq!(value("log(e^x)", 2.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(value("log10(x)", 1000.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(value("sqrt(abs(x))", -16.0), 4.0);
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(eval("1 / x", 0.0), Evaluation::Infinite);
        assert_eq!(eval("x^-1", 0.0), Evaluation::Infinite);
        assert_eq!(eval("exp(x)", 1000.0), Evaluation::Infinite);
    }

    #[test]
    fn indeterminate_forms_are_undefined() {
        assert_eq!(eval("x / x", 0.0), Evaluation::Undefined);
        assert_eq!(eval("log(x)", 0.0), Evaluation::Undefined);
        assert_eq!(eval("ln(x)", -1.0), Evaluation::Undefined);
        assert_eq!(eval("sqrt(x)", -4.0), Evaluation::Undefined);
        assert_eq!(eval("asin(x)", 2.0), Evaluation::Undefined);
        assert_eq!(eval("x^0.5", -1.0), Evaluation::Undefined);
    }

    #[test]
    fn anomalies_propagate_with_undefined_dominating() {
        assert_eq!(eval("1 / x + 1", 0.0), Evaluation::Infinite);
        assert_eq!(eval("sin(1 / x)", 0.0), Evaluation::Infinite);
        assert_eq!(eval("1 / x + log(x)", 0.0), Evaluation::Undefined);
        assert_eq!(eval("log(x) * (1 / x)", 0.0), Evaluation::Undefined);
    }
}
