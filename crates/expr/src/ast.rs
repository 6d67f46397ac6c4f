use std::fmt;

/// A node in a parsed expression tree.
///
/// The node set is closed: constants, the free variable, unary and binary
/// operators, and calls to a fixed list of named functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Variable,
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Named functions accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm, spelled `log` or `ln`.
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs,
}

impl Expr {
    pub(crate) fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub(crate) fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary(op, operand.boxed())
    }

    pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(op, lhs.boxed(), rhs.boxed())
    }

    pub(crate) fn call(func: Func, arg: Expr) -> Self {
        Self::Call(func, arg.boxed())
    }
}

impl Func {
    /// Looks up a function by the name used in expression text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    /// Returns the canonical name of the function.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

/// Fully parenthesized rendering, re-parseable to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Variable => f.write_str("x"),
            Self::Unary(UnaryOp::Neg, operand) => write!(f, "(-{operand})"),
            Self::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::Call(func, arg) => write!(f, "{}({arg})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_names_round_trip() {
        for func in [Func::Sin, Func::Ln, Func::Log10, Func::Sqrt, Func::Abs] {
            assert_eq!(Func::from_name(func.name()), Some(func));
        }
        assert_eq!(Func::from_name("ln"), Some(Func::Ln));
        assert_eq!(Func::from_name("foo"), None);
    }

    #[test]
    fn display_parenthesizes_nodes() {
        let expr = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Pow, Expr::Variable, Expr::Constant(2.0)),
            Expr::call(Func::Sin, Expr::unary(UnaryOp::Neg, Expr::Variable)),
        );
        assert_eq!(expr.to_string(), "((x ^ 2) - sin((-x)))");
    }
}
