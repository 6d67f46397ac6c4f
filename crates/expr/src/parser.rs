use std::f64::consts::{E, PI};

use nom::{
    Finish, IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric0, char, multispace0},
    combinator::{all_consuming, map, map_opt, map_res, not, recognize},
    error::VerboseError,
    multi::fold_many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};

use crate::{
    ast::{BinaryOp, Expr, Func, UnaryOp},
    error::ParseError,
};

/// Upper bound on parser recursion: parentheses plus sign and power chains.
const MAX_NESTING: usize = 512;

/// Upper bound on operators and calls, which bounds the depth of the tree.
const MAX_OPERATORS: usize = 4_096;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parses expression text into a tree.
///
/// Grammar, loosest binding first:
///
/// ```text
/// sum     = product (("+" | "-") product)*
/// product = unary (("*" | "/") unary)*
/// unary   = ("-" | "+") unary | power
/// power   = primary (("^" | "**") unary)?
/// primary = "(" sum ")" | number | name "(" sum ")" | "x" | "pi" | "e"
/// ```
pub(crate) fn parse(input: &str) -> Result<Expr, ParseError> {
    let shape = Shape::of(input);
    if shape.depth > MAX_NESTING {
        return Err(ParseError::new(format!(
            "expression nests deeper than {MAX_NESTING} levels"
        )));
    }
    if shape.operators > MAX_OPERATORS {
        return Err(ParseError::new(format!(
            "expression has more than {MAX_OPERATORS} operators"
        )));
    }

    match all_consuming(ws(sum))(input).finish() {
        Ok((_, expr)) => Ok(expr),
        Err(e) => {
            let rest = e.errors.first().map_or("", |(rest, _)| *rest);
            let offset = input.len() - rest.len();
            let message = if rest.trim().is_empty() {
                format!("unexpected end of input at offset {offset}")
            } else {
                format!("unexpected `{}` at offset {offset}", rest.trim_end())
            };
            Err(ParseError::new(message))
        }
    }
}

fn sum(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = product(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), product),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::binary(BinaryOp::Add, acc, rhs),
            _ => Expr::binary(BinaryOp::Sub, acc, rhs),
        },
    )(rest)
}

fn product(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = unary(input)?;
    fold_many0(
        pair(
            ws(alt((terminated(char('*'), not(char('*'))), char('/')))),
            unary,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::binary(BinaryOp::Mul, acc, rhs),
            _ => Expr::binary(BinaryOp::Div, acc, rhs),
        },
    )(rest)
}

fn unary(input: &str) -> PResult<'_, Expr> {
    alt((
        map(preceded(ws(char('-')), unary), |e| {
            Expr::unary(UnaryOp::Neg, e)
        }),
        preceded(ws(char('+')), unary),
        power,
    ))(input)
}

fn power(input: &str) -> PResult<'_, Expr> {
    let (rest, base) = primary(input)?;
    match preceded(ws(alt((tag("**"), tag("^")))), unary)(rest) {
        Ok((next, exponent)) => Ok((next, Expr::binary(BinaryOp::Pow, base, exponent))),
        Err(nom::Err::Error(_)) => Ok((rest, base)),
        Err(e) => Err(e),
    }
}

fn primary(input: &str) -> PResult<'_, Expr> {
    alt((parens, number, call, atom))(input)
}

fn parens(input: &str) -> PResult<'_, Expr> {
    delimited(ws(char('(')), sum, ws(char(')')))(input)
}

fn number(input: &str) -> PResult<'_, Expr> {
    map_res(ws(recognize_float), |s: &str| {
        s.parse::<f64>().map(Expr::Constant)
    })(input)
}

fn call(input: &str) -> PResult<'_, Expr> {
    map_opt(pair(ws(identifier), parens), |(name, arg)| {
        Func::from_name(name).map(|func| Expr::call(func, arg))
    })(input)
}

fn atom(input: &str) -> PResult<'_, Expr> {
    map_opt(ws(identifier), |name| match name {
        "x" => Some(Expr::Variable),
        "pi" => Some(Expr::Constant(PI)),
        "e" => Some(Expr::Constant(E)),
        _ => None,
    })(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(alpha1, alphanumeric0))(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Nesting depth and operator count, measured by a token scan ahead of parsing.
///
/// Binary `+ - * /` between terms do not deepen the parser, but they do add a
/// level to the left-leaning tree, so they count as operators only. Signs and
/// powers chain recursively until the next binary operator or `)`.
#[derive(Debug, Default, PartialEq, Eq)]
struct Shape {
    depth: usize,
    operators: usize,
}

impl Shape {
    fn of(input: &str) -> Self {
        let bytes = input.as_bytes();
        let mut shape = Self::default();

        // Chain lengths of the enclosing parenthesis levels.
        let mut outer: Vec<usize> = Vec::new();
        let mut enclosing = 0;
        let mut chain = 0;
        let mut after_term = false;

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => {
                    outer.push(chain);
                    enclosing += chain + 1;
                    chain = 0;
                    after_term = false;
                    shape.operators += 1;
                }
                b')' => {
                    chain = outer.pop().unwrap_or(0);
                    enclosing = enclosing.saturating_sub(chain + 1);
                    after_term = true;
                }
                b'+' | b'-' if !after_term => {
                    chain += 1;
                    shape.operators += 1;
                }
                b'*' if after_term && bytes.get(i + 1) == Some(&b'*') => {
                    i += 1;
                    chain += 1;
                    after_term = false;
                    shape.operators += 1;
                }
                b'^' => {
                    chain += 1;
                    after_term = false;
                    shape.operators += 1;
                }
                b'+' | b'-' | b'*' | b'/' => {
                    chain = 0;
                    after_term = false;
                    shape.operators += 1;
                }
                b'0'..=b'9' | b'.' => {
                    i = skip_number(bytes, i);
                    after_term = true;
                    continue;
                }
                b if b.is_ascii_alphabetic() => {
                    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
                        i += 1;
                    }
                    after_term = true;
                    continue;
                }
                _ => {}
            }
            shape.depth = shape.depth.max(enclosing + chain);
            i += 1;
        }
        shape
    }
}

/// Returns the index just past the number starting at `start`, exponent included.
fn skip_number(bytes: &[u8], start: usize) -> usize {
    let digits = |mut i: usize| {
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        i
    };

    let end = digits(start);
    if !matches!(bytes.get(end), Some(b'e' | b'E')) {
        return end;
    }
    let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
    match bytes.get(end + 1 + sign) {
        Some(b) if b.is_ascii_digit() => digits(end + 1 + sign),
        _ => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn parsed(text: &str) -> Expr {
        parse(text).unwrap_or_else(|e| panic!("{text:?} should parse: {e}"))
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(parsed("1 + 2 * x").to_string(), "(1 + (2 * x))");
        assert_eq!(parsed("1 - 2 - 3").to_string(), "((1 - 2) - 3)");
        assert_eq!(parsed("8 / 4 / 2").to_string(), "((8 / 4) / 2)");
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        assert_eq!(parsed("2^3^2").to_string(), "(2 ^ (3 ^ 2))");
        assert_eq!(parsed("-x^2").to_string(), "(-(x ^ 2))");
        assert_eq!(parsed("x**-1").to_string(), "(x ^ (-1))");
        assert_eq!(parsed("x ** 2"), parsed("x^2"));
    }

    #[test]
    fn parses_numbers() {
        match parsed("1.5e-3") {
            Expr::Constant(c) => assert_relative_eq!(c, 1.5e-3),
            other => panic!("expected constant, got {other:?}"),
        }
        assert_eq!(parsed(" 42 "), Expr::Constant(42.0));
    }

    #[test]
    fn parses_functions_and_constants() {
        assert_eq!(parsed("sin(x)"), Expr::call(Func::Sin, Expr::Variable));
        assert_eq!(parsed("ln(x)"), parsed("log(x)"));
        assert_eq!(parsed("log10 ( x )"), Expr::call(Func::Log10, Expr::Variable));
        assert_eq!(parsed("pi"), Expr::Constant(PI));
        assert_eq!(parsed("e"), Expr::Constant(E));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "", "   ", "x +* 2", "2x", "x +", "(x", "x)", "y + 1", "foo(x)", "sin x", "x = 2",
        ] {
            assert!(parse(text).is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn error_reports_offset() {
        let err = parse("x +* 2").expect_err("malformed text");
        assert!(err.message().contains("offset 2"), "{}", err.message());
    }

    #[test]
    fn rejects_runaway_nesting() {
        let parens = format!("{}x{}", "(".repeat(600), ")".repeat(600));
        let signs = format!("{}x", "-".repeat(600));
        let powers = format!("x{}", "^2".repeat(600));

        for text in [parens, signs, powers] {
            let err = parse(&text).expect_err("too deep");
            assert!(err.message().contains("nests deeper"), "{}", err.message());
        }
    }

    #[test]
    fn long_flat_sums_parse() {
        let zeros = format!("x{} - 2", " + 0".repeat(600));
        assert!(parse(&zeros).is_ok());

        let small_steps = format!("x{}", " - 1e-3".repeat(300));
        assert!(parse(&small_steps).is_ok());

        let products = format!("x{}", " * 1".repeat(1_000));
        assert!(parse(&products).is_ok());
    }

    #[test]
    fn rejects_oversized_expressions() {
        let text = format!("x{}", " + 1".repeat(5_000));
        let err = parse(&text).expect_err("too many operators");
        assert!(err.message().contains("operators"), "{}", err.message());
    }

    #[test]
    fn shape_measures_real_depth() {
        assert_eq!(Shape::of("x + 1 - 2").depth, 0);
        assert_eq!(Shape::of("1e-3 - 2.5E+4").operators, 1);
        assert_eq!(Shape::of("-x").depth, 1);
        assert_eq!(Shape::of("2^-x + 1").depth, 2);
        assert_eq!(Shape::of("x ** 2 * 3").depth, 1);
        assert_eq!(Shape::of("sin((x)) + (1)").depth, 2);
        assert_eq!(Shape::of("2^(x^(x))"), Shape { depth: 4, operators: 4 });
    }
}
