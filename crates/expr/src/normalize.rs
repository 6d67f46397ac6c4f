/// Rewrites an equation into an equivalent zero-seeking expression.
///
/// With exactly one `=`, `left = right` becomes `(left) - (right)`, or just the
/// trimmed left side when the right side is blank. Text without `=` (or with
/// several) is returned unchanged and left for the parser to judge.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut parts = text.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => {
            if right.trim().is_empty() {
                left.trim().to_owned()
            } else {
                format!("({left}) - ({right})")
            }
        }
        _ => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rootline_core::Function;

    use crate::Formula;

    #[test]
    fn rewrites_equation() {
        assert_eq!(normalize("x^2 = 4"), "(x^2 ) - ( 4)");
    }

    #[test]
    fn blank_right_side_keeps_left() {
        assert_eq!(normalize(" x^2 - 4 = "), "x^2 - 4");
        assert_eq!(normalize("x ="), "x");
    }

    #[test]
    fn passes_through_without_equals() {
        assert_eq!(normalize("x^2 - 4"), "x^2 - 4");
    }

    #[test]
    fn several_equals_are_left_for_the_parser() {
        let text = "x = 1 = 2";
        assert_eq!(normalize(text), text);
        assert!(Formula::compile(normalize(text)).evaluate(0.0).is_invalid());
    }

    #[test]
    fn normalized_equation_matches_direct_form() {
        let equation = Formula::compile(normalize("x^2 = 4"));
        let direct = Formula::compile("x^2 - 4");
        for x in [-3.0, 0.0, 1.99, 2.0, 2.5] {
            assert_eq!(equation.evaluate(x), direct.evaluate(x));
        }
    }
}
