//! Arithmetic evaluation for the calculator, backed by `meval`.

use meval::{Context, Expr};

/// Longest input handed to the parser.
pub const MAX_INPUT_CHARS: usize = 1_000;

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 64;

/// Longest run of consecutive sign operators (`--+-1`).
pub const MAX_SIGN_RUN: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Not an expression the evaluator understands.
    Invalid(String),
    /// Input longer or deeper than the guard allows.
    TooComplex(&'static str),
    /// Division by zero, square root of a negative, overflow.
    NotFinite,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::Invalid(msg) => write!(f, "{}", msg),
            EvalError::TooComplex(what) => write!(f, "expression too complex: {}", what),
            EvalError::NotFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Reject input whose size or nesting could exhaust the parser's stack.
fn check_shape(input: &str) -> Result<(), EvalError> {
    if input.chars().count() > MAX_INPUT_CHARS {
        return Err(EvalError::TooComplex("input too long"));
    }

    let mut depth = 0usize;
    let mut sign_run = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(EvalError::TooComplex("nesting too deep"));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        match c {
            '-' | '+' => {
                sign_run += 1;
                if sign_run > MAX_SIGN_RUN {
                    return Err(EvalError::TooComplex("too many consecutive signs"));
                }
            }
            c if c.is_whitespace() => {}
            _ => sign_run = 0,
        }
    }
    Ok(())
}

fn context() -> Context<'static> {
    let mut ctx = Context::new();
    ctx.func("log", f64::log10)
        .func("log10", f64::log10)
        .func("log2", f64::log2);
    ctx
}

/// Evaluate an arithmetic expression.
///
/// Accepts `+ - * / % ^`, parentheses, `pi`, `e` and the usual functions
/// (`sqrt`, `abs`, `ln`, `log`, `exp`, trig, `floor`, `ceil`, `round`).
/// `**` is read as `^`.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    check_shape(input)?;

    let normalized = input.trim().replace("**", "^");
    if normalized.is_empty() {
        return Err(EvalError::Invalid("empty expression".to_string()));
    }

    let expr: Expr = normalized
        .parse()
        .map_err(|e: meval::Error| EvalError::Invalid(e.to_string()))?;
    let value = expr
        .eval_with_context(context())
        .map_err(|e| EvalError::Invalid(e.to_string()))?;

    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

/// Render a result, dropping the fractional part of whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ** 10").unwrap(), 1024.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(evaluate("sqrt(16) + abs(-2)").unwrap(), 6.0);
        assert!((evaluate("log(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert!((evaluate("2 * pi").unwrap() - std::f64::consts::TAU).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 / 0"), Err(EvalError::NotFinite));
        assert_eq!(evaluate("sqrt(-1)"), Err(EvalError::NotFinite));
        assert!(matches!(evaluate(""), Err(EvalError::Invalid(_))));
        assert!(matches!(evaluate("(1 + 2"), Err(EvalError::Invalid(_))));
        assert!(matches!(evaluate("what is 2 + 2"), Err(EvalError::Invalid(_))));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(evaluate(&parens), Err(EvalError::TooComplex(_))));

        let signs = format!("{}1", "-".repeat(20_000));
        assert!(matches!(evaluate(&signs), Err(EvalError::TooComplex(_))));

        // under the length cap, still too deep
        let shallow_but_nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(
            evaluate(&shallow_but_nested),
            Err(EvalError::TooComplex("nesting too deep"))
        );

        let spaced_signs = format!("{}1", "- ".repeat(20));
        assert_eq!(
            evaluate(&spaced_signs),
            Err(EvalError::TooComplex("too many consecutive signs"))
        );
    }

    #[test]
    fn test_reasonable_nesting_still_evaluates() {
        let nested = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(evaluate(&nested).unwrap(), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
    }
}
