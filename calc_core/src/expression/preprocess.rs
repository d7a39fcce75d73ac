//! Textual rewrite pass applied before numeric evaluation.
//!
//! The keypad produces display glyphs (`×`, `÷`, `π`, `√`) and the short
//! function names shown on the buttons. This pass turns that text into the
//! plain grammar understood by [`super::parser`], in four fixed steps:
//!
//! 1. multiply/divide glyphs → `*` and `/`
//! 2. `π` and `e` → their double-precision literals
//! 3. function names → library names (`log(` → `log10(`, `√(` → `sqrt(`)
//! 4. `digits!` → the factorial value as a literal

/// `π` as written into the expression text
pub const PI_LITERAL: &str = "3.141592653589793";

/// `e` as written into the expression text
pub const E_LITERAL: &str = "2.718281828459045";

/// Literal emitted for a factorial that overflows `f64`
pub const INFINITY_LITERAL: &str = "Infinity";

/// Function tokens as typed on the keypad, paired with their library names.
/// The opening parenthesis stays attached so the argument keeps its position.
const FUNCTION_REWRITES: [(&str, &str); 6] = [
    ("sin(", "sin("),
    ("cos(", "cos("),
    ("tan(", "tan("),
    ("log(", "log10("),
    ("ln(", "ln("),
    ("√(", "sqrt("),
];

/// Run the full rewrite pipeline.
///
/// # Example
///
/// ```rust
/// use calc_core::expression::preprocess::preprocess;
///
/// assert_eq!(preprocess("2×3÷4"), "2*3/4");
/// assert_eq!(preprocess("√(16)+5!"), "sqrt(16)+120");
/// ```
pub fn preprocess(input: &str) -> String {
    let text = substitute_operators(input);
    let text = substitute_constants(&text);
    let text = rewrite_functions(&text);
    resolve_factorials(&text)
}

/// Step 1: display glyphs to binary operators
pub fn substitute_operators(input: &str) -> String {
    input.replace('×', "*").replace('÷', "/")
}

/// Step 2: constants to literal numbers.
///
/// This is plain text substitution, so `2π` becomes `23.141592653589793`.
pub fn substitute_constants(input: &str) -> String {
    input.replace('π', PI_LITERAL).replace('e', E_LITERAL)
}

/// Step 3: keypad function names to library function names
pub fn rewrite_functions(input: &str) -> String {
    FUNCTION_REWRITES
        .iter()
        .fold(input.to_string(), |text, (from, to)| text.replace(from, to))
}

/// Step 4: replace each `digits!` with the factorial of the digit run.
///
/// Only a maximal ASCII digit run directly before `!` is consumed; a `!` with
/// no digits in front of it is left untouched. Substituted values are not
/// rescanned, so `3!!` becomes `6!`.
pub fn resolve_factorials(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // Byte offset in `out` where the current digit run starts
    let mut run_start: Option<usize> = None;

    for ch in input.chars() {
        if ch.is_ascii_digit() {
            if run_start.is_none() {
                run_start = Some(out.len());
            }
            out.push(ch);
        } else if ch == '!' {
            match run_start.take() {
                Some(start) => {
                    let digits = out.split_off(start);
                    out.push_str(&factorial_literal(&digits));
                }
                None => out.push('!'),
            }
        } else {
            run_start = None;
            out.push(ch);
        }
    }

    out
}

/// Iterative product `2 · 3 · … · n`; `0!` and `1!` are 1.
///
/// Stops early once the product overflows to infinity.
///
/// ```rust
/// use calc_core::expression::preprocess::factorial;
///
/// assert_eq!(factorial(0.0), 1.0);
/// assert_eq!(factorial(5.0), 120.0);
/// assert!(factorial(171.0).is_infinite());
/// ```
pub fn factorial(n: f64) -> f64 {
    let mut product = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        product *= i;
        if product.is_infinite() {
            break;
        }
        i += 1.0;
    }
    product
}

fn factorial_literal(digits: &str) -> String {
    // A digit-only run always parses; an absurdly long run parses to a huge
    // float, which overflows the product and yields the infinity literal.
    let n: f64 = digits.parse().unwrap_or(f64::INFINITY);
    let value = factorial(n);
    if value.is_finite() {
        format!("{value}")
    } else {
        INFINITY_LITERAL.to_string()
    }
}
