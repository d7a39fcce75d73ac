//! Restricted arithmetic parser.
//!
//! Recursive descent over the grammar below. Nothing outside it is
//! accepted: there are no variables, no assignment and no way to reach any
//! function other than the six listed.
//!
//! ```text
//! expr     := term (('+' | '-') term)*
//! term     := unary (('*' | '/') unary)*
//! unary    := ('+' | '-')+ primary     -- may not be followed by '**'
//!           | power
//! power    := primary ('**' unary)?    -- right associative
//! primary  := NUMBER | 'Infinity' | '(' expr ')' | FUNC '(' expr ')'
//! FUNC     := sin | cos | tan | log10 | ln | sqrt
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use super::preprocess::INFINITY_LITERAL;

/// Deepest nesting of parentheses, calls, signs and exponents accepted
pub const MAX_DEPTH: usize = 256;

/// One of the six functions reachable from an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
}

impl Function {
    /// Look up a library function name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "tan" => Some(Function::Tan),
            "log10" => Some(Function::Log10),
            "ln" => Some(Function::Ln),
            "sqrt" => Some(Function::Sqrt),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log10 => "log10",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Log10 => x.log10(),
            Function::Ln => x.ln(),
            Function::Sqrt => x.sqrt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Func(Function),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Func(f) => format!("function '{}'", f.name()),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Power => "'**'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

/// Syntax error with the byte offset (in the prepared text) where it was found
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl ParseError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

/// Value of a parsed expression plus what happened on the way there.
///
/// The flags let the caller tell a division by zero from a domain error
/// when the final value turns out not to be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub value: f64,
    pub saw_zero_divisor: bool,
    pub saw_domain_fault: bool,
}

/// Parse and evaluate prepared expression text.
///
/// ```rust
/// use calc_core::expression::parser::evaluate_prepared;
///
/// assert_eq!(evaluate_prepared("2+3*4").unwrap().value, 14.0);
/// assert_eq!(evaluate_prepared("2**3**2").unwrap().value, 512.0);
/// assert!(evaluate_prepared("2+").is_err());
/// ```
pub fn evaluate_prepared(text: &str) -> Result<Outcome, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::new(0, "empty expression"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        end: text.len(),
        saw_zero_divisor: false,
        saw_domain_fault: false,
    };
    let value = parser.expr()?;
    if let Some((offset, token)) = parser.tokens.get(parser.pos) {
        return Err(ParseError::new(
            *offset,
            format!("unexpected {}", token.describe()),
        ));
    }

    Ok(Outcome {
        value,
        saw_zero_divisor: parser.saw_zero_divisor,
        saw_domain_fault: parser.saw_domain_fault,
    })
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => lex_number(text, &mut chars)?,
            c if c.is_ascii_alphabetic() => lex_identifier(text, &mut chars)?,
            '+' => {
                chars.next();
                Token::Plus
            }
            '-' => {
                chars.next();
                Token::Minus
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '*'))) {
                    chars.next();
                    Token::Power
                } else {
                    Token::Star
                }
            }
            '/' => {
                chars.next();
                Token::Slash
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            other => {
                return Err(ParseError::new(offset, format!("unexpected character '{other}'")));
            }
        };
        tokens.push((offset, token));
    }

    Ok(tokens)
}

fn lex_number(text: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<Token, ParseError> {
    let start = chars.peek().map(|(i, _)| *i).unwrap_or(text.len());
    let mut end = start;
    let mut seen_dot = false;
    let mut seen_digit = false;

    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }

    if !seen_digit {
        return Err(ParseError::new(start, "number without digits"));
    }
    text[start..end]
        .parse::<f64>()
        .map(Token::Number)
        .map_err(|e| ParseError::new(start, format!("invalid number: {e}")))
}

fn lex_identifier(text: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<Token, ParseError> {
    let start = chars.peek().map(|(i, _)| *i).unwrap_or(text.len());
    let mut end = start;

    while let Some(&(i, c)) = chars.peek() {
        if !c.is_ascii_alphanumeric() {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }

    let name = &text[start..end];
    if name == INFINITY_LITERAL {
        return Ok(Token::Number(f64::INFINITY));
    }
    Function::from_name(name)
        .map(Token::Func)
        .ok_or_else(|| ParseError::new(start, format!("unknown identifier '{name}'")))
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
    /// Offset reported for errors at end of input
    end: usize,
    saw_zero_divisor: bool,
    saw_domain_fault: bool,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(o, _)| *o).unwrap_or(self.end)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let offset = self.offset();
        match self.advance() {
            Some(ref token) if *token == expected => Ok(()),
            Some(token) => Err(ParseError::new(
                offset,
                format!("expected {}, found {}", expected.describe(), token.describe()),
            )),
            None => Err(ParseError::new(
                offset,
                format!("expected {}, found end of input", expected.describe()),
            )),
        }
    }

    /// Run `rule` one nesting level deeper, failing past [`MAX_DEPTH`]
    fn nested(&mut self, rule: fn(&mut Self) -> Result<f64, ParseError>) -> Result<f64, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::new(self.offset(), "expression nested too deeply"));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<f64, ParseError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        self.saw_zero_divisor = true;
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ParseError> {
        if !matches!(self.peek(), Some(Token::Plus | Token::Minus)) {
            return self.power();
        }
        let value = self.prefixed()?;
        if self.peek() == Some(&Token::Power) {
            return Err(ParseError::new(
                self.offset(),
                "unary operator before '**' must be parenthesized",
            ));
        }
        Ok(value)
    }

    fn prefixed(&mut self) -> Result<f64, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.nested(Self::prefixed)?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.nested(Self::prefixed)
            }
            _ => self.primary(),
        }
    }

    fn power(&mut self) -> Result<f64, ParseError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Power) {
            self.advance();
            let exponent = self.nested(Self::unary)?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, ParseError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.nested(Self::expr)?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Func(func)) => {
                self.expect(Token::LParen)?;
                let arg = self.nested(Self::expr)?;
                self.expect(Token::RParen)?;
                let value = func.apply(arg);
                if !arg.is_nan() && !value.is_finite() && arg.is_finite() {
                    self.saw_domain_fault = true;
                }
                Ok(value)
            }
            Some(token) => Err(ParseError::new(
                offset,
                format!("unexpected {}", token.describe()),
            )),
            None => Err(ParseError::new(offset, "unexpected end of input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> f64 {
        evaluate_prepared(text).unwrap().value
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("10-4-3"), 3.0);
        assert_eq!(eval("100/10/5"), 2.0);
        assert_eq!(eval("2*3**2"), 18.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(eval("2**3**2"), 512.0);
        assert_eq!(eval("(2**3)**2"), 64.0);
        assert_eq!(eval("2**-1"), 0.5);
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval("-3+5"), 2.0);
        assert_eq!(eval("--3"), 3.0);
        assert_eq!(eval("+4"), 4.0);
        assert_eq!(eval("2*-3"), -6.0);
        assert_eq!(eval("(-2)**2"), 4.0);
    }

    #[test]
    fn test_unary_before_power_rejected() {
        assert!(evaluate_prepared("-2**2").is_err());
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(eval(".5+5."), 5.5);
        assert_eq!(eval("007"), 7.0);
        assert!(evaluate_prepared("1.2.3").is_err());
        assert!(evaluate_prepared(".").is_err());
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(16)"), 4.0);
        assert_eq!(eval("log10(1000)"), 3.0);
        assert_eq!(eval("ln(1)"), 0.0);
        assert_eq!(eval("sin(0)+cos(0)"), 1.0);
        assert_eq!(eval("tan(0)"), 0.0);
    }

    #[test]
    fn test_only_whitelisted_identifiers() {
        let err = evaluate_prepared("exp(1)").unwrap_err();
        assert!(err.message.contains("unknown identifier"));
        assert!(evaluate_prepared("sqrt 4").is_err());
        assert!(evaluate_prepared("sqrt(1,2)").is_err());
    }

    #[test]
    fn test_syntax_errors() {
        assert!(evaluate_prepared("").is_err());
        assert!(evaluate_prepared("2+").is_err());
        assert!(evaluate_prepared("(2").is_err());
        assert!(evaluate_prepared("2)").is_err());
        assert!(evaluate_prepared("2(3)").is_err());
        assert!(evaluate_prepared("4!").is_err());
        assert!(evaluate_prepared("2^3").is_err());
    }

    #[test]
    fn test_fault_flags() {
        let outcome = evaluate_prepared("1/0").unwrap();
        assert!(outcome.value.is_infinite());
        assert!(outcome.saw_zero_divisor);

        let outcome = evaluate_prepared("ln(-1)").unwrap();
        assert!(outcome.value.is_nan());
        assert!(outcome.saw_domain_fault);

        let outcome = evaluate_prepared("log10(0)").unwrap();
        assert!(outcome.saw_domain_fault);
    }

    #[test]
    fn test_infinity_literal() {
        assert!(eval("Infinity").is_infinite());
        assert_eq!(eval("1/Infinity"), 0.0);
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(eval(&within), 1.0);

        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(evaluate_prepared(&parens).is_err());

        let signs = format!("{}1", "-".repeat(100_000));
        assert!(evaluate_prepared(&signs).is_err());

        let calls = format!("{}1{}", "sqrt(".repeat(100_000), ")".repeat(100_000));
        assert!(evaluate_prepared(&calls).is_err());

        let tower = format!("2{}", "**2".repeat(100_000));
        assert!(evaluate_prepared(&tower).is_err());
    }

    #[test]
    fn test_error_offset() {
        let err = evaluate_prepared("1+*2").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
