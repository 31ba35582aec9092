//! Restricted arithmetic evaluator
//!
//! Models sometimes emit `"Price": 120 * 3` instead of `360`. This module
//! evaluates such expressions with a small recursive-descent parser over
//! numbers, `+ - * /`, unary signs and parentheses. Nothing else is accepted.

/// Characters an expression may contain
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Nesting limit for parentheses and unary signs
const MAX_DEPTH: usize = 64;

/// Evaluate `expr`, returning `None` unless it is well formed and the result is finite.
#[must_use]
pub fn evaluate(expr: &str) -> Option<f64> {
    if !expr.chars().all(is_allowed) {
        return None;
    }
    let mut parser = Parser {
        bytes: expr.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if parser.pos != parser.bytes.len() {
        return None;
    }
    value.is_finite().then_some(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.pos).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut acc = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == b'+' { acc + rhs } else { acc - rhs };
        }
        Some(acc)
    }

    fn term(&mut self) -> Option<f64> {
        let mut acc = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            acc = if op == b'*' { acc * rhs } else { acc / rhs };
        }
        Some(acc)
    }

    fn factor(&mut self) -> Option<f64> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return None;
        }
        let value = match self.peek()? {
            b'-' => {
                self.pos += 1;
                self.factor().map(|v| -v)
            }
            b'+' => {
                self.pos += 1;
                self.factor()
            }
            b'(' => {
                self.pos += 1;
                let inner = self.expr()?;
                (self.peek()? == b')').then(|| {
                    self.pos += 1;
                    inner
                })
            }
            _ => self.number(),
        };
        self.depth -= 1;
        value
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let literal = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        if literal.is_empty() || literal == "." {
            return None;
        }
        literal.parse::<f64>().ok()
    }
}
