//! Response sanitizer
//!
//! Turns raw language-model output into a parsed JSON value. Model responses
//! arrive wrapped in code fences, with typographic quotes, unevaluated
//! arithmetic, trailing commas and chatty prose around the payload; each
//! cleanup step here is total and side-effect free.
//!
//! Failing to find an object is an expected outcome, reported through
//! [`SanitizeError`] so callers can fall back to an empty structure.

pub mod arithmetic;

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::models::budget::format_amount;

static INLINE_ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(\s*)([-+*/().\d\s]+?)(\s*)([,}\]])").expect("arithmetic pattern is valid")
});

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern is valid"));

/// Why no value could be extracted from a model response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SanitizeError {
    /// No `{ ... }` span in the cleaned text
    #[error("no JSON object found in model response")]
    NoObject,

    /// The candidate span did not parse
    #[error("model response is not valid JSON: {0}")]
    Malformed(String),
}

/// Extract a JSON value from raw model output.
///
/// Well-formed JSON (after removing a code fence) is returned as-is, arrays
/// included. Anything else goes through the cleanup steps and the first `{`
/// to last `}` span is parsed.
pub fn extract_value(raw: &str) -> Result<Value, SanitizeError> {
    let unfenced = strip_code_fence(raw);
    if let Ok(value @ (Value::Object(_) | Value::Array(_))) =
        serde_json::from_str::<Value>(unfenced)
    {
        return Ok(value);
    }

    let cleaned = clean(unfenced);
    if cleaned.trim_start().starts_with('[') {
        if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(cleaned.trim()) {
            return Ok(value);
        }
    }

    let Some(candidate) = object_span(&cleaned) else {
        debug!(len = raw.len(), "No JSON object in model response");
        return Err(SanitizeError::NoObject);
    };

    serde_json::from_str::<Value>(candidate).map_err(|e| {
        debug!("Sanitized model response still failed to parse: {}", e);
        SanitizeError::Malformed(e.to_string())
    })
}

/// Run every text cleanup step without parsing
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    clean(strip_code_fence(raw))
}

fn clean(text: &str) -> String {
    let text = normalize_quotes(text);
    let text = evaluate_inline_arithmetic(&text);
    remove_trailing_commas(&text)
}

/// Remove a surrounding triple-backtick fence and its optional language tag
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Replace typographic quotes with ASCII ones.
///
/// Curly single quotes always become `'`. Curly double quotes become `"` only
/// where they delimit a string; inside an ASCII-quoted string they are
/// ordinary text and stay untouched.
#[must_use]
pub fn normalize_quotes(text: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Outside,
        Ascii,
        Curly,
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Outside;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if matches!(c, '\u{2018}' | '\u{2019}') {
            out.push('\'');
            continue;
        }
        if state != State::Outside {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            if c == '\\' {
                escaped = true;
                out.push(c);
                continue;
            }
        }
        let curly = matches!(c, '\u{201C}' | '\u{201D}');
        match state {
            State::Outside if curly => {
                out.push('"');
                state = State::Curly;
            }
            State::Outside if c == '"' => {
                out.push('"');
                state = State::Ascii;
            }
            State::Ascii if c == '"' => {
                out.push('"');
                state = State::Outside;
            }
            State::Ascii if curly && closes_string(&text[i + c.len_utf8()..]) => {
                out.push('"');
                state = State::Outside;
            }
            State::Curly if curly || c == '"' => {
                out.push('"');
                state = State::Outside;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Whether a curly quote inside an ASCII-opened string is its closing quote.
///
/// It is when a structural character follows it and no later ASCII `"` could
/// close the string instead.
fn closes_string(rest: &str) -> bool {
    followed_by_structure(rest) && !next_ascii_quote(rest).is_some_and(followed_by_structure)
}

fn followed_by_structure(rest: &str) -> bool {
    matches!(rest.trim_start().chars().next(), None | Some(':' | ',' | '}' | ']'))
}

/// Text after the next unescaped ASCII `"`
fn next_ascii_quote(rest: &str) -> Option<&str> {
    let mut escaped = false;
    for (i, b) in rest.bytes().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Some(&rest[i + 1..]),
            _ => {}
        }
    }
    None
}

/// Per-byte flag: is this byte part of a string literal (quotes included)?
fn string_mask(text: &str) -> Vec<bool> {
    let mut mask = vec![false; text.len()];
    let mut in_string = false;
    let mut escaped = false;
    for (i, b) in text.bytes().enumerate() {
        if in_string {
            mask[i] = true;
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            mask[i] = true;
            in_string = true;
        }
    }
    mask
}

/// Evaluate values like `: 120 * 3,` or `: (50+20)}` into plain numbers.
///
/// Matches inside string literals, expressions without an operator and
/// anything the evaluator rejects are left verbatim.
#[must_use]
pub fn evaluate_inline_arithmetic(text: &str) -> String {
    let mask = string_mask(text);
    INLINE_ARITHMETIC
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            let expr = &caps[2];
            let has_operator = expr.contains(&['+', '-', '*', '/', '(', ')'][..]);
            if mask[start] || !has_operator {
                return whole.to_string();
            }
            match arithmetic::evaluate(expr) {
                Some(value) => {
                    debug!("Evaluated inline arithmetic '{}' = {}", expr.trim(), value);
                    format!(":{}{}{}{}", &caps[1], format_amount(value), &caps[3], &caps[4])
                }
                None => whole.to_string(),
            }
        })
        .into_owned()
}

/// Drop commas directly before `}` or `]` outside string literals
#[must_use]
pub fn remove_trailing_commas(text: &str) -> String {
    let mask = string_mask(text);
    TRAILING_COMMA
        .replace_all(text, |caps: &Captures| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if mask[start] {
                caps[0].to_string()
            } else {
                caps[1].to_string()
            }
        })
        .into_owned()
}

/// First `{` through last `}`, inclusive
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
