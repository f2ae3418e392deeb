//! Value coercion from macro text to typed parameter values
//!
//! Two tiers:
//! - numeric parameters only ever receive a finite number; text that does not
//!   parse as one produces no value and the assignment is skipped
//! - every other kind first tries JSON, so arrays, objects, booleans and
//!   numbers can be written into free-form slots, and otherwise takes the raw
//!   text verbatim

use crate::nodes::WidgetKind;
use serde_json::{Number, Value};

/// Largest integer an f64 represents exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerce `raw` into a value for a parameter of the given kind
pub fn coerce(raw: &str, kind: &WidgetKind) -> Option<Value> {
    if kind.is_numeric() {
        return parse_number(raw);
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => Some(parsed),
        Err(_) => Some(Value::String(raw.to_string())),
    }
}

/// Parse number-field input into a JSON number
///
/// Accepts surrounding whitespace, sign, decimal and exponent forms, and
/// unsigned `0x`/`0o`/`0b` integers. Empty, non-finite or otherwise
/// malformed input yields `None`.
pub fn parse_number(raw: &str) -> Option<Value> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix_integer(text) {
        return Some(Value::from(value));
    }

    // Rust also accepts "inf"/"nan" spellings; neither is a usable number here
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    let number: f64 = text.parse().ok()?;
    number_value(number)
}

/// JSON number for a finite f64, integral values as integers
pub fn number_value(number: f64) -> Option<Value> {
    if !number.is_finite() {
        return None;
    }
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(number as i64));
    }
    Number::from_f64(number).map(Value::Number)
}

fn parse_radix_integer(text: &str) -> Option<u64> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest.to_string(), 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest.to_string(), 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest.to_string(), 2)
    } else {
        return None;
    };
    u64::from_str_radix(&digits, radix).ok()
}

/// Equality used to locate a parameter's current value in a list
///
/// Numbers compare by numeric value so `2` and `2.0` match; everything else
/// compares structurally.
pub fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Index of `current` in `values`, if present
pub fn position_of(values: &[Value], current: &Value) -> Option<usize> {
    values.iter().position(|v| values_match(v, current))
}

/// The entry after `current`, wrapping; a missing current value starts at the first entry
pub fn next_in_cycle<'a>(values: &'a [Value], current: &Value) -> Option<&'a Value> {
    if values.is_empty() {
        return None;
    }
    let next = match position_of(values, current) {
        Some(index) => (index + 1) % values.len(),
        None => 0,
    };
    values.get(next)
}
