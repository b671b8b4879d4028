//! Leaf value coercion.
//!
//! Converts a leaf field's raw textual representation into a typed JSON
//! value. Numeric parsing is deliberately permissive, matching the host
//! document's semantics: the longest valid leading prefix of the raw text
//! is taken, and text with no valid prefix coerces to the null sentinel
//! rather than an error. JSON numbers cannot carry NaN, so null stands in
//! for every not-a-number outcome.

use crate::node::{Control, LeafField};
use serde_json::Value;

/// Raw checkbox value that coerces to `true`. Anything else, including
/// `"unchecked"` and the empty string, coerces to `false`. This is a
/// literal comparison against the raw value, not a toggle-state flag.
const CHECKED: &str = "checked";

/// Coerces a leaf field's raw value into a typed JSON value.
///
/// Rules, in order:
/// - Numeric field with a fractional step (present, non-empty, not `"0"`,
///   leading-float parse `< 1`): leading-float-prefix parse of the raw
///   value. No valid prefix, or a non-finite result, yields null.
/// - Numeric field otherwise: leading-integer-prefix parse (`"42abc"`
///   yields `42`). No digit prefix yields null, as does a prefix that
///   overflows `i64`.
/// - Checkbox: `true` exactly when the raw value is `"checked"`.
/// - Anything else: the raw string, unmodified.
///
/// Never fails; malformed numeric text is a valid (null) output value.
pub fn coerce(field: &LeafField) -> Value {
    match field.control {
        Control::Number if fractional_step(field.step.as_deref()) => {
            leading_float(&field.value)
                .and_then(serde_json::Number::from_f64)
                .map_or(Value::Null, Value::Number)
        }
        Control::Number => leading_int(&field.value)
            .map(Value::from)
            .unwrap_or(Value::Null),
        Control::Checkbox => Value::Bool(field.value == CHECKED),
        Control::Text => Value::String(field.value.clone()),
    }
}

/// True when the step attribute denotes a fractional step below one.
fn fractional_step(step: Option<&str>) -> bool {
    match step {
        Some(s) if !s.is_empty() && s != "0" => {
            leading_float(s).is_some_and(|f| f < 1.0)
        }
        _ => false,
    }
}

/// Parses the longest valid leading decimal prefix of `raw`: optional
/// whitespace and sign, digits with an optional fraction part and an
/// optional exponent. Returns `None` when no prefix forms a number.
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let b = s.as_bytes();

    let mut i = 0;
    if matches!(b.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - digits_start;

    let mut frac_digits = 0;
    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - i - 1;
        // A bare trailing dot still extends an integer part ("3." is 3.0),
        // but a dot with no digits on either side is not numeric.
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mut end = i;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        // "1e" without digits leaves the exponent out of the prefix.
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse().ok()
}

/// Parses the longest valid leading base-10 integer prefix of `raw`:
/// optional whitespace and sign, then digits. Returns `None` when there is
/// no digit prefix or the prefix overflows `i64`.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let b = s.as_bytes();

    let mut i = 0;
    if matches!(b.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }

    s[..i].parse().ok()
}
