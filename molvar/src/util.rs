//! Strict numeric text handling.
//!
//! The checked parsers here return [`ScriptResult`]s; the value layer turns their errors
//! into `NaN` or `0` so that a bad conversion never aborts script evaluation.
//!
//! [`ScriptResult`]: ../types/type.ScriptResult.html

use crate::script_err;
use crate::types::*;

/// Parses a decimal number strictly: optional surrounding whitespace, an optional sign,
/// digits with an optional fraction, and an optional exponent.  Anything else,
/// including trailing garbage and spelled-out infinities, is an error.
///
/// # Example
///
/// ```
/// use molvar::util::parse_float;
/// assert_eq!(parse_float(" -1.5e2 "), Ok(-150.0));
/// assert!(parse_float("1.5x").is_err());
/// ```
pub fn parse_float(text: &str) -> ScriptResult<ScriptFloat> {
    let trimmed = text.trim();

    if !is_decimal_syntax(trimmed) {
        return script_err!(Syntax, "expected floating-point number but got \"{}\"", text);
    }

    trimmed.parse::<ScriptFloat>().map_err(|_| {
        ScriptError::syntax(&format!(
            "expected floating-point number but got \"{}\"",
            text
        ))
    })
}

/// Parses a signed decimal integer strictly.
///
/// # Example
///
/// ```
/// use molvar::util::parse_int;
/// assert_eq!(parse_int("-42"), Ok(-42));
/// assert!(parse_int("4.2").is_err());
/// ```
pub fn parse_int(text: &str) -> ScriptResult<ScriptInt> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return script_err!(Syntax, "expected integer but got \"{}\"", text);
    }

    trimmed
        .parse::<ScriptInt>()
        .map_err(|_| ScriptError::range(&format!("integer value too large: \"{}\"", text)))
}

// Checks the grammar [+-]? (d+ (. d*)? | . d+) ([eE] [+-]? d+)?
fn is_decimal_syntax(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Converts text to a number the way the scripting language does: `true` is 1, `false`
/// and the empty string are 0, and anything else is parsed strictly, yielding `NaN` on
/// failure.
pub fn to_float(text: &str) -> ScriptFloat {
    if text.eq_ignore_ascii_case("true") {
        1.0
    } else if text.is_empty() || text.eq_ignore_ascii_case("false") {
        0.0
    } else {
        parse_float(text).unwrap_or(ScriptFloat::NAN)
    }
}

/// Truncates toward zero.  `NaN` becomes 0; out-of-range values saturate.
pub fn truncate(value: ScriptFloat) -> ScriptInt {
    // `as` truncates, saturates, and maps NaN to 0.
    value as ScriptInt
}

/// Formats a decimal as numeric text.  Integral values keep a trailing `.0` so that the
/// text reads back as a decimal rather than an integer.
///
/// # Example
///
/// ```
/// use molvar::util::fmt_float;
/// assert_eq!(fmt_float(2.0), "2.0");
/// assert_eq!(fmt_float(-0.25), "-0.25");
/// ```
pub fn fmt_float(value: ScriptFloat) -> String {
    let text = format!("{}", value);

    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{}.0", text)
    } else {
        text
    }
}
