//! The `%`-directive formatter behind the script language's `format()` function.
//!
//! A directive has the form `%[-][0][width][.[-]precision]conv`, where `conv` is one of
//!
//! * `d`, `i`: the argument read as an integer
//! * `f`: the argument read as a decimal, with `precision` decimal places
//! * `e`: the argument read as a decimal, in exponential notation
//! * `s`: the argument's text, cut to `precision` characters (the trailing characters if
//!   the precision is negative)
//! * `p`, `q`: a point or a plane/quaternion, each component formatted as by `f`
//!
//! `-` left-aligns the field and `0` pads numbers with zeros.  `%%` is a literal percent
//! sign.  Any other `%` is left as it is, including one whose width or precision is
//! over 65535.
//!
//! ```
//! use molvar::format::{format, format_args};
//! use molvar::Value;
//!
//! assert_eq!(format("%5.2f", &Value::from(3.14159)), " 3.14");
//! assert_eq!(
//!     format_args(&[Value::from("%s: %d%%"), Value::from("done"), Value::from("97.6")]),
//!     "done: 97%"
//! );
//! ```

use crate::types::*;
use crate::util::fmt_float;
use crate::value::{Data, Value};

/// Stands in for `%%` while the format string is split on `%`.
const PERCENT_PLACEHOLDER: char = '\u{1}';

const POINT_WIDTH: usize = 6;
const POINT_PRECISION: i32 = 2;

/// The largest width or precision a directive may give.  A directive asking for more
/// is not a directive and is left in the text.
const MAX_FIELD: u32 = u16::MAX as u32;

/// Formats a single argument.  Every directive in `fmt` is filled from the same
/// argument.  A list argument fills the format once per item, and the results are
/// joined with newlines.
///
/// # Example
///
/// ```
/// use molvar::format::format;
/// use molvar::Value;
///
/// assert_eq!(format("%d items", &Value::from("7")), "7 items");
///
/// let list = Value::from(vec!["1".to_string(), "2.5".to_string()]);
/// assert_eq!(format("<%4.1f>", &list), "< 1.0>\n< 2.5>");
/// ```
pub fn format(fmt: &str, value: &Value) -> String {
    let fmt = protect_percents(fmt);
    restore_percents(&format_lines(&fmt, value).join("\n"))
}

/// Formats the arguments of `format()` as the script language passes them: the first
/// argument is the format string and each directive consumes the next argument.
///
/// With no arguments the result is empty, and with only a format string it is the
/// format string itself.  A directive with no argument left is kept as it is.  A list
/// argument contributes one line per item, each ending in a newline.
///
/// # Example
///
/// ```
/// use molvar::format::format_args;
/// use molvar::Value;
///
/// let args = [Value::from("%s=%d, %s=%d"), Value::from("x"), Value::from(1)];
/// assert_eq!(format_args(&args), "x=1, %s=%d");
/// ```
pub fn format_args(args: &[Value]) -> String {
    match args.len() {
        0 => return String::new(),
        1 => return args[0].as_str(),
        _ => {}
    }

    let fmt = protect_percents(&args[0].as_str());
    let mut pieces = fmt.split('%');
    let mut out = String::new();

    // The text before the first directive is copied as is.
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }

    for (i, piece) in pieces.enumerate() {
        let directive = format!("%{}", piece);
        match args.get(i + 1) {
            None => out.push_str(&directive),
            Some(arg) => match arg.data() {
                Data::List(_) => {
                    for line in format_lines(&directive, arg) {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
                _ => out.push_str(&fill(&directive, arg)),
            },
        }
    }

    restore_percents(&out)
}

fn protect_percents(fmt: &str) -> String {
    fmt.replace("%%", &PERCENT_PLACEHOLDER.to_string())
}

fn restore_percents(text: &str) -> String {
    text.replace(PERCENT_PLACEHOLDER, "%")
}

// A whole list is formatted once per item, each item read as a literal.
fn format_lines(fmt: &str, value: &Value) -> Vec<String> {
    match value.data() {
        Data::List(list) => list
            .iter()
            .map(|item| fill(fmt, &Value::from_literal(item)))
            .collect(),
        _ => vec![fill(fmt, value)],
    }
}

/// A parsed directive.
#[derive(Debug, PartialEq)]
struct Directive {
    left: bool,
    zero: bool,
    width: usize,
    precision: Option<i32>,
    conv: char,

    /// The number of bytes the directive occupies after the `%`.
    len: usize,
}

// Parses the directive that follows a `%`, if there is a valid one.
fn parse_directive(text: &str) -> Option<Directive> {
    let bytes = text.as_bytes();
    let mut i = 0;

    let left = bytes.first() == Some(&b'-');
    if left {
        i += 1;
    }

    let zero = bytes.get(i) == Some(&b'0');
    if zero {
        i += 1;
    }

    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let width = if start == i {
        0
    } else {
        field(&text[start..i])? as usize
    };

    let mut precision = None;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let negative = bytes.get(i) == Some(&b'-');
        if negative {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = field(&text[start..i])? as i32;
        precision = Some(if negative { -digits } else { digits });
    }

    match bytes.get(i) {
        Some(&b) if b"difesqp".contains(&b) => Some(Directive {
            left,
            zero,
            width,
            precision,
            conv: b as char,
            len: i + 1,
        }),
        _ => None,
    }
}

// A width or precision: digits, at most MAX_FIELD.
fn field(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n <= MAX_FIELD)
}

// Replaces every valid directive in the format with the argument.
fn fill(fmt: &str, value: &Value) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut rest = fmt;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match parse_directive(after) {
            Some(directive) => {
                out.push_str(&render(&directive, value));
                rest = &after[directive.len..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

// Coerces the argument only as far as the directive requires.
fn render(directive: &Directive, value: &Value) -> String {
    match directive.conv {
        'd' | 'i' => pad(&value.as_int().to_string(), directive, true),
        'f' => pad(&decimal(value.as_decimal(), directive.precision), directive, true),
        'e' => pad(&exponential(value.as_decimal(), directive.precision), directive, true),
        's' => pad(&cut(&value.as_str(), directive.precision), directive, false),
        'p' | 'q' => match (directive.conv, value.data()) {
            ('p', Data::Vec3(pt)) => components(&pt.to_array(), directive),
            ('q', Data::Vec4(plane)) => components(&plane.to_array(), directive),
            _ => pad(&value.as_str(), directive, false),
        },
        _ => String::new(),
    }
}

fn decimal(flt: ScriptFloat, precision: Option<i32>) -> String {
    match precision {
        None => fmt_float(flt),
        Some(p) if p >= 0 => format!("{:.*}", p as usize, flt),
        Some(p) => exponential(flt, Some(-p)),
    }
}

fn exponential(flt: ScriptFloat, precision: Option<i32>) -> String {
    match precision {
        Some(p) => format!("{:.*E}", p.unsigned_abs() as usize, flt),
        None => format!("{:E}", flt),
    }
}

// Keeps the first `precision` characters, or the last ones if it is negative.
fn cut(text: &str, precision: Option<i32>) -> String {
    let count = text.chars().count();
    match precision {
        Some(p) if p >= 0 && (p as usize) < count => text.chars().take(p as usize).collect(),
        Some(p) if p < 0 && (p.unsigned_abs() as usize) < count => {
            text.chars().skip(count - p.unsigned_abs() as usize).collect()
        }
        _ => text.to_string(),
    }
}

fn components(values: &[ScriptFloat], directive: &Directive) -> String {
    let spec = Directive {
        width: if directive.width == 0 {
            POINT_WIDTH
        } else {
            directive.width
        },
        precision: directive.precision.or(Some(POINT_PRECISION)),
        conv: 'f',
        ..*directive
    };

    let items: Vec<String> = values
        .iter()
        .map(|flt| pad(&decimal(*flt, spec.precision), &spec, true))
        .collect();
    format!("{{{}}}", items.join(" "))
}

fn pad(text: &str, directive: &Directive, numeric: bool) -> String {
    let count = text.chars().count();
    if count >= directive.width {
        return text.to_string();
    }
    let fill = directive.width - count;

    if directive.left {
        format!("{}{}", text, " ".repeat(fill))
    } else if directive.zero && numeric {
        match text.strip_prefix('-') {
            Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), text),
        }
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Vec3, Vec4};

    fn strings(items: &[&str]) -> Value {
        Value::from(items.iter().map(|s| s.to_string()).collect::<ScriptList>())
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(
            parse_directive("-08.-3f rest"),
            Some(Directive {
                left: true,
                zero: true,
                width: 8,
                precision: Some(-3),
                conv: 'f',
                len: 7,
            })
        );
        assert_eq!(parse_directive("d").map(|d| d.len), Some(1));
        assert_eq!(parse_directive("12s").map(|d| d.width), Some(12));
        assert_eq!(parse_directive("z"), None);
        assert_eq!(parse_directive("5."), None);
        assert_eq!(parse_directive(""), None);

        assert_eq!(parse_directive("65535d").map(|d| d.width), Some(65535));
        assert_eq!(parse_directive(".-65535f").and_then(|d| d.precision), Some(-65535));
        assert_eq!(parse_directive("65536d"), None);
        assert_eq!(parse_directive("99999999999d"), None);
        assert_eq!(parse_directive(".65536f"), None);
        assert_eq!(parse_directive("5.99999999999s"), None);
    }

    #[test]
    fn test_oversized_fields_stay_verbatim() {
        assert_eq!(format("%99999999999d", &Value::from(1)), "%99999999999d");
        assert_eq!(format("[%.99999999999f]", &Value::from(1.5)), "[%.99999999999f]");
        assert_eq!(format("%-070000s|%d", &Value::from(3)), "%-070000s|3");
        assert_eq!(
            format_args(&[Value::from("%s %99999999999d"), Value::from("a"), Value::from(2)]),
            "a %99999999999d"
        );

        let wide = format("%65535d", &Value::from(7));
        assert_eq!(wide.len(), 65535);
        assert!(wide.ends_with(" 7"));
    }

    #[test]
    fn test_integers() {
        assert_eq!(format("%d", &Value::from(42)), "42");
        assert_eq!(format("%i", &Value::from("3.9")), "3");
        assert_eq!(format("[%5d]", &Value::from(42)), "[   42]");
        assert_eq!(format("[%-5d]", &Value::from(42)), "[42   ]");
        assert_eq!(format("[%05d]", &Value::from(-42)), "[-0042]");
        assert_eq!(format("%.3d", &Value::from(7)), "7");
        assert_eq!(format("%d", &Value::from("junk")), "0");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format("%5.2f", &Value::from(3.14159)), " 3.14");
        assert_eq!(format("%.0f", &Value::from(2.7)), "3");
        assert_eq!(format("%f", &Value::from(2)), "2.0");
        assert_eq!(format("%08.3f", &Value::from(-1.5)), "-001.500");
        assert_eq!(format("%8.3e", &Value::from(1500.0)), " 1.500E3");
        assert_eq!(format("%.-2f", &Value::from(1500.0)), "1.50E3");
        assert_eq!(format("%.1f", &Value::from("abc")), "NaN");
    }

    #[test]
    fn test_strings() {
        assert_eq!(format("%s!", &Value::from("hi")), "hi!");
        assert_eq!(format("|%-5s|", &Value::from("ab")), "|ab   |");
        assert_eq!(format("|%5s|", &Value::from("ab")), "|   ab|");
        assert_eq!(format("%.2s", &Value::from("abcdef")), "ab");
        assert_eq!(format("%.-2s", &Value::from("abcdef")), "ef");
        assert_eq!(format("%.9s", &Value::from("abc")), "abc");
        assert_eq!(format("%05s", &Value::from("ab")), "   ab");
    }

    #[test]
    fn test_vectors() {
        let pt = Value::from(Vec3::new(1.0, -2.0, 0.126));
        assert_eq!(format("%p", &pt), "{  1.00  -2.00   0.13}");
        assert_eq!(format("%4.1p", &pt), "{ 1.0 -2.0  0.1}");

        let plane = Value::from(Vec4::new(0.0, 0.0, 1.0, 2.0));
        assert_eq!(format("%q", &plane), "{  0.00   0.00   1.00   2.00}");

        // A point directive on anything else shows the argument's text.
        assert_eq!(format("%p", &Value::from("x")), "x");
        assert_eq!(format("%q", &pt), "{1.0 -2.0 0.126}");
    }

    #[test]
    fn test_literal_percents() {
        assert_eq!(format("100%%", &Value::from(1)), "100%");
        assert_eq!(format("%d%%", &Value::from(5)), "5%");
        assert_eq!(format("50% off", &Value::from(1)), "50% off");
        assert_eq!(format("%z", &Value::from(1)), "%z");
    }

    #[test]
    fn test_every_directive_uses_the_argument() {
        assert_eq!(format("%d/%s", &Value::from("12")), "12/12");
    }

    #[test]
    fn test_list_argument() {
        let list = strings(&["1", "2", "x"]);
        assert_eq!(format("n=%d", &list), "n=1\nn=2\nn=0");
        assert_eq!(format("%s", &strings(&[])), "");
    }

    #[test]
    fn test_format_args_counts() {
        assert_eq!(format_args(&[]), "");
        assert_eq!(format_args(&[Value::from("%d%%")]), "%d%%");
    }

    #[test]
    fn test_format_args() {
        let args = [
            Value::from("%s has %d atoms (%.1f%%)"),
            Value::from("water"),
            Value::from(3),
            Value::from(12.34),
        ];
        assert_eq!(format_args(&args), "water has 3 atoms (12.3%)");
    }

    #[test]
    fn test_format_args_missing() {
        let args = [Value::from("a %d b %d"), Value::from(1)];
        assert_eq!(format_args(&args), "a 1 b %d");
    }

    #[test]
    fn test_format_args_list() {
        let args = [Value::from("x=%d"), strings(&["1", "2"])];
        assert_eq!(format_args(&args), "x=1\n2\n");
    }
}
