//! Literal rendering and parsing.
//!
//! [`Value::escape`] renders a value as literal text that reads back as the same value,
//! which differs from its human-readable [`as_str`] form for strings, lists, and hashes.
//! [`unescape`] parses the literal forms of the geometric and selection kinds:
//!
//! | Kind              | Literal                         |
//! |-------------------|---------------------------------|
//! | point             | `{1.0 2.0 3.0}`                 |
//! | plane/quaternion  | `{0.0 0.0 1.0 -2.0}`            |
//! | 3x3 matrix        | `[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]` |
//! | atom selection    | `({0 2:5 9})`                   |
//! | bond selection    | `[{0 2:5 9}]`                   |
//!
//! [`Value::escape`]: ../value/struct.Value.html#method.escape
//! [`as_str`]: ../value/struct.Value.html#method.as_str
//! [`unescape`]: fn.unescape.html

use crate::geometry::*;
use crate::script_err;
use crate::selection::{BitSet, Selection, MAX_INDEX};
use crate::types::*;
use crate::util::{fmt_float, parse_float};
use crate::value::{Data, Value};

impl Value {
    /// Renders the value as a literal that reads back as the same value.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    ///
    /// assert_eq!(Value::from(true).escape(), "true");
    /// assert_eq!(Value::from("say \"hi\"").escape(), "\"say \\\"hi\\\"\"");
    /// assert_eq!(Value::from(vec!["a".to_string(), "b".to_string()]).escape(), "[\"a\", \"b\"]");
    /// ```
    pub fn escape(&self) -> String {
        match self.data() {
            Data::Bool(flag) => flag.to_string(),
            Data::Int(int) => int.to_string(),
            Data::Decimal(flt) => fmt_float(*flt),
            Data::Str(s) => string(s),
            Data::Vec3(pt) => point(pt),
            Data::Vec4(plane) => self::plane(plane),
            Data::Mat3(m) => matrix3(m),
            Data::Mat4(m) => matrix4(m),
            Data::Selection(sel) => bit_set(sel.bits(), sel.is_bonds()),
            Data::List(list) => {
                let items: Vec<String> = list.iter().map(|s| string(s)).collect();
                format!("[{}]", items.join(", "))
            }
            Data::Hash(hash) => {
                let mut keys: Vec<&String> = hash.keys().collect();
                keys.sort();
                let items: Vec<String> = keys
                    .iter()
                    .map(|key| format!("{}: {}", string(key), hash[*key].escape()))
                    .collect();
                format!("{{ {} }}", items.join(", "))
            }
        }
    }
}

/// Quotes a string, escaping backslashes, quotes, newlines, and tabs.
pub fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

pub fn point(pt: &Vec3) -> String {
    format!("{{{} {} {}}}", fmt_float(pt.x), fmt_float(pt.y), fmt_float(pt.z))
}

pub fn plane(plane: &Vec4) -> String {
    format!(
        "{{{} {} {} {}}}",
        fmt_float(plane.x),
        fmt_float(plane.y),
        fmt_float(plane.z),
        fmt_float(plane.w)
    )
}

fn matrix_rows<const N: usize>(rows: &[[ScriptFloat; N]; N]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|row| {
            let items: Vec<String> = row.iter().map(|f| fmt_float(*f)).collect();
            format!("[{}]", items.join(","))
        })
        .collect();
    format!("[{}]", rows.join(","))
}

pub fn matrix3(m: &Mat3) -> String {
    matrix_rows(&m.0)
}

pub fn matrix4(m: &Mat4) -> String {
    matrix_rows(&m.0)
}

/// Renders an index set, collapsing runs of consecutive indexes to `first:last`.  Atom
/// sets are wrapped in `({...})`, bond sets in `[{...}]`.
///
/// # Example
///
/// ```
/// use molvar::escape::bit_set;
/// use molvar::selection::BitSet;
///
/// let bs = BitSet::from_indexes(vec![0, 2, 3, 4, 5, 9]);
/// assert_eq!(bit_set(&bs, false), "({0 2:5 9})");
/// assert_eq!(bit_set(&bs, true), "[{0 2:5 9}]");
/// ```
pub fn bit_set(bs: &BitSet, bonds: bool) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut iter = bs.iter().peekable();

    while let Some(first) = iter.next() {
        let mut last = first;
        while iter.peek() == Some(&(last + 1)) {
            last += 1;
            iter.next();
        }
        if last == first {
            runs.push(first.to_string());
        } else {
            runs.push(format!("{}:{}", first, last));
        }
    }

    let (open, close) = if bonds { ("[{", "}]") } else { ("({", "})") };
    format!("{}{}{}", open, runs.join(" "), close)
}

/// Parses a point, plane, matrix, or selection literal.  Bond selections parsed from
/// text have an empty companion set.
///
/// # Example
///
/// ```
/// use molvar::escape::unescape;
///
/// assert_eq!(unescape("{1 2 3}").unwrap().type_name(), "point");
/// assert_eq!(unescape("{1, 2, 3, 4}").unwrap().type_name(), "point4");
/// assert_eq!(unescape("({1:3})").unwrap().as_int(), 3);
/// assert!(unescape("hello").is_err());
/// ```
pub fn unescape(text: &str) -> ScriptResult<Value> {
    let text = text.trim();

    if let Some(body) = strip_delims(text, "({", "})") {
        return Ok(Value::from(parse_indexes(body)?));
    }

    if let Some(body) = strip_delims(text, "[{", "}]") {
        return Ok(Value::from(Selection::bonds(parse_indexes(body)?, BitSet::new())));
    }

    if let Some(body) = strip_delims(text, "[[", "]]") {
        let nums = parse_numbers(body, &['[', ']', ','])?;
        return match nums.len() {
            9 => {
                let mut m = Mat3::default();
                for (i, f) in nums.iter().enumerate() {
                    m.set_element(i / 3, i % 3, *f);
                }
                Ok(Value::from(m))
            }
            16 => {
                let mut m = Mat4::default();
                for (i, f) in nums.iter().enumerate() {
                    m.set_element(i / 4, i % 4, *f);
                }
                Ok(Value::from(m))
            }
            _ => script_err!(Syntax, "invalid matrix literal: \"{}\"", text),
        };
    }

    if let Some(body) = strip_delims(text, "{", "}") {
        let nums = parse_numbers(body, &[','])?;
        return match nums[..] {
            [x, y, z] => Ok(Value::from(Vec3::new(x, y, z))),
            [x, y, z, w] => Ok(Value::from(Vec4::new(x, y, z, w))),
            _ => script_err!(Syntax, "invalid point literal: \"{}\"", text),
        };
    }

    script_err!(Syntax, "not a literal: \"{}\"", text)
}

fn strip_delims<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    if text.len() >= open.len() + close.len() {
        text.strip_prefix(open)?.strip_suffix(close)
    } else {
        None
    }
}

// Parses the numbers in a body, treating whitespace and the given characters as
// separators.
fn parse_numbers(body: &str, separators: &[char]) -> ScriptResult<Vec<ScriptFloat>> {
    body.split(|c: char| c.is_whitespace() || separators.contains(&c))
        .filter(|tok| !tok.is_empty())
        .map(parse_float)
        .collect()
}

// Parses the body of a selection literal: indexes and `first:last` runs.
fn parse_indexes(body: &str) -> ScriptResult<BitSet> {
    let mut bs = BitSet::new();

    for tok in body.split_whitespace() {
        match tok.split_once(':') {
            Some((first, last)) => {
                let first = parse_index(first)?;
                let last = parse_index(last)?;
                bs.set_range(first, last);
            }
            None => bs.set(parse_index(tok)?),
        }
    }

    Ok(bs)
}

// Indexes are script integers, and must be in `0..=MAX_INDEX`.
fn parse_index(tok: &str) -> ScriptResult<usize> {
    match tok.parse::<ScriptInt>() {
        Ok(index) if index >= 0 && index as u64 <= MAX_INDEX as u64 => Ok(index as usize),
        Ok(_) => script_err!(Syntax, "selection index out of range: \"{}\"", tok),
        Err(_) => script_err!(Syntax, "invalid selection index: \"{}\"", tok),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hash_new;
    use crate::value::are_equal;

    #[test]
    fn test_escape_scalars() {
        assert_eq!(Value::from(false).escape(), "false");
        assert_eq!(Value::from(-3).escape(), "-3");
        assert_eq!(Value::from(0.5).escape(), "0.5");
        assert_eq!(Value::from("a\tb\nc\\").escape(), "\"a\\tb\\nc\\\\\"");
    }

    #[test]
    fn test_escape_geometry() {
        assert_eq!(Value::from(Vec3::new(1.0, -2.5, 0.0)).escape(), "{1.0 -2.5 0.0}");
        assert_eq!(
            Value::from(Quaternion::new(1.0, 0.0, 0.0, 0.0)).escape(),
            "{0.0 0.0 0.0 1.0}"
        );
        assert_eq!(
            Value::from(Mat3::identity()).escape(),
            "[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]]"
        );
    }

    #[test]
    fn test_escape_aggregates() {
        assert_eq!(bit_set(&BitSet::new(), false), "({})");
        assert_eq!(bit_set(&BitSet::from_indexes(vec![1, 2]), false), "({1:2})");

        let mut hash = hash_new();
        hash.insert("b".into(), Value::from("x"));
        hash.insert("a".into(), Value::from(1));
        assert_eq!(Value::from(hash).escape(), "{ \"a\": 1, \"b\": \"x\" }");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(
            unescape(" {1 2 3} ").unwrap().data(),
            &Data::Vec3(Vec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(
            unescape("[{1 3:4}]").unwrap().data(),
            &Data::Selection(Selection::bonds(
                BitSet::from_indexes(vec![1, 3, 4]),
                BitSet::new()
            ))
        );
        assert_eq!(unescape("({})").unwrap().as_int(), 0);

        assert!(unescape("{1 2}").is_err());
        assert!(unescape("{a b c}").is_err());
        assert!(unescape("({1 x})").is_err());
        assert!(unescape("[[1,2],[3,4]]").is_err());
        assert!(unescape("{}").is_err());
        assert!(unescape("").is_err());
    }

    #[test]
    fn test_unescape_index_limits() {
        let top = format!("({{{}}})", MAX_INDEX);
        match unescape(&top).unwrap().data() {
            Data::Selection(sel) => assert!(sel.bits().get(MAX_INDEX)),
            other => panic!("expected a selection, got {:?}", other),
        }

        let cases = [
            "({18446744073709551615})",
            "({99999999999})",
            "({16777216})",
            "({0:99999999999})",
            "({0:16777216})",
            "({-1})",
            "({-3:2})",
            "[{4294967296}]",
        ];
        for text in cases {
            let err = unescape(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{}", text);
        }
        assert_eq!(
            unescape("({-1})").unwrap_err().message(),
            "selection index out of range: \"-1\""
        );
    }

    #[test]
    fn test_oversized_selection_reads_as_text() {
        let text = "({18446744073709551615})";
        assert_eq!(Value::from_literal(text).data(), &Data::Str(text.into()));

        let list = Value::from(vec![text.to_string()]);
        assert_eq!(list.item(1).data(), &Data::Str(text.into()));
        assert!(list.to_bit_set().is_none());
    }

    #[test]
    fn test_round_trip() {
        let values = [
            Value::from(Vec3::new(0.1, 2.0, -3.25)),
            Value::from(Vec4::new(1.0, 0.0, 0.0, 0.5)),
            Value::from(Mat3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.5]])),
            Value::from(Mat4::identity()),
            Value::from(BitSet::from_indexes(vec![0, 1, 2, 7, 100])),
        ];

        for value in values {
            let back = unescape(&value.escape()).unwrap();
            assert_eq!(back, value);
            assert!(are_equal(&back, &value));
        }
    }
}
