//! Indexing, slicing, and item assignment.
//!
//! Strings, lists, selections, and matrices share a single indexing scheme.  Indexes are
//! 1-based; an index of 0 means the last item, and negative indexes count back from
//! there, so that for `"testing"`:
//!
//! ```text
//! "testing"[2]      e
//! "testing"[0]      g
//! "testing"[-1]     n
//! "testing"[3][0]   sting
//! "testing"[-1][0]  ng
//! "testing"[0][-2]  g
//! ```
//!
//! Selecting happens in two steps.  The first index applied to a whole aggregate
//! only *tags* it with a cursor; the result shares the aggregate's payload.  A second
//! index (or a call to [`selected`]) resolves the range `[cursor, index]` and produces a
//! new value that never shares storage with the source.
//!
//! Matrices are indexed by row and column.  A positive index up to the matrix size
//! selects a row, a negative one a column, and an index of the form `row * 10 + col`
//! selects a single element:
//!
//! ```
//! use molvar::Value;
//! use molvar::geometry::Mat3;
//!
//! let m = Value::from(Mat3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]));
//! assert_eq!(m.item(23).as_decimal(), 6.0);
//! assert_eq!(m.item(2).as_str(), "4.0\n5.0\n6.0");
//! assert_eq!(m.item(-3).as_str(), "3.0\n6.0\n9.0");
//! assert_eq!(m.slice(1, 2).as_decimal(), 2.0);
//! ```
//!
//! [`selected`]: ../value/struct.Value.html#method.selected

use crate::geometry::{Mat3, Mat4};
use crate::selection::Selection;
use crate::types::*;
use crate::util::{fmt_float, to_float};
use crate::value::{Data, Value};
use std::borrow::Cow;

/// Matrix element indexes are written `row * ELEMENT_BASE + col`.
const ELEMENT_BASE: i64 = 10;

/// Assignment pads a string or list out to at most this many items.
const MAX_PADDED_LEN: usize = 1 << 24;

impl Value {
    /// Applies an index to the value.
    ///
    /// If the value has no cursor yet, the result is the same aggregate tagged with
    /// `index`; nothing is copied.  Otherwise the range from the cursor to `index` is
    /// resolved and a new value holding the selected items is returned.  Kinds other
    /// than strings, lists, selections, and matrices are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    ///
    /// let s = Value::from("testing");
    /// let tagged = s.select_item(3);
    /// assert!(tagged.shares_payload(&s));
    /// assert_eq!(tagged.select_item(0).as_str(), "sting");
    /// ```
    pub fn select_item(&self, index: ScriptInt) -> Value {
        if !self.is_indexable() {
            return self.clone();
        }

        match self.cursor() {
            None => self.with_cursor(Some(index)),
            Some(cursor) => self.resolve_range(cursor as i64, Some(index as i64)),
        }
    }

    /// Resolves a tagged value to the single item its cursor selects.  A value with no
    /// cursor is returned unchanged.
    pub fn selected(&self) -> Value {
        match self.cursor() {
            Some(cursor) if self.is_indexable() => self.resolve_range(cursor as i64, None),
            _ => self.clone(),
        }
    }

    /// Selects the single item at `index`.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::from("testing").item(-1).as_str(), "n");
    /// ```
    pub fn item(&self, index: ScriptInt) -> Value {
        self.select_item(index).selected()
    }

    /// Selects the items from `i1` through `i2`.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::from("testing").slice(1, 0).as_str(), "testing");
    /// assert_eq!(Value::from("testing").slice(-1, 0).as_str(), "ng");
    /// ```
    pub fn slice(&self, i1: ScriptInt, i2: ScriptInt) -> Value {
        self.select_item(i1).select_item(i2)
    }

    /// The selection a selection value denotes once its cursor, if any, is applied.
    pub(crate) fn resolved_selection(&self) -> Cow<'_, Selection> {
        match (self.data(), self.cursor()) {
            (Data::Selection(sel), None) => Cow::Borrowed(sel),
            (Data::Selection(_), Some(_)) => match self.selected().data() {
                Data::Selection(sel) => Cow::Owned(sel.clone()),
                _ => Cow::Owned(Selection::default()),
            },
            _ => Cow::Owned(Selection::default()),
        }
    }

    fn is_indexable(&self) -> bool {
        matches!(
            self.data(),
            Data::Str(_) | Data::List(_) | Data::Selection(_) | Data::Mat3(_) | Data::Mat4(_)
        )
    }

    // Resolves [i1, i2] against the payload.  `i2 == None` selects the single item i1.
    fn resolve_range(&self, i1: i64, i2: Option<i64>) -> Value {
        match self.data() {
            Data::Mat3(m) => matrix_item(i1, i2, Mat3::SIZE, |r, c| m.element(r, c), |i| {
                if i < 0 {
                    m.column((-1 - i) as usize).to_vec()
                } else {
                    m.row((i - 1) as usize).to_vec()
                }
            }),
            Data::Mat4(m) => matrix_item(i1, i2, Mat4::SIZE, |r, c| m.element(r, c), |i| {
                if i < 0 {
                    m.column((-1 - i) as usize).to_vec()
                } else {
                    m.row((i - 1) as usize).to_vec()
                }
            }),
            Data::Selection(sel) => {
                let len = if sel.is_focused() && !sel.is_bonds() {
                    1
                } else {
                    sel.cardinality() as i64
                };
                let (i1, i2) = clamp_range(i1, i2, len);

                // The copy keeps a bond selection's companion set.
                let mut out = sel.unfocused();
                if sel.is_focused() {
                    if i1 > 1 {
                        out.bits_mut().clear_all();
                    }
                } else {
                    let bits: Vec<usize> = out.bits().iter().collect();
                    for (n, bit) in bits.into_iter().enumerate() {
                        let rank = n as i64 + 1;
                        if rank < i1 || rank > i2 {
                            out.bits_mut().clear(bit);
                        }
                    }
                }
                Value::from(out)
            }
            Data::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let len = chars.len() as i64;
                let (i1, i2) = clamp_range(i1, i2, len);
                if i1 < 1 || i1 > len {
                    Value::empty()
                } else {
                    Value::from(chars[(i1 - 1) as usize..i2 as usize].iter().collect::<String>())
                }
            }
            Data::List(list) => {
                let len = list.len() as i64;
                let (i1, i2) = clamp_range(i1, i2, len);
                if i1 < 1 || i1 > len || i2 > len {
                    Value::empty()
                } else if i1 == i2 {
                    Value::from_literal(&list[(i1 - 1) as usize])
                } else {
                    Value::from(list[(i1 - 1) as usize..i2 as usize].to_vec())
                }
            }
            _ => self.clone(),
        }
    }

    /// Assigns `value` to the item selected by `selector`, in place.
    ///
    /// * Matrices: `row * 10 + col` sets one element to the value's decimal reading; a
    ///   row (positive) or column (negative) selector sets a whole row or column from a
    ///   list holding exactly one number per element.
    /// * Strings: replaces one character with the value's text, padding the string
    ///   with spaces if the selector is past its end.
    /// * Lists: replaces one item with the value's text, padding the list with empty
    ///   strings as needed.
    ///
    /// Returns false, leaving the value unchanged, for other kinds, for selectors
    /// that don't fit the matrix, and for string or list positions too far past the end
    /// to pad out to.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    ///
    /// let mut s = Value::from("cat");
    /// assert!(s.set_selected_value(1, &Value::from("b")));
    /// assert_eq!(s.as_str(), "bat");
    ///
    /// let mut n = Value::from(1);
    /// assert!(!n.set_selected_value(1, &Value::from(2)));
    /// ```
    pub fn set_selected_value(&mut self, selector: ScriptInt, value: &Value) -> bool {
        let selector = selector as i64;

        match self.data() {
            Data::Mat3(_) | Data::Mat4(_) => {
                let size = if matches!(self.data(), Data::Mat3(_)) {
                    Mat3::SIZE
                } else {
                    Mat4::SIZE
                };

                if let Some((row, col)) = element_index(selector, size) {
                    let flt = value.as_decimal();
                    match self.data_mut() {
                        Data::Mat3(m) => m.set_element(row, col, flt),
                        Data::Mat4(m) => m.set_element(row, col, flt),
                        _ => unreachable!(),
                    }
                    return true;
                }

                let data = match value.data() {
                    Data::List(list)
                        if selector != 0
                            && selector.unsigned_abs() as usize <= size
                            && list.len() == size =>
                    {
                        list.iter().map(|item| to_float(item)).collect::<Vec<_>>()
                    }
                    _ => return false,
                };

                match self.data_mut() {
                    Data::Mat3(m) => {
                        let data = [data[0], data[1], data[2]];
                        if selector > 0 {
                            m.set_row((selector - 1) as usize, &data);
                        } else {
                            m.set_column((-1 - selector) as usize, &data);
                        }
                    }
                    Data::Mat4(m) => {
                        let data = [data[0], data[1], data[2], data[3]];
                        if selector > 0 {
                            m.set_row((selector - 1) as usize, &data);
                        } else {
                            m.set_column((-1 - selector) as usize, &data);
                        }
                    }
                    _ => unreachable!(),
                }
                true
            }
            Data::Str(s) => {
                let mut chars: Vec<char> = s.chars().collect();
                let pos = match write_position(selector, chars.len()) {
                    Some(pos) => pos,
                    None => return false,
                };
                while pos >= chars.len() {
                    chars.push(' ');
                }

                let mut out: String = chars[..pos].iter().collect();
                out.push_str(&value.as_str());
                out.extend(chars[pos + 1..].iter());

                *self.data_mut() = Data::Str(out);
                true
            }
            Data::List(list) => {
                let pos = match write_position(selector, list.len()) {
                    Some(pos) => pos,
                    None => return false,
                };
                let text = value.as_str();
                if let Data::List(list) = self.data_mut() {
                    if list.len() <= pos {
                        list.resize(pos + 1, String::new());
                    }
                    list[pos] = text;
                }
                true
            }
            _ => false,
        }
    }
}

// Applies the shared range rules: i1 <= 0 counts from the end and is clamped to 1;
// i2 == 0 means the end, i2 < 0 counts from the end, and i2 is clamped to
// [i1, len].  A missing i2 selects the single item i1.
fn clamp_range(i1: i64, i2: Option<i64>, len: i64) -> (i64, i64) {
    let mut i1 = i1;
    if i1 <= 0 {
        i1 += len;
    }
    if i1 < 1 {
        i1 = 1;
    }

    let mut i2 = match i2 {
        None => i1,
        Some(0) => len,
        Some(i) if i < 0 => len + i,
        Some(i) => i,
    };

    if i2 > len {
        i2 = len;
    } else if i2 < i1 {
        i2 = i1;
    }

    (i1, i2)
}

// Decodes a `row * 10 + col` matrix index into 0-based (row, col).
fn element_index(index: i64, size: usize) -> Option<(usize, usize)> {
    let size = size as i64;
    if index <= size {
        return None;
    }
    let col = index % ELEMENT_BASE;
    let row = index / ELEMENT_BASE;
    if col >= 1 && col <= size && row >= 1 && row <= size {
        Some(((row - 1) as usize, (col - 1) as usize))
    } else {
        None
    }
}

fn matrix_item<E, V>(i1: i64, i2: Option<i64>, size: usize, element: E, vector: V) -> Value
where
    E: Fn(usize, usize) -> ScriptFloat,
    V: Fn(i64) -> Vec<ScriptFloat>,
{
    let len = size as i64;

    if i1 > len {
        return match element_index(i1, size) {
            Some((row, col)) => Value::from(element(row, col)),
            None => Value::empty(),
        };
    }
    if i1 == 0 || i1.unsigned_abs() > size as u64 {
        return Value::empty();
    }

    let data = vector(i1);
    match i2 {
        None => Value::from(data.iter().map(|f| fmt_float(*f)).collect::<ScriptList>()),
        Some(i) if i >= 1 && i <= len => Value::from(data[(i - 1) as usize]),
        Some(_) => Value::empty(),
    }
}

// The 0-based write position for an item assignment: 0 and negative selectors count
// from the end, and anything before the start writes the first item.
fn write_position(selector: i64, len: usize) -> Option<usize> {
    let mut pos = selector;
    if pos <= 0 {
        pos += len as i64;
    }
    let pos = pos.saturating_sub(1).max(0) as u64;
    if pos < MAX_PADDED_LEN as u64 {
        Some(pos as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec3;
    use crate::selection::BitSet;

    fn list(items: &[&str]) -> Value {
        Value::from(items.iter().map(|s| s.to_string()).collect::<ScriptList>())
    }

    fn m3() -> Value {
        Value::from(Mat3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]))
    }

    #[test]
    fn test_tagging_shares_payload() {
        let s = Value::from("testing");
        let tagged = s.select_item(2);
        assert!(tagged.shares_payload(&s));
        assert_eq!(tagged.cursor(), Some(2));
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn test_string_slices() {
        let s = Value::from("testing");
        assert_eq!(s.item(2).as_str(), "e");
        assert_eq!(s.item(0).as_str(), "g");
        assert_eq!(s.item(-1).as_str(), "n");
        assert_eq!(s.slice(3, 0).as_str(), "sting");
        assert_eq!(s.slice(-1, 0).as_str(), "ng");
        assert_eq!(s.slice(0, -2).as_str(), "g");
        assert_eq!(s.slice(1, 0).as_str(), "testing");
        assert_eq!(s.slice(2, 4).as_str(), "est");
        assert_eq!(s.slice(2, 100).as_str(), "esting");
        assert_eq!(s.item(9).as_str(), "");
        assert_eq!(s.slice(-100, 2).as_str(), "te");
    }

    #[test]
    fn test_slice_copies() {
        let s = Value::from("testing");
        let sub = s.slice(1, 0);
        assert!(!sub.shares_payload(&s));
        assert_eq!(sub.cursor(), None);
    }

    #[test]
    fn test_list_slices() {
        let l = list(&["1", "2.5", "x", "{1 2 3}"]);
        assert_eq!(l.item(1).data(), &Data::Int(1));
        assert_eq!(l.item(2).data(), &Data::Decimal(2.5));
        assert_eq!(l.item(3).data(), &Data::Str("x".into()));
        assert_eq!(l.item(4).data(), &Data::Vec3(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(l.item(0).type_name(), "point");
        assert_eq!(l.item(5).as_str(), "");

        let sub = l.slice(2, 3);
        assert_eq!(sub.data(), &Data::List(vec!["2.5".into(), "x".into()]));
        assert_eq!(l.slice(-1, 0).as_str(), "x\n{1 2 3}");
    }

    #[test]
    fn test_selection_slices() {
        let sel = Value::from(BitSet::from_indexes(vec![2, 4, 6, 8]));
        assert_eq!(sel.item(1).as_str(), "({2})");
        assert_eq!(sel.item(0).as_str(), "({8})");
        assert_eq!(sel.slice(2, 3).as_str(), "({4 6})");
        assert_eq!(sel.slice(-1, 0).as_str(), "({6 8})");

        // A tagged selection reads as the item it selects.
        assert_eq!(sel.select_item(2).as_int(), 1);
        assert_eq!(sel.as_int(), 4);
    }

    #[test]
    fn test_focused_selection() {
        let sel = Value::from(Selection::focused(5, BitSet::from_indexes(vec![5])));
        assert_eq!(sel.item(1).as_str(), "({5})");
        assert_eq!(sel.item(2).as_str(), "({})");
    }

    #[test]
    fn test_bond_selection_keeps_companion() {
        let sel = Value::from(Selection::bonds(
            BitSet::from_indexes(vec![0, 1, 2]),
            BitSet::from_indexes(vec![10, 11]),
        ));
        let sub = sel.slice(2, 0);
        match sub.data() {
            Data::Selection(out) => {
                assert!(out.is_bonds());
                assert_eq!(out.companion(), Some(&BitSet::from_indexes(vec![10, 11])));
                assert_eq!(out.bits(), &BitSet::from_indexes(vec![1, 2]));
            }
            _ => panic!("expected a selection"),
        }
    }

    #[test]
    fn test_matrix_items() {
        let m = m3();
        assert_eq!(m.item(23).data(), &Data::Decimal(6.0));
        assert_eq!(m.item(31).data(), &Data::Decimal(7.0));
        assert_eq!(m.item(1).data(), &Data::List(vec!["1.0".into(), "2.0".into(), "3.0".into()]));
        assert_eq!(m.item(-1).data(), &Data::List(vec!["1.0".into(), "4.0".into(), "7.0".into()]));
        assert_eq!(m.slice(-2, 3).as_decimal(), 8.0);

        assert_eq!(m.item(0).as_str(), "");
        assert_eq!(m.item(4).as_str(), "");
        assert_eq!(m.item(-4).as_str(), "");
        assert_eq!(m.item(34).as_str(), "");
        assert_eq!(m.item(40).as_str(), "");
        assert_eq!(m.slice(1, 4).as_str(), "");

        let m4 = Value::from(Mat4::identity());
        assert_eq!(m4.item(44).as_decimal(), 1.0);
        assert_eq!(m4.item(43).as_decimal(), 0.0);
    }

    #[test]
    fn test_extreme_indexes() {
        for m in [m3(), Value::from(Mat4::identity())] {
            assert_eq!(m.select_item(ScriptInt::MIN).selected().as_str(), "");
            assert_eq!(m.select_item(ScriptInt::MAX).selected().as_str(), "");
            assert_eq!(m.slice(ScriptInt::MIN, 1).as_str(), "");
            assert_eq!(m.slice(1, ScriptInt::MIN).as_str(), "");
        }

        let s = Value::from("abc");
        assert_eq!(s.item(ScriptInt::MIN).as_str(), "a");
        assert_eq!(s.slice(ScriptInt::MIN, ScriptInt::MAX).as_str(), "abc");
        assert_eq!(list(&["x", "y"]).item(ScriptInt::MIN).as_str(), "x");
    }

    #[test]
    fn test_set_extreme_positions() {
        let mut l = list(&["a"]);
        assert!(!l.set_selected_value(ScriptInt::MAX, &Value::from("z")));
        assert_eq!(l.data(), &Data::List(vec!["a".into()]));

        let mut s = Value::from("cat");
        assert!(!s.set_selected_value(ScriptInt::MAX, &Value::from("z")));
        assert_eq!(s.as_str(), "cat");

        let mut empty = Value::from("");
        assert!(empty.set_selected_value(ScriptInt::MIN, &Value::from("z")));
        assert_eq!(empty.as_str(), "z");

        let mut m = m3();
        assert!(!m.set_selected_value(ScriptInt::MIN, &list(&["1", "1", "1"])));
        assert_eq!(m, m3());
    }

    #[test]
    fn test_scalars_pass_through() {
        let v = Value::from(3);
        assert_eq!(v.select_item(1), v);
        assert_eq!(v.item(1).cursor(), None);
    }

    #[test]
    fn test_set_matrix() {
        let mut m = m3();
        let orig = m.clone();
        assert!(m.set_selected_value(12, &Value::from(-1.0)));
        assert_eq!(m.item(12).as_decimal(), -1.0);
        assert_eq!(orig.item(12).as_decimal(), 2.0);

        assert!(m.set_selected_value(2, &list(&["0", "0", "0"])));
        assert_eq!(m.item(2).as_str(), "0.0\n0.0\n0.0");

        assert!(m.set_selected_value(-3, &list(&["1", "1", "1"])));
        assert_eq!(m.item(-3).as_str(), "1.0\n1.0\n1.0");

        assert!(!m.set_selected_value(0, &list(&["1", "1", "1"])));
        assert!(!m.set_selected_value(2, &list(&["1", "1"])));
        assert!(!m.set_selected_value(5, &list(&["1", "1", "1"])));
        assert!(!m.set_selected_value(2, &Value::from(1)));
    }

    #[test]
    fn test_set_string() {
        let mut s = Value::from("cat");
        assert!(s.set_selected_value(0, &Value::from("r")));
        assert_eq!(s.as_str(), "car");
        assert!(s.set_selected_value(-1, &Value::from("u")));
        assert_eq!(s.as_str(), "cur");
        assert!(s.set_selected_value(6, &Value::from("s")));
        assert_eq!(s.as_str(), "cur  s");
        assert!(s.set_selected_value(-100, &Value::from("C")));
        assert_eq!(s.as_str(), "Cur  s");
    }

    #[test]
    fn test_set_list() {
        let mut l = list(&["a", "b"]);
        let orig = l.clone();
        assert!(l.set_selected_value(1, &Value::from(1.5)));
        assert!(l.set_selected_value(4, &Value::from(true)));
        assert_eq!(l.data(), &Data::List(vec!["1.5".into(), "b".into(), "".into(), "true".into()]));
        assert_eq!(orig.data(), &Data::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_set_unwritable() {
        for mut v in [
            Value::from(true),
            Value::from(1.0),
            Value::from(Vec3::default()),
            Value::from(BitSet::new()),
            Value::from(crate::types::hash_new()),
        ] {
            assert!(!v.set_selected_value(1, &Value::from(1)));
        }
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(3, Some(0), 7), (3, 7));
        assert_eq!(clamp_range(-1, None, 7), (6, 6));
        assert_eq!(clamp_range(0, Some(-2), 7), (7, 7));
        assert_eq!(clamp_range(-10, Some(2), 7), (1, 2));
        assert_eq!(clamp_range(9, None, 7), (9, 7));
    }
}
