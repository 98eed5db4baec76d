//! The Value Type
//!
//! The [`Value`] struct is the standard representation of a data value in the scripting
//! language.  Every literal, every intermediate result of an expression, every variable,
//! and every function argument is a `Value`.
//!
//! # Kinds of Value
//!
//! A `Value` is one of a closed set of kinds, given by the [`Data`] enum: booleans,
//! integers, decimals, strings, 3-vectors, 4-vectors (planes and quaternions),
//! 3x3 and 4x4 matrices, selections (index sets), lists of strings, and hashes mapping
//! names to values.
//!
//! # Coercion
//!
//! Any value can be read as any of the four scalar types, using [`as_bool`],
//! [`as_int`], [`as_decimal`], and [`as_str`].  These conversions never fail: text that
//! isn't a number reads as `NaN` (and so as `0` and `false`), and kinds with no
//! sensible reading produce `0`, `false`, or the empty string.
//!
//! ```
//! use molvar::Value;
//!
//! let val = Value::from("7");
//! assert_eq!(val.as_int(), 7);
//! assert!(val.as_bool());
//!
//! let bad = Value::from("seven");
//! assert!(bad.as_decimal().is_nan());
//! assert_eq!(bad.as_int(), 0);
//! assert!(!bad.as_bool());
//! ```
//!
//! # Sharing and Copying
//!
//! The payload of a `Value` is reference counted, so cloning a `Value` is cheap.  The
//! payload is never modified while it is shared: every mutation copies a shared payload
//! first.  Consequently, a `Value` behaves like a plain value type; changing one copy
//! never changes another.
//!
//! # The Cursor
//!
//! A string, list, selection, or matrix may carry a *cursor*: an index marking the value
//! as referring to one of its items rather than to the whole aggregate.  See the
//! [`slice`](../slice/index.html) module.
//!
//! [`Value`]: struct.Value.html
//! [`Data`]: enum.Data.html
//! [`as_bool`]: struct.Value.html#method.as_bool
//! [`as_int`]: struct.Value.html#method.as_int
//! [`as_decimal`]: struct.Value.html#method.as_decimal
//! [`as_str`]: struct.Value.html#method.as_str

use crate::escape;
use crate::geometry::*;
use crate::selection::{BitSet, Selection, MAX_INDEX};
use crate::types::*;
use crate::util::{fmt_float, parse_float, to_float, truncate};
use core::fmt;
use std::rc::Rc;

/// Vectors and matrices whose numeric reading is within this distance of zero are
/// false.
const TRUTH_THRESHOLD: ScriptFloat = 1e-4;

/// The tolerance used by [`are_equal`](fn.are_equal.html).
pub const EQUALITY_EPSILON: ScriptFloat = 1e-6;

const FLAG_CAN_INCREMENT: u8 = 1;
const FLAG_LOCAL: u8 = 2;

/// The payload of a [`Value`](struct.Value.html).
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Bool(bool),
    Int(ScriptInt),
    Decimal(ScriptFloat),
    Str(String),
    Vec3(Vec3),
    /// A plane, axis-angle, or quaternion, scalar component last.
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
    Selection(Selection),
    List(ScriptList),
    Hash(ScriptHash),
}

/// The `Value` type.  See [the module level documentation](index.html) for more.
#[derive(Clone, Debug)]
pub struct Value {
    data: Rc<Data>,

    // None: the value denotes the whole aggregate.  Some(i): it denotes item i, 1-based,
    // with 0 and negative indexes counting from the end.
    cursor: Option<ScriptInt>,

    flags: u8,

    name: Option<Rc<str>>,
}

impl Value {
    //--------------------------------------------------------------------------------------------
    // Construction

    /// Creates a value from its payload.
    pub fn new(data: Data) -> Self {
        Self {
            data: Rc::new(data),
            cursor: None,
            flags: FLAG_LOCAL,
            name: None,
        }
    }

    /// Returns the empty string value.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::empty().as_str(), "");
    /// ```
    pub fn empty() -> Self {
        Self::new(Data::Str(String::new()))
    }

    /// Creates a value that shares this value's payload but carries the given cursor.
    /// The new value has fresh flags and no name.
    pub(crate) fn with_cursor(&self, cursor: Option<ScriptInt>) -> Self {
        Self {
            data: Rc::clone(&self.data),
            cursor,
            flags: FLAG_LOCAL,
            name: None,
        }
    }

    /// Converts text to the most specific value it denotes: an escaped point, plane,
    /// matrix, or selection literal becomes that kind; `true` and `false` become
    /// booleans; strict numbers become integers (no decimal point) or decimals; anything
    /// else remains a string.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::{Data, Value};
    ///
    /// assert_eq!(Value::from_literal("12").data(), &Data::Int(12));
    /// assert_eq!(Value::from_literal("1.5").data(), &Data::Decimal(1.5));
    /// assert_eq!(Value::from_literal("FALSE").data(), &Data::Bool(false));
    /// assert_eq!(Value::from_literal("{1 2 3}").type_name(), "point");
    /// assert_eq!(Value::from_literal("12a").data(), &Data::Str("12a".into()));
    /// ```
    pub fn from_literal(text: &str) -> Value {
        if let Ok(value) = escape::unescape(text) {
            return value;
        }

        if text.eq_ignore_ascii_case("true") {
            return Value::from(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Value::from(false);
        }

        match parse_float(text) {
            Ok(flt) if !text.contains('.') => Value::new(Data::Int(truncate(flt))),
            Ok(flt) => Value::new(Data::Decimal(flt)),
            Err(_) => Value::from(text),
        }
    }

    //--------------------------------------------------------------------------------------------
    // Inspection

    /// The value's payload.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// The payload, copied first if it is shared.
    pub(crate) fn data_mut(&mut self) -> &mut Data {
        Rc::make_mut(&mut self.data)
    }

    /// The value's cursor, or `None` if the value denotes its whole aggregate.
    pub fn cursor(&self) -> Option<ScriptInt> {
        self.cursor
    }

    /// Whether this value and the other share the same payload.
    pub fn shares_payload(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// The script-level name of the value's kind.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::from(true).type_name(), "boolean");
    /// assert_eq!(Value::from(1.5).type_name(), "decimal");
    /// assert_eq!(Value::from(vec!["a".to_string()]).type_name(), "array");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match &*self.data {
            Data::Bool(_) => "boolean",
            Data::Int(_) => "integer",
            Data::Decimal(_) => "decimal",
            Data::Str(_) => "string",
            Data::Vec3(_) => "point",
            Data::Vec4(_) => "point4",
            Data::Mat3(_) => "matrix3f",
            Data::Mat4(_) => "matrix4f",
            Data::Selection(sel) if sel.is_bonds() => "bondset",
            Data::Selection(_) => "bitset",
            Data::List(_) => "array",
            Data::Hash(_) => "hash",
        }
    }

    /// The value's size: the item count of an aggregate, or a negative code
    /// identifying a scalar kind.
    pub fn size(&self) -> ScriptInt {
        match &*self.data {
            Data::Bool(_) => -1,
            Data::Int(_) => -2,
            Data::Decimal(_) => -4,
            Data::Vec3(_) => -8,
            Data::Vec4(_) => -16,
            Data::Mat3(_) => -32,
            Data::Mat4(_) => -64,
            Data::Str(s) => s.chars().count() as ScriptInt,
            Data::Selection(_) => self.resolved_selection().cardinality() as ScriptInt,
            Data::List(list) => match self.cursor {
                None => list.len() as ScriptInt,
                Some(_) => self.selected().size(),
            },
            Data::Hash(hash) => hash.len() as ScriptInt,
        }
    }

    //--------------------------------------------------------------------------------------------
    // Coercion

    /// Reads the value as a boolean.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert!(Value::from("true").as_bool());
    /// assert!(!Value::from("0.0").as_bool());
    /// assert!(Value::from(-2).as_bool());
    /// ```
    pub fn as_bool(&self) -> bool {
        match &*self.data {
            Data::Bool(flag) => *flag,
            Data::Int(int) => *int != 0,
            Data::Decimal(_) | Data::Str(_) | Data::List(_) => {
                let flt = self.as_decimal();
                !flt.is_nan() && flt != 0.0
            }
            Data::Selection(_) => self.as_int() != 0,
            Data::Vec3(_) | Data::Vec4(_) | Data::Mat3(_) | Data::Mat4(_) => {
                self.as_decimal().abs() > TRUTH_THRESHOLD
            }
            Data::Hash(_) => false,
        }
    }

    /// Reads the value as an integer, truncating decimals toward zero.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::from("-3.9").as_int(), -3);
    /// assert_eq!(Value::from(true).as_int(), 1);
    /// ```
    pub fn as_int(&self) -> ScriptInt {
        match &*self.data {
            Data::Bool(flag) => *flag as ScriptInt,
            Data::Int(int) => *int,
            Data::Selection(_) => self.resolved_selection().cardinality() as ScriptInt,
            Data::Hash(_) => 0,
            _ => truncate(self.as_decimal()),
        }
    }

    /// Reads the value as a decimal.
    ///
    /// Points read as their distance from the origin, planes as the origin's signed
    /// distance from the plane, and matrices as the distance from the origin of the
    /// transformed origin.  A whole list reads as its length.
    pub fn as_decimal(&self) -> ScriptFloat {
        match &*self.data {
            Data::Bool(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            Data::Int(int) => *int as ScriptFloat,
            Data::Decimal(flt) => *flt,
            Data::Str(_) => to_float(&self.as_str()),
            Data::List(list) => match self.cursor {
                None => list.len() as ScriptFloat,
                Some(_) => to_float(&self.as_str()),
            },
            Data::Selection(_) => self.as_int() as ScriptFloat,
            Data::Vec3(pt) => pt.length(),
            Data::Vec4(plane) => plane.distance_to_plane(&Vec3::default()),
            Data::Mat3(m) => m.transform(&Vec3::default()).length(),
            Data::Mat4(m) => m.transform(&Vec3::default()).length(),
            Data::Hash(_) => 0.0,
        }
    }

    /// Reads the value as human-readable text.
    ///
    /// A whole list reads as its items joined by newlines; a hash reads as sorted
    /// `key<TAB>:<TAB>value` lines.  A string or list with its cursor set reads as the
    /// selected item, or the empty string if the cursor is out of range.
    ///
    /// Newlines separate list items rather than terminate them, so the last item has no
    /// trailing newline.  Hash lines, and list text that ends every item with `"\n"`,
    /// do end in one; compare with `trim_end` if both forms must match.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// assert_eq!(Value::from(false).as_str(), "false");
    /// assert_eq!(Value::from(2.0).as_str(), "2.0");
    /// assert_eq!(Value::from(vec!["a".to_string(), "b".to_string()]).as_str(), "a\nb");
    /// assert!(!Value::from(vec!["a".to_string()]).as_str().ends_with('\n'));
    /// ```
    pub fn as_str(&self) -> String {
        match &*self.data {
            Data::Bool(flag) => flag.to_string(),
            Data::Int(int) => int.to_string(),
            Data::Decimal(flt) => fmt_float(*flt),
            Data::Str(s) => match self.cursor {
                None => s.clone(),
                Some(i) => {
                    let len = s.chars().count();
                    match resolve_cursor(i, len) {
                        Some(pos) => s.chars().nth(pos).map(String::from).unwrap_or_default(),
                        None => String::new(),
                    }
                }
            },
            Data::Vec3(pt) => escape::point(pt),
            Data::Vec4(plane) => escape::plane(plane),
            Data::Mat3(m) => escape::matrix3(m),
            Data::Mat4(m) => escape::matrix4(m),
            Data::Selection(sel) => {
                escape::bit_set(self.resolved_selection().bits(), sel.is_bonds())
            }
            Data::List(list) => match self.cursor {
                None => list.join("\n"),
                Some(i) => match resolve_cursor(i, list.len()) {
                    Some(pos) => list[pos].clone(),
                    None => String::new(),
                },
            },
            Data::Hash(hash) => hash_to_string(hash),
        }
    }

    /// Reads the value as a number for arithmetic: the result is an `Int` or a
    /// `Decimal` value.
    ///
    /// Strings containing a decimal point read as decimals, other strings as truncated
    /// integers.  Kinds other than scalars read as integers when their decimal reading is
    /// integral.
    pub fn as_number(&self) -> Value {
        let data = match &*self.data {
            Data::Int(int) => Data::Int(*int),
            Data::Decimal(flt) => Data::Decimal(*flt),
            Data::Bool(flag) => Data::Int(*flag as ScriptInt),
            Data::Str(s) => {
                if s.contains('.') {
                    Data::Decimal(to_float(s))
                } else {
                    Data::Int(truncate(to_float(s)))
                }
            }
            _ => {
                let flt = self.as_decimal();
                if flt.is_finite()
                    && flt.fract() == 0.0
                    && flt >= ScriptInt::MIN as ScriptFloat
                    && flt <= ScriptInt::MAX as ScriptFloat
                {
                    Data::Int(flt as ScriptInt)
                } else {
                    Data::Decimal(flt)
                }
            }
        };
        Value::new(data)
    }

    /// The index set a value denotes, if any: the selected items of a selection, or the
    /// union of a list of selection literals and integer indexes in `0..=MAX_INDEX`.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    /// use molvar::selection::BitSet;
    ///
    /// let list = Value::from(vec!["({1 3})".to_string(), "5".to_string()]);
    /// assert_eq!(list.to_bit_set(), Some(BitSet::from_indexes(vec![1, 3, 5])));
    /// assert_eq!(Value::from("x").to_bit_set(), None);
    /// ```
    pub fn to_bit_set(&self) -> Option<BitSet> {
        match &*self.data {
            Data::Selection(_) => Some(self.resolved_selection().bits().clone()),
            Data::List(list) => {
                let mut bs = BitSet::new();
                for item in list {
                    match Value::from_literal(item).data() {
                        Data::Selection(sel) => bs.union_with(sel.bits()),
                        Data::Int(index) if *index >= 0 && *index as u64 <= MAX_INDEX as u64 => {
                            bs.set(*index as usize)
                        }
                        _ => return None,
                    }
                }
                Some(bs)
            }
            _ => None,
        }
    }

    //--------------------------------------------------------------------------------------------
    // Hash Access

    /// Looks up a key in a hash value.  Returns `None` for missing keys and for values
    /// that aren't hashes.
    pub fn get_key(&self, key: &str) -> Option<Value> {
        match &*self.data {
            Data::Hash(hash) => hash.get(key).cloned(),
            _ => None,
        }
    }

    /// Sets a key in a hash value.  Returns false if the value isn't a hash.
    pub fn set_key(&mut self, key: &str, value: Value) -> bool {
        match self.data_mut() {
            Data::Hash(hash) => {
                hash.insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    //--------------------------------------------------------------------------------------------
    // Variable Flags

    /// Marks the value as bound to the named variable, which makes it incrementable.
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(Rc::from(name));
        self.flags |= FLAG_CAN_INCREMENT;
    }

    /// Marks the value as global rather than local.
    pub fn set_global(&mut self) {
        self.flags &= !FLAG_LOCAL;
    }

    /// The name of the variable the value is bound to, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether `++` and `+=` may update the value in place.
    pub fn can_increment(&self) -> bool {
        self.flags & FLAG_CAN_INCREMENT != 0
    }

    pub fn is_local(&self) -> bool {
        self.flags & FLAG_LOCAL != 0
    }

    /// Adds `n` to the value in place.  Integers stay integers and decimals stay
    /// decimals; any other kind is first read as a number (see
    /// [`as_number`](#method.as_number)).
    ///
    /// Returns false, leaving the value unchanged, unless the value is bound to a
    /// variable.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::Value;
    ///
    /// let mut val = Value::from(5);
    /// assert!(!val.increment(1));
    ///
    /// val.set_name("count");
    /// assert!(val.increment(2));
    /// assert_eq!(val.as_int(), 7);
    /// ```
    pub fn increment(&mut self, n: ScriptInt) -> bool {
        if !self.can_increment() {
            return false;
        }

        let number = match &*self.data {
            Data::Int(_) | Data::Decimal(_) => None,
            _ => Some(self.as_number()),
        };

        if let Some(number) = number {
            self.data = Rc::clone(&number.data);
            self.cursor = None;
        }

        match self.data_mut() {
            Data::Int(int) => *int = int.wrapping_add(n),
            Data::Decimal(flt) => *flt += n as ScriptFloat,
            _ => unreachable!("as_number always yields a number"),
        }

        true
    }
}

/// Resolves a 1-based cursor against a length, counting from the end for 0 and
/// negative cursors.  Returns the 0-based position, if it's in range.
fn resolve_cursor(cursor: ScriptInt, len: usize) -> Option<usize> {
    let len = len as i64;
    let mut i = cursor as i64;
    if i <= 0 {
        i += len;
    }
    if i < 1 || i > len {
        None
    } else {
        Some((i - 1) as usize)
    }
}

fn hash_to_string(hash: &ScriptHash) -> String {
    let mut keys: Vec<&String> = hash.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        let text = hash[key].as_str();
        out.push_str(key);
        out.push_str("\t:");
        if text.contains('\n') {
            // Nested multi-line values are indented one level.
            for line in text.lines() {
                out.push_str("\n\t");
                out.push_str(line);
            }
        } else {
            out.push('\t');
            out.push_str(&text);
        }
        out.push('\n');
    }
    out
}

/// Compares two values loosely, as the script language's `==` does: strings compare
/// case-insensitively, points and planes by distance, and everything else by decimal
/// reading, within [`EQUALITY_EPSILON`](constant.EQUALITY_EPSILON.html).
///
/// # Example
///
/// ```
/// use molvar::value::are_equal;
/// use molvar::Value;
///
/// assert!(are_equal(&Value::from("ABC"), &Value::from("abc")));
/// assert!(are_equal(&Value::from(1.0), &Value::from(1.0000001)));
/// assert!(!are_equal(&Value::from(1.0), &Value::from(1.1)));
/// assert!(are_equal(&Value::from(2), &Value::from("2.0")));
/// ```
pub fn are_equal(a: &Value, b: &Value) -> bool {
    match (a.data(), b.data()) {
        (Data::Str(_), Data::Str(_)) => a.as_str().to_lowercase() == b.as_str().to_lowercase(),
        (Data::Vec3(p1), Data::Vec3(p2)) => p1.distance(p2) < EQUALITY_EPSILON,
        (Data::Vec4(p1), Data::Vec4(p2)) => p1.distance(p2) < EQUALITY_EPSILON,
        _ => (a.as_decimal() - b.as_decimal()).abs() < EQUALITY_EPSILON,
    }
}

/// Concatenates two values as lists.  A list contributes its items; any other value
/// contributes the lines of its text.
pub fn concat_lists(a: &Value, b: &Value) -> ScriptList {
    let mut out = ScriptList::new();
    for value in [a, b] {
        match value.data() {
            Data::List(list) => out.extend(list.iter().cloned()),
            _ => out.extend(value.as_str().split('\n').map(String::from)),
        }
    }
    out
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

/// Structural equality: same kind, same payload, same cursor.  Use
/// [`are_equal`](fn.are_equal.html) for the script language's loose comparison.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && (self.shares_payload(other) || self.data == other.data)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        Value::new(data)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::new(Data::Bool(flag))
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Value::new(Data::Int(int as ScriptInt))
    }
}

#[cfg(feature = "i64")]
impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Value::new(Data::Int(int))
    }
}

impl From<ScriptFloat> for Value {
    fn from(flt: ScriptFloat) -> Self {
        Value::new(Data::Decimal(flt))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::new(Data::Str(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::new(Data::Str(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::new(Data::Str(s.clone()))
    }
}

impl From<Vec3> for Value {
    fn from(pt: Vec3) -> Self {
        Value::new(Data::Vec3(pt))
    }
}

impl From<Vec4> for Value {
    fn from(plane: Vec4) -> Self {
        Value::new(Data::Vec4(plane))
    }
}

impl From<Quaternion> for Value {
    fn from(q: Quaternion) -> Self {
        Value::new(Data::Vec4(q.to_vec4()))
    }
}

impl From<Mat3> for Value {
    fn from(m: Mat3) -> Self {
        Value::new(Data::Mat3(m))
    }
}

impl From<Mat4> for Value {
    fn from(m: Mat4) -> Self {
        Value::new(Data::Mat4(m))
    }
}

impl From<BitSet> for Value {
    fn from(bits: BitSet) -> Self {
        Value::new(Data::Selection(Selection::atoms(bits)))
    }
}

impl From<Selection> for Value {
    fn from(sel: Selection) -> Self {
        Value::new(Data::Selection(sel))
    }
}

impl From<ScriptList> for Value {
    fn from(list: ScriptList) -> Self {
        Value::new(Data::List(list))
    }
}

impl From<ScriptHash> for Value {
    fn from(hash: ScriptHash) -> Self {
        Value::new(Data::Hash(hash))
    }
}
