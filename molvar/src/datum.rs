//! Exchange of values with external data.
//!
//! The geometry code, the file readers, and the application hand data to the script
//! language in their own shapes: points, quaternions, arrays of numbers, lists of
//! mixed objects, nested maps.  A [`Datum`] names each shape the value system accepts,
//! and [`Value::from_datum`] converts it.  The conversion never fails; anything without
//! a more specific representation becomes a string.
//!
//! [`Value::to_datum`] goes the other way, handing a value back in its native shape.
//!
//! ```
//! use molvar::datum::Datum;
//! use molvar::geometry::Quaternion;
//! use molvar::Value;
//!
//! let q = Value::from_datum(Datum::Quaternion(Quaternion::new(0.5, 1.0, 2.0, 3.0)));
//! assert_eq!(q.as_str(), "{1.0 2.0 3.0 0.5}");
//!
//! let reals = Value::from_datum(Datum::Reals(vec![1.0, 2.5]));
//! assert_eq!(reals.as_str(), "1.0\n2.5");
//! ```
//!
//! [`Datum`]: enum.Datum.html
//! [`Value::from_datum`]: ../value/struct.Value.html#method.from_datum
//! [`Value::to_datum`]: ../value/struct.Value.html#method.to_datum

use crate::escape;
use crate::geometry::*;
use crate::selection::{BitSet, Selection};
use crate::types::*;
use crate::util::fmt_float;
use crate::value::{Data, Value};
use core::fmt;

/// An externally typed datum.
pub enum Datum {
    Null,
    Bool(bool),
    Int(ScriptInt),
    Real(ScriptFloat),
    /// Text; escaped point, plane, matrix, and selection literals are recognized.
    Text(String),
    Point(Vec3),
    Plane(Vec4),
    Quaternion(Quaternion),
    Matrix3(Mat3),
    Matrix4(Mat4),
    Bits(BitSet),
    /// A bond set and the atoms at its bonds' endpoints.
    BondBits(BitSet, BitSet),
    Strings(Vec<String>),
    Reals(Vec<ScriptFloat>),
    Ints(Vec<ScriptInt>),
    /// An ordered collection of arbitrary data.
    Items(Vec<Datum>),
    /// A mapping from names to arbitrary data.
    Map(Vec<(String, Datum)>),
    /// A value that is already a script value.
    Value(Value),
    /// Anything else, rendered through its `Display` implementation.
    Other(Box<dyn fmt::Display>),
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Datum({})", readable(self))
    }
}

impl Value {
    /// Converts an external datum to a value.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::datum::Datum;
    /// use molvar::Value;
    ///
    /// let items = Datum::Items(vec![Datum::Text("a".into()), Datum::Int(3), Datum::Bool(true)]);
    /// assert_eq!(Value::from_datum(items).escape(), "[\"a\", \"3\", \"true\"]");
    /// ```
    pub fn from_datum(datum: Datum) -> Value {
        match datum {
            Datum::Null => Value::empty(),
            Datum::Bool(flag) => Value::from(flag),
            Datum::Int(int) => Value::from(Data::Int(int)),
            Datum::Real(flt) => Value::from(flt),
            Datum::Text(text) => escape::unescape(&text).unwrap_or_else(|_| Value::from(text)),
            Datum::Point(pt) => Value::from(pt),
            Datum::Plane(plane) => Value::from(plane),
            Datum::Quaternion(q) => Value::from(q),
            Datum::Matrix3(m) => Value::from(m),
            Datum::Matrix4(m) => Value::from(m),
            Datum::Bits(bits) => Value::from(bits),
            Datum::BondBits(bits, atoms) => Value::from(Selection::bonds(bits, atoms)),
            Datum::Strings(list) => Value::from(list),
            Datum::Reals(reals) => {
                Value::from(reals.into_iter().map(fmt_float).collect::<ScriptList>())
            }
            Datum::Ints(ints) => {
                Value::from(ints.iter().map(|i| i.to_string()).collect::<ScriptList>())
            }
            Datum::Items(items) => Value::from(
                items
                    .into_iter()
                    .map(|item| match item {
                        Datum::Text(text) => text,
                        other => readable(&other),
                    })
                    .collect::<ScriptList>(),
            ),
            Datum::Map(entries) => {
                let mut hash = hash_new();
                for (key, item) in entries {
                    hash.insert(key, Value::from_datum(item));
                }
                Value::from(hash)
            }
            Datum::Value(value) => value,
            Datum::Other(obj) => Value::from(obj.to_string()),
        }
    }

    /// Converts the value to the external shape of its kind: a list becomes
    /// `Datum::Strings`, a hash a `Datum::Map` of converted entries, and so on.  A
    /// tagged value converts as the item it selects.
    ///
    /// Strings come back as `Datum::Text`, which `from_datum` reads as a literal when it
    /// can, so text such as `"{1 2 3}"` does not survive the round trip as a string.
    ///
    /// # Example
    ///
    /// ```
    /// use molvar::datum::Datum;
    /// use molvar::geometry::Vec3;
    /// use molvar::Value;
    ///
    /// let pt = Value::from(Vec3::new(1.0, 2.0, 3.0));
    /// assert!(matches!(pt.to_datum(), Datum::Point(_)));
    /// assert_eq!(Value::from_datum(pt.to_datum()), pt);
    ///
    /// let list = Value::from(vec!["a".to_string(), "7".to_string()]);
    /// assert!(matches!(list.select_item(2).to_datum(), Datum::Int(7)));
    /// ```
    pub fn to_datum(&self) -> Datum {
        let value = self.selected();

        match value.data() {
            Data::Bool(flag) => Datum::Bool(*flag),
            Data::Int(int) => Datum::Int(*int),
            Data::Decimal(flt) => Datum::Real(*flt),
            Data::Str(s) => Datum::Text(s.clone()),
            Data::Vec3(pt) => Datum::Point(*pt),
            Data::Vec4(plane) => Datum::Plane(*plane),
            Data::Mat3(m) => Datum::Matrix3(*m),
            Data::Mat4(m) => Datum::Matrix4(*m),
            Data::Selection(sel) => match sel.companion() {
                Some(atoms) if sel.is_bonds() => {
                    Datum::BondBits(sel.bits().clone(), atoms.clone())
                }
                _ => Datum::Bits(sel.bits().clone()),
            },
            Data::List(list) => Datum::Strings(list.clone()),
            Data::Hash(hash) => Datum::Map(
                hash.iter()
                    .map(|(key, item)| (key.clone(), item.to_datum()))
                    .collect(),
            ),
        }
    }
}

/// Renders a datum as readable text: text is kept verbatim, everything else is shown
/// as the literal of the value it converts to.
pub fn readable(datum: &Datum) -> String {
    match datum {
        Datum::Null => String::new(),
        Datum::Text(text) => text.clone(),
        Datum::Other(obj) => obj.to_string(),
        Datum::Bool(flag) => flag.to_string(),
        Datum::Int(int) => int.to_string(),
        Datum::Real(flt) => fmt_float(*flt),
        Datum::Point(pt) => escape::point(pt),
        Datum::Plane(plane) => escape::plane(plane),
        Datum::Quaternion(q) => escape::plane(&q.to_vec4()),
        Datum::Matrix3(m) => escape::matrix3(m),
        Datum::Matrix4(m) => escape::matrix4(m),
        Datum::Bits(bits) => escape::bit_set(bits, false),
        Datum::BondBits(bits, _) => escape::bit_set(bits, true),
        Datum::Strings(list) => Value::from(list.clone()).escape(),
        Datum::Reals(reals) => {
            let items: Vec<String> = reals.iter().map(|f| fmt_float(*f)).collect();
            format!("[{}]", items.join(", "))
        }
        Datum::Ints(ints) => {
            let items: Vec<String> = ints.iter().map(|i| i.to_string()).collect();
            format!("[{}]", items.join(", "))
        }
        Datum::Items(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Datum::Text(text) => escape::string(text),
                    other => readable(other),
                })
                .collect();
            format!("[{}]", items.join(", "))
        }
        Datum::Map(entries) => {
            let mut items: Vec<String> = entries
                .iter()
                .map(|(key, item)| {
                    let text = match item {
                        Datum::Text(text) => escape::string(text),
                        other => readable(other),
                    };
                    format!("{}: {}", escape::string(key), text)
                })
                .collect();
            items.sort();
            format!("{{ {} }}", items.join(", "))
        }
        Datum::Value(value) => value.escape(),
    }
}

impl From<bool> for Datum {
    fn from(flag: bool) -> Self {
        Datum::Bool(flag)
    }
}

impl From<ScriptFloat> for Datum {
    fn from(flt: ScriptFloat) -> Self {
        Datum::Real(flt)
    }
}

impl From<&str> for Datum {
    fn from(text: &str) -> Self {
        Datum::Text(text.to_string())
    }
}

impl From<String> for Datum {
    fn from(text: String) -> Self {
        Datum::Text(text)
    }
}

impl From<Vec3> for Datum {
    fn from(pt: Vec3) -> Self {
        Datum::Point(pt)
    }
}

impl From<Quaternion> for Datum {
    fn from(q: Quaternion) -> Self {
        Datum::Quaternion(q)
    }
}

impl From<BitSet> for Datum {
    fn from(bits: BitSet) -> Self {
        Datum::Bits(bits)
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        Datum::Value(value)
    }
}
