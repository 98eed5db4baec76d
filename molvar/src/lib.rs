//! # molvar: the value system of a molecular-visualization scripting language
//!
//! This crate implements the runtime values of an embedded command language used to
//! drive a molecular viewer.  Every literal, expression result, variable, and function
//! argument the interpreter handles is a [`Value`].  The crate provides
//!
//! * The [`Value`] type itself, with its closed set of kinds: booleans, integers,
//!   decimals, strings, points, planes, matrices, atom and bond selections, lists, and
//!   hashes.
//! * The coercion rules that read any value as a boolean, integer, decimal, or string.
//! * 1-based item selection and slicing, shared by strings, lists, selections, and
//!   matrices, and indexed assignment.  See the [`slice`] module.
//! * Literal rendering and parsing, in the [`escape`] module.
//! * Conversion of external data into values, in the [`datum`] module.
//! * The `%`-directive formatter behind the language's `format()` function, in the
//!   [`format`] module.
//! * A minimal variable table, in the [`vars`] module.
//!
//! Values are single-threaded: a `Value` shares its payload by reference counting and
//! copies it on write.
//!
//! ```
//! use molvar::{Data, Value};
//! use molvar::value::are_equal;
//!
//! let pt = Value::from_literal("{1 2 3}");
//! assert_eq!(pt.type_name(), "point");
//! assert_eq!(pt.as_str(), "{1.0 2.0 3.0}");
//!
//! let list = Value::from(vec!["7".to_string(), "2.5".to_string()]);
//! assert_eq!(list.item(2).data(), &Data::Decimal(2.5));
//! assert_eq!(list.item(-1).data(), &Data::Int(7));
//!
//! assert!(are_equal(&Value::from("1.0"), &Value::from(1)));
//! ```
//!
//! [`Value`]: value/struct.Value.html
//! [`slice`]: slice/index.html
//! [`escape`]: escape/index.html
//! [`datum`]: datum/index.html
//! [`format`]: format/index.html
//! [`vars`]: vars/index.html

pub use crate::datum::Datum;
pub use crate::value::Data;
pub use crate::value::Value;
pub use crate::vars::Vars;

pub mod datum;
pub mod escape;
pub mod format;
pub mod geometry;
mod macros;
pub mod selection;
pub mod slice;
pub mod types;
pub mod util;
pub mod value;
pub mod vars;
