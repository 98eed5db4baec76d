//! Public Type Declarations
//!
//! This module defines a number of types used throughout the `molvar` public API.
//!
//! The most important of these is [`ScriptError`], the error type returned by the
//! *checked* layer of the crate: strict number parsing, literal parsing, and variable
//! lookup.  The value operations themselves (coercion, slicing, formatting) never fail;
//! they map a `ScriptError` to a well-defined fallback value instead.
//!
//! [`ScriptError`]: struct.ScriptError.html

use crate::value::Value;
use core::fmt;
use indexmap::IndexMap;

cfg_if::cfg_if! {
    if #[cfg(feature = "i64")] {
        /// The standard integer type for script code.  The `i64` feature widens it.
        pub type ScriptInt = i64;
    } else {
        /// The standard integer type for script code, 32 bits unless the `i64` feature
        /// is enabled.
        pub type ScriptInt = i32;
    }
}

/// The standard floating point type for script code.
pub type ScriptFloat = f64;

/// The payload of a `List` value: the language's only array aggregate is a list of
/// strings.
pub type ScriptList = Vec<String>;

/// The hasher used by the crate's hash tables.
pub type ScriptHasher = fnv::FnvBuildHasher;

/// The payload of a `Hash` value.  Iteration order is insertion order; every textual
/// rendering of a hash sorts by key.
pub type ScriptHash = IndexMap<String, Value, ScriptHasher>;

/// Creates an empty `ScriptHash`.
pub fn hash_new() -> ScriptHash {
    IndexMap::with_hasher(ScriptHasher::default())
}

/// The kind of a [`ScriptError`](struct.ScriptError.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text could not be parsed as the requested literal.
    Syntax,

    /// An index or name referred to nothing.
    Range,

    /// The value's kind doesn't support the operation.
    Type,
}

/// The error type for the checked layer of the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    kind: ErrorKind,
    message: String,
}

impl ScriptError {
    /// Creates a new error of the given kind.
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a new `Syntax` error.
    pub fn syntax(message: &str) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    /// Creates a new `Range` error.
    pub fn range(message: &str) -> Self {
        Self::new(ErrorKind::Range, message)
    }

    /// Creates a new `Type` error.
    pub fn type_error(message: &str) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    /// The error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScriptError {}

/// The result type of the checked layer.
pub type ScriptResult<T> = Result<T, ScriptError>;
