//! Convenience macros for building checked-layer results.

/// Returns an `Ok` result holding a `Value`.  With no arguments the value is empty;
/// with one it is converted with `Value::from`; with more, they are passed to
/// `format!` and the text becomes the value.
///
/// # Example
///
/// ```
/// use molvar::script_ok;
/// use molvar::types::ScriptResult;
/// use molvar::Value;
///
/// fn answer() -> ScriptResult<Value> {
///     script_ok!(42)
/// }
///
/// assert_eq!(answer().map(|v| v.as_int()), Ok(42));
/// let greeting: ScriptResult<Value> = script_ok!("{}, {}", "hello", "world");
/// assert_eq!(greeting.map(|v| v.as_str()), Ok("hello, world".to_string()));
/// ```
#[macro_export]
macro_rules! script_ok {
    () => (
        Ok($crate::Value::empty())
    );
    ($arg:expr) => (
        Ok($crate::Value::from($arg))
    );
    ($($arg:tt)*) => (
        Ok($crate::Value::from(format!($($arg)*)))
    )
}

/// Returns an `Err` result holding a `ScriptError` of the named kind, with a
/// `format!`-style message.
///
/// # Example
///
/// ```
/// use molvar::script_err;
/// use molvar::types::{ErrorKind, ScriptResult};
///
/// fn lookup(name: &str) -> ScriptResult<()> {
///     script_err!(Range, "no such variable: \"{}\"", name)
/// }
///
/// let err = lookup("x").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Range);
/// assert_eq!(err.message(), "no such variable: \"x\"");
/// ```
#[macro_export]
macro_rules! script_err {
    ($kind:ident, $($arg:tt)*) => (
        Err($crate::types::ScriptError::new(
            $crate::types::ErrorKind::$kind,
            &format!($($arg)*),
        ))
    )
}
