//! The variable table.
//!
//! A `Vars` maps variable names to values.  Binding a value to a name is what makes it
//! incrementable: `++`, `+=`, and indexed assignment update a bound value in place,
//! while any other value is a temporary.
//!
//! Variable names are case-insensitive.
//!
//! ```
//! use molvar::vars::Vars;
//! use molvar::Value;
//!
//! let mut vars = Vars::new();
//! vars.set("Count", Value::from(1));
//! assert!(vars.increment("count", 2));
//! assert_eq!(vars.get("COUNT").map(|v| v.as_int()), Ok(3));
//! assert!(vars.get("missing").is_err());
//! ```

use crate::script_err;
use crate::types::*;
use crate::value::Value;
use indexmap::IndexMap;

/// A table of named variables.
#[derive(Default, Debug, Clone)]
pub struct Vars {
    map: IndexMap<String, Value, ScriptHasher>,
}

impl Vars {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            map: IndexMap::default(),
        }
    }

    /// Binds the value to the name, replacing any previous binding.  The stored value
    /// is a local variable that may be incremented.
    pub fn set(&mut self, name: &str, mut value: Value) {
        let key = name.to_lowercase();
        value.set_name(&key);
        self.map.insert(key, value);
    }

    /// Binds the value to the name as a global variable.
    pub fn set_global(&mut self, name: &str, mut value: Value) {
        let key = name.to_lowercase();
        value.set_name(&key);
        value.set_global();
        self.map.insert(key, value);
    }

    /// Retrieves the value of the named variable.
    ///
    /// Returns a `Range` error if the variable is not bound.
    pub fn get(&self, name: &str) -> ScriptResult<Value> {
        match self.map.get(&name.to_lowercase()) {
            Some(value) => Ok(value.clone()),
            None => script_err!(Range, "can't read \"{}\": no such variable", name),
        }
    }

    /// A mutable reference to the named variable's value, if it is bound.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.map.get_mut(&name.to_lowercase())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_lowercase())
    }

    /// Removes the named variable.  It is not an error to unset a variable that doesn't
    /// exist.
    pub fn unset(&mut self, name: &str) {
        self.map.shift_remove(&name.to_lowercase());
    }

    /// The names of the bound variables, sorted.
    pub fn names(&self) -> ScriptList {
        let mut names: ScriptList = self.map.keys().cloned().collect();
        names.sort();
        names
    }

    /// Adds `n` to the named variable in place.  Returns false if the variable is not
    /// bound.
    pub fn increment(&mut self, name: &str, n: ScriptInt) -> bool {
        match self.get_mut(name) {
            Some(value) => value.increment(n),
            None => false,
        }
    }

    /// Assigns to an item of the named variable, as `name[selector] = value` does.
    /// Returns false if the variable is not bound or its kind can't be assigned to.
    pub fn set_selected_value(&mut self, name: &str, selector: ScriptInt, value: &Value) -> bool {
        match self.get_mut(name) {
            Some(var) => var.set_selected_value(selector, value),
            None => false,
        }
    }
}
