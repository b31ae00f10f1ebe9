//! Call arguments and their coercion to Rust types.
//!
//! Callers send a JSON object of named arguments. Extraction is lenient in
//! the way most JSON clients need (numbers as strings, integral floats as
//! integers) but a value that cannot be read as the requested type is a
//! `ValidationError` naming the argument. `null` is treated as absent.

use serde_json::{Map, Value};

use crate::domain::ValidationError;

/// Named arguments of a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Wrap an already-decoded argument object.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accept the `arguments` member of a call: absent, null, or an object.
    pub fn from_value(value: Option<Value>) -> Result<Self, ValidationError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(_) => Err(ValidationError::new("arguments", "must be an object")),
        }
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// A string argument that must be present.
    pub fn required_str(&self, name: &str) -> Result<String, ValidationError> {
        self.optional_str(name)?
            .ok_or_else(|| ValidationError::missing(name))
    }

    /// A string argument that may be absent.
    pub fn optional_str(&self, name: &str) -> Result<Option<String>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ValidationError::new(name, "must be a string")),
        }
    }

    /// A boolean argument; `"true"`/`"false"`/`"1"`/`"0"` are accepted too.
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(ValidationError::new(name, "must be a boolean")),
            },
            Some(_) => Err(ValidationError::new(name, "must be a boolean")),
        }
    }

    /// A number argument that must be present; numeric strings are accepted.
    pub fn required_f64(&self, name: &str) -> Result<f64, ValidationError> {
        let not_a_number = || ValidationError::new(name, "must be a number");
        match self.get(name) {
            None => Err(ValidationError::missing(name)),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(not_a_number),
            Some(Value::String(s)) => s.trim().parse().map_err(|_| not_a_number()),
            Some(_) => Err(not_a_number()),
        }
    }

    /// An integer argument that may be absent.
    ///
    /// Integral floats are accepted, saturating at the `i64` range.
    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        let not_an_integer = || ValidationError::new(name, "must be an integer");
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Some(i)),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| Some(f as i64))
                    .ok_or_else(not_an_integer),
            },
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| not_an_integer()),
            Some(_) => Err(not_an_integer()),
        }
    }
}
