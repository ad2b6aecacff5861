//! Bound arguments handed to a command body.

use crate::ast::Value;
use std::fmt;

/// The arguments of one call after binding against the command's signature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    values: Vec<(String, Value)>,
    rest: Option<(String, Vec<Value>)>,
    extra: Option<(String, Vec<(String, Value)>)>,
}

/// A required argument was absent or had the wrong type.
#[derive(Debug)]
pub struct ArgError {
    name: String,
    expected: &'static str,
    found: Option<Value>,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(value) => write!(
                f,
                "argument `{}` must be {}, got {}",
                self.name,
                self.expected,
                value.repr()
            ),
            None => write!(f, "no argument named `{}`", self.name),
        }
    }
}

impl std::error::Error for ArgError {}

impl CallArgs {
    pub(crate) fn new(
        values: Vec<(String, Value)>,
        rest: Option<(String, Vec<Value>)>,
        extra: Option<(String, Vec<(String, Value)>)>,
    ) -> Self {
        Self {
            values,
            rest,
            extra,
        }
    }

    /// Value of a declared parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Surplus positional arguments gathered by the `*` parameter.
    pub fn rest(&self) -> &[Value] {
        match &self.rest {
            Some((_, values)) => values,
            None => &[],
        }
    }

    /// Unmatched keyword arguments gathered by the `**` parameter, in call order.
    pub fn extra(&self) -> &[(String, Value)] {
        match &self.extra {
            Some((_, pairs)) => pairs,
            None => &[],
        }
    }

    /// The `*` parameter's arguments as a tuple value.
    pub fn rest_value(&self) -> Value {
        Value::Tuple(self.rest().to_vec())
    }

    /// The `**` parameter's arguments as a dict value.
    pub fn extra_value(&self) -> Value {
        Value::Dict(
            self.extra()
                .iter()
                .map(|(k, v)| (Value::from(k.as_str()), v.clone()))
                .collect(),
        )
    }

    /// Named parameter values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// # Errors
    ///
    /// Returns `Err` if `name` is unbound or not a string.
    pub fn str(&self, name: &str) -> Result<&str, ArgError> {
        self.typed(name, "a string", Value::as_str)
    }

    /// # Errors
    ///
    /// Returns `Err` if `name` is unbound or not an integer.
    pub fn int(&self, name: &str) -> Result<i64, ArgError> {
        self.typed(name, "an integer", Value::as_int)
    }

    /// # Errors
    ///
    /// Returns `Err` if `name` is unbound or not a number.
    pub fn float(&self, name: &str) -> Result<f64, ArgError> {
        self.typed(name, "a number", Value::as_float)
    }

    /// # Errors
    ///
    /// Returns `Err` if `name` is unbound or not a boolean.
    pub fn bool(&self, name: &str) -> Result<bool, ArgError> {
        self.typed(name, "True or False", Value::as_bool)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        convert: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<T, ArgError> {
        let value = self.get(name).ok_or_else(|| ArgError {
            name: name.to_string(),
            expected,
            found: None,
        })?;
        convert(value).ok_or_else(|| ArgError {
            name: name.to_string(),
            expected,
            found: Some(value.clone()),
        })
    }
}
