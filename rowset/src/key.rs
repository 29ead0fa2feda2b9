//! Row identity.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::value::Record;
use crate::value::Value;

/// Stable identifier of a row.
///
/// Keys must be unique across the full row collection. With duplicates,
/// lookups resolve to the first matching row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    Int(i64),
    Str(String),
}

impl RowKey {
    /// Convert a cell value into a key.
    ///
    /// Strings become [`RowKey::Str`]; integers and floats without a
    /// fractional part become [`RowKey::Int`]. Everything else (null, bools,
    /// fractional floats, timestamps) cannot key a row.
    pub fn from_value(value: &Value) -> Option<RowKey> {
        match value {
            Value::Int(i) => Some(RowKey::Int(*i)),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                if *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(RowKey::Int(*f as i64))
                } else {
                    None
                }
            }
            Value::String(s) => Some(RowKey::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{}", i),
            RowKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(i64::from(v))
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Str(v)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Str(v.to_string())
    }
}

/// Function computing the key of a row.
pub type KeyFn<R> = Arc<dyn Fn(&R) -> Option<RowKey> + Send + Sync>;

/// How a row's key is obtained.
pub enum RowKeySpec<R> {
    /// Read the key from a named field. Requires `R: Record`.
    Field(String),
    /// Compute the key.
    Function(KeyFn<R>),
}

impl<R: Record> RowKeySpec<R> {
    /// Resolve the key of `row`. `None` marks the row as unkeyable.
    pub fn resolve(&self, row: &R) -> Option<RowKey> {
        match self {
            RowKeySpec::Field(name) => RowKey::from_value(&row.field(name)),
            RowKeySpec::Function(f) => f(row),
        }
    }
}

impl<R> Clone for RowKeySpec<R> {
    fn clone(&self) -> Self {
        match self {
            RowKeySpec::Field(name) => RowKeySpec::Field(name.clone()),
            RowKeySpec::Function(f) => RowKeySpec::Function(f.clone()),
        }
    }
}

impl<R> fmt::Debug for RowKeySpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKeySpec::Field(name) => f.debug_tuple("Field").field(name).finish(),
            RowKeySpec::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// A [`RowKeySpec`] resolved into a single accessor.
///
/// Field specs need `R: Record` once, at conversion time; afterwards the
/// resolver works for any row type.
pub struct RowKeyResolver<R> {
    describe: String,
    key: KeyFn<R>,
}

impl<R> RowKeyResolver<R> {
    /// Resolver backed by a function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> Option<RowKey> + Send + Sync + 'static,
    {
        Self {
            describe: "function".to_string(),
            key: Arc::new(f),
        }
    }

    /// Resolve the key of `row`.
    ///
    /// Unkeyable rows are still rendered but take no part in selection or
    /// expansion.
    pub fn resolve(&self, row: &R) -> Option<RowKey> {
        let key = (self.key)(row);
        if key.is_none() {
            log::debug!("row has no usable key ({})", self.describe);
        }
        key
    }
}

impl<R: Record + 'static> RowKeyResolver<R> {
    /// Resolver reading the named field.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            describe: format!("field `{}`", name),
            key: Arc::new(move |row: &R| RowKey::from_value(&row.field(&name))),
        }
    }
}

impl<R: Record + 'static> From<RowKeySpec<R>> for RowKeyResolver<R> {
    fn from(key_spec: RowKeySpec<R>) -> Self {
        match key_spec {
            RowKeySpec::Field(name) => RowKeyResolver::field(name),
            RowKeySpec::Function(key) => Self {
                describe: "function".to_string(),
                key,
            },
        }
    }
}

impl<R> Clone for RowKeyResolver<R> {
    fn clone(&self) -> Self {
        Self {
            describe: self.describe.clone(),
            key: self.key.clone(),
        }
    }
}

impl<R> fmt::Debug for RowKeyResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowKeyResolver")
            .field("key", &self.describe)
            .finish()
    }
}
