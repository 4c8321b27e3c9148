//! Defines the values handed to actions when a URL matches.

use std::collections::hash_map::{self, HashMap};
use std::fmt::{self, Display};

use serde::de::DeserializeOwned;

use crate::extractor::{self, ExtractorError};
use crate::helpers::url::query_string::QueryStringMapping;

/// A single value extracted from a URL.
///
/// `<int:name>` captures produce `Int`; every other capture and all query parameters produce
/// `Str`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// A segment that parsed as a base-10 integer.
    Int(i64),
    /// A segment or query value, verbatim.
    Str(String),
}

impl Value {
    /// Provides the integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            Value::Str(_) => None,
        }
    }

    /// Provides the string, if this is a `Str`.
    ///
    /// An `Int` is not converted; use the `Display` impl for that.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::Int(_) => None,
            Value::Str(ref s) => Some(s.as_str()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(ref s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::Str(s.to_owned())
    }
}

/// Mapping of capture names and query keys to their values for a single match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values {
    data: HashMap<String, Value>,
}

impl Values {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Values::default()
    }

    /// Builds the combined mapping for a match: query parameters first, then captures, so a
    /// capture wins over a query parameter of the same name.
    pub(crate) fn combine(query: QueryStringMapping, captures: HashMap<String, Value>) -> Self {
        let mut data: HashMap<String, Value> = query
            .into_iter()
            .map(|(k, v)| (k, Value::Str(v)))
            .collect();
        data.extend(captures);

        Values { data }
    }

    /// Inserts a value, returning the previous value under `key`.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.data.insert(key.into(), value.into())
    }

    /// Borrows the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Provides the integer under `key`, only if it was captured as an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Borrows the string under `key`, only if it is a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// True if a value is present under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if there are no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over all key / value pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Deserializes the values into `T`. See the `extractor` module.
    pub fn extract<T>(&self) -> Result<T, ExtractorError>
    where
        T: DeserializeOwned,
    {
        extractor::extract(self)
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Values {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
