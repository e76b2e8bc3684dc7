//! Memoization Keys
//!
//! Turns a function name plus its arguments into one deterministic key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::memo::finite::ensure_finite;

// == Keyword Arguments ==
/// Named arguments of a memoized call.
///
/// Stored sorted by name, so the order in which they are supplied never
/// changes the derived key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Kwargs(BTreeMap<String, Value>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Reads an argument back as a concrete type.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.0
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, T: Into<Value>> FromIterator<(N, T)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut kwargs = Kwargs::new();
        for (name, value) in iter {
            kwargs.insert(name, value);
        }
        kwargs
    }
}

// == Memo Key ==
/// Canonical cache key for a memoized call.
///
/// The key is the compact JSON rendering of
/// `{"args": .., "function": .., "kwargs": ..}` with every object's keys
/// sorted, so equal calls always produce byte-identical keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoKey(String);

impl MemoKey {
    /// Derives the key for `function(args, **kwargs)`.
    ///
    /// Fails when `args` cannot be represented as JSON (for example a map
    /// with non-string keys) or holds a NaN or infinite float, which JSON
    /// would collapse into `null`.
    pub fn derive<A: Serialize + ?Sized>(
        function: &str,
        args: &A,
        kwargs: &Kwargs,
    ) -> Result<Self, serde_json::Error> {
        let mut parts = Map::new();
        parts.insert("function".to_string(), Value::String(function.to_string()));
        ensure_finite(args)?;
        parts.insert("args".to_string(), serde_json::to_value(args)?);
        parts.insert("kwargs".to_string(), serde_json::to_value(kwargs)?);

        let canonical = canonicalize(Value::Object(parts));
        Ok(Self(serde_json::to_string(&canonical)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recursively sorts object keys, independent of serde_json's map backend.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, canonicalize(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
