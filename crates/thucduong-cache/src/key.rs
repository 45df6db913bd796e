//! Cache key composition.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cache key uniquely identifying a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a cache key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builder for normalized cache keys.
///
/// Fields are kept sorted by name and absent values are dropped, so the key
/// depends only on the semantic content of a request, never on the order in
/// which fields were supplied.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    namespace: String,
    fields: BTreeMap<String, Value>,
}

impl CacheKeyBuilder {
    /// Start a key in the given namespace (e.g. `search`).
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Include a text field when present.
    pub fn text(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.fields.insert(name.to_string(), Value::from(value));
        }
        self
    }

    /// Include a numeric field when present.
    pub fn number(mut self, name: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.fields.insert(name.to_string(), Value::from(value));
        }
        self
    }

    /// Include a set of strings; order and duplicates are ignored, an empty set is dropped.
    pub fn set<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.fields.insert(
                name.to_string(),
                Value::Array(values.into_iter().map(Value::from).collect()),
            );
        }
        self
    }

    /// Build the key as `namespace:name=value|name=value`.
    pub fn build(&self) -> CacheKey {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        CacheKey(format!("{}:{}", self.namespace, parts.join("|")))
    }
}
