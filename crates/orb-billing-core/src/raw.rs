//! Raw JSON storage for models.
//!
//! Every model and parameter type stores its fields in a [`RawBag`]: an
//! insertion-ordered map from wire field name to untyped JSON. A key that is
//! present is "set", even when its value is `null`; a key that is absent is
//! "unset". Typed access lives in [`crate::field`], not here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_kind, ModelError, Result};

/// Ordered string-keyed JSON store backing a single model instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBag(Map<String, Value>);

impl RawBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Start building a bag entry by entry.
    #[must_use]
    pub fn builder() -> RawBagBuilder {
        RawBagBuilder::default()
    }

    /// Get the stored value for `key`.
    ///
    /// `None` means the key is absent; `Some(Value::Null)` means it was set to
    /// `null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Store `value` under `key`.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Remove `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Whether `key` is present (including present-but-null).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a copy of this bag with `key` set to `value`.
    ///
    /// The original is left untouched.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: Value) -> Self {
        let mut copy = self.clone();
        copy.set(key, value);
        copy
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the bag, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Consume the bag, returning a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Build a bag from any JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotAnObject`] if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse a bag from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or not an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }
}

impl From<Map<String, Value>> for RawBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawBag> for Value {
    fn from(bag: RawBag) -> Self {
        bag.into_value()
    }
}

impl TryFrom<Value> for RawBag {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl FromIterator<(String, Value)> for RawBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RawBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Mutable accumulator that finalizes into an owned [`RawBag`].
#[derive(Debug, Clone, Default)]
pub struct RawBagBuilder {
    entries: Map<String, Value>,
}

impl RawBagBuilder {
    /// Add an entry. Later entries with the same key overwrite earlier ones.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add an entry only when `value` is `Some`.
    #[must_use]
    pub fn entry_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.entry(key, value),
            None => self,
        }
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RawBag {
        RawBag(self.entries)
    }
}
