//! Named ordered property sources

use indexmap::IndexMap;
use props_core::InlinedPropertyMap;

/// A named, ordered set of key/value properties.
///
/// Entry order is first-insertion order; inserting an existing key updates
/// its value in place without moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    entries: IndexMap<String, String>,
}

impl PropertySource {
    /// Create an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Create a source from an already-ordered map.
    pub fn from_map(name: impl Into<String>, entries: InlinedPropertyMap) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or update a key, preserving its first-insertion position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge `entries` into this source, key by key, in their order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in entries {
            self.entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
