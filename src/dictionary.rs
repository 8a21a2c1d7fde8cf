//! The reference-identifier → phrase dictionary (§3 "Dictionary").
//!
//! An ordered map built fresh by each [`crate::pipeline::run`] call: keys
//! are inserted in the order stage 3 assigns reference IDs (1, 2, 3, ...),
//! and that insertion order is preserved on serialization regardless of
//! hashing, matching the "ordered map" requirement in §3.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered reference-token → phrase map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
}

impl Dictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `reference` abbreviates `phrase`. Stage 3 calls this
    /// exactly once per retained reference, in assignment order.
    pub fn insert(&mut self, reference: impl Into<String>, phrase: impl Into<String>) {
        self.entries.push((reference.into(), phrase.into()));
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the phrase a reference abbreviates.
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| r == reference)
            .map(|(_, p)| p.as_str())
    }

    /// Iterate `(reference, phrase)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(r, p)| (r.as_str(), p.as_str()))
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (reference, phrase) in &self.entries {
            map.serialize_entry(reference, phrase)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut dict = Dictionary::new();
        dict.insert("§1", "zebra stripes");
        dict.insert("§2", "aardvark burrow");
        let refs: Vec<&str> = dict.iter().map(|(r, _)| r).collect();
        assert_eq!(refs, vec!["§1", "§2"]);
    }

    #[test]
    fn get_returns_the_phrase() {
        let mut dict = Dictionary::new();
        dict.insert("§1", "hello world");
        assert_eq!(dict.get("§1"), Some("hello world"));
        assert_eq!(dict.get("§2"), None);
    }

    #[test]
    fn serializes_as_an_ordered_json_object() {
        let mut dict = Dictionary::new();
        dict.insert("§2", "second");
        dict.insert("§1", "first");
        let json = serde_json::to_string(&dict).unwrap();
        // Insertion order, not key order, must be preserved.
        assert_eq!(json, r#"{"§2":"second","§1":"first"}"#);
    }

    #[test]
    fn empty_dictionary_serializes_to_empty_object() {
        let dict = Dictionary::new();
        assert!(dict.is_empty());
        assert_eq!(serde_json::to_string(&dict).unwrap(), "{}");
    }
}
