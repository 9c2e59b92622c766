// Compound tag for the Tellus data format
//
// A compound is an ordered string-keyed mapping of tags. Insertion order is
// preserved and semantically significant: a record reloaded and resaved must
// reproduce its fields in a stable order for byte-stable round trips.
// Entries are kept in a vector with linear key lookup; compounds are single
// records, not whole world files, so sizes stay small.

use crate::tag::types::Tag;

/// An ordered string-keyed mapping of tags, keys unique.
#[derive(Debug, Clone, PartialEq, Hash, Default)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
}

impl Compound {
    /// Creates an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Looks up a tag by key.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, tag)| tag)
    }

    /// Looks up a tag by key for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, tag)| tag)
    }

    /// Inserts a tag under `key`, or replaces the existing value **in
    /// place** — the entry keeps its position so key order stays stable
    /// across rebuilds.
    pub fn put(&mut self, key: impl Into<String>, tag: Tag) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = tag,
            None => self.entries.push((key, tag)),
        }
    }

    /// Removes and returns the tag under `key`, if present.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over `(key, tag)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, tag)| (k.as_str(), tag))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Copies every entry of `other` whose key is absent here, appending in
    /// `other`'s order. Existing keys are left untouched.
    ///
    /// This is the unknown-field preservation primitive: a record rebuilds
    /// its modeled fields fresh, then merges its stored source compound so
    /// any field the typed view never touched survives unchanged.
    pub fn merge_missing_from(&mut self, other: &Compound) {
        for (key, tag) in &other.entries {
            if !self.contains_key(key) {
                self.entries.push((key.clone(), tag.clone()));
            }
        }
    }
}
