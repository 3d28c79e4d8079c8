//! Lookups postponed until more modules are loaded.
//!
//! The resolver records a deferred lookup as its key and the start offset of
//! the referencing node. The host drains the map after loading more
//! modules, re-resolves those positions, and reports what is still left once
//! every module is available.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Deferred lookup keys with the offsets that referenced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeferredSearches {
    entries: FxHashMap<String, SmallVec<[u32; 2]>>,
}

impl DeferredSearches {
    pub fn new() -> Self {
        DeferredSearches::default()
    }

    /// Record `key` at `offset`. Recording the same pair twice keeps one.
    pub fn add(&mut self, key: &str, offset: u32) {
        let positions = self.entries.entry(key.to_ascii_lowercase()).or_default();
        if !positions.contains(&offset) {
            positions.push(offset);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    /// Offsets recorded for `key`.
    pub fn positions(&self, key: &str) -> &[u32] {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map_or(&[][..], |p| p.as_slice())
    }

    /// Every `(key, offset)` pair, ordered by offset.
    pub fn iter_sorted(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = self
            .entries
            .iter()
            .flat_map(|(key, positions)| positions.iter().map(move |&p| (key.as_str(), p)))
            .collect();
        out.sort_by_key(|&(key, offset)| (offset, key));
        out
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move every entry out, leaving the map empty.
    #[must_use]
    pub fn take(&mut self) -> DeferredSearches {
        std::mem::take(self)
    }

    /// Add every entry of `other`.
    pub fn merge(&mut self, other: &DeferredSearches) {
        for (key, positions) in &other.entries {
            for &offset in positions {
                self.add(key, offset);
            }
        }
    }
}
