//! Glyph -> ASCII replacement table with longest-match substitution

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from a source sequence (one or more chars) to its replacement
///
/// Serialized as a flat JSON object `{"Щ": "Shh", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ConversionTable {
    entries: BTreeMap<String, String>,
    /// Longest key in chars
    max_key_chars: usize,
}

impl ConversionTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(source, replacement)` pairs; later pairs win on duplicate keys
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        table.extend(pairs);
        table
    }

    /// Insert or replace a mapping. Empty source keys are ignored.
    pub fn insert(&mut self, source: impl Into<String>, replacement: impl Into<String>) {
        let source = source.into();
        if source.is_empty() {
            return;
        }
        self.max_key_chars = self.max_key_chars.max(source.chars().count());
        self.entries.insert(source, replacement.into());
    }

    /// Insert every pair, overriding existing keys
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.insert(k, v);
        }
    }

    pub fn remove(&mut self, source: &str) -> Option<String> {
        let removed = self.entries.remove(source)?;
        if source.chars().count() == self.max_key_chars {
            self.max_key_chars = longest_key(&self.entries);
        }
        Some(removed)
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
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

    /// Copy of `self` with every mapping of `overlay` applied on top
    pub fn overlaid_with(&self, overlay: &ConversionTable) -> ConversionTable {
        let mut merged = self.clone();
        merged.extend(overlay.iter());
        merged
    }

    /// Substitute every mapped sequence in `input`
    ///
    /// At each position the longest matching key wins, so a decomposed
    /// sequence like `И\u{0306}` is never split by the plain `И` mapping.
    /// Replacements are not rescanned. Unmapped chars pass through.
    pub fn apply(&self, input: &str) -> String {
        if self.max_key_chars == 0 || input.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len() * 2);
        let mut rest = input;

        while let Some(first) = rest.chars().next() {
            // widest window first, shrinking one char at a time
            let mut end = rest
                .char_indices()
                .nth(self.max_key_chars)
                .map_or(rest.len(), |(i, _)| i);
            let mut matched = None;
            while end > 0 {
                if let Some(replacement) = self.entries.get(&rest[..end]) {
                    matched = Some((end, replacement));
                    break;
                }
                end = rest[..end].char_indices().next_back().map_or(0, |(i, _)| i);
            }

            let consumed = match matched {
                Some((end, replacement)) => {
                    output.push_str(replacement);
                    end
                }
                None => {
                    output.push(first);
                    first.len_utf8()
                }
            };
            rest = &rest[consumed..];
        }

        output
    }
}

fn longest_key(entries: &BTreeMap<String, String>) -> usize {
    entries.keys().map(|k| k.chars().count()).max().unwrap_or(0)
}

impl From<BTreeMap<String, String>> for ConversionTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::from_pairs(entries)
    }
}

impl From<ConversionTable> for BTreeMap<String, String> {
    fn from(table: ConversionTable) -> Self {
        table.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConversionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
