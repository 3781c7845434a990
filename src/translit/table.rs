//! Script mapping tables
//!
//! A table maps keys of one or more code points to a Roman fragment and the
//! role that fragment plays in a syllable. Lookup is longest-match: a key
//! covering more adjacent code points always wins over its prefixes, which
//! is how conjuncts and decomposed vowel signs are resolved before the
//! single-character entries.

use log::debug;
use std::collections::HashMap;

/// Role of a mapped unit when syllables are composed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Independent vowel letter
    Vowel,
    /// Consonant root; carries the inherent vowel unless a sign or virama follows
    Consonant,
    /// Dependent vowel sign (matra), replaces the inherent vowel
    VowelSign,
    /// Virama / pulli, suppresses the inherent vowel
    Virama,
    /// Anusvara, chandrabindu, tippi
    Nasal,
    /// Gurmukhi addak: doubles the next consonant
    Gemination,
    /// Visarga and similar signs, emitted as-is
    Modifier,
    /// Complete unit emitted as-is, never takes the inherent vowel
    Syllable,
    /// Digits and punctuation
    Symbol,
}

/// One table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub unit: Unit,
    pub roman: String,
}

/// What to emit for a grapheme cluster with no table entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Copy the original cluster into the output
    #[default]
    PassThrough,
    /// Emit this marker once per unmapped cluster
    Placeholder(String),
}

/// Immutable per-language mapping table
#[derive(Debug, Clone)]
pub struct ScriptTable {
    name: String,
    entries: HashMap<String, Mapping>,
    /// Longest key, in code points
    max_key_len: usize,
    inherent_vowel: String,
    drops_final_schwa: bool,
    shortens_final_ee: bool,
    fallback: FallbackPolicy,
}

impl ScriptTable {
    /// Start building a table
    pub fn builder(name: impl Into<String>) -> ScriptTableBuilder {
        ScriptTableBuilder {
            table: ScriptTable {
                name: name.into(),
                entries: HashMap::new(),
                max_key_len: 0,
                inherent_vowel: "a".to_string(),
                drops_final_schwa: false,
                shortens_final_ee: false,
                fallback: FallbackPolicy::PassThrough,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn inherent_vowel(&self) -> &str {
        &self.inherent_vowel
    }

    /// Is the inherent vowel dropped at the end of a polysyllabic word?
    pub fn drops_final_schwa(&self) -> bool {
        self.drops_final_schwa
    }

    /// Is a word-final "ee" written "i" (paani, hindi)?
    pub fn shortens_final_ee(&self) -> bool {
        self.shortens_final_ee
    }

    /// Default fallback policy for this table
    pub fn fallback(&self) -> &FallbackPolicy {
        &self.fallback
    }

    /// Every key in the table, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exact lookup of a key
    pub fn get(&self, key: &str) -> Option<&Mapping> {
        self.entries.get(key)
    }

    /// Find the longest key that is a prefix of `chars`
    ///
    /// Returns the number of code points consumed and the mapping.
    pub fn longest_match(&self, chars: &[char]) -> Option<(usize, &Mapping)> {
        let limit = self.max_key_len.min(chars.len());
        let mut key = String::with_capacity(limit * 3);

        // Keys are tried longest first, so build the longest candidate once
        // and shrink it from the end.
        key.extend(&chars[..limit]);
        for len in (1..=limit).rev() {
            if let Some(mapping) = self.entries.get(key.as_str()) {
                return Some((len, mapping));
            }
            key.pop();
        }
        None
    }
}

/// Builder for [`ScriptTable`]
pub struct ScriptTableBuilder {
    table: ScriptTable,
}

impl ScriptTableBuilder {
    /// Add or replace an entry
    pub fn entry(mut self, key: &str, unit: Unit, roman: &str) -> Self {
        self.insert(key, unit, roman);
        self
    }

    /// Add or replace an entry in place (for table generators)
    pub fn insert(&mut self, key: &str, unit: Unit, roman: &str) {
        let len = key.chars().count();
        if len == 0 {
            return;
        }
        self.table.max_key_len = self.table.max_key_len.max(len);
        self.table.entries.insert(
            key.to_string(),
            Mapping {
                unit,
                roman: roman.to_string(),
            },
        );
    }

    pub fn inherent_vowel(mut self, vowel: &str) -> Self {
        self.table.inherent_vowel = vowel.to_string();
        self
    }

    pub fn drops_final_schwa(mut self, drops: bool) -> Self {
        self.table.drops_final_schwa = drops;
        self
    }

    pub fn shortens_final_ee(mut self, shortens: bool) -> Self {
        self.table.shortens_final_ee = shortens;
        self
    }

    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.table.fallback = policy;
        self
    }

    pub fn build(self) -> ScriptTable {
        debug!(
            "Built mapping table '{}' with {} entries (longest key {})",
            self.table.name,
            self.table.entries.len(),
            self.table.max_key_len
        );
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScriptTable {
        ScriptTable::builder("sample")
            .entry("क", Unit::Consonant, "k")
            .entry("क्ष", Unit::Consonant, "ksh")
            .entry("ि", Unit::VowelSign, "i")
            .build()
    }

    #[test]
    fn test_longest_match_prefers_longer_key() {
        let table = sample();
        let chars: Vec<char> = "क्षि".chars().collect();
        let (len, mapping) = table.longest_match(&chars).unwrap();
        assert_eq!(len, 3);
        assert_eq!(mapping.roman, "ksh");
    }

    #[test]
    fn test_longest_match_falls_back_to_prefix() {
        let table = sample();
        let chars: Vec<char> = "कि".chars().collect();
        let (len, mapping) = table.longest_match(&chars).unwrap();
        assert_eq!(len, 1);
        assert_eq!(mapping.unit, Unit::Consonant);
    }

    #[test]
    fn test_longest_match_none() {
        let table = sample();
        assert!(table.longest_match(&['x']).is_none());
        assert!(table.longest_match(&[]).is_none());
    }

    #[test]
    fn test_builder_settings() {
        let table = ScriptTable::builder("t")
            .entry("", Unit::Symbol, "ignored")
            .drops_final_schwa(true)
            .fallback(FallbackPolicy::Placeholder("?".into()))
            .build();
        assert!(table.is_empty());
        assert!(table.drops_final_schwa());
        assert_eq!(table.inherent_vowel(), "a");
        assert_eq!(table.fallback(), &FallbackPolicy::Placeholder("?".into()));
    }
}
