//! Translation table and key resolution.
//!
//! The table maps a translation key to a per-language record of localized
//! strings. It is built once (usually from a JSON file) and shared read-only.

use crate::error::I18nError;
use crate::i18n::Language;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Outcome of looking up a key for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Text found for the requested language
    Exact(&'a str),
    /// Requested language missing; text taken from the fallback language
    Fallback(&'a str),
    /// Key present but neither the requested nor the fallback language has text
    Untranslated,
    /// Key not present in the table
    MissingKey,
}

impl<'a> Lookup<'a> {
    /// The resolved text, if any. An empty string is a value, not an absence.
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Lookup::Exact(text) | Lookup::Fallback(text) => Some(text),
            Lookup::Untranslated | Lookup::MissingKey => None,
        }
    }
}

/// Key → language code → localized string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from a JSON object of the form
    /// `{"key": {"he": "...", "en": "..."}}`.
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        let table: TranslationTable = serde_json::from_str(json)?;
        debug!("Loaded translation table with {} keys", table.len());
        Ok(table)
    }

    /// Read and parse a JSON table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, I18nError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Add (or replace) the text for `key` in `code`. Used while building a table.
    pub fn with_entry(mut self, key: &str, code: &str, text: &str) -> Self {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(code.to_string(), text.to_string());
        self
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the table has a record for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up `key` for `language`, falling back to the fallback language.
    pub fn lookup(&self, key: &str, language: Language) -> Lookup<'_> {
        let Some(record) = self.entries.get(key) else {
            return Lookup::MissingKey;
        };

        if let Some(text) = record.get(language.code()) {
            return Lookup::Exact(text);
        }

        match record.get(Language::fallback().code()) {
            Some(text) => Lookup::Fallback(text),
            None => Lookup::Untranslated,
        }
    }

    /// Resolve `key` for `language`.
    ///
    /// Returns `None` when the key is absent or has no text in either the
    /// requested or the fallback language.
    pub fn resolve(&self, key: &str, language: Language) -> Option<&str> {
        self.lookup(key, language).text()
    }
}

impl FromIterator<(String, HashMap<String, String>)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (String, HashMap<String, String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
