//! Persisted language preference.
//!
//! Storage is reached through the narrow `StoragePort` trait so the store can
//! run against browser storage, a file, or an in-memory map.

use crate::error::{I18nError, StorageError};
use crate::i18n::Language;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "acadeva-lang";

/// Synchronous key-value storage scoped to one origin.
pub trait StoragePort {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as a JSON object in a file.
///
/// A missing file reads as empty storage; the file is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StoragePort for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = match self.load() {
            Ok(items) => items,
            Err(StorageError::Malformed(e)) => {
                warn!(
                    "Overwriting malformed language storage {}: {}",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());

        // Write beside the target and rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Reads and writes the active language through a storage port.
pub struct LanguageStore<S> {
    storage: S,
    key: String,
    default: Language,
}

impl<S: StoragePort> LanguageStore<S> {
    /// Store using the standard key and the registry's default language.
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, DEFAULT_STORAGE_KEY, Language::default_language())
    }

    pub fn with_options(storage: S, key: impl Into<String>, default: Language) -> Self {
        Self {
            storage,
            key: key.into(),
            default,
        }
    }

    /// The persisted language, or the default.
    ///
    /// Never fails: unreadable storage and unsupported stored codes both
    /// degrade to the default language.
    pub fn get(&self) -> Language {
        match self.storage.get_item(&self.key) {
            Ok(Some(code)) => match Language::from_code(&code) {
                Ok(language) => language,
                Err(_) => {
                    warn!(
                        "Ignoring unsupported stored language '{}', using {}",
                        code, self.default
                    );
                    self.default
                }
            },
            Ok(None) => {
                debug!("No stored language, using default {}", self.default);
                self.default
            }
            Err(e) => {
                warn!("Language storage unavailable ({}), using {}", e, self.default);
                self.default
            }
        }
    }

    /// Persist `language` for future `get()` calls.
    pub fn set(&mut self, language: Language) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, language.code())
    }

    /// Validate a raw code and persist it.
    pub fn set_code(&mut self, code: &str) -> Result<Language, I18nError> {
        let language = Language::from_code(code)?;
        self.set(language)?;
        Ok(language)
    }

    /// The language returned when nothing usable is stored.
    pub fn default_language(&self) -> Language {
        self.default
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Storage that fails every operation, like a browser with storage disabled.
    pub(crate) struct BrokenStorage;

    impl StoragePort for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("access denied".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("access denied".to_string()))
        }
    }

    // ==================== LanguageStore Tests ====================

    #[test]
    fn test_get_returns_default_when_unset() {
        let store = LanguageStore::new(MemoryStorage::new());
        assert_eq!(store.get(), Language::HEBREW);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = LanguageStore::new(MemoryStorage::new());
        store.set(Language::ENGLISH).unwrap();
        assert_eq!(store.get(), Language::ENGLISH);
        assert_eq!(
            store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap(),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_get_degrades_on_storage_failure() {
        let store = LanguageStore::new(BrokenStorage);
        assert_eq!(store.get(), Language::HEBREW);
    }

    #[test]
    fn test_set_reports_storage_failure() {
        let mut store = LanguageStore::new(BrokenStorage);
        assert!(store.set(Language::ENGLISH).is_err());
    }

    #[test]
    fn test_get_ignores_unsupported_code() {
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_STORAGE_KEY, "fr").unwrap();
        let store = LanguageStore::new(storage);
        assert_eq!(store.get(), Language::HEBREW);
    }

    #[test]
    fn test_set_code_validates() {
        let mut store = LanguageStore::new(MemoryStorage::new());
        assert!(matches!(
            store.set_code("xx"),
            Err(I18nError::UnknownLanguage(_))
        ));
        assert_eq!(store.get(), Language::HEBREW);

        assert_eq!(store.set_code("en").unwrap(), Language::ENGLISH);
        assert_eq!(store.get(), Language::ENGLISH);
    }

    #[test]
    fn test_custom_key_and_default() {
        let mut store =
            LanguageStore::with_options(MemoryStorage::new(), "site-lang", Language::ENGLISH);
        assert_eq!(store.get(), Language::ENGLISH);
        store.set(Language::HEBREW).unwrap();
        assert_eq!(
            store.storage().get_item("site-lang").unwrap(),
            Some("he".to_string())
        );
    }

    // ==================== FileStorage Tests ====================

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("state.json"));
        assert_eq!(storage.get_item("acadeva-lang").unwrap(), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = LanguageStore::new(FileStorage::new(&path));
        store.set(Language::ENGLISH).unwrap();

        let reopened = LanguageStore::new(FileStorage::new(&path));
        assert_eq!(reopened.get(), Language::ENGLISH);
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state.json"));
        storage.set_item("theme", "dark").unwrap();
        storage.set_item("acadeva-lang", "en").unwrap();

        assert_eq!(storage.get_item("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(
            storage.get_item("acadeva-lang").unwrap(),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_file_storage_malformed_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("acadeva-lang"),
            Err(StorageError::Malformed(_))
        ));

        // The store still answers with the default.
        assert_eq!(LanguageStore::new(storage).get(), Language::HEBREW);
    }

    #[test]
    fn test_file_storage_set_overwrites_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"acadeva-lang": "en""#).unwrap();

        let mut store = LanguageStore::new(FileStorage::new(&path));
        assert_eq!(store.get(), Language::HEBREW);

        store.set(Language::ENGLISH).expect("write over corrupt file");
        assert_eq!(store.get(), Language::ENGLISH);

        let reopened = LanguageStore::new(FileStorage::new(&path));
        assert_eq!(reopened.get(), Language::ENGLISH);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
