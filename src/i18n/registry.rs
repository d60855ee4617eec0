//! Language registry: Single source of truth for the supported languages.
//!
//! The page is bilingual, so the registry holds exactly two entries. It uses a
//! singleton pattern with `OnceLock`, initialized on first access and immutable
//! thereafter.

use std::sync::OnceLock;

/// Text-flow orientation of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Right-to-left (Hebrew)
    Rtl,
    /// Left-to-right (English)
    Ltr,
}

impl Direction {
    /// Value written to the document's `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "he", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Hebrew", "English")
    pub name: &'static str,

    /// Native name, shown on the language toggle (e.g., "עברית", "English")
    pub native_name: &'static str,

    /// Reading direction of the language
    pub direction: Direction,

    /// Whether this language is used when no preference has been stored
    pub is_default: bool,

    /// Whether lookups fall back to this language (only one should be true)
    pub is_fallback: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language.
    pub fn default_language(&self) -> &LanguageConfig {
        self.single(|lang| lang.is_default, "default")
    }

    /// Get the fallback language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one fallback language.
    pub fn fallback(&self) -> &LanguageConfig {
        self.single(|lang| lang.is_fallback, "fallback")
    }

    /// Get the configuration of the language the toggle switches to from `code`.
    ///
    /// Returns `None` for unknown codes.
    pub fn other_than(&self, code: &str) -> Option<&LanguageConfig> {
        self.get_by_code(code)?;
        self.languages.iter().find(|lang| lang.code != code)
    }

    fn single(&self, pred: impl Fn(&LanguageConfig) -> bool, what: &str) -> &LanguageConfig {
        let matching: Vec<_> = self.languages.iter().filter(|lang| pred(lang)).collect();

        match matching.len() {
            0 => panic!("No {} language found in registry", what),
            1 => matching[0],
            _ => panic!("Multiple {} languages found in registry", what),
        }
    }
}

/// Default language configurations: Hebrew (default, RTL) and English (fallback).
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "he",
            name: "Hebrew",
            native_name: "עברית",
            direction: Direction::Rtl,
            is_default: true,
            is_fallback: false,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            direction: Direction::Ltr,
            is_default: false,
            is_fallback: true,
        },
    ]
}
