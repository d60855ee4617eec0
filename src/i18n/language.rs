//! Language type: validated language representation.
//!
//! A `Language` can only be constructed for codes present in the registry, so
//! downstream code never has to re-check membership in the supported set.

use crate::error::I18nError;
use crate::i18n::{Direction, LanguageConfig, LanguageRegistry};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code ("he" or "en")
    code: &'static str,
}

impl Language {
    /// Hebrew, the RTL language and the default when nothing is stored.
    pub const HEBREW: Language = Language { code: "he" };

    /// English, the fallback language for missing translations.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is supported
    /// * `Err(I18nError::UnknownLanguage)` otherwise
    ///
    /// # Example
    /// ```ignore
    /// let hebrew = Language::from_code("he")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| I18nError::UnknownLanguage(code.to_string()))
    }

    /// The language used when no preference is stored.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// The language lookups fall back to.
    pub fn fallback() -> Language {
        Language {
            code: LanguageRegistry::get().fallback().code,
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the native name of the language (used as the toggle label).
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Reading direction of this language.
    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    /// Check if this is the fallback language.
    pub fn is_fallback(&self) -> bool {
        self.config().is_fallback
    }

    /// The other member of the two-language set.
    ///
    /// # Panics
    /// Panics if the registry holds fewer than two languages.
    pub fn other(&self) -> Language {
        let config = LanguageRegistry::get()
            .other_than(self.code)
            .expect("Registry should define two languages");
        Language { code: config.code }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_hebrew_constant() {
        let hebrew = Language::HEBREW;
        assert_eq!(hebrew.code(), "he");
        assert_eq!(hebrew.config().name, "Hebrew");
        assert_eq!(hebrew.direction(), Direction::Rtl);
        assert!(!hebrew.is_fallback());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.direction(), Direction::Ltr);
        assert!(english.is_fallback());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Language::from_code("he").unwrap(), Language::HEBREW);
        assert_eq!(Language::from_code("en").unwrap(), Language::ENGLISH);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(matches!(result, Err(I18nError::UnknownLanguage(ref code)) if code == "fr"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== Default / Fallback Tests ====================

    #[test]
    fn test_default_is_hebrew() {
        assert_eq!(Language::default_language(), Language::HEBREW);
    }

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(Language::fallback(), Language::ENGLISH);
    }

    // ==================== other() Tests ====================

    #[test]
    fn test_other_flips() {
        assert_eq!(Language::HEBREW.other(), Language::ENGLISH);
        assert_eq!(Language::ENGLISH.other(), Language::HEBREW);
        assert_eq!(Language::HEBREW.other().other(), Language::HEBREW);
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Language::HEBREW.native_name(), "עברית");
        assert_eq!(Language::ENGLISH.native_name(), "English");
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display() {
        assert_eq!(Language::HEBREW.to_string(), "he");
    }

    #[test]
    fn test_serde_as_code() {
        let json = serde_json::to_string(&Language::ENGLISH).unwrap();
        assert_eq!(json, "\"en\"");

        let parsed: Language = serde_json::from_str("\"he\"").unwrap();
        assert_eq!(parsed, Language::HEBREW);
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        let result: Result<Language, _> = serde_json::from_str("\"de\"");
        assert!(result.is_err());
    }
}
