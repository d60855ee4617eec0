use crate::i18n::Language;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::toggle::DEFAULT_REFRESH_DELAY;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Language preference
    pub storage_key: String,
    pub default_language: Language,

    // Files
    pub translations_file: String,
    pub state_file: String,

    // Toggle
    pub refresh_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_language: Language::default_language(),
            translations_file: "translations.json".to_string(),
            state_file: ".acadeva-state.json".to_string(),
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let default_language = match std::env::var("ACADEVA_DEFAULT_LANG") {
            Ok(code) => Language::from_code(&code).context("ACADEVA_DEFAULT_LANG is invalid")?,
            Err(_) => defaults.default_language,
        };

        Ok(Self {
            storage_key: std::env::var("ACADEVA_STORAGE_KEY").unwrap_or(defaults.storage_key),
            default_language,

            translations_file: std::env::var("ACADEVA_TRANSLATIONS")
                .unwrap_or(defaults.translations_file),
            state_file: std::env::var("ACADEVA_STATE_FILE").unwrap_or(defaults.state_file),

            refresh_delay: std::env::var("ACADEVA_REFRESH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh_delay),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "ACADEVA_STORAGE_KEY",
        "ACADEVA_DEFAULT_LANG",
        "ACADEVA_TRANSLATIONS",
        "ACADEVA_STATE_FILE",
        "ACADEVA_REFRESH_DELAY_MS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.storage_key, "acadeva-lang");
        assert_eq!(config.default_language, Language::HEBREW);
        assert_eq!(config.translations_file, "translations.json");
        assert_eq!(config.refresh_delay, Duration::from_millis(100));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("ACADEVA_STORAGE_KEY", "site-lang");
        std::env::set_var("ACADEVA_DEFAULT_LANG", "en");
        std::env::set_var("ACADEVA_REFRESH_DELAY_MS", "250");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.storage_key, "site-lang");
        assert_eq!(config.default_language, Language::ENGLISH);
        assert_eq!(config.refresh_delay, Duration::from_millis(250));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_default_language() {
        clear_env();
        std::env::set_var("ACADEVA_DEFAULT_LANG", "fr");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_unparseable_delay_uses_default() {
        clear_env();
        std::env::set_var("ACADEVA_REFRESH_DELAY_MS", "soon");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.refresh_delay, DEFAULT_REFRESH_DELAY);
    }
}
