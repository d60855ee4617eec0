//! Internationalization (i18n) core: languages, translation table, metrics.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the two supported languages
//! - `language`: Validated `Language` type (Hebrew / English)
//! - `table`: Translation table and key resolution with English fallback
//! - `metrics`: Per-pass counters and the serializable `PassReport`
//!
//! # Example
//!
//! ```rust,ignore
//! use acadeva_i18n::i18n::{Language, TranslationTable};
//!
//! let table = TranslationTable::from_json(r#"{"welcome": {"he": "שלום", "en": "Welcome"}}"#)?;
//! assert_eq!(table.resolve("welcome", Language::ENGLISH), Some("Welcome"));
//! ```

mod language;
mod metrics;
mod registry;
mod table;

pub use language::Language;
pub use metrics::{PassMetrics, PassReport};
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use table::{Lookup, TranslationTable};
