//! Hebrew/English page localization.
//!
//! Reads the preferred language from storage, resolves keys against a static
//! translation table with English fallback, and rewrites every bound node of
//! a document through the `DomPort` abstraction.

pub mod applicator;
pub mod config;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod store;
pub mod toggle;

pub use applicator::Applicator;
pub use error::{I18nError, StorageError};
pub use i18n::{Direction, Language, PassReport, TranslationTable};
pub use store::{FileStorage, LanguageStore, MemoryStorage, StoragePort};
pub use toggle::{LanguageChanged, RefreshHook, ToggleController};
