use thiserror::Error;

/// Failure reported by a storage port.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors surfaced by the localization engine.
///
/// Translation passes never produce these: missing keys, nodes and anchors are
/// skipped. They only come from explicit operations such as parsing a code or
/// loading a translation table.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("unknown language code: '{0}'")]
    UnknownLanguage(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to read translation table: {0}")]
    TableIo(#[from] std::io::Error),

    #[error("failed to parse translation table: {0}")]
    TableParse(#[from] serde_json::Error),

    #[error("a language toggle is already in progress")]
    ToggleInFlight,
}
