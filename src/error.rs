use thiserror::Error;

/// Typed failures surfaced to the caller. Extraction never errors for a
/// missing field; that is reported in-band via the "Not found" sentinel.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("empty input")]
    EmptyInput,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("application #{0} not found")]
    NotFound(i64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
