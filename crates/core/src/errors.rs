use thiserror::Error;

/// Unified error type for the entire sum-aggregator-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input Validation ────────────────────────────────────────────
    /// One message per failed rule, joined by newlines.
    #[error("{0}")]
    Validation(String),

    // ── Save Guards ─────────────────────────────────────────────────
    #[error("No entries to save")]
    NothingToSave,

    #[error("Workspace already saved")]
    AlreadySaved,

    // ── Lookup ──────────────────────────────────────────────────────
    #[error("No entry at index {0}")]
    EntryNotFound(usize),

    #[error("No saved workspace at index {0}")]
    WorkspaceNotFound(usize),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
