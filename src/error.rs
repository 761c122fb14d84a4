use thiserror::Error;

/// Central error type for the content repository
///
/// Lookups that miss never produce an error; they return `None` or `false`.
/// Everything here is a storage, data, or configuration failure.
#[derive(Error, Debug)]
pub enum ContentError {
    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Failed to load from storage: {0}")]
    StorageLoadFailed(String),

    #[error("Failed to save to storage: {0}")]
    StorageSaveFailed(String),

    #[error("Collection under key '{key}' is corrupt: {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // ============================================================================
    // Content Errors
    // ============================================================================
    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Invalid update: {0}")]
    InvalidPatch(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Unknown media type: {0}")]
    UnknownMediaType(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Builder pattern validation error
    #[error("Builder error: {0}")]
    BuilderError(String),

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutex lock error")]
    LockError,
}

// Implement conversion from PoisonError for Mutex locks
impl<T> From<std::sync::PoisonError<T>> for ContentError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ContentError::LockError
    }
}

// Implement conversion to String for front-ends that only show messages
impl From<ContentError> for String {
    fn from(error: ContentError) -> Self {
        error.to_string()
    }
}

// Helper type alias for Results
pub type ContentResult<T> = Result<T, ContentError>;
