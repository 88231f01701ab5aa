use std::path::PathBuf;

/// Errors raised by a settings storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read
    #[error("failed to read settings from '{path}': {details}")]
    ReadFailed {
        /// File that was read
        path: PathBuf,
        /// Error details from the read
        details: String,
    },

    /// The backing file could not be written
    #[error("failed to persist settings to '{path}': {details}")]
    WriteFailed {
        /// File that was written
        path: PathBuf,
        /// Error details from the write
        details: String,
    },

    /// Stored content is not a JSON object
    #[error("failed to parse settings from {location}: {details}")]
    ParseFailed {
        /// Where the content came from
        location: String,
        /// Parse error details
        details: String,
    },

    /// A value could not be serialised
    #[error("failed to serialize {content_type}: {details}")]
    SerializationFailed {
        /// What was being serialised
        content_type: String,
        /// Serialisation error details
        details: String,
    },

    /// The backend refused the operation
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
}
