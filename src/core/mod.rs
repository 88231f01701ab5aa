use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{cli::CliError, config_store::StorageError, formatting::FormatError};

/// Error types for the world clock application.
///
/// Wraps the errors of the individual subsystems so the binary can report
/// any of them through one type.
#[derive(Error, Debug)]
pub enum WorldClockError {
    /// The settings location could not be determined or prepared
    #[error("cannot use settings directory '{path}': {details}")]
    SettingsDirectory {
        /// Directory that could not be used
        path: PathBuf,
        /// Error details
        details: String,
    },

    /// Logging could not be initialised
    #[error("failed to initialise logging: {details}")]
    Logging {
        /// Error details
        details: String,
    },

    /// Settings storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Clock formatting error
    #[error(transparent)]
    Format(#[from] FormatError),

    /// CLI command error
    #[error(transparent)]
    Cli(#[from] CliError),

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for world clock operations.
pub type Result<T> = std::result::Result<T, WorldClockError>;

impl WorldClockError {
    /// Creates a settings directory error for `path`.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error
    /// * `path` - Directory that could not be created or resolved
    pub fn settings_directory(error: impl std::fmt::Display, path: &Path) -> Self {
        let clean_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        WorldClockError::SettingsDirectory {
            path: clean_path,
            details: error.to_string(),
        }
    }

    /// Creates a logging initialisation error.
    pub fn logging(error: impl std::fmt::Display) -> Self {
        WorldClockError::Logging {
            details: error.to_string(),
        }
    }
}
