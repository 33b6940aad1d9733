use cartlink_lib::{SettingsError, TransferError};
use thiserror::Error;

/// Errors that end a CLI run with a non-zero exit status.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Protocol or transport failure
    #[error("{0}")]
    Transfer(#[from] TransferError),

    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// A payload file could not be read or written
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
