use cartlink_core::HeaderError;
use thiserror::Error;

/// Errors that abort a session or a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// I/O error on the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device stopped sending before a full unit arrived
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// The transport accepted fewer bytes than a full chunk
    #[error("Short write: expected {expected} bytes accepted, got {actual}")]
    ShortWrite { expected: usize, actual: usize },

    /// The handshake response could not be used as a header
    #[error("Bad header: {0}")]
    Header(#[from] HeaderError),

    /// The serial port could not be opened or configured
    #[error("Serial port error: {0}")]
    Port(String),
}

impl TransferError {
    pub fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortRead { expected, actual }
    }

    pub fn short_write(expected: usize, actual: usize) -> Self {
        Self::ShortWrite { expected, actual }
    }

    pub fn port(msg: impl Into<String>) -> Self {
        Self::Port(msg.into())
    }
}

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has the wrong shape
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
