use thiserror::Error;

/// Errors that can occur while parsing or validating a cartridge header.
///
/// Only [`HeaderError::TooShort`] is fatal to a session. The other variants
/// describe data-quality problems with an otherwise usable header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The device answered with fewer bytes than a header occupies
    #[error("Header too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// The stored header checksum does not match the computed one
    #[error("Header checksum mismatch: expected {expected:#04x}, computed {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// A title byte is outside the ASCII range
    #[error("Title byte {byte:#04x} at header offset {offset:#04x} is not ASCII")]
    Decode { offset: usize, byte: u8 },
}

impl HeaderError {
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::TooShort { expected, actual }
    }

    /// True for errors that leave the header unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TooShort { .. })
    }
}
