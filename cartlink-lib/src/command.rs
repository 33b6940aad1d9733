//! Two-byte command framing: `0xCA` followed by the command code.

use crate::error::TransferError;
use crate::transport::Transport;

/// Every command starts with this byte. The reader ignores anything else
/// until it sees one.
pub const COMMAND_PREFIX: u8 = 0xCA;

/// Commands understood by the reader firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reply with the 80-byte header
    DumpHeader,
    /// Stream the whole ROM in 512-byte blocks
    DumpRom,
    /// Stream the whole RAM in 512-byte blocks
    DumpRam,
    /// Receive RAM contents in acknowledged 32-byte chunks
    FlashRam,
}

impl Command {
    pub fn code(self) -> u8 {
        match self {
            Self::DumpHeader => 0x00,
            Self::DumpRom => 0x01,
            Self::DumpRam => 0x02,
            Self::FlashRam => 0x04,
        }
    }

    /// Unknown codes are no-ops on the device, so they map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::DumpHeader),
            0x01 => Some(Self::DumpRom),
            0x02 => Some(Self::DumpRam),
            0x04 => Some(Self::FlashRam),
            _ => None,
        }
    }

    pub fn frame(self) -> [u8; 2] {
        [COMMAND_PREFIX, self.code()]
    }

    /// Write this command to the transport and flush it.
    pub fn send<T: Transport + ?Sized>(self, transport: &mut T) -> Result<(), TransferError> {
        log::debug!("Sending {:?} ({:02X?})", self, self.frame());
        transport.write_all(&self.frame())?;
        transport.flush()?;
        Ok(())
    }
}
