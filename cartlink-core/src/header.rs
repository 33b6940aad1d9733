//! Game Boy / Game Boy Color cartridge header model.
//!
//! The reader answers the handshake with the 80-byte header region of the
//! cartridge (addresses 0x0100-0x014F). All offsets in this module are
//! relative to the start of that region, so offset `n` here is cartridge
//! address `0x0100 + n`.

use crate::error::HeaderError;
use crate::mapper::Mapper;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Size of the header blob returned by the handshake.
pub const HEADER_SIZE: usize = 80;

const ENTRY_POINT: usize = 0x00;
const LOGO_START: usize = 0x04;
const LOGO_END: usize = 0x34;
const TITLE_START: usize = 0x34;
const TITLE_END: usize = 0x44;
const CGB_FLAG: usize = 0x43;
const NEW_LICENSEE: usize = 0x44;
const SGB_FLAG: usize = 0x46;
const CART_TYPE: usize = 0x47;
const ROM_SIZE: usize = 0x48;
const RAM_SIZE: usize = 0x49;
const DESTINATION: usize = 0x4A;
const OLD_LICENSEE: usize = 0x4B;
const MASK_ROM_VERSION: usize = 0x4C;
const HEADER_CHECKSUM: usize = 0x4D;
const GLOBAL_CHECKSUM: usize = 0x4E;

/// The title is cut here when no terminator is present. The 16th byte of
/// the field doubles as the CGB flag on colour cartridges.
const TITLE_MAX_LEN: usize = 15;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Parsed cartridge header. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    raw: [u8; HEADER_SIZE],
    pub entry_point: [u8; 4],
    pub nintendo_logo: [u8; 48],
    pub cgb_flag: u8,
    pub new_licensee_code: [u8; 2],
    pub sgb_flag: u8,
    pub cart_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub destination_code: u8,
    pub old_licensee_code: u8,
    pub mask_rom_version: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl CartridgeHeader {
    /// Parse a header from the handshake response.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are used. A shorter buffer means
    /// the device did not answer correctly.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_SIZE {
            return Err(HeaderError::too_short(HEADER_SIZE, bytes.len()));
        }

        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&bytes[..HEADER_SIZE]);

        let mut entry_point = [0u8; 4];
        entry_point.copy_from_slice(&raw[ENTRY_POINT..LOGO_START]);

        let mut nintendo_logo = [0u8; 48];
        nintendo_logo.copy_from_slice(&raw[LOGO_START..LOGO_END]);

        Ok(Self {
            entry_point,
            nintendo_logo,
            cgb_flag: raw[CGB_FLAG],
            new_licensee_code: [raw[NEW_LICENSEE], raw[NEW_LICENSEE + 1]],
            sgb_flag: raw[SGB_FLAG],
            cart_type: raw[CART_TYPE],
            rom_size_code: raw[ROM_SIZE],
            ram_size_code: raw[RAM_SIZE],
            destination_code: raw[DESTINATION],
            old_licensee_code: raw[OLD_LICENSEE],
            mask_rom_version: raw[MASK_ROM_VERSION],
            header_checksum: raw[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([raw[GLOBAL_CHECKSUM], raw[GLOBAL_CHECKSUM + 1]]),
            raw,
        })
    }

    /// Raw 16-byte title field, including padding and the CGB flag byte.
    pub fn title_field(&self) -> &[u8] {
        &self.raw[TITLE_START..TITLE_END]
    }

    /// Compute the header checksum over everything from the title up to,
    /// but excluding, the checksum byte.
    pub fn computed_checksum(&self) -> u8 {
        header_checksum(&self.raw[TITLE_START..HEADER_CHECKSUM])
    }

    /// True when the stored checksum matches the computed one.
    pub fn is_valid(&self) -> bool {
        self.computed_checksum() == self.header_checksum
    }

    /// Like [`is_valid`](Self::is_valid), but describes the mismatch.
    ///
    /// Unlicensed or damaged cartridges routinely fail this check, so
    /// callers should report the error and carry on.
    pub fn verify(&self) -> Result<(), HeaderError> {
        let actual = self.computed_checksum();
        if actual == self.header_checksum {
            Ok(())
        } else {
            Err(HeaderError::ChecksumMismatch {
                expected: self.header_checksum,
                actual,
            })
        }
    }

    /// Decode the cartridge title.
    ///
    /// The title ends at the first zero byte, or after 15 bytes when there
    /// is none. Fails on the first byte outside the ASCII range.
    pub fn title(&self) -> Result<String, HeaderError> {
        let bytes = self.title_bytes();
        if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(HeaderError::Decode {
                offset: TITLE_START + pos,
                byte: bytes[pos],
            });
        }
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Decode the title, replacing non-ASCII bytes with `?`.
    pub fn title_lossy(&self) -> String {
        self.title_bytes()
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect()
    }

    fn title_bytes(&self) -> &[u8] {
        let field = self.title_field();
        let end = field
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TITLE_MAX_LEN)
            .min(TITLE_MAX_LEN);
        &field[..end]
    }

    /// Memory bank controller named by the cartridge type byte.
    pub fn mapper(&self) -> Mapper {
        Mapper::from_cart_type(self.cart_type)
    }

    /// True for cartridges that declare Game Boy Color support.
    pub fn is_cgb(&self) -> bool {
        self.cgb_flag & 0x80 != 0
    }
}

/// Game Boy header checksum: `x = x - b - 1` over every byte, mod 256.
pub fn header_checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
