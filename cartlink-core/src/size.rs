//! Transfer sizes derived from the header's ROM and RAM size codes.
//!
//! Unknown codes are not errors here. They resolve to zero units, so a dump
//! produces an empty file and a flash does nothing.

use crate::header::CartridgeHeader;

/// Unit size for ROM and RAM dumps.
pub const BLOCK_SIZE: usize = 512;

/// Unit size for RAM flashing; also the cartridge's RAM bank size.
pub const BANK_SIZE: usize = 0x2000;

/// Number of dump blocks per RAM bank.
pub const BLOCKS_PER_RAM_BANK: usize = BANK_SIZE / BLOCK_SIZE;

/// Number of 512-byte blocks in a ROM of the given size code.
///
/// Code 0 is 32 KB and each step doubles it. Codes whose byte size does not
/// fit in a `usize` resolve to zero.
pub fn rom_block_count(code: u8) -> usize {
    2usize
        .checked_shl(u32::from(code))
        .and_then(|banks| banks.checked_mul(32))
        .filter(|blocks| blocks.checked_mul(BLOCK_SIZE).is_some())
        .unwrap_or(0)
}

/// Number of 8 KB RAM banks for the given RAM size code.
pub fn ram_bank_count(code: u8) -> usize {
    match code {
        2 => 1,
        3 => 4,
        4 => 16,
        5 => 8,
        _ => 0,
    }
}

/// Number of 512-byte blocks needed to dump the RAM for the given code.
pub fn ram_block_count(code: u8) -> usize {
    ram_bank_count(code) * BLOCKS_PER_RAM_BANK
}

/// How many fixed-size units a transfer consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub units: usize,
    pub unit_size: usize,
}

impl TransferPlan {
    pub fn new(units: usize, unit_size: usize) -> Self {
        Self { units, unit_size }
    }

    /// Blocks streamed by a ROM dump.
    pub fn rom_dump(header: &CartridgeHeader) -> Self {
        Self::new(rom_block_count(header.rom_size_code), BLOCK_SIZE)
    }

    /// Blocks streamed by a RAM dump.
    pub fn ram_dump(header: &CartridgeHeader) -> Self {
        Self::new(ram_block_count(header.ram_size_code), BLOCK_SIZE)
    }

    /// Banks driven by a RAM flash.
    pub fn ram_flash(header: &CartridgeHeader) -> Self {
        Self::new(ram_bank_count(header.ram_size_code), BANK_SIZE)
    }

    pub fn total_bytes(&self) -> u64 {
        (self.units as u64).saturating_mul(self.unit_size as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.units == 0
    }
}

#[cfg(test)]
#[path = "tests/size_tests.rs"]
mod tests;
