//! Cartridge data model shared by the protocol layer and the CLI.
//!
//! Everything here is pure: parsing and validating the cartridge header,
//! and turning its size codes into transfer plans.

pub mod error;
pub mod header;
pub mod mapper;
pub mod size;
pub mod util;

pub use error::HeaderError;
pub use header::{CartridgeHeader, HEADER_SIZE, header_checksum};
pub use mapper::Mapper;
pub use size::{
    BANK_SIZE, BLOCK_SIZE, TransferPlan, ram_bank_count, ram_block_count, rom_block_count,
};
