//! A connection to the reader, from handshake to the last transfer.
//!
//! The session owns the transport. Dropping the session (including on an
//! error path) drops the transport, which closes the port.

use std::time::Duration;

use cartlink_core::{CartridgeHeader, HEADER_SIZE, HeaderError, TransferPlan};

use crate::command::Command;
use crate::error::TransferError;
use crate::progress::TransferProgress;
use crate::reader::BulkReader;
use crate::transport::{Transport, read_exact};
use crate::writer::BulkWriter;

/// Time the device needs after a flash trigger before the first chunk.
pub const FLASH_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// An open session with a cartridge reader.
pub struct Session<T: Transport> {
    transport: T,
    header: CartridgeHeader,
    flash_delay: Duration,
}

impl<T: Transport> Session<T> {
    /// Perform the handshake and read the cartridge header.
    ///
    /// A header that fails its checksum is still returned; callers decide
    /// what to do with [`CartridgeHeader::verify`]. A response shorter than
    /// a header is fatal.
    pub fn connect(mut transport: T) -> Result<Self, TransferError> {
        Command::DumpHeader.send(&mut transport)?;

        let mut raw = [0u8; HEADER_SIZE];
        read_exact(&mut transport, &mut raw).map_err(|e| match e {
            TransferError::ShortRead { actual, .. } => {
                HeaderError::too_short(HEADER_SIZE, actual).into()
            }
            other => other,
        })?;
        let header = CartridgeHeader::parse(&raw)?;
        log::debug!(
            "Header received: cart type {:#04x}, ROM code {:#04x}, RAM code {:#04x}",
            header.cart_type,
            header.rom_size_code,
            header.ram_size_code,
        );

        Ok(Self {
            transport,
            header,
            flash_delay: FLASH_SETTLE_DELAY,
        })
    }

    /// Override the wait between the flash trigger and the first chunk.
    pub fn with_flash_delay(mut self, delay: Duration) -> Self {
        self.flash_delay = delay;
        self
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// Dump the whole ROM.
    pub fn dump_rom(
        &mut self,
        progress: &dyn Fn(TransferProgress),
    ) -> Result<Vec<u8>, TransferError> {
        let plan = TransferPlan::rom_dump(&self.header);
        self.dump(Command::DumpRom, plan, progress)
    }

    /// Dump the whole cartridge RAM. Cartridges without RAM, or with an
    /// unknown RAM size code, yield an empty buffer.
    pub fn dump_ram(
        &mut self,
        progress: &dyn Fn(TransferProgress),
    ) -> Result<Vec<u8>, TransferError> {
        let plan = TransferPlan::ram_dump(&self.header);
        self.dump(Command::DumpRam, plan, progress)
    }

    /// Write `data` into the cartridge RAM, one 8 KB bank at a time.
    ///
    /// The number of banks comes from the header, not from `data`. A failed
    /// flash leaves earlier banks written.
    pub fn flash_ram(
        &mut self,
        data: &[u8],
        progress: &dyn Fn(TransferProgress),
    ) -> Result<(), TransferError> {
        let plan = TransferPlan::ram_flash(&self.header);
        if data.len() as u64 != plan.total_bytes() {
            log::warn!(
                "Payload is {} bytes but the cartridge RAM holds {}",
                data.len(),
                plan.total_bytes(),
            );
        }

        Command::FlashRam.send(&mut self.transport)?;
        if !self.flash_delay.is_zero() {
            std::thread::sleep(self.flash_delay);
        }
        BulkWriter::new(&mut self.transport).flash(data, plan.units, progress)
    }

    /// Give the transport back, ending the session.
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn dump(
        &mut self,
        command: Command,
        plan: TransferPlan,
        progress: &dyn Fn(TransferProgress),
    ) -> Result<Vec<u8>, TransferError> {
        log::debug!("{:?}: {} blocks of {} bytes", command, plan.units, plan.unit_size);
        command.send(&mut self.transport)?;
        BulkReader::new(&mut self.transport).dump(plan.units, progress)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
