//! Bank-based synchronized writes.
//!
//! The device is the slow side: it commits every byte to cartridge RAM
//! before it can take more. Each 32-byte chunk is therefore followed by a
//! one-byte acknowledgement, and each 8 KB bank by one more once the bank
//! has been committed. The writer never sends ahead of an acknowledgement.

use std::io::Write;

use cartlink_core::BANK_SIZE;

use crate::error::TransferError;
use crate::progress::TransferProgress;
use crate::transport::{Transport, read_byte};

/// Bytes per chunk; the width of the device's receive buffer.
pub const CHUNK_SIZE: usize = 32;

/// Chunks per bank.
pub const CHUNKS_PER_BANK: usize = BANK_SIZE / CHUNK_SIZE;

/// Byte the firmware sends after storing a chunk.
pub const CHUNK_ACK: u8 = 0xAB;

/// Byte the firmware sends after committing a bank.
pub const BANK_ACK: u8 = 0xAA;

/// Stop-and-wait state of a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkState {
    Ready,
    Sent,
    AwaitingAck,
    Acked,
}

/// Streams a payload to the device in acknowledged chunks and banks.
pub struct BulkWriter<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: Transport + ?Sized> BulkWriter<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self { transport }
    }

    /// Flash `bank_count` banks of `data` to the device.
    ///
    /// Bank `i` is `data[i * 0x2000 ..]`, clamped to the end of `data`; a
    /// short tail is sent as-is, never padded. Any chunk the transport does
    /// not fully accept aborts the flash with [`TransferError::ShortWrite`].
    /// Banks already committed stay written.
    pub fn flash(
        &mut self,
        data: &[u8],
        bank_count: usize,
        progress: &dyn Fn(TransferProgress),
    ) -> Result<(), TransferError> {
        progress(TransferProgress::started(bank_count, BANK_SIZE));

        let mut sent: u64 = 0;
        for i in 0..bank_count {
            let bank = clamped(data, i * BANK_SIZE, BANK_SIZE);
            self.flash_bank(bank).inspect_err(|e| {
                log::debug!("Bank {}/{} failed: {}", i + 1, bank_count, e);
            })?;
            sent += bank.len() as u64;
            progress(TransferProgress::unit(i + 1, bank_count));
        }

        progress(TransferProgress::completed(sent));
        Ok(())
    }

    fn flash_bank(&mut self, bank: &[u8]) -> Result<(), TransferError> {
        for j in 0..CHUNKS_PER_BANK {
            self.send_chunk(clamped(bank, j * CHUNK_SIZE, CHUNK_SIZE))?;
        }
        // The device answers once the whole bank is committed
        self.await_ack(BANK_ACK)
    }

    fn send_chunk(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        let mut state = ChunkState::Ready;
        loop {
            state = match state {
                ChunkState::Ready => {
                    let written = self.transport.write(chunk)?;
                    if written != CHUNK_SIZE {
                        return Err(TransferError::short_write(CHUNK_SIZE, written));
                    }
                    ChunkState::Sent
                }
                ChunkState::Sent => {
                    self.transport.flush()?;
                    ChunkState::AwaitingAck
                }
                ChunkState::AwaitingAck => {
                    self.await_ack(CHUNK_ACK)?;
                    ChunkState::Acked
                }
                ChunkState::Acked => return Ok(()),
            };
            log::trace!("chunk -> {:?}", state);
        }
    }

    /// Block until the device sends its next acknowledgement byte.
    ///
    /// The value itself carries no information the protocol relies on.
    fn await_ack(&mut self, expected: u8) -> Result<(), TransferError> {
        let ack = read_byte(&mut *self.transport)?;
        if ack != expected {
            log::debug!("Unexpected ack {:#04x} (wanted {:#04x})", ack, expected);
        }
        Ok(())
    }
}

/// `data[start..start + len]`, clamped to the slice bounds.
fn clamped(data: &[u8], start: usize, len: usize) -> &[u8] {
    let start = start.min(data.len());
    let end = start.saturating_add(len).min(data.len());
    &data[start..end]
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
