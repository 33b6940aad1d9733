//! Block-based bulk reads.
//!
//! Once triggered, the reader streams blocks back to back with no
//! acknowledgement from the host, so the only thing to get right is taking
//! exactly one block's worth of bytes per iteration.

use cartlink_core::BLOCK_SIZE;

use crate::error::TransferError;
use crate::progress::TransferProgress;
use crate::transport::{Transport, read_exact};

/// Streams fixed-size blocks from the device into a buffer.
pub struct BulkReader<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: Transport + ?Sized> BulkReader<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        Self { transport }
    }

    /// Read exactly `block_count` blocks of [`BLOCK_SIZE`] bytes.
    ///
    /// A block that does not arrive in full aborts the dump with
    /// [`TransferError::ShortRead`]; none of its bytes reach the output.
    pub fn dump(
        &mut self,
        block_count: usize,
        progress: &dyn Fn(TransferProgress),
    ) -> Result<Vec<u8>, TransferError> {
        progress(TransferProgress::started(block_count, BLOCK_SIZE));

        let mut data = Vec::with_capacity(block_count.min(1 << 16) * BLOCK_SIZE);
        let mut block = [0u8; BLOCK_SIZE];
        for i in 0..block_count {
            read_exact(&mut *self.transport, &mut block).inspect_err(|e| {
                log::debug!("Block {}/{} failed: {}", i + 1, block_count, e);
            })?;
            data.extend_from_slice(&block);
            progress(TransferProgress::unit(i + 1, block_count));
        }

        progress(TransferProgress::completed(data.len() as u64));
        Ok(data)
    }
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
