//! The byte pipe between host and reader.
//!
//! Any blocking `Read + Write` works: a serial port in production, the
//! simulated cartridge or a scripted buffer in tests. Timeouts belong to
//! the transport itself; a timed-out read shows up here as a short read.

use std::io::{ErrorKind, Read, Write};

use crate::error::TransferError;

/// A bidirectional, blocking byte stream to the cartridge reader.
pub trait Transport: Read + Write {}
impl<T: Read + Write + ?Sized> Transport for T {}

/// Fill `buf` completely from the transport.
///
/// Partial reads are accumulated. End of stream or a transport timeout
/// before the buffer is full is reported as [`TransferError::ShortRead`]
/// with the number of bytes that did arrive.
pub fn read_exact<T: Transport + ?Sized>(
    transport: &mut T,
    buf: &mut [u8],
) -> Result<(), TransferError> {
    let mut filled = 0;
    while filled < buf.len() {
        match transport.read(&mut buf[filled..]) {
            Ok(0) => return Err(TransferError::short_read(buf.len(), filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                log::debug!("Transport timed out after {} of {} bytes", filled, buf.len());
                return Err(TransferError::short_read(buf.len(), filled));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Read and return a single response byte.
pub fn read_byte<T: Transport + ?Sized>(transport: &mut T) -> Result<u8, TransferError> {
    let mut byte = [0u8; 1];
    read_exact(transport, &mut byte)?;
    Ok(byte[0])
}
