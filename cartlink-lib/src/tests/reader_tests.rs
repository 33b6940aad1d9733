use super::*;
use std::cell::RefCell;
use std::io::{self, Cursor, Read, Write};

/// Serves data in fixed-size pieces, like a serial port delivering whatever
/// has arrived so far.
struct Chunked {
    data: Cursor<Vec<u8>>,
    piece: usize,
}

impl Read for Chunked {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.piece);
        self.data.read(&mut buf[..n])
    }
}

impl Write for Chunked {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + i / 512) as u8).collect()
}

#[test]
fn test_dump_reads_exact_blocks_in_order() {
    let data = pattern(4 * BLOCK_SIZE);
    let mut t = Cursor::new(data.clone());
    let out = BulkReader::new(&mut t)
        .dump(4, &crate::no_progress)
        .unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_dump_leaves_extra_bytes_unread() {
    let mut data = pattern(2 * BLOCK_SIZE);
    data.extend_from_slice(&[0xEE; 10]);
    let mut t = Cursor::new(data.clone());
    let out = BulkReader::new(&mut t)
        .dump(2, &crate::no_progress)
        .unwrap();
    assert_eq!(out, &data[..2 * BLOCK_SIZE]);
    assert_eq!(t.position() as usize, 2 * BLOCK_SIZE);
}

#[test]
fn test_dump_assembles_blocks_from_small_reads() {
    let data = pattern(3 * BLOCK_SIZE);
    let mut t = Chunked {
        data: Cursor::new(data.clone()),
        piece: 61,
    };
    let out = BulkReader::new(&mut t)
        .dump(3, &crate::no_progress)
        .unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_dump_zero_blocks_is_empty() {
    let mut t = Cursor::new(vec![1u8; BLOCK_SIZE]);
    let out = BulkReader::new(&mut t)
        .dump(0, &crate::no_progress)
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(t.position(), 0);
}

#[test]
fn test_short_block_is_error_not_padding() {
    let data = pattern(BLOCK_SIZE + 100);
    let mut t = Cursor::new(data);
    let err = BulkReader::new(&mut t)
        .dump(2, &crate::no_progress)
        .unwrap_err();
    assert!(matches!(
        err,
        TransferError::ShortRead {
            expected: 512,
            actual: 100
        }
    ));
}

#[test]
fn test_progress_reported_per_block() {
    let events = RefCell::new(Vec::new());
    let mut t = Cursor::new(pattern(3 * BLOCK_SIZE));
    BulkReader::new(&mut t)
        .dump(3, &|p| events.borrow_mut().push(p))
        .unwrap();

    assert_eq!(
        events.into_inner(),
        vec![
            TransferProgress::started(3, BLOCK_SIZE),
            TransferProgress::unit(1, 3),
            TransferProgress::unit(2, 3),
            TransferProgress::unit(3, 3),
            TransferProgress::completed(3 * BLOCK_SIZE as u64),
        ]
    );
}

#[test]
fn test_no_completion_after_short_read() {
    let events = RefCell::new(Vec::new());
    let mut t = Cursor::new(pattern(BLOCK_SIZE));
    let result = BulkReader::new(&mut t).dump(2, &|p| events.borrow_mut().push(p));
    assert!(result.is_err());

    let events = events.into_inner();
    assert_eq!(events.last(), Some(&TransferProgress::unit(1, 2)));
}
