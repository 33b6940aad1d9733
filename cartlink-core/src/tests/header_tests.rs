use super::*;

/// Build an 80-byte header blob with the given title and a correct checksum.
fn make_header(title: &[u8]) -> Vec<u8> {
    let mut hdr = vec![0u8; HEADER_SIZE];

    // Entry point: NOP + JP 0x0150
    hdr[0x00] = 0x00;
    hdr[0x01] = 0xC3;
    hdr[0x02] = 0x50;
    hdr[0x03] = 0x01;

    // Logo region gets a recognisable pattern; it is never validated
    for (i, b) in hdr[LOGO_START..LOGO_END].iter_mut().enumerate() {
        *b = i as u8;
    }

    hdr[TITLE_START..TITLE_START + title.len()].copy_from_slice(title);

    // MBC1+RAM+BATTERY, 64 KB ROM, 8 KB RAM
    hdr[CART_TYPE] = 0x03;
    hdr[ROM_SIZE] = 0x01;
    hdr[RAM_SIZE] = 0x02;
    hdr[DESTINATION] = 0x01;
    hdr[OLD_LICENSEE] = 0x01;
    hdr[MASK_ROM_VERSION] = 0x00;
    hdr[GLOBAL_CHECKSUM] = 0xBE;
    hdr[GLOBAL_CHECKSUM + 1] = 0xEF;

    recompute_checksum(&mut hdr);
    hdr
}

fn recompute_checksum(hdr: &mut [u8]) {
    let mut x: u8 = 0;
    for &b in &hdr[TITLE_START..HEADER_CHECKSUM] {
        x = x.wrapping_sub(b).wrapping_sub(1);
    }
    hdr[HEADER_CHECKSUM] = x;
}

/// Reference implementation using signed arithmetic and an explicit modulo.
fn reference_checksum(bytes: &[u8]) -> u8 {
    let mut x: i32 = 0;
    for &b in bytes {
        x = (x - b as i32 - 1).rem_euclid(256);
    }
    x as u8
}

#[test]
fn test_parse_fields() {
    let hdr = make_header(b"TESTGAME");
    let header = CartridgeHeader::parse(&hdr).unwrap();

    assert_eq!(header.entry_point, [0x00, 0xC3, 0x50, 0x01]);
    assert_eq!(header.nintendo_logo[0], 0);
    assert_eq!(header.nintendo_logo[47], 47);
    assert_eq!(header.cart_type, 0x03);
    assert_eq!(header.rom_size_code, 0x01);
    assert_eq!(header.ram_size_code, 0x02);
    assert_eq!(header.destination_code, 0x01);
    assert_eq!(header.old_licensee_code, 0x01);
    assert_eq!(header.global_checksum, 0xBEEF);
    assert_eq!(header.mapper(), Mapper::Mbc1);
    assert_eq!(header.title_field(), &hdr[0x34..0x44]);
}

#[test]
fn test_parse_too_short() {
    let hdr = vec![0u8; HEADER_SIZE - 1];
    let err = CartridgeHeader::parse(&hdr).unwrap_err();
    assert_eq!(
        err,
        HeaderError::TooShort {
            expected: 80,
            actual: 79
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_parse_empty() {
    assert!(matches!(
        CartridgeHeader::parse(&[]),
        Err(HeaderError::TooShort { actual: 0, .. })
    ));
}

#[test]
fn test_parse_ignores_trailing_bytes() {
    let mut hdr = make_header(b"LONGER");
    hdr.extend_from_slice(&[0xFF; 16]);
    let header = CartridgeHeader::parse(&hdr).unwrap();
    assert!(header.is_valid());
    assert_eq!(header.title().unwrap(), "LONGER");
}

#[test]
fn test_valid_checksum() {
    let header = CartridgeHeader::parse(&make_header(b"TESTGAME")).unwrap();
    assert!(header.is_valid());
    assert!(header.verify().is_ok());
}

#[test]
fn test_invalid_checksum_is_reported() {
    let mut hdr = make_header(b"TESTGAME");
    hdr[HEADER_CHECKSUM] = hdr[HEADER_CHECKSUM].wrapping_add(1);
    let header = CartridgeHeader::parse(&hdr).unwrap();

    assert!(!header.is_valid());
    let err = header.verify().unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(
        err,
        HeaderError::ChecksumMismatch {
            expected: hdr[HEADER_CHECKSUM],
            actual: hdr[HEADER_CHECKSUM].wrapping_sub(1),
        }
    );
}

#[test]
fn test_checksum_covers_only_title_through_version() {
    let mut hdr = make_header(b"TESTGAME");
    // Logo, entry point and global checksum are outside the checksummed range
    hdr[0x00] = 0xFF;
    hdr[LOGO_START] = 0xAA;
    hdr[GLOBAL_CHECKSUM] = 0x00;
    assert!(CartridgeHeader::parse(&hdr).unwrap().is_valid());

    // The mask ROM version byte is the last one included
    hdr[MASK_ROM_VERSION] = 0x01;
    assert!(!CartridgeHeader::parse(&hdr).unwrap().is_valid());
}

#[test]
fn test_checksum_wraps_without_going_negative() {
    // All 0xFF bytes drive the running value through every wraparound
    let mut hdr = vec![0xFFu8; HEADER_SIZE];
    recompute_checksum(&mut hdr);
    let header = CartridgeHeader::parse(&hdr).unwrap();
    assert!(header.is_valid());
    assert_eq!(
        header.computed_checksum(),
        reference_checksum(&hdr[TITLE_START..HEADER_CHECKSUM])
    );
}

#[test]
fn test_checksum_matches_reference_for_many_headers() {
    // Deterministic pseudo-random headers
    let mut seed: u32 = 0x1234_5678;
    for _ in 0..256 {
        let mut hdr = vec![0u8; HEADER_SIZE];
        for b in hdr.iter_mut() {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            *b = (seed >> 16) as u8;
        }
        let expected = reference_checksum(&hdr[TITLE_START..HEADER_CHECKSUM]);
        let header = CartridgeHeader::parse(&hdr).unwrap();
        assert_eq!(header.computed_checksum(), expected);
        assert_eq!(header.is_valid(), hdr[HEADER_CHECKSUM] == expected);
    }
}

#[test]
fn test_header_checksum_empty_input() {
    assert_eq!(header_checksum(&[]), 0);
    assert_eq!(header_checksum(&[0x00]), 0xFF);
}

#[test]
fn test_title_terminated() {
    let header = CartridgeHeader::parse(&make_header(b"TETRIS")).unwrap();
    assert_eq!(header.title().unwrap(), "TETRIS");
}

#[test]
fn test_title_length_matches_terminator_position() {
    for k in 0..TITLE_MAX_LEN {
        let title = vec![b'A'; k];
        let header = CartridgeHeader::parse(&make_header(&title)).unwrap();
        assert_eq!(header.title().unwrap().len(), k);
    }
}

#[test]
fn test_title_without_terminator_is_fifteen_chars() {
    let header = CartridgeHeader::parse(&make_header(b"ABCDEFGHIJKLMNOP")).unwrap();
    let title = header.title().unwrap();
    assert_eq!(title, "ABCDEFGHIJKLMNO");
    assert_eq!(title.len(), 15);
}

#[test]
fn test_title_with_cgb_flag_in_last_byte() {
    let mut title = *b"POKEMON CRYSTAL\x00";
    title[15] = 0xC0;
    let header = CartridgeHeader::parse(&make_header(&title)).unwrap();
    assert_eq!(header.title().unwrap(), "POKEMON CRYSTAL");
    assert!(header.is_cgb());
}

#[test]
fn test_title_terminator_excluded() {
    let header = CartridgeHeader::parse(&make_header(b"ZELDA\0JUNK")).unwrap();
    let title = header.title().unwrap();
    assert_eq!(title, "ZELDA");
    assert!(!title.contains('\0'));
}

#[test]
fn test_title_is_idempotent() {
    let header = CartridgeHeader::parse(&make_header(b"KIRBY")).unwrap();
    assert_eq!(header.title().unwrap(), header.title().unwrap());
    assert_eq!(header.title_lossy(), header.title_lossy());
}

#[test]
fn test_title_non_ascii_is_decode_error() {
    let header = CartridgeHeader::parse(&make_header(b"BAD\xE9NAME")).unwrap();
    let err = header.title().unwrap_err();
    assert_eq!(
        err,
        HeaderError::Decode {
            offset: 0x37,
            byte: 0xE9
        }
    );
    assert!(!err.is_fatal());
    assert_eq!(header.title_lossy(), "BAD?NAME");
}

#[test]
fn test_non_ascii_after_terminator_is_ignored() {
    let header = CartridgeHeader::parse(&make_header(b"OK\0\xFF\xFF")).unwrap();
    assert_eq!(header.title().unwrap(), "OK");
}

#[test]
fn test_unknown_cart_type() {
    let mut hdr = make_header(b"HOMEBREW");
    hdr[CART_TYPE] = 0xFD;
    recompute_checksum(&mut hdr);
    let header = CartridgeHeader::parse(&hdr).unwrap();
    assert_eq!(header.mapper(), Mapper::Unknown(0xFD));
    assert!(header.is_valid());
}
