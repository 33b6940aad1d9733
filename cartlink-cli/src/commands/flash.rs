use std::fs;
use std::path::Path;

use cartlink_lib::{Session, Transport};

use crate::error::CliError;
use crate::progress::TransferBar;

pub(crate) fn run_flash<T: Transport>(
    session: &mut Session<T>,
    path: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let data = fs::read(path).map_err(|e| CliError::file(path, e))?;

    log::info!("Flashing RAM from {}...", path.display());
    let bar = TransferBar::new("bank", quiet);
    session.flash_ram(&data, &|p| bar.update(p))?;
    log::info!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartlink_core::header_checksum;
    use cartlink_lib::SimulatedCartridge;
    use std::time::Duration;

    fn make_rom(ram_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x134..0x13A].copy_from_slice(b"TETRIS");
        rom[0x149] = ram_code;
        rom[0x14D] = header_checksum(&rom[0x134..0x14D]);
        rom
    }

    #[test]
    fn test_flash_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("save.ram");
        let payload: Vec<u8> = (0..0x2000).map(|i| (i % 13) as u8).collect();
        fs::write(&input, &payload).unwrap();

        let sim = SimulatedCartridge::new(make_rom(2), vec![0; 0x2000]);
        let mut session = Session::connect(sim)
            .ok()
            .unwrap()
            .with_flash_delay(Duration::ZERO);
        run_flash(&mut session, &input, true).unwrap();

        assert_eq!(session.into_inner().ram(), &payload[..]);
    }

    #[test]
    fn test_missing_file_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sim = SimulatedCartridge::new(make_rom(2), vec![0; 0x2000]);
        let mut session = Session::connect(sim).ok().unwrap();

        let err = run_flash(&mut session, &dir.path().join("nope.ram"), true).unwrap_err();
        assert!(matches!(err, CliError::File { .. }));
        // Only the handshake reached the device
        assert_eq!(session.into_inner().commands().len(), 1);
    }
}
