use std::fs;
use std::path::{Path, PathBuf};

use cartlink_core::TransferPlan;
use cartlink_core::util::dump_file_name;
use cartlink_lib::{Session, Transport};

use crate::error::CliError;
use crate::progress::TransferBar;

/// Which memory a dump reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DumpKind {
    Rom,
    Ram,
}

impl DumpKind {
    fn extension(self) -> &'static str {
        match self {
            DumpKind::Rom => "rom",
            DumpKind::Ram => "ram",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DumpKind::Rom => "ROM",
            DumpKind::Ram => "RAM",
        }
    }
}

/// Output path for a dump: the explicit one, or the cartridge title plus
/// the dump's extension in the current directory.
pub(crate) fn output_path<T: Transport>(
    session: &Session<T>,
    kind: DumpKind,
    explicit: Option<&Path>,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let header = session.header();
            let title = header.title().unwrap_or_else(|_| header.title_lossy());
            PathBuf::from(dump_file_name(&title, kind.extension()))
        }
    }
}

pub(crate) fn run_dump<T: Transport>(
    session: &mut Session<T>,
    kind: DumpKind,
    explicit: Option<&Path>,
    quiet: bool,
) -> Result<PathBuf, CliError> {
    let path = output_path(session, kind, explicit);
    let plan = match kind {
        DumpKind::Rom => TransferPlan::rom_dump(session.header()),
        DumpKind::Ram => TransferPlan::ram_dump(session.header()),
    };
    if plan.is_empty() {
        log::warn!(
            "Cartridge reports no {} (size code 0x{:02X}), writing an empty file",
            kind.label(),
            match kind {
                DumpKind::Rom => session.header().rom_size_code,
                DumpKind::Ram => session.header().ram_size_code,
            },
        );
    }

    log::info!("Dumping {} to {}...", kind.label(), path.display());
    let bar = TransferBar::new("block", quiet);
    let progress = |p| bar.update(p);
    let data = match kind {
        DumpKind::Rom => session.dump_rom(&progress)?,
        DumpKind::Ram => session.dump_ram(&progress)?,
    };

    fs::write(&path, &data).map_err(|e| CliError::file(&path, e))?;
    log::info!("Done!");
    Ok(path)
}
