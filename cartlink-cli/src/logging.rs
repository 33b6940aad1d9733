//! Logger setup.
//!
//! User-facing output goes through `log::info!`, so the default format is
//! the bare message. Verbose mode switches to timestamps and targets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};

use crate::error::CliError;

pub(crate) fn init_logging(
    verbose: bool,
    quiet: bool,
    logfile: Option<&Path>,
) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();

    if verbose {
        builder.format_timestamp_millis().format_target(true);
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }

    if let Some(path) = logfile {
        let file = File::create(path).map_err(|e| CliError::file(path, e))?;
        builder
            .target(Target::Pipe(Box::new(strip_ansi_escapes::Writer::new(file))))
            .write_style(WriteStyle::Never);
    }

    builder
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
