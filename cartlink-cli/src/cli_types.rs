//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "cartlink")]
#[command(
    about = "Dump the ROM or RAM of a Game Boy / Game Boy Color cartridge, or flash its RAM",
    long_about = None
)]
pub(crate) struct Cli {
    /// Dump the ROM (default file name: <title>.rom)
    #[arg(long, value_name = "FILE")]
    pub dumprom: Option<Option<PathBuf>>,

    /// Dump the RAM (default file name: <title>.ram)
    #[arg(long, value_name = "FILE")]
    pub dumpram: Option<Option<PathBuf>>,

    /// Flash the RAM with the contents of FILE
    #[arg(long, value_name = "FILE")]
    pub flashram: Option<PathBuf>,

    /// Serial port of the reader (overrides settings and $CARTLINK_PORT)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate (overrides settings and $CARTLINK_BAUD)
    #[arg(long)]
    pub baud: Option<u32>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,
}

impl Cli {
    /// True when at least one transfer was requested.
    pub fn has_action(&self) -> bool {
        self.dumprom.is_some() || self.dumpram.is_some() || self.flashram.is_some()
    }

    /// True when log output is redirected away from the terminal.
    pub fn logs_to_file(&self) -> bool {
        self.logfile.is_some()
    }
}
