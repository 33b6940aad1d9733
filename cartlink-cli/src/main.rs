//! cartlink CLI
//!
//! Command-line client for the serial Game Boy cartridge reader: shows the
//! cartridge header, dumps ROM and RAM, and flashes RAM.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use clap::Parser;

use cartlink_lib::{Session, Settings, open_port};

use cli_types::Cli;
use commands::dump::{DumpKind, run_dump};
use commands::flash::run_flash;
use commands::info::print_header;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        if cli.logs_to_file() {
            // Log output went to the file
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    if let Some(port) = &cli.port {
        settings.serial.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        settings.serial.baud_rate = baud;
    }

    let port = open_port(&settings.serial)?;

    log::info!("Receiving header...");
    let mut session = Session::connect(port)?.with_flash_delay(settings.serial.flash_delay());
    print_header(session.header());

    if !cli.has_action() {
        return Ok(());
    }

    if let Some(path) = &cli.dumprom {
        run_dump(&mut session, DumpKind::Rom, path.as_deref(), cli.quiet)?;
    }
    if let Some(path) = &cli.dumpram {
        run_dump(&mut session, DumpKind::Ram, path.as_deref(), cli.quiet)?;
    }
    if let Some(path) = &cli.flashram {
        run_flash(&mut session, path, cli.quiet)?;
    }

    Ok(())
}
