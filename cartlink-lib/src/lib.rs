//! Serial protocol for the cartridge reader.
//!
//! A [`Session`] owns the transport, performs the header handshake and runs
//! the bulk transfers: block-streamed dumps ([`BulkReader`]) and
//! acknowledged, bank-by-bank RAM flashing ([`BulkWriter`]).

pub mod command;
pub mod error;
pub mod port;
pub mod progress;
pub mod reader;
pub mod session;
pub mod settings;
pub mod sim;
pub mod transport;
pub mod writer;

pub use cartlink_core::{CartridgeHeader, HeaderError, Mapper, TransferPlan};
pub use command::Command;
pub use error::{SettingsError, TransferError};
pub use port::open_port;
pub use progress::{TransferProgress, no_progress};
pub use reader::BulkReader;
pub use session::Session;
pub use settings::{SerialSettings, Settings};
pub use sim::SimulatedCartridge;
pub use transport::Transport;
pub use writer::BulkWriter;
