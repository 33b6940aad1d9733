//! Opening the reader's serial port.

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::error::TransferError;
use crate::settings::SerialSettings;

/// Open the reader's serial port and wait for the board to boot.
///
/// Opening the port resets the microcontroller, so nothing may be sent
/// until the connect delay has passed.
pub fn open_port(settings: &SerialSettings) -> Result<Box<dyn SerialPort>, TransferError> {
    log::debug!(
        "Opening {} at {} baud (timeout {:?})",
        settings.port,
        settings.baud_rate,
        settings.timeout(),
    );

    let port = serialport::new(&settings.port, settings.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(settings.timeout())
        .open()
        .map_err(|e| TransferError::port(format!("{}: {}", settings.port, e)))?;

    std::thread::sleep(settings.connect_delay());
    Ok(port)
}
