use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cartlink_core::util::format_bytes;
use cartlink_core::{CartridgeHeader, Mapper, TransferPlan};

/// Print what the handshake told us about the cartridge.
pub(crate) fn print_header(header: &CartridgeHeader) {
    let title = match header.title() {
        Ok(title) => title,
        Err(e) => {
            log::warn!(
                "{} {}",
                "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                e,
            );
            header.title_lossy()
        }
    };

    log::info!(
        "{} {}",
        "Title:".if_supports_color(Stderr, |t| t.bold()),
        title.if_supports_color(Stderr, |t| t.cyan()),
    );
    log::info!(
        "{} 0x{:02X} ({}){}",
        "Cartridge type:".if_supports_color(Stderr, |t| t.bold()),
        header.cart_type,
        header.mapper(),
        if header.is_cgb() { ", CGB" } else { "" },
    );

    if let Some(mapper) = unsupported_mapper(header) {
        log::warn!(
            "{} Cartridge type {} is not one the reader can bank-switch; dumps past the first bank may be wrong",
            "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
            mapper,
        );
    }

    let rom = TransferPlan::rom_dump(header);
    let ram = TransferPlan::ram_dump(header);
    log::info!(
        "{} {}",
        "ROM size:".if_supports_color(Stderr, |t| t.bold()),
        format_bytes(rom.total_bytes()),
    );
    log::info!(
        "{} {}",
        "RAM size:".if_supports_color(Stderr, |t| t.bold()),
        if ram.is_empty() {
            format!("none (code 0x{:02X})", header.ram_size_code)
        } else {
            format_bytes(ram.total_bytes())
        },
    );

    if header.is_valid() {
        log::info!(
            "{} {}",
            "Header checksum:".if_supports_color(Stderr, |t| t.bold()),
            "OK".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::warn!(
            "{} Header checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
            "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
            header.header_checksum,
            header.computed_checksum(),
        );
    }
}

/// The header's bank controller, if the reader has no driver for it.
fn unsupported_mapper(header: &CartridgeHeader) -> Option<Mapper> {
    Some(header.mapper()).filter(|m| !m.is_supported())
}
