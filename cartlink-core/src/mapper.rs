/// Memory bank controller fitted to a cartridge, decoded from the
/// cartridge type byte.
///
/// The reader firmware only knows how to switch banks on these
/// controllers; anything else is reported as [`Mapper::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapper {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Unknown(u8),
}

impl Mapper {
    pub fn from_cart_type(cart_type: u8) -> Self {
        match cart_type {
            0x00 => Self::RomOnly,
            0x01..=0x03 => Self::Mbc1,
            0x05 | 0x06 => Self::Mbc2,
            0x0F..=0x13 => Self::Mbc3,
            0x19..=0x1E => Self::Mbc5,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RomOnly => "ROM ONLY",
            Self::Mbc1 => "MBC1",
            Self::Mbc2 => "MBC2",
            Self::Mbc3 => "MBC3",
            Self::Mbc5 => "MBC5",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// Whether the reader can drive this controller at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown ({:#04x})", code),
            other => f.write_str(other.name()),
        }
    }
}
