//! Application settings.
//!
//! Settings live in `~/.config/cartlink/settings.toml`. A missing file is
//! fine; every field has a default. Environment variables override the
//! file, and CLI flags override both (applied by the CLI).
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyACM0"
//! baud_rate = 500000
//! connect_delay_ms = 2000
//! flash_delay_ms = 200
//! timeout_ms = 5000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::SettingsError;

pub const ENV_PORT: &str = "CARTLINK_PORT";
pub const ENV_BAUD: &str = "CARTLINK_BAUD";

/// Serial link parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    /// Device path of the reader's serial port
    pub port: String,
    /// Symbol rate the firmware is built for
    pub baud_rate: u32,
    /// Wait after opening the port; the board resets and boots on connect
    pub connect_delay_ms: u64,
    /// Wait after the flash trigger for the device's reset/erase cycle
    pub flash_delay_ms: u64,
    /// Per-read timeout; a read that times out aborts the transfer
    pub timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud_rate: 500_000,
            connect_delay_ms: 2000,
            flash_delay_ms: 200,
            timeout_ms: 5000,
        }
    }
}

impl SerialSettings {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub serial: SerialSettings,
}

impl Settings {
    /// Load from the default settings path, then apply environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::load_from(&settings_path())?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        log::debug!("Loading settings from {}", path.display());
        Ok(toml::from_str(&contents)?)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        if let Some(port) = lookup(ENV_PORT).filter(|p| !p.is_empty()) {
            self.serial.port = port;
        }
        if let Some(baud) = lookup(ENV_BAUD) {
            self.serial.baud_rate = baud.trim().parse().map_err(|_| SettingsError::InvalidValue {
                key: ENV_BAUD,
                value: baud.clone(),
            })?;
        }
        Ok(())
    }
}

/// Canonical path to the settings file: `~/.config/cartlink/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cartlink").join("settings.toml")
}
