//! Configuration file support for portreg.
//!
//! Configuration is loaded from multiple sources with the following priority (highest first):
//! 1. Command-line arguments (`--kind`, `--path`, `--mac`, `--uart`)
//! 2. An explicit file given with `--config` / `PORTREG_CONFIG`
//! 3. Local config file (./portreg.toml)
//! 4. Global config file (~/.config/portreg/config.toml)
//!
//! Besides the saved `[device]`, the file can describe what the platform
//! helpers of a handheld would report (bonded Bluetooth devices, USB-serial
//! adapters, IOIO UART lines). A described family counts as available.

use directories::ProjectDirs;
use log::{debug, warn};
use portreg::{
    BondedDevice, BondedDevices, Capabilities, Capability, Error, PortConfig, Transports,
    UartLines, UsbSerialDevice, UsbSerialDevices,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "portreg.toml";

/// Explicit capability switches; unset fields keep the detected value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapabilityOverrides {
    /// Built-in GPS and sensors.
    pub internal_sensors: Option<bool>,
    /// Bluetooth radio.
    pub bluetooth: Option<bool>,
    /// USB-serial drivers.
    pub usb_serial: Option<bool>,
    /// IOIO board.
    pub ioio: Option<bool>,
    /// Developer-only sensors.
    pub debug_sensors: Option<bool>,
    /// Serial port scan.
    pub serial_scan: Option<bool>,
}

impl CapabilityOverrides {
    fn entries(&self) -> [(Capability, Option<bool>); 6] {
        [
            (Capability::InternalSensors, self.internal_sensors),
            (Capability::Bluetooth, self.bluetooth),
            (Capability::UsbSerial, self.usb_serial),
            (Capability::Ioio, self.ioio),
            (Capability::DebugSensors, self.debug_sensors),
            (Capability::SerialScan, self.serial_scan),
        ]
    }

    fn merge(&mut self, other: &Self) {
        for (target, value) in [
            (&mut self.internal_sensors, other.internal_sensors),
            (&mut self.bluetooth, other.bluetooth),
            (&mut self.usb_serial, other.usb_serial),
            (&mut self.ioio, other.ioio),
            (&mut self.debug_sensors, other.debug_sensors),
            (&mut self.serial_scan, other.serial_scan),
        ] {
            if value.is_some() {
                *target = value;
            }
        }
    }
}

/// Bonded Bluetooth devices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BluetoothConfig {
    /// Devices as the bonded-device query would list them.
    #[serde(default)]
    pub bonded: Vec<BondedDevice>,
}

/// USB-serial adapters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsbSerialConfig {
    /// Adapters as the driver would list them.
    #[serde(default)]
    pub devices: Vec<UsbSerialDevice>,
}

/// IOIO UART lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UartConfig {
    /// Number of UART lines on the board.
    pub count: Option<u32>,
    /// Per-line help text.
    #[serde(default)]
    pub help: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// The saved port.
    pub device: Option<PortConfig>,
    /// Capability overrides.
    #[serde(default)]
    pub capabilities: CapabilityOverrides,
    /// Bluetooth helper stand-in.
    #[serde(default)]
    pub bluetooth: BluetoothConfig,
    /// USB-serial helper stand-in.
    #[serde(default)]
    pub usb_serial: UsbSerialConfig,
    /// UART helper stand-in.
    #[serde(default)]
    pub uart: UartConfig,
}

impl Config {
    /// Load configuration from all available sources.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global_config) = Self::load_from_file(&global_path) {
                debug!("Loaded global config from {}", global_path.display());
                config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        if let Some(local_config) = Self::load_from_file(Path::new(LOCAL_CONFIG_FILE)) {
            debug!("Loaded local config from {LOCAL_CONFIG_FILE}");
            config.merge(local_config);
        }

        config
    }

    /// Load configuration from a specific file path (--config flag).
    pub fn load_from_path(path: &Path) -> Self {
        if let Some(config) = Self::load_from_file(path) {
            debug!("Loaded config from {}", path.display());
            config
        } else {
            warn!(
                "Could not load config from {}, using defaults",
                path.display()
            );
            Self::default()
        }
    }

    /// Load configuration from a specific file, warning about unusable files.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        Self::read(path).inspect_err(|e| warn!("{e}")).ok()
    }

    /// Read and parse one configuration file.
    fn read(path: &Path) -> portreg::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Get the global configuration directory.
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "portreg").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the global configuration file path.
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Merge another config into this one.
    fn merge(&mut self, other: Self) {
        if other.device.is_some() {
            self.device = other.device;
        }
        self.capabilities.merge(&other.capabilities);
        self.bluetooth.bonded.extend(other.bluetooth.bonded);
        self.usb_serial.devices.extend(other.usb_serial.devices);
        if other.uart.count.is_some() {
            self.uart.count = other.uart.count;
        }
        if !other.uart.help.is_empty() {
            self.uart.help = other.uart.help;
        }
    }

    /// The saved port, `Disabled` when none is configured.
    pub fn device(&self) -> PortConfig {
        self.device.clone().unwrap_or_default()
    }

    /// Host capabilities with described helpers and overrides applied.
    pub fn capabilities(&self, detected: Capabilities) -> Capabilities {
        let mut caps = detected;
        if !self.bluetooth.bonded.is_empty() {
            caps.set(Capability::Bluetooth, true);
        }
        if !self.usb_serial.devices.is_empty() {
            caps.set(Capability::UsbSerial, true);
        }
        if self.uart.count.is_some() {
            caps.set(Capability::Ioio, true);
        }
        for (capability, value) in self.capabilities.entries() {
            if let Some(enabled) = value {
                caps.set(capability, enabled);
            }
        }
        caps
    }

    /// Plug the described helpers into `transports` for the families `caps`
    /// enables.
    pub fn plug_helpers(&self, transports: &mut Transports, caps: &Capabilities) {
        if caps.has(Capability::Bluetooth) {
            transports.bluetooth = Box::new(BondedDevices::new(self.bluetooth.bonded.clone()));
        }
        if caps.has(Capability::UsbSerial) {
            transports.usb_serial =
                Box::new(UsbSerialDevices::new(self.usb_serial.devices.clone()));
        }
        if caps.has(Capability::Ioio) {
            let lines = UartLines::new(self.uart.count.unwrap_or_default())
                .with_help(self.uart.help.clone());
            transports.uart = Box::new(lines);
        }
    }
}
