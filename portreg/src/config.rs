//! The persisted port configuration.

use crate::kind::{PortKind, ValueKey};

/// Port part of a device configuration, as stored by the settings layer.
///
/// Only the field named by `kind.value_key()` is meaningful; the others keep
/// whatever was stored last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PortConfig {
    /// Port kind.
    pub kind: PortKind,
    /// Device path (serial) or driver id (USB-serial).
    pub path: String,
    /// Bluetooth MAC address.
    pub bluetooth_mac: String,
    /// IOIO UART line.
    pub ioio_uart_id: u32,
}

impl PortConfig {
    /// Configuration for a kind without instance value.
    #[must_use]
    pub fn new(kind: PortKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Serial device at `path`.
    pub fn serial(path: impl Into<String>) -> Self {
        Self {
            kind: PortKind::Serial,
            path: path.into(),
            ..Self::default()
        }
    }

    /// USB-serial adapter with driver id `id`.
    pub fn usb_serial(id: impl Into<String>) -> Self {
        Self {
            kind: PortKind::UsbSerial,
            path: id.into(),
            ..Self::default()
        }
    }

    /// Bluetooth device of `kind` at `mac`.
    pub fn bluetooth(kind: PortKind, mac: impl Into<String>) -> Self {
        Self {
            kind,
            bluetooth_mac: mac.into(),
            ..Self::default()
        }
    }

    /// IOIO UART line `id`.
    #[must_use]
    pub fn ioio_uart(id: u32) -> Self {
        Self {
            kind: PortKind::IoioUart,
            ioio_uart_id: id,
            ..Self::default()
        }
    }

    /// Whether the active field is the Bluetooth MAC.
    #[must_use]
    pub fn uses_bluetooth_mac(&self) -> bool {
        self.kind.uses_bluetooth_mac()
    }

    /// The active instance value as a list token, `None` for kinds without one.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        match self.kind.value_key() {
            ValueKey::None => None,
            ValueKey::Path => Some(self.path.clone()),
            ValueKey::BluetoothMac => Some(self.bluetooth_mac.clone()),
            ValueKey::UartIndex => Some(self.ioio_uart_id.to_string()),
        }
    }

    /// Build a configuration from a kind and list token.
    ///
    /// The token lands in the field named by the kind's value key; a UART
    /// token that is not a number leaves the index at `0`.
    #[must_use]
    pub fn from_value(kind: PortKind, value: &str) -> Self {
        let mut config = Self::new(kind);
        match kind.value_key() {
            ValueKey::None => {},
            ValueKey::Path => config.path = value.to_string(),
            ValueKey::BluetoothMac => config.bluetooth_mac = value.to_string(),
            ValueKey::UartIndex => config.ioio_uart_id = value.parse().unwrap_or_default(),
        }
        config
    }
}
