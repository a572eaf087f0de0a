//! Port kinds and the configuration field each one reads its instance from.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Transport family of a communication endpoint.
///
/// Discriminants are fixed: they form the high half of every
/// [`PortId`](crate::PortId), and `Disabled` must stay `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u16)]
pub enum PortKind {
    /// No device.
    #[default]
    Disabled = 0,
    /// Serial device node or COM port.
    Serial = 1,
    /// Bluetooth classic (RFCOMM/SPP) client.
    Rfcomm = 2,
    /// Bluetooth classic server accepting incoming connections.
    RfcommServer = 3,
    /// UART line on an IOIO board.
    IoioUart = 4,
    /// DroidSoar V2 vario.
    DroidSoarV2 = 5,
    /// IOIO switches and Nunchuk.
    Nunchuck = 6,
    /// IOIO I²C pressure sensor.
    I2cPressureSensor = 7,
    /// IOIO voltage sensor.
    IoioVoltage = 8,
    /// Automatic selection.
    Auto = 9,
    /// Built-in GPS and sensors.
    Internal = 10,
    /// Outgoing TCP connection.
    TcpClient = 11,
    /// Listening TCP socket.
    TcpListener = 12,
    /// Listening UDP socket.
    UdpListener = 13,
    /// Pseudo terminal.
    Pty = 14,
    /// Bluetooth low-energy sensor.
    BleSensor = 15,
    /// Bluetooth low-energy HM-10 serial bridge.
    BleHm10 = 16,
    /// GliderLink traffic receiver.
    GliderLink = 17,
    /// USB-serial adapter driven in user space.
    UsbSerial = 18,
}

/// Which configuration field identifies the concrete instance of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKey {
    /// The kind alone is the whole selection.
    None,
    /// `PortConfig::path` (device path, USB-serial id).
    Path,
    /// `PortConfig::bluetooth_mac`.
    BluetoothMac,
    /// `PortConfig::ioio_uart_id`.
    UartIndex,
}

impl ValueKey {
    /// Canonical spelling of an instance value.
    ///
    /// MAC addresses are case-insensitive and stored upper-case; other
    /// values are kept verbatim.
    #[must_use]
    pub fn canonical(self, value: &str) -> String {
        match self {
            Self::BluetoothMac => value.trim().to_ascii_uppercase(),
            Self::None | Self::Path | Self::UartIndex => value.to_string(),
        }
    }
}

impl PortKind {
    /// All kinds in discriminant order.
    pub const ALL: [Self; 19] = [
        Self::Disabled,
        Self::Serial,
        Self::Rfcomm,
        Self::RfcommServer,
        Self::IoioUart,
        Self::DroidSoarV2,
        Self::Nunchuck,
        Self::I2cPressureSensor,
        Self::IoioVoltage,
        Self::Auto,
        Self::Internal,
        Self::TcpClient,
        Self::TcpListener,
        Self::UdpListener,
        Self::Pty,
        Self::BleSensor,
        Self::BleHm10,
        Self::GliderLink,
        Self::UsbSerial,
    ];

    /// Numeric discriminant.
    #[must_use]
    pub const fn discriminant(self) -> u16 {
        self as u16
    }

    /// Look a kind up by its discriminant.
    #[must_use]
    pub fn from_discriminant(value: u16) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// The configuration field carrying the instance value for this kind.
    #[must_use]
    pub const fn value_key(self) -> ValueKey {
        match self {
            Self::Serial | Self::UsbSerial => ValueKey::Path,
            Self::Rfcomm | Self::BleSensor | Self::BleHm10 => ValueKey::BluetoothMac,
            Self::IoioUart => ValueKey::UartIndex,
            Self::Disabled
            | Self::RfcommServer
            | Self::DroidSoarV2
            | Self::Nunchuck
            | Self::I2cPressureSensor
            | Self::IoioVoltage
            | Self::Auto
            | Self::Internal
            | Self::TcpClient
            | Self::TcpListener
            | Self::UdpListener
            | Self::Pty
            | Self::GliderLink => ValueKey::None,
        }
    }

    /// Whether entries of this kind need an instance value to be selected.
    #[must_use]
    pub const fn carries_value(self) -> bool {
        !matches!(self.value_key(), ValueKey::None)
    }

    /// Whether the kind is addressed by a Bluetooth MAC.
    #[must_use]
    pub const fn uses_bluetooth_mac(self) -> bool {
        matches!(self.value_key(), ValueKey::BluetoothMac)
    }

    /// Stable snake_case name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Serial => "serial",
            Self::Rfcomm => "rfcomm",
            Self::RfcommServer => "rfcomm_server",
            Self::IoioUart => "ioio_uart",
            Self::DroidSoarV2 => "droid_soar_v2",
            Self::Nunchuck => "nunchuck",
            Self::I2cPressureSensor => "i2c_pressure_sensor",
            Self::IoioVoltage => "ioio_voltage",
            Self::Auto => "auto",
            Self::Internal => "internal",
            Self::TcpClient => "tcp_client",
            Self::TcpListener => "tcp_listener",
            Self::UdpListener => "udp_listener",
            Self::Pty => "pty",
            Self::BleSensor => "ble_sensor",
            Self::BleHm10 => "ble_hm10",
            Self::GliderLink => "glider_link",
            Self::UsbSerial => "usb_serial",
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
