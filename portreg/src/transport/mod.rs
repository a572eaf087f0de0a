//! Transport enumerators.
//!
//! Each transport family (serial, Bluetooth, USB-serial, vendor UART) is
//! discovered by one [`TransportEnumerator`]. The registry builder receives
//! all four through [`Transports`] and never looks anything up on its own,
//! so a platform without a feature simply plugs in [`NoTransport`].
//!
//! ```text
//! +-----------+ +-----------+ +-----------+ +-----------+
//! | serial    | | bluetooth | | usb-serial| | uart      |
//! +-----+-----+ +-----+-----+ +-----+-----+ +-----+-----+
//!       |             |             |             |
//!       +------+------+------+------+------+------+
//!              |
//!              v
//!      +-------+--------+
//!      | RegistryBuilder|
//!      +----------------+
//! ```

pub mod bluetooth;
pub mod serial;
pub mod uart;
pub mod usb;

use std::fmt;

use crate::capability::{Capabilities, Capability};
use crate::error::{Error, Result};
use crate::kind::PortKind;

pub use bluetooth::{BluetoothType, BondedDevice, BondedDevices};
#[cfg(feature = "native")]
pub use serial::SerialScan;
pub use serial::{ComPortRange, natural_cmp, serial_display_name};
pub use uart::UartLines;
pub use usb::{UsbSerialDevice, UsbSerialDevices};

/// Transport family an enumerator discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Serial device nodes and COM ports.
    Serial,
    /// Bonded Bluetooth devices.
    Bluetooth,
    /// User-space USB-serial adapters.
    UsbSerial,
    /// Vendor UART lines.
    Uart,
}

impl Family {
    /// Short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Bluetooth => "bluetooth",
            Self::UsbSerial => "usb-serial",
            Self::Uart => "uart",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discovered endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// Kind of the endpoint (lets Bluetooth tell classic from low-energy).
    pub kind: PortKind,
    /// Instance token: device path, MAC address or index.
    pub value: String,
    /// Display label; the value is shown when absent.
    pub label: Option<String>,
    /// Optional help text.
    pub help: Option<String>,
}

impl Discovered {
    /// A discovered endpoint without label or help.
    pub fn new(kind: PortKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            label: None,
            help: None,
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Discovery source for one transport family.
///
/// `discover` returning an error means the family is unavailable on this
/// host; the registry treats that exactly like an empty result.
pub trait TransportEnumerator {
    /// The family this enumerator discovers.
    fn family(&self) -> Family;

    /// List the endpoints currently present.
    fn discover(&self) -> Result<Vec<Discovered>>;

    /// Human-readable name for a value that was not discovered.
    fn name_for(&self, _value: &str) -> Option<String> {
        None
    }
}

/// Stand-in for a family the platform does not provide.
#[derive(Debug, Clone, Copy)]
pub struct NoTransport {
    family: Family,
}

impl NoTransport {
    /// Unavailable enumerator for `family`.
    #[must_use]
    pub fn new(family: Family) -> Self {
        Self { family }
    }
}

impl TransportEnumerator for NoTransport {
    fn family(&self) -> Family {
        self.family
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Err(Error::Unavailable(self.family.name()))
    }
}

/// The four enumerators wired into a registry build.
pub struct Transports {
    /// Serial scan.
    pub serial: Box<dyn TransportEnumerator>,
    /// Bluetooth bonded-device scan.
    pub bluetooth: Box<dyn TransportEnumerator>,
    /// USB-serial scan.
    pub usb_serial: Box<dyn TransportEnumerator>,
    /// Vendor UART lines.
    pub uart: Box<dyn TransportEnumerator>,
}

impl Transports {
    /// Every family unavailable.
    #[must_use]
    pub fn none() -> Self {
        Self {
            serial: Box::new(NoTransport::new(Family::Serial)),
            bluetooth: Box::new(NoTransport::new(Family::Bluetooth)),
            usb_serial: Box::new(NoTransport::new(Family::UsbSerial)),
            uart: Box::new(NoTransport::new(Family::Uart)),
        }
    }

    /// Native enumerators for the given capabilities.
    ///
    /// Bluetooth, USB-serial and UART discovery need a platform helper; they
    /// start unavailable and are plugged in with the `with_*` methods.
    #[must_use]
    pub fn for_capabilities(caps: &Capabilities) -> Self {
        Self {
            serial: native_serial(caps),
            ..Self::none()
        }
    }

    /// Replace the serial enumerator.
    #[must_use]
    pub fn with_serial(mut self, serial: impl TransportEnumerator + 'static) -> Self {
        self.serial = Box::new(serial);
        self
    }

    /// Replace the Bluetooth enumerator.
    #[must_use]
    pub fn with_bluetooth(mut self, bluetooth: impl TransportEnumerator + 'static) -> Self {
        self.bluetooth = Box::new(bluetooth);
        self
    }

    /// Replace the USB-serial enumerator.
    #[must_use]
    pub fn with_usb_serial(mut self, usb_serial: impl TransportEnumerator + 'static) -> Self {
        self.usb_serial = Box::new(usb_serial);
        self
    }

    /// Replace the UART enumerator.
    #[must_use]
    pub fn with_uart(mut self, uart: impl TransportEnumerator + 'static) -> Self {
        self.uart = Box::new(uart);
        self
    }
}

impl Default for Transports {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Transports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transports")
            .field("serial", &self.serial.family())
            .field("bluetooth", &self.bluetooth.family())
            .field("usb_serial", &self.usb_serial.family())
            .field("uart", &self.uart.family())
            .finish()
    }
}

fn native_serial(caps: &Capabilities) -> Box<dyn TransportEnumerator> {
    if caps.has(Capability::SerialScan) {
        #[cfg(feature = "native")]
        return Box::new(SerialScan::new());
    }

    // Without a port scan, Windows still offers the usual COM names.
    if cfg!(windows) {
        Box::new(ComPortRange::default())
    } else {
        Box::new(NoTransport::new(Family::Serial))
    }
}
