//! # portreg
//!
//! A registry of selectable communication ports for device settings.
//!
//! The crate merges statically known port kinds (disabled, TCP/UDP sockets,
//! built-in sensors, ...) with endpoints discovered at runtime (serial ports,
//! bonded Bluetooth devices, USB-serial adapters, vendor UART lines) into one
//! ordered list, gives every entry an identifier that is unique within the
//! list, and reconciles a saved configuration against it:
//!
//! - [`PortId`] packs the [`PortKind`] into the upper 16 bits and a serial
//!   number into the lower 16 bits, so the kind can always be recovered.
//! - [`StaticKindTable`] lists the kinds that need no discovery, filtered by
//!   the host [`Capabilities`].
//! - [`TransportEnumerator`]s discover one family each and are injected
//!   through [`Transports`].
//! - [`RegistryBuilder`] produces a [`PortRegistry`]; a saved device that is
//!   not present gets a placeholder entry so the setting is never lost.
//!
//! ## Features
//!
//! - `native` (default): serial port scan via the `serialport` crate
//! - `serde`: Serialization support for configuration types
//!
//! ## Example
//!
//! ```rust
//! use portreg::{
//!     Capabilities, PortConfig, PortKind, RegistryBuilder, StaticKindTable, Transports,
//!     UartLines,
//! };
//!
//! let transports = Transports::none().with_uart(UartLines::new(4));
//! let table = StaticKindTable::for_capabilities(&Capabilities::none());
//! let builder = RegistryBuilder::new(table, transports);
//!
//! let registry = builder.build(&PortConfig::ioio_uart(2));
//! let selected = registry.selected().expect("line 2 is present");
//! assert_eq!(selected.label, "IOIO UART 2");
//! assert_eq!(registry.resolve_kind(selected.id.raw()), PortKind::IoioUart);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod config;
pub mod error;
pub mod id;
pub mod kind;
pub mod registry;
pub mod table;
pub mod transport;

// Re-exports for convenience
#[cfg(feature = "native")]
pub use transport::SerialScan;
pub use {
    capability::{Capabilities, Capability},
    config::PortConfig,
    error::{Error, Result},
    id::{PortId, Selection, decode_kind},
    kind::{PortKind, ValueKey},
    registry::{PortEntry, PortRegistry, RegistryBuilder},
    table::{STATIC_KINDS, StaticKind, StaticKindTable},
    transport::{
        BluetoothType, BondedDevice, BondedDevices, ComPortRange, Discovered, Family, NoTransport,
        TransportEnumerator, Transports, UartLines, UsbSerialDevice, UsbSerialDevices,
    },
};
