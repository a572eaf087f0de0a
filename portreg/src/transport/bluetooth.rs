//! Bonded Bluetooth devices.
//!
//! The bonded-device query itself belongs to the platform. Its answer is fed
//! in here, either as typed records or as the flat string list platform
//! helpers commonly return: three strings per device, giving the address,
//! the name, and the type (`"BLE"` or `"CLASSIC"`).

use log::trace;

use super::{Discovered, Family, TransportEnumerator};
use crate::error::Result;
use crate::kind::PortKind;

const BONDED_LIST_STRIDE: usize = 3;

/// Radio type of a bonded device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BluetoothType {
    /// Bluetooth classic (RFCOMM).
    #[default]
    Classic,
    /// Bluetooth low energy.
    Ble,
}

impl BluetoothType {
    /// Parse the platform's type string; anything but `"BLE"` is classic.
    #[must_use]
    pub fn from_platform(value: Option<&str>) -> Self {
        match value {
            Some("BLE") => Self::Ble,
            _ => Self::Classic,
        }
    }

    /// Port kind used for devices of this type.
    #[must_use]
    pub fn port_kind(self) -> PortKind {
        match self {
            Self::Classic => PortKind::Rfcomm,
            Self::Ble => PortKind::BleHm10,
        }
    }
}

/// One bonded device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondedDevice {
    /// MAC address.
    pub address: String,
    /// Device name, if the platform knows one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Radio type.
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub ty: BluetoothType,
}

/// Bluetooth enumerator over a bonded-device list.
#[derive(Debug, Clone, Default)]
pub struct BondedDevices {
    devices: Vec<BondedDevice>,
}

impl BondedDevices {
    /// Enumerator over typed records.
    #[must_use]
    pub fn new(devices: Vec<BondedDevice>) -> Self {
        Self { devices }
    }

    /// Parse a flat `[address, name, type, ...]` list.
    ///
    /// Entries without an address are skipped; a trailing partial triple is
    /// ignored.
    #[must_use]
    pub fn from_strided(list: &[Option<String>]) -> Self {
        let devices = list
            .chunks_exact(BONDED_LIST_STRIDE)
            .filter_map(|chunk| {
                let address = chunk[0].clone()?;
                Some(BondedDevice {
                    address,
                    name: chunk[1].clone(),
                    ty: BluetoothType::from_platform(chunk[2].as_deref()),
                })
            })
            .collect();
        Self { devices }
    }

    /// The bonded devices.
    #[must_use]
    pub fn devices(&self) -> &[BondedDevice] {
        &self.devices
    }
}

impl TransportEnumerator for BondedDevices {
    fn family(&self) -> Family {
        Family::Bluetooth
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Ok(self
            .devices
            .iter()
            .map(|device| {
                trace!("Found bonded device: {} ({:?})", device.address, device.ty);
                let found = Discovered::new(device.ty.port_kind(), device.address.clone());
                match &device.name {
                    Some(name) => found.with_label(name.clone()),
                    None => found,
                }
            })
            .collect())
    }

    fn name_for(&self, value: &str) -> Option<String> {
        self.devices
            .iter()
            .find(|d| d.address.eq_ignore_ascii_case(value))
            .and_then(|d| d.name.clone())
    }
}
