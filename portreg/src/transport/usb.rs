//! USB-serial adapters driven by a user-space driver.
//!
//! The driver query answers with two strings per adapter: an opaque device
//! id (stored as the port path) and the product name.

use super::{Discovered, Family, TransportEnumerator};
use crate::error::Result;
use crate::kind::PortKind;

/// One USB-serial adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsbSerialDevice {
    /// Driver-assigned device id.
    pub id: String,
    /// Product name.
    pub name: String,
}

/// USB-serial enumerator over a driver-reported list.
#[derive(Debug, Clone, Default)]
pub struct UsbSerialDevices {
    devices: Vec<UsbSerialDevice>,
}

impl UsbSerialDevices {
    /// Enumerator over typed records.
    #[must_use]
    pub fn new(devices: Vec<UsbSerialDevice>) -> Self {
        Self { devices }
    }

    /// Parse a flat `[id, name, ...]` list, skipping pairs missing either half.
    #[must_use]
    pub fn from_pairs(list: &[Option<String>]) -> Self {
        let devices = list
            .chunks_exact(2)
            .filter_map(|pair| {
                Some(UsbSerialDevice {
                    id: pair[0].clone()?,
                    name: pair[1].clone()?,
                })
            })
            .collect();
        Self { devices }
    }
}

impl TransportEnumerator for UsbSerialDevices {
    fn family(&self) -> Family {
        Family::UsbSerial
    }

    /// Labels carry the bare product name; the registry adds the `USB: `
    /// prefix.
    fn discover(&self) -> Result<Vec<Discovered>> {
        Ok(self
            .devices
            .iter()
            .map(|d| Discovered::new(PortKind::UsbSerial, d.id.clone()).with_label(d.name.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_skips_incomplete() {
        let list = vec![
            Some("1027:24577".to_string()),
            Some("FT232R".to_string()),
            Some("6790:29987".to_string()),
            None,
            None,
            Some("orphan".to_string()),
            Some("4292:60000".to_string()),
        ];
        let devices = UsbSerialDevices::from_pairs(&list).discover().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].kind, PortKind::UsbSerial);
        assert_eq!(devices[0].value, "1027:24577");
        assert_eq!(devices[0].label.as_deref(), Some("FT232R"));
    }
}
