//! Host capabilities.
//!
//! Which static kinds are offered and which enumerators are wired in is
//! decided once from a [`Capabilities`] set instead of being spread across
//! conditional compilation.

use log::debug;

/// A platform feature some port kinds depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    /// Built-in GPS and sensors.
    InternalSensors,
    /// Bluetooth radio with bonded devices.
    Bluetooth,
    /// User-space USB-serial drivers.
    UsbSerial,
    /// IOIO board support.
    Ioio,
    /// Developer-only sensor kinds.
    DebugSensors,
    /// Serial device scan (device directory or OS port list).
    SerialScan,
}

/// Set of available [`Capability`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    internal_sensors: bool,
    bluetooth: bool,
    usb_serial: bool,
    ioio: bool,
    debug_sensors: bool,
    serial_scan: bool,
}

impl Capabilities {
    /// No optional capability at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every capability, useful for tests and simulators.
    #[must_use]
    pub fn all() -> Self {
        Self {
            internal_sensors: true,
            bluetooth: true,
            usb_serial: true,
            ioio: true,
            debug_sensors: true,
            serial_scan: true,
        }
    }

    /// Capabilities of the host this binary runs on.
    #[must_use]
    pub fn detect() -> Self {
        let caps = Self {
            internal_sensors: cfg!(target_os = "android"),
            bluetooth: cfg!(target_os = "android"),
            usb_serial: cfg!(target_os = "android"),
            ioio: cfg!(target_os = "android"),
            debug_sensors: cfg!(debug_assertions),
            serial_scan: cfg!(feature = "native"),
        };
        debug!("Detected host capabilities: {caps:?}");
        caps
    }

    /// Builder-style toggle of one capability.
    #[must_use]
    pub fn with(mut self, capability: Capability, enabled: bool) -> Self {
        self.set(capability, enabled);
        self
    }

    /// Enable or disable one capability.
    pub fn set(&mut self, capability: Capability, enabled: bool) {
        let flag = match capability {
            Capability::InternalSensors => &mut self.internal_sensors,
            Capability::Bluetooth => &mut self.bluetooth,
            Capability::UsbSerial => &mut self.usb_serial,
            Capability::Ioio => &mut self.ioio,
            Capability::DebugSensors => &mut self.debug_sensors,
            Capability::SerialScan => &mut self.serial_scan,
        };
        *flag = enabled;
    }

    /// Whether a capability is present.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::InternalSensors => self.internal_sensors,
            Capability::Bluetooth => self.bluetooth,
            Capability::UsbSerial => self.usb_serial,
            Capability::Ioio => self.ioio,
            Capability::DebugSensors => self.debug_sensors,
            Capability::SerialScan => self.serial_scan,
        }
    }

    /// Whether every capability in `required` is present.
    #[must_use]
    pub fn has_all(&self, required: &[Capability]) -> bool {
        required.iter().all(|c| self.has(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_all() {
        let none = Capabilities::none();
        let all = Capabilities::all();
        for cap in [
            Capability::InternalSensors,
            Capability::Bluetooth,
            Capability::UsbSerial,
            Capability::Ioio,
            Capability::DebugSensors,
            Capability::SerialScan,
        ] {
            assert!(!none.has(cap));
            assert!(all.has(cap));
        }
    }

    #[test]
    fn test_with_toggles_single_flag() {
        let caps = Capabilities::none().with(Capability::Ioio, true);
        assert!(caps.has(Capability::Ioio));
        assert!(!caps.has(Capability::Bluetooth));
        assert!(caps.has_all(&[Capability::Ioio]));
        assert!(!caps.has_all(&[Capability::Ioio, Capability::DebugSensors]));
        assert!(caps.has_all(&[]));
    }
}
