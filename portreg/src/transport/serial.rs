//! Serial device discovery.

#[cfg(feature = "native")]
use log::{debug, trace};

use std::cmp::Ordering;

use super::{Discovered, Family, TransportEnumerator};
use crate::error::Result;
use crate::kind::PortKind;

/// Display name for a serial device path: the path without `/dev/`.
pub fn serial_display_name(path: &str) -> &str {
    path.strip_prefix("/dev/").unwrap_or(path)
}

/// Label order for serial ports: digit runs compare by value, so `COM2:`
/// sorts before `COM10:` and `ttyUSB9` before `ttyUSB10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        let (Some(x), Some(y)) = (a.chars().next(), b.chars().next()) else {
            return a.len().cmp(&b.len());
        };

        if x.is_ascii_digit() && y.is_ascii_digit() {
            let a_end = a.find(|c: char| !c.is_ascii_digit()).unwrap_or(a.len());
            let b_end = b.find(|c: char| !c.is_ascii_digit()).unwrap_or(b.len());
            let a_num = a[..a_end].trim_start_matches('0');
            let b_num = b[..b_end].trim_start_matches('0');
            let order = a_num
                .len()
                .cmp(&b_num.len())
                .then_with(|| a_num.cmp(b_num))
                .then_with(|| a_end.cmp(&b_end));
            if order != Ordering::Equal {
                return order;
            }
            a = &a[a_end..];
            b = &b[b_end..];
        } else {
            if x != y {
                return x.cmp(&y);
            }
            a = &a[x.len_utf8()..];
            b = &b[y.len_utf8()..];
        }
    }
}

/// Serial ports reported by the operating system.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialScan;

#[cfg(feature = "native")]
impl SerialScan {
    /// Create a scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "native")]
impl TransportEnumerator for SerialScan {
    fn family(&self) -> Family {
        Family::Serial
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        let ports = serialport::available_ports().inspect_err(|e| {
            debug!("Failed to enumerate serial ports: {e}");
        })?;

        Ok(ports
            .into_iter()
            .map(|info| {
                if let serialport::SerialPortType::UsbPort(usb) = &info.port_type {
                    trace!(
                        "Found USB port: {} (VID: {:04X}, PID: {:04X})",
                        info.port_name, usb.vid, usb.pid
                    );
                } else {
                    trace!("Found port: {}", info.port_name);
                }

                let label = serial_display_name(&info.port_name).to_string();
                Discovered::new(PortKind::Serial, info.port_name).with_label(label)
            })
            .collect())
    }
}

/// Fixed `COM1:`..`COMn:` list for hosts that cannot scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComPortRange {
    count: u32,
}

impl ComPortRange {
    /// `COM1:` through `COM<count>:`.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl Default for ComPortRange {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TransportEnumerator for ComPortRange {
    fn family(&self) -> Family {
        Family::Serial
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Ok((1..=self.count)
            .map(|i| Discovered::new(PortKind::Serial, format!("COM{i}:")))
            .collect())
    }
}
