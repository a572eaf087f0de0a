//! Port identifiers.
//!
//! An identifier packs the [`PortKind`] into the upper 16 bits and a serial
//! number into the lower 16 bits. The serial is the number of entries already
//! in the list when the entry was added, which makes identifiers unique
//! within one list. Serials above `0xFFFF` are truncated; a list would need
//! 65536 entries for that to matter.

use std::fmt;

use crate::kind::PortKind;

const SERIAL_BITS: u32 = 16;
const SERIAL_MASK: u32 = (1 << SERIAL_BITS) - 1;

/// Identifier of one entry in a [`PortRegistry`](crate::PortRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(u32);

impl PortId {
    /// Pack a kind and serial number.
    #[must_use]
    pub fn encode(kind: PortKind, serial: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let serial = (serial as u32) & SERIAL_MASK;
        Self((u32::from(kind.discriminant()) << SERIAL_BITS) | serial)
    }

    /// The kind packed into the upper bits.
    #[must_use]
    pub fn kind(self) -> PortKind {
        // Only `encode` builds a PortId, so the upper half is always a
        // valid discriminant.
        decode_kind(self.0).unwrap_or_default()
    }

    /// The serial number packed into the lower bits.
    #[must_use]
    pub fn serial(self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        let serial = (self.0 & SERIAL_MASK) as u16;
        serial
    }

    /// The packed integer as handed to a list widget.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

impl From<PortId> for u32 {
    fn from(id: PortId) -> Self {
        id.0
    }
}

/// Decode the kind from an untrusted raw identifier.
#[must_use]
pub fn decode_kind(raw: u32) -> Option<PortKind> {
    #[allow(clippy::cast_possible_truncation)]
    let discriminant = (raw >> SERIAL_BITS) as u16;
    PortKind::from_discriminant(discriminant)
}

/// A raw value reported back by a list widget.
///
/// Before the list has been mutated a widget may report the position within
/// the static kind table instead of an encoded identifier. Any value below
/// the static table length is such a position; encoded identifiers of
/// non-disabled kinds are at least `0x10000`, and the disabled entry is
/// always first, so its encoded identifier and its position are both `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Position within the static kind table.
    RawOffset(usize),
    /// Full encoded identifier.
    Encoded(u32),
}

impl Selection {
    /// Classify a raw widget value against the static table length.
    #[must_use]
    pub fn classify(raw: u32, static_len: usize) -> Self {
        match usize::try_from(raw) {
            Ok(offset) if offset < static_len => Self::RawOffset(offset),
            _ => Self::Encoded(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        assert_eq!(PortId::encode(PortKind::Disabled, 0).raw(), 0);
        assert_eq!(PortId::encode(PortKind::Serial, 3).raw(), 0x0001_0003);
        assert_eq!(PortId::encode(PortKind::UsbSerial, 0x42).raw(), 0x0012_0042);
    }

    #[test]
    fn test_kind_is_independent_of_serial() {
        for kind in PortKind::ALL {
            for serial in [0usize, 1, 17, 0xFFFF, 0x1_0000, 0x12_3456] {
                assert_eq!(PortId::encode(kind, serial).kind(), kind);
            }
        }
    }

    #[test]
    fn test_serial_truncates() {
        let id = PortId::encode(PortKind::Serial, 0x1_0005);
        assert_eq!(id.serial(), 5);
        assert_eq!(id, PortId::encode(PortKind::Serial, 5));
    }

    #[test]
    fn test_decode_kind_rejects_unknown() {
        assert_eq!(decode_kind(0x0004_0001), Some(PortKind::IoioUart));
        assert_eq!(decode_kind(0x00FF_0000), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PortId::encode(PortKind::Serial, 10).to_string(), "0x0001000A");
    }

    #[test]
    fn test_classify() {
        assert_eq!(Selection::classify(0, 5), Selection::RawOffset(0));
        assert_eq!(Selection::classify(4, 5), Selection::RawOffset(4));
        assert_eq!(Selection::classify(5, 5), Selection::Encoded(5));
        assert_eq!(
            Selection::classify(0x0001_0002, 5),
            Selection::Encoded(0x0001_0002)
        );
    }
}
