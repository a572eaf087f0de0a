//! The static kind table.
//!
//! Kinds that need no discovery are listed here once, in display order. The
//! table offered to a session is this list filtered by the host
//! [`Capabilities`]; the filtered order is the order of the source list.

use crate::capability::{Capabilities, Capability};
use crate::kind::PortKind;

/// One statically known port kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticKind {
    /// The kind.
    pub kind: PortKind,
    /// Untranslated label.
    pub label: &'static str,
    /// Capabilities the kind needs to be offered.
    pub requires: &'static [Capability],
}

const fn entry(
    kind: PortKind,
    label: &'static str,
    requires: &'static [Capability],
) -> StaticKind {
    // Static entries have no instance value to match on.
    assert!(!kind.carries_value());
    StaticKind {
        kind,
        label,
        requires,
    }
}

/// Every static kind, in display order. `Disabled` must stay first.
pub const STATIC_KINDS: &[StaticKind] = &[
    entry(PortKind::Disabled, "Disabled", &[]),
    entry(
        PortKind::Internal,
        "Built-in GPS & sensors",
        &[Capability::InternalSensors],
    ),
    entry(
        PortKind::RfcommServer,
        "Bluetooth server",
        &[Capability::Bluetooth],
    ),
    entry(PortKind::DroidSoarV2, "DroidSoar V2", &[Capability::Bluetooth]),
    entry(
        PortKind::GliderLink,
        "GliderLink traffic receiver",
        &[Capability::Bluetooth],
    ),
    entry(
        PortKind::Nunchuck,
        "IOIO switches and Nunchuk",
        &[Capability::Ioio, Capability::DebugSensors],
    ),
    entry(
        PortKind::I2cPressureSensor,
        "IOIO I²C pressure sensor",
        &[Capability::Ioio],
    ),
    entry(
        PortKind::IoioVoltage,
        "IOIO voltage sensor",
        &[Capability::Ioio],
    ),
    entry(PortKind::TcpClient, "TCP client", &[]),
    entry(PortKind::TcpListener, "TCP port", &[]),
    entry(PortKind::UdpListener, "UDP port", &[]),
];

/// The static kinds offered on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKindTable {
    kinds: Vec<&'static StaticKind>,
}

impl StaticKindTable {
    /// Filter [`STATIC_KINDS`] by the given capabilities.
    #[must_use]
    pub fn for_capabilities(caps: &Capabilities) -> Self {
        let kinds = STATIC_KINDS
            .iter()
            .filter(|k| caps.has_all(k.requires))
            .collect();
        Self { kinds }
    }

    /// Number of static kinds in this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always `false`: `Disabled` is always offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Entry at a table position.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&'static StaticKind> {
        self.kinds.get(offset).copied()
    }

    /// Iterate in display order.
    pub fn iter(&self) -> impl Iterator<Item = &'static StaticKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Find the table entry for a kind.
    #[must_use]
    pub fn find(&self, kind: PortKind) -> Option<&'static StaticKind> {
        self.iter().find(|k| k.kind == kind)
    }
}

impl Default for StaticKindTable {
    fn default() -> Self {
        Self::for_capabilities(&Capabilities::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(table: &StaticKindTable) -> Vec<PortKind> {
        table.iter().map(|k| k.kind).collect()
    }

    #[test]
    fn test_minimal_table() {
        let table = StaticKindTable::default();
        assert_eq!(
            kinds(&table),
            vec![
                PortKind::Disabled,
                PortKind::TcpClient,
                PortKind::TcpListener,
                PortKind::UdpListener,
            ]
        );
        assert!(!table.is_empty());
    }

    #[test]
    fn test_full_table_keeps_source_order() {
        let table = StaticKindTable::for_capabilities(&Capabilities::all());
        assert_eq!(table.len(), STATIC_KINDS.len());
        assert_eq!(
            kinds(&table),
            STATIC_KINDS.iter().map(|k| k.kind).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_disabled_first() {
        for caps in [Capabilities::none(), Capabilities::all()] {
            let table = StaticKindTable::for_capabilities(&caps);
            assert_eq!(table.get(0).map(|k| k.kind), Some(PortKind::Disabled));
        }
    }

    #[test]
    fn test_nunchuck_needs_debug_sensors() {
        let caps = Capabilities::none().with(Capability::Ioio, true);
        let table = StaticKindTable::for_capabilities(&caps);
        assert!(table.find(PortKind::Nunchuck).is_none());
        assert!(table.find(PortKind::IoioVoltage).is_some());
    }

    #[test]
    fn test_find_label() {
        let table = StaticKindTable::default();
        assert_eq!(table.find(PortKind::TcpListener).map(|k| k.label), Some("TCP port"));
        assert!(table.find(PortKind::Serial).is_none());
    }
}
