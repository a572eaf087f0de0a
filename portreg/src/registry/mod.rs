//! The port registry: one built list of selectable ports.
//!
//! A [`PortRegistry`] is produced by [`RegistryBuilder`], owned by a single
//! settings session and dropped with it. After construction the list only
//! grows (a saved device that is not present gets a placeholder entry) and
//! only the `selected` flags change.

mod builder;

pub use builder::RegistryBuilder;

use log::{debug, warn};

use crate::config::PortConfig;
use crate::id::{PortId, Selection};
use crate::kind::{PortKind, ValueKey};
use crate::table::StaticKindTable;

/// One selectable list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    /// Identifier, unique within the registry.
    pub id: PortId,
    /// Port kind.
    pub kind: PortKind,
    /// Instance token (path, MAC, index); empty for static kinds.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
    /// Optional help text.
    pub help: Option<String>,
    /// Whether this is the current selection.
    pub selected: bool,
}

/// A built list of ports plus the static table it was built from.
#[derive(Debug, Clone)]
pub struct PortRegistry {
    table: StaticKindTable,
    entries: Vec<PortEntry>,
}

impl PortRegistry {
    /// An empty registry over `table`.
    #[must_use]
    pub fn new(table: StaticKindTable) -> Self {
        Self {
            table,
            entries: Vec::new(),
        }
    }

    /// Append an entry. The serial is the current length, so identifiers
    /// strictly increase in insertion order.
    pub(crate) fn push(
        &mut self,
        kind: PortKind,
        value: String,
        label: String,
        help: Option<String>,
    ) -> PortId {
        let id = PortId::encode(kind, self.entries.len());
        let value = match kind.value_key() {
            ValueKey::BluetoothMac => ValueKey::BluetoothMac.canonical(&value),
            _ => value,
        };
        self.entries.push(PortEntry {
            id,
            kind,
            value,
            label,
            help,
            selected: false,
        });
        id
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [PortEntry] {
        &mut self.entries
    }

    fn select_index(&mut self, index: usize) -> PortId {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.selected = i == index;
        }
        self.entries[index].id
    }

    /// All entries in list order.
    #[must_use]
    pub fn entries(&self) -> &[PortEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty (only before the static kinds are added).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The static table this registry was built from.
    #[must_use]
    pub fn table(&self) -> &StaticKindTable {
        &self.table
    }

    /// List position of an identifier.
    #[must_use]
    pub fn index_of(&self, id: PortId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Entry with an identifier.
    #[must_use]
    pub fn get(&self, id: PortId) -> Option<&PortEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The selected entry, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&PortEntry> {
        self.entries.iter().find(|e| e.selected)
    }

    /// Mark the entry with `id` as selected. Returns `false` if there is none.
    pub fn select(&mut self, id: PortId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.select_index(index);
                true
            },
            None => false,
        }
    }

    /// Select the entry for a saved `(kind, value)`, adding a placeholder
    /// when the device is not in the list.
    pub fn reconcile(&mut self, kind: PortKind, value: &str) -> PortId {
        self.reconcile_labelled(kind, value, None)
    }

    /// Like [`reconcile`](Self::reconcile); a placeholder gets `label`
    /// instead of the bare value.
    ///
    /// Entries match on their value within the same value namespace (paths,
    /// MACs, UART indices), so a saved classic Bluetooth device is found even
    /// if it is currently bonded as low-energy. MACs compare ignoring case.
    /// Kinds without a value match on the kind alone.
    pub fn reconcile_labelled(
        &mut self,
        kind: PortKind,
        value: &str,
        label: Option<String>,
    ) -> PortId {
        let key = kind.value_key();
        let value = key.canonical(value);
        let existing = self.entries.iter().position(|e| match key {
            ValueKey::None => e.kind == kind,
            _ => e.kind.value_key() == key && e.value == value,
        });

        if let Some(index) = existing {
            return self.select_index(index);
        }

        debug!("Saved {kind} port {value:?} not present, adding placeholder");
        let label = label.unwrap_or_else(|| value.clone());
        self.push(kind, value, label, None);
        self.select_index(self.entries.len() - 1)
    }

    /// Apply a saved configuration to this list.
    ///
    /// Path and MAC kinds go through [`reconcile`](Self::reconcile); static
    /// kinds and UART lines are only selected if the list offers them.
    pub fn select_config(&mut self, config: &PortConfig) -> Option<PortId> {
        match config.kind.value_key() {
            ValueKey::None => {
                let index = self.entries.iter().position(|e| e.kind == config.kind)?;
                Some(self.select_index(index))
            },
            ValueKey::Path => Some(self.reconcile(config.kind, &config.path)),
            ValueKey::BluetoothMac => Some(self.reconcile(config.kind, &config.bluetooth_mac)),
            ValueKey::UartIndex => {
                let value = config.ioio_uart_id.to_string();
                let index = self
                    .entries
                    .iter()
                    .position(|e| e.kind == PortKind::IoioUart && e.value == value)?;
                Some(self.select_index(index))
            },
        }
    }

    /// Kind of a raw value reported by a list widget.
    ///
    /// Values below the static table length are table positions; anything
    /// else is an encoded identifier. An identifier whose kind bits are
    /// unknown resolves to `Disabled`.
    #[must_use]
    pub fn resolve_kind(&self, raw: u32) -> PortKind {
        match Selection::classify(raw, self.table.len()) {
            Selection::RawOffset(offset) => self
                .table
                .get(offset)
                .map(|k| k.kind)
                .unwrap_or_default(),
            Selection::Encoded(raw) => crate::id::decode_kind(raw).unwrap_or_else(|| {
                warn!("Port id {raw:#010X} has an unknown kind, treating as disabled");
                PortKind::Disabled
            }),
        }
    }

    /// Entry addressed by a raw widget value, either form.
    #[must_use]
    pub fn lookup(&self, raw: u32) -> Option<&PortEntry> {
        match Selection::classify(raw, self.table.len()) {
            Selection::RawOffset(offset) => self.entries.get(offset),
            Selection::Encoded(raw) => self.entries.iter().find(|e| e.id.raw() == raw),
        }
    }

    /// Configuration to persist for a raw widget value.
    #[must_use]
    pub fn to_config(&self, raw: u32) -> Option<PortConfig> {
        let entry = self.lookup(raw)?;
        Some(PortConfig::from_value(self.resolve_kind(raw), &entry.value))
    }
}
