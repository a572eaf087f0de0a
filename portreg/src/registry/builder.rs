//! Registry construction.

use log::{debug, trace};

use super::PortRegistry;
use crate::capability::Capabilities;
use crate::config::PortConfig;
use crate::kind::PortKind;
use crate::table::StaticKindTable;
use crate::transport::{Discovered, TransportEnumerator, Transports, natural_cmp};

/// Builds a [`PortRegistry`] from the static table and the injected
/// transport enumerators.
#[derive(Debug)]
pub struct RegistryBuilder {
    table: StaticKindTable,
    transports: Transports,
}

impl RegistryBuilder {
    /// Builder over an explicit table and enumerator set.
    #[must_use]
    pub fn new(table: StaticKindTable, transports: Transports) -> Self {
        Self { table, transports }
    }

    /// Builder with the static table and native enumerators for `caps`.
    #[must_use]
    pub fn for_capabilities(caps: &Capabilities) -> Self {
        Self::new(
            StaticKindTable::for_capabilities(caps),
            Transports::for_capabilities(caps),
        )
    }

    /// The enumerators, for replacing platform helpers after construction.
    pub fn transports_mut(&mut self) -> &mut Transports {
        &mut self.transports
    }

    /// Build the list for one settings session and select `config` in it.
    ///
    /// Order: static kinds, serial ports (sorted among themselves), Bluetooth
    /// devices, USB-serial adapters, UART lines. An unavailable transport
    /// contributes nothing.
    pub fn build(&self, config: &PortConfig) -> PortRegistry {
        let mut registry = PortRegistry::new(self.table.clone());

        self.fill_static(&mut registry, config);
        self.fill_serial(&mut registry, config);
        self.fill_bluetooth(&mut registry, config);
        self.fill_usb_serial(&mut registry, config);
        self.fill_uart(&mut registry, config);

        debug!(
            "Built port registry: {} entries ({} static), selected {:?}",
            registry.len(),
            self.table.len(),
            registry.selected().map(|e| e.id.to_string())
        );
        registry
    }

    fn fill_static(&self, registry: &mut PortRegistry, config: &PortConfig) {
        for static_kind in self.table.iter() {
            let id = registry.push(
                static_kind.kind,
                String::new(),
                static_kind.label.to_string(),
                None,
            );
            if static_kind.kind == config.kind && !config.kind.carries_value() {
                registry.select(id);
            }
        }
    }

    fn fill_serial(&self, registry: &mut PortRegistry, config: &PortConfig) {
        let sort_start = registry.len();
        append(registry, discover(self.transports.serial.as_ref()), display_label);

        if registry.len() > sort_start {
            registry.entries_mut()[sort_start..]
                .sort_by(|a, b| natural_cmp(&a.label, &b.label));
        }

        if config.kind == PortKind::Serial {
            registry.reconcile(PortKind::Serial, &config.path);
        }
    }

    fn fill_bluetooth(&self, registry: &mut PortRegistry, config: &PortConfig) {
        let bluetooth = self.transports.bluetooth.as_ref();
        append(registry, discover(bluetooth), display_label);

        if config.uses_bluetooth_mac() && !config.bluetooth_mac.is_empty() {
            let name = bluetooth.name_for(&config.bluetooth_mac);
            registry.reconcile_labelled(config.kind, &config.bluetooth_mac, name);
        }
    }

    fn fill_usb_serial(&self, registry: &mut PortRegistry, config: &PortConfig) {
        append(registry, discover(self.transports.usb_serial.as_ref()), |d| {
            format!("USB: {}", d.label.as_deref().unwrap_or(&d.value))
        });

        if config.kind == PortKind::UsbSerial && !config.path.is_empty() {
            registry.reconcile(PortKind::UsbSerial, &config.path);
        }
    }

    fn fill_uart(&self, registry: &mut PortRegistry, config: &PortConfig) {
        let wanted = (config.kind == PortKind::IoioUart).then(|| config.ioio_uart_id.to_string());

        for line in discover(self.transports.uart.as_ref()) {
            let matches = wanted.as_deref() == Some(line.value.as_str());
            let label = display_label(&line);
            let id = registry.push(line.kind, line.value, label, line.help);
            if matches {
                registry.select(id);
            }
        }
    }
}

/// Run an enumerator, treating "unavailable" as "nothing found".
fn discover(enumerator: &dyn TransportEnumerator) -> Vec<Discovered> {
    match enumerator.discover() {
        Ok(found) => {
            debug!("{} transport: {} found", enumerator.family(), found.len());
            found
        },
        Err(e) => {
            debug!("{} transport unavailable: {e}", enumerator.family());
            Vec::new()
        },
    }
}

fn display_label(d: &Discovered) -> String {
    d.label.clone().unwrap_or_else(|| d.value.clone())
}

fn append<F>(registry: &mut PortRegistry, found: Vec<Discovered>, label: F)
where
    F: Fn(&Discovered) -> String,
{
    for d in found {
        let label = label(&d);
        trace!("Adding {} port {} ({label})", d.kind, d.value);
        registry.push(d.kind, d.value, label, d.help);
    }
}
