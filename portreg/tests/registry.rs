//! Registry construction and reconciliation scenarios.

use std::collections::HashSet;

use portreg::{
    BluetoothType, BondedDevice, BondedDevices, Capabilities, ComPortRange, Discovered, Error,
    Family,
    PortConfig, PortKind, PortRegistry, RegistryBuilder, Result, StaticKindTable,
    TransportEnumerator, Transports, UartLines, UsbSerialDevice, UsbSerialDevices,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serial enumerator returning a fixed list of paths.
struct FixedSerial(Vec<&'static str>);

impl TransportEnumerator for FixedSerial {
    fn family(&self) -> Family {
        Family::Serial
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Ok(self
            .0
            .iter()
            .map(|path| {
                Discovered::new(PortKind::Serial, *path)
                    .with_label(portreg::transport::serial_display_name(path))
            })
            .collect())
    }
}

/// Serial enumerator whose platform query fails.
struct BrokenSerial;

impl TransportEnumerator for BrokenSerial {
    fn family(&self) -> Family {
        Family::Serial
    }

    fn discover(&self) -> Result<Vec<Discovered>> {
        Err(Error::Io(std::io::Error::other("scan failed")))
    }
}

fn builder(transports: Transports) -> RegistryBuilder {
    RegistryBuilder::new(StaticKindTable::default(), transports)
}

fn selected(registry: &PortRegistry) -> Vec<&portreg::PortEntry> {
    registry.entries().iter().filter(|e| e.selected).collect()
}

fn full_transports() -> Transports {
    Transports::none()
        .with_serial(FixedSerial(vec!["/dev/ttyUSB1", "/dev/ttyACM0", "/dev/ttyUSB0"]))
        .with_bluetooth(BondedDevices::new(vec![
            BondedDevice {
                address: "00:11:22:33:44:55".to_string(),
                name: Some("Vario".to_string()),
                ty: BluetoothType::Classic,
            },
            BondedDevice {
                address: "AA:BB:CC:DD:EE:FF".to_string(),
                name: Some("HM-10".to_string()),
                ty: BluetoothType::Ble,
            },
        ]))
        .with_usb_serial(UsbSerialDevices::new(vec![UsbSerialDevice {
            id: "1027:24577".to_string(),
            name: "FT232R".to_string(),
        }]))
        .with_uart(UartLines::new(4).with_help(vec!["TX 3 / RX 4".to_string()]))
}

#[test]
fn disabled_without_hardware_lists_only_static_kinds() {
    init_logger();
    let registry = builder(Transports::none()).build(&PortConfig::new(PortKind::Disabled));

    let kinds: Vec<PortKind> = registry.entries().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            PortKind::Disabled,
            PortKind::TcpClient,
            PortKind::TcpListener,
            PortKind::UdpListener,
        ]
    );
    let selected = selected(&registry);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].kind, PortKind::Disabled);
    assert_eq!(selected[0].id.raw(), 0);
}

#[test]
fn saved_serial_port_present_is_selected_without_placeholder() {
    init_logger();
    let transports =
        Transports::none().with_serial(FixedSerial(vec!["/dev/ttyUSB1", "/dev/ttyUSB0"]));
    let registry = builder(transports).build(&PortConfig::serial("/dev/ttyUSB0"));

    let serial: Vec<&str> = registry
        .entries()
        .iter()
        .filter(|e| e.kind == PortKind::Serial)
        .map(|e| e.value.as_str())
        .collect();
    assert_eq!(serial, vec!["/dev/ttyUSB0", "/dev/ttyUSB1"]);
    assert_eq!(registry.len(), 6);

    let selected = selected(&registry);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value, "/dev/ttyUSB0");
    assert_eq!(selected[0].label, "ttyUSB0");
}

#[test]
fn saved_serial_port_absent_gets_placeholder() {
    init_logger();
    let transports = Transports::none().with_serial(FixedSerial(vec!["/dev/ttyUSB0"]));
    let registry = builder(transports).build(&PortConfig::serial("/dev/ttyUSB5"));

    let values: Vec<&str> = registry
        .entries()
        .iter()
        .filter(|e| e.kind == PortKind::Serial)
        .map(|e| e.value.as_str())
        .collect();
    assert_eq!(values, vec!["/dev/ttyUSB0", "/dev/ttyUSB5"]);

    let selected = selected(&registry);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value, "/dev/ttyUSB5");
    assert_eq!(
        registry.resolve_kind(selected[0].id.raw()),
        PortKind::Serial
    );
}

#[test]
fn saved_uart_line_is_selected_by_index() {
    init_logger();
    let transports = Transports::none().with_uart(UartLines::new(4));
    let registry = builder(transports).build(&PortConfig::ioio_uart(2));

    let selected = selected(&registry);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].label, "IOIO UART 2");
    assert_eq!(
        registry.resolve_kind(selected[0].id.raw()),
        PortKind::IoioUart
    );
}

#[test]
fn saved_uart_line_absent_is_not_synthesized() {
    let transports = Transports::none().with_uart(UartLines::new(2));
    let registry = builder(transports).build(&PortConfig::ioio_uart(7));
    assert_eq!(registry.len(), 4 + 2);
    assert!(registry.selected().is_none());
}

#[test]
fn identifiers_are_unique_and_resolvable() {
    init_logger();
    let configs = [
        PortConfig::new(PortKind::Disabled),
        PortConfig::serial("/dev/ttyUSB9"),
        PortConfig::bluetooth(PortKind::Rfcomm, "12:34:56:78:9A:BC"),
        PortConfig::usb_serial("6790:29987"),
        PortConfig::ioio_uart(1),
    ];
    let caps = Capabilities::all();
    let builder = RegistryBuilder::new(StaticKindTable::for_capabilities(&caps), full_transports());

    for config in &configs {
        let registry = builder.build(config);
        let ids: HashSet<u32> = registry.entries().iter().map(|e| e.id.raw()).collect();
        assert_eq!(ids.len(), registry.len());

        for entry in registry.entries() {
            assert_eq!(registry.resolve_kind(entry.id.raw()), entry.kind);
            assert_eq!(entry.id.kind(), entry.kind);
        }
        assert_eq!(selected(&registry).len(), 1, "config {config:?}");
    }
}

#[test]
fn static_order_is_stable_across_discovery_results() {
    let caps = Capabilities::all();
    let static_kinds = |registry: &PortRegistry| -> Vec<PortKind> {
        registry
            .entries()
            .iter()
            .filter(|e| !e.kind.carries_value())
            .map(|e| e.kind)
            .collect()
    };

    let empty = RegistryBuilder::new(StaticKindTable::for_capabilities(&caps), Transports::none())
        .build(&PortConfig::default());
    let full = RegistryBuilder::new(StaticKindTable::for_capabilities(&caps), full_transports())
        .build(&PortConfig::default());

    assert_eq!(static_kinds(&empty), static_kinds(&full));
    assert_eq!(static_kinds(&full).len(), portreg::STATIC_KINDS.len());
}

#[test]
fn serial_sort_only_touches_serial_range() {
    let registry = builder(full_transports()).build(&PortConfig::default());
    let labels: Vec<&str> = registry.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Disabled",
            "TCP client",
            "TCP port",
            "UDP port",
            "ttyACM0",
            "ttyUSB0",
            "ttyUSB1",
            "Vario",
            "HM-10",
            "USB: FT232R",
            "IOIO UART 0",
            "IOIO UART 1",
            "IOIO UART 2",
            "IOIO UART 3",
        ]
    );
    assert_eq!(registry.entries()[10].help.as_deref(), Some("TX 3 / RX 4"));
    assert_eq!(registry.entries()[11].help, None);
}

#[test]
fn broken_transport_contributes_nothing() {
    init_logger();
    let broken = builder(Transports::none().with_serial(BrokenSerial))
        .build(&PortConfig::new(PortKind::TcpClient));
    let missing = builder(Transports::none()).build(&PortConfig::new(PortKind::TcpClient));

    assert_eq!(broken.len(), missing.len());
    assert_eq!(broken.selected().map(|e| e.kind), Some(PortKind::TcpClient));
}

#[test]
fn bluetooth_kinds_follow_device_type() {
    let registry = builder(full_transports()).build(&PortConfig::default());
    let vario = registry.entries().iter().find(|e| e.label == "Vario").unwrap();
    let hm10 = registry.entries().iter().find(|e| e.label == "HM-10").unwrap();
    assert_eq!(registry.resolve_kind(vario.id.raw()), PortKind::Rfcomm);
    assert_eq!(registry.resolve_kind(hm10.id.raw()), PortKind::BleHm10);
}

#[test]
fn saved_bluetooth_device_matches_by_address() {
    let config = PortConfig::bluetooth(PortKind::Rfcomm, "AA:BB:CC:DD:EE:FF");
    let registry = builder(full_transports()).build(&config);

    assert_eq!(registry.len(), 14);
    let selected = registry.selected().unwrap();
    assert_eq!(selected.label, "HM-10");
    assert_eq!(selected.kind, PortKind::BleHm10);
}

#[test]
fn absent_bluetooth_device_falls_back_to_address() {
    let bonded = BondedDevices::from_strided(&[
        Some("00:11:22:33:44:55".to_string()),
        Some("Vario".to_string()),
        Some("CLASSIC".to_string()),
    ]);
    let transports = Transports::none().with_bluetooth(bonded);
    let config = PortConfig::bluetooth(PortKind::BleSensor, "66:77:88:99:AA:BB");
    let registry = builder(transports).build(&config);

    let selected = registry.selected().unwrap();
    assert_eq!(selected.label, "66:77:88:99:AA:BB");
    assert_eq!(selected.kind, PortKind::BleSensor);
}

#[test]
fn saved_bluetooth_address_matches_ignoring_case() {
    let config = PortConfig::bluetooth(PortKind::BleHm10, "aa:bb:cc:dd:ee:ff");
    let registry = builder(full_transports()).build(&config);

    assert_eq!(registry.len(), 14);
    let hm10: Vec<_> = registry
        .entries()
        .iter()
        .filter(|e| e.label == "HM-10")
        .collect();
    assert_eq!(hm10.len(), 1);
    assert!(hm10[0].selected);
    assert_eq!(hm10[0].value, "AA:BB:CC:DD:EE:FF");

    let saved = registry.to_config(hm10[0].id.raw()).unwrap();
    assert_eq!(saved.bluetooth_mac, "AA:BB:CC:DD:EE:FF");
}

#[test]
fn empty_bluetooth_mac_selects_nothing() {
    let config = PortConfig::bluetooth(PortKind::Rfcomm, "");
    let registry = builder(full_transports()).build(&config);
    assert!(registry.selected().is_none());
    assert_eq!(registry.len(), 14);
}

#[test]
fn saved_usb_serial_adapter() {
    let registry = builder(full_transports()).build(&PortConfig::usb_serial("1027:24577"));
    let selected = registry.selected().unwrap();
    assert_eq!(selected.label, "USB: FT232R");

    let absent = builder(full_transports()).build(&PortConfig::usb_serial("1111:2222"));
    assert_eq!(absent.len(), 15);
    assert_eq!(absent.selected().map(|e| e.label.as_str()), Some("1111:2222"));
}

#[test]
fn reconcile_twice_after_build_keeps_one_placeholder() {
    let mut registry = builder(Transports::none()).build(&PortConfig::serial("/dev/ttyS3"));
    let len = registry.len();
    let again = registry.reconcile(PortKind::Serial, "/dev/ttyS3");
    assert_eq!(registry.len(), len);
    assert_eq!(registry.selected().map(|e| e.id), Some(again));
}

#[test]
fn raw_offsets_resolve_through_static_table() {
    let caps = Capabilities::all();
    let registry = RegistryBuilder::new(StaticKindTable::for_capabilities(&caps), Transports::none())
        .build(&PortConfig::default());

    for (offset, entry) in registry.entries().iter().enumerate() {
        let raw = u32::try_from(offset).unwrap();
        assert_eq!(registry.resolve_kind(raw), entry.kind);
    }
}

#[test]
fn to_config_round_trips_selection() {
    let configs = [
        PortConfig::new(PortKind::UdpListener),
        PortConfig::serial("/dev/ttyUSB0"),
        PortConfig::bluetooth(PortKind::Rfcomm, "00:11:22:33:44:55"),
        PortConfig::usb_serial("1027:24577"),
        PortConfig::ioio_uart(3),
    ];
    let builder = builder(full_transports());
    for config in configs {
        let registry = builder.build(&config);
        let id = registry.selected().unwrap().id;
        assert_eq!(registry.to_config(id.raw()), Some(config));
    }
}

#[test]
fn select_config_reapplies_saved_choice() {
    let mut registry = builder(full_transports()).build(&PortConfig::default());
    let id = registry
        .select_config(&PortConfig::ioio_uart(1))
        .unwrap();
    assert_eq!(registry.get(id).map(|e| e.label.as_str()), Some("IOIO UART 1"));

    let id = registry
        .select_config(&PortConfig::serial("/dev/ttyUSB1"))
        .unwrap();
    assert_eq!(registry.selected().map(|e| e.id), Some(id));
    assert_eq!(registry.entries().iter().filter(|e| e.selected).count(), 1);
}

#[test]
fn com_port_range_keeps_numeric_order() {
    let transports = Transports::none().with_serial(ComPortRange::default());
    let registry = builder(transports).build(&PortConfig::serial("COM3:"));

    let serial: Vec<&str> = registry
        .entries()
        .iter()
        .filter(|e| e.kind == PortKind::Serial)
        .map(|e| e.value.as_str())
        .collect();
    let expected: Vec<String> = (1..=10).map(|i| format!("COM{i}:")).collect();
    assert_eq!(serial, expected);
    assert_eq!(registry.selected().map(|e| e.value.as_str()), Some("COM3:"));
}

#[test]
fn enumerators_can_be_replaced_after_construction() {
    let mut builder = RegistryBuilder::for_capabilities(&Capabilities::none());
    builder.transports_mut().serial = Box::new(FixedSerial(vec!["/dev/ttyUSB0"]));
    builder.transports_mut().uart = Box::new(UartLines::new(2));

    let registry = builder.build(&PortConfig::serial("/dev/ttyUSB0"));
    assert_eq!(registry.len(), 4 + 1 + 2);
    assert_eq!(registry.selected().map(|e| e.label.as_str()), Some("ttyUSB0"));
}
