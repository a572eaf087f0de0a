//! Command implementations.
//!
//! Each subcommand is implemented in its own module for clean separation.

pub(crate) mod completions;
pub(crate) mod list;
pub(crate) mod resolve;
pub(crate) mod select;

use log::debug;
use portreg::{Capabilities, PortEntry, PortRegistry, RegistryBuilder, ValueKey};

use crate::Cli;
use crate::config::Config;
use crate::help::localized;

/// Build the port list for this invocation, with the saved port selected.
pub(crate) fn open_session(cli: &Cli, config: &Config) -> PortRegistry {
    let caps = config.capabilities(Capabilities::detect());
    debug!("Effective capabilities: {caps:?}");

    let mut builder = RegistryBuilder::for_capabilities(&caps);
    config.plug_helpers(builder.transports_mut(), &caps);
    builder.build(&cli.device_config(config))
}

/// Label to show for an entry; static kinds are translated.
pub(crate) fn display_label(entry: &PortEntry) -> String {
    if entry.kind.carries_value() || !entry.value.is_empty() {
        return entry.label.clone();
    }

    localized(&format!("kind.{}", entry.kind)).unwrap_or_else(|| entry.label.clone())
}

/// Label plus the instance value when the label does not already show it.
pub(crate) fn describe(entry: &PortEntry) -> String {
    let label = display_label(entry);
    if entry.kind.value_key() == ValueKey::UartIndex
        || entry.value.is_empty()
        || entry.value.ends_with(&label)
    {
        label
    } else {
        format!("{label} ({})", entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portreg::{PortId, PortKind};

    fn entry(kind: PortKind, value: &str, label: &str) -> PortEntry {
        PortEntry {
            id: PortId::encode(kind, 0),
            kind,
            value: value.to_string(),
            label: label.to_string(),
            help: None,
            selected: false,
        }
    }

    #[test]
    fn test_describe_hides_redundant_value() {
        assert_eq!(
            describe(&entry(PortKind::Serial, "/dev/ttyUSB0", "ttyUSB0")),
            "ttyUSB0"
        );
        assert_eq!(describe(&entry(PortKind::Serial, "COM1:", "COM1:")), "COM1:");
        assert_eq!(describe(&entry(PortKind::IoioUart, "1", "IOIO UART 1")), "IOIO UART 1");
    }

    #[test]
    fn test_describe_shows_value() {
        assert_eq!(
            describe(&entry(PortKind::Rfcomm, "00:11:22:33:44:55", "Vario")),
            "Vario (00:11:22:33:44:55)"
        );
    }

    #[test]
    fn test_display_label_keeps_discovered_labels() {
        assert_eq!(
            display_label(&entry(PortKind::UsbSerial, "1027:24577", "USB: FT232R")),
            "USB: FT232R"
        );
    }
}
