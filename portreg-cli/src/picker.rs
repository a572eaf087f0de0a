//! Interactive port selection.
//!
//! Plays the list-selection widget: shows every entry of the registry with the
//! saved port preselected and writes the choice back into the registry.

use anyhow::Result;
use console::style;
use dialoguer::{Error as DialoguerError, Select, theme::ColorfulTheme};
use log::debug;
use portreg::{PortEntry, PortId, PortRegistry};
use rust_i18n::t;
use std::io::IsTerminal;

use crate::CliError;
use crate::commands::describe;

fn usage_err(message: &str) -> anyhow::Error {
    CliError::Usage(message.to_string()).into()
}

/// Let the user pick an entry and select it in the registry.
///
/// In non-interactive mode the reconciled selection is kept as-is; having
/// none is a usage error.
pub(crate) fn pick_port(registry: &mut PortRegistry, non_interactive: bool) -> Result<PortId> {
    if non_interactive {
        return registry
            .selected()
            .map(|e| e.id)
            .ok_or_else(|| usage_err(t!("select.nothing_selected").as_ref()));
    }

    ensure_interactive_terminal()?;

    let term_width = console::Term::stderr().size().1 as usize;
    let items = menu_items(registry.entries(), term_width.saturating_sub(4));
    let default = registry
        .selected()
        .and_then(|e| registry.index_of(e.id))
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("select.prompt").to_string())
        .items(&items)
        .default(default)
        .interact_opt()
        .map_err(map_prompt_error)?;

    let Some(index) = selection else {
        return Err(CliError::Cancelled(t!("select.cancelled").to_string()).into());
    };

    let id = registry
        .entries()
        .get(index)
        .map(|e| e.id)
        .ok_or_else(|| anyhow::anyhow!("Invalid port index: {index}"))?;
    registry.select(id);
    debug!("Picked entry {index} ({id})");
    Ok(id)
}

/// Menu lines, truncated to `max_width` so narrow terminals do not wrap.
fn menu_items(entries: &[PortEntry], max_width: usize) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let help = entry
                .help
                .as_deref()
                .map(|h| format!(" - {}", style(h).dim()))
                .unwrap_or_default();
            let line = format!("{}{help}", describe(entry));
            console::truncate_str(&line, max_width, "\u{2026}").into_owned()
        })
        .collect()
}

fn ensure_interactive_terminal() -> Result<()> {
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        Ok(())
    } else {
        Err(usage_err(t!("select.requires_tty").as_ref()))
    }
}

fn map_prompt_error(err: DialoguerError) -> anyhow::Error {
    match err {
        DialoguerError::IO(io_err) => {
            if io_err.kind() == std::io::ErrorKind::Interrupted {
                CliError::Cancelled(t!("select.cancelled").to_string()).into()
            } else {
                usage_err(t!("select.prompt_failed").as_ref())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::measure_text_width;
    use portreg::{PortConfig, RegistryBuilder, StaticKindTable, Transports, UartLines};

    fn registry(config: &PortConfig) -> PortRegistry {
        let transports = Transports::none().with_uart(UartLines::new(2));
        RegistryBuilder::new(StaticKindTable::default(), transports).build(config)
    }

    #[test]
    fn test_non_interactive_keeps_selection() {
        let mut reg = registry(&PortConfig::ioio_uart(1));
        let expected = reg.selected().map(|e| e.id);
        let id = pick_port(&mut reg, true).unwrap();
        assert_eq!(Some(id), expected);
        assert_eq!(reg.get(id).map(|e| e.label.as_str()), Some("IOIO UART 1"));
    }

    #[test]
    fn test_non_interactive_without_selection_is_usage_error() {
        let mut reg = registry(&PortConfig::ioio_uart(7));
        assert!(reg.selected().is_none());

        let err = pick_port(&mut reg, true).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Usage(_))));
    }

    #[test]
    fn test_menu_items_fit_width() {
        let reg = registry(&PortConfig::serial("/dev/ttyUSB_with_a_really_long_name_0"));
        for item in menu_items(reg.entries(), 20) {
            assert!(measure_text_width(&item) <= 20, "{item} is too wide");
        }
    }

    #[test]
    fn test_menu_items_one_per_entry() {
        let reg = registry(&PortConfig::default());
        assert_eq!(menu_items(reg.entries(), 80).len(), reg.len());
    }

    #[test]
    fn test_prompt_interrupt_is_cancel() {
        let err = map_prompt_error(DialoguerError::IO(std::io::Error::from(
            std::io::ErrorKind::Interrupted,
        )));
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Cancelled(_))
        ));

        let err = map_prompt_error(DialoguerError::IO(std::io::Error::from(
            std::io::ErrorKind::BrokenPipe,
        )));
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::Usage(_))));
    }
}
