//! `list` command.

use anyhow::Result;
use console::style;
use portreg::PortRegistry;
use rust_i18n::t;

use super::{describe, display_label};

/// Print every selectable port, the saved one marked.
pub(crate) fn cmd_list(registry: &PortRegistry, json: bool) -> Result<()> {
    if json {
        let ports: Vec<serde_json::Value> = registry
            .entries()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id.to_string(),
                    "raw": e.id.raw(),
                    "kind": e.kind.as_str(),
                    "value": e.value,
                    "label": display_label(e),
                    "help": e.help,
                    "selected": e.selected,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(());
    }

    eprintln!("{}", style(t!("list.header")).bold().underlined());

    for entry in registry.entries() {
        let marker = if entry.selected {
            style("●").green().bold()
        } else {
            style("○").dim()
        };
        let help = entry
            .help
            .as_deref()
            .map(|h| format!(" - {}", style(h).dim()))
            .unwrap_or_default();

        eprintln!(
            "  {marker} {} {} {}{help}",
            style(entry.id).dim(),
            style(describe(entry)).cyan(),
            style(format!("[{}]", entry.kind)).yellow(),
        );
    }

    if registry.selected().is_none() {
        eprintln!("\n{} {}", style("ℹ").blue(), t!("list.nothing_selected"));
    }

    Ok(())
}
