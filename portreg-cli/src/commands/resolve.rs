//! `resolve` command.

use anyhow::Result;
use console::style;
use portreg::{PortRegistry, Selection};
use rust_i18n::t;

use super::describe;
use crate::Cli;

/// Print the kind behind a raw identifier.
///
/// The kind name goes to stdout so scripts can consume it; the explanation
/// goes to stderr.
pub(crate) fn cmd_resolve(cli: &Cli, registry: &PortRegistry, raw: u32, json: bool) -> Result<()> {
    let selection = Selection::classify(raw, registry.table().len());
    let kind = registry.resolve_kind(raw);
    let entry = registry.lookup(raw);

    if json {
        let (form, offset) = match selection {
            Selection::RawOffset(offset) => ("offset", Some(offset)),
            Selection::Encoded(_) => ("encoded", None),
        };
        let value = serde_json::json!({
            "raw": raw,
            "form": form,
            "offset": offset,
            "kind": kind.as_str(),
            "label": entry.map(describe),
            "value": entry.map(|e| e.value.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{kind}");

    if !cli.quiet {
        let how = match selection {
            Selection::RawOffset(offset) => t!("resolve.raw_offset", offset = offset),
            Selection::Encoded(raw) => t!("resolve.encoded", id = format!("{raw:#010X}")),
        };
        eprintln!("{} {how}", style("ℹ").blue());
        match entry {
            Some(entry) => eprintln!(
                "{} {}",
                style("→").green().bold(),
                t!("resolve.entry", label = style(describe(entry)).cyan().to_string())
            ),
            None => eprintln!("{} {}", style("ℹ").blue(), t!("resolve.no_entry")),
        }
    }

    Ok(())
}
