//! `select` command.

use anyhow::{Context, Result};
use console::style;
use log::debug;
use portreg::{PortConfig, PortRegistry};
use rust_i18n::t;
use serde::Serialize;

use super::describe;
use crate::{Cli, picker};

/// The `[device]` section a caller would save.
#[derive(Serialize)]
struct DeviceSection<'a> {
    device: &'a PortConfig,
}

/// Pick a port and print the configuration that selects it.
pub(crate) fn cmd_select(cli: &Cli, registry: &mut PortRegistry, json: bool) -> Result<()> {
    let id = picker::pick_port(registry, cli.non_interactive)?;
    let config = registry
        .to_config(id.raw())
        .with_context(|| format!("No entry for port id {id}"))?;

    if let Some(entry) = registry.get(id) {
        debug!("Selected {} [{}]", describe(entry), entry.kind);
        if !cli.quiet {
            eprintln!(
                "{} {}",
                style("✓").green().bold(),
                t!("select.done", label = style(describe(entry)).cyan().to_string())
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&DeviceSection { device: &config })?);
    }

    Ok(())
}
