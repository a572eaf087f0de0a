//! portreg CLI - pick a communication port from the discovered list.
//!
//! ## Features
//!
//! - List static port kinds and discovered serial, Bluetooth, USB-serial and
//!   UART endpoints with their identifiers
//! - Interactive port selection that keeps the saved choice even when the
//!   device is unplugged
//! - Resolve a port identifier back to its kind
//! - Shell completion generation
//! - Environment variable support
//! - Internationalization (i18n) support

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use env_logger::Env;
use log::debug;
use portreg::{PortConfig, PortKind};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

mod commands;
mod config;
mod help;
mod picker;

use config::Config;

// Initialize i18n with locale files from the locales directory
rust_i18n::i18n!("locales", fallback = "en");

/// portreg - Discover communication ports and pick one.
///
/// Environment variables:
///   PORTREG_CONFIG              - Configuration file to use
///   PORTREG_LANG                - Language/locale (en, zh-CN)
///   PORTREG_NON_INTERACTIVE     - Non-interactive mode (disable prompts)
#[derive(Parser)]
#[command(name = "portreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to a configuration file.
    #[arg(long = "config", global = true, value_name = "PATH", env = "PORTREG_CONFIG")]
    config_path: Option<PathBuf>,

    /// Language/locale for messages (e.g., en, zh-CN).
    #[arg(long, global = true, env = "PORTREG_LANG")]
    lang: Option<String>,

    /// Verbose output level (-v, -vv, -vvv for increasing detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-essential output).
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Non-interactive mode (fail instead of prompting).
    #[arg(long, global = true, env = "PORTREG_NON_INTERACTIVE")]
    non_interactive: bool,

    /// Saved port kind (overrides the configuration file).
    #[arg(short, long, global = true, value_name = "KIND")]
    kind: Option<PortKind>,

    /// Saved device path or USB-serial id.
    #[arg(short, long, global = true)]
    path: Option<String>,

    /// Saved Bluetooth MAC address.
    #[arg(long, global = true, value_name = "MAC")]
    mac: Option<String>,

    /// Saved IOIO UART line.
    #[arg(long, global = true, value_name = "LINE")]
    uart: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List selectable ports with the saved one marked.
    List {
        /// Output the list as JSON to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Pick a port and print the configuration to save.
    Select {
        /// Output the configuration as JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a port identifier to its kind.
    Resolve {
        /// Identifier (decimal, or hexadecimal with 0x prefix).
        #[arg(value_parser = parse_port_id)]
        id: u32,

        /// Output the result as JSON to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell type for completions.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Errors with a dedicated exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Bad invocation or environment (exit code 2).
    #[error("{0}")]
    Usage(String),

    /// The user cancelled a prompt (exit code 130).
    #[error("{0}")]
    Cancelled(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Cancelled(_) => 130,
        }
    }
}

/// Map an error to the process exit code.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>()
        .map_or(1, CliError::exit_code)
}

/// Parse a port identifier (decimal, or hex with 0x prefix; underscores allowed).
fn parse_port_id(s: &str) -> Result<u32, String> {
    let s: String = s.trim().chars().filter(|c| *c != '_').collect();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("Invalid port id '{s}': {e}"))
}

impl Cli {
    /// The saved port: configuration file, then command-line overrides.
    fn device_config(&self, config: &Config) -> PortConfig {
        let mut device = config.device();
        if let Some(kind) = self.kind {
            device.kind = kind;
        }
        if let Some(path) = &self.path {
            device.path.clone_from(path);
        }
        if let Some(mac) = &self.mac {
            device.bluetooth_mac.clone_from(mac);
        }
        if let Some(uart) = self.uart {
            device.ioio_uart_id = uart;
        }
        device
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            ExitCode::from(exit_code_for(&err))
        },
    }
}

fn run() -> Result<()> {
    // Inspect raw args early to support localized --help handling and early --lang
    let raw_args: Vec<String> = env::args().collect();

    let mut early_lang: Option<String> = env::var("PORTREG_LANG").ok();
    for (i, arg) in raw_args.iter().enumerate() {
        if let Some(val) = arg.strip_prefix("--lang=") {
            early_lang = Some(val.to_string());
        } else if arg == "--lang" && i + 1 < raw_args.len() {
            early_lang = Some(raw_args[i + 1].clone());
        }
    }

    let locale = early_lang.map_or_else(help::detect_locale, |l| help::match_locale(&l));
    rust_i18n::set_locale(&locale);

    if env::var("NO_COLOR").is_ok() || !console::Term::stderr().is_term() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Localized help for -h/--help or a bare invocation.
    let wants_help = raw_args.iter().any(|a| a == "-h" || a == "--help");
    let no_args = raw_args.len() <= 1;

    if wants_help || no_args {
        let mut app = help::build_localized_command();

        let subcmd_names: Vec<String> = app
            .get_subcommands()
            .map(|s| s.get_name().to_string())
            .collect();
        let found = raw_args
            .iter()
            .skip(1)
            .find(|token| subcmd_names.iter().any(|n| n == token.as_str()));

        if let Some(cmd_name) = found {
            if let Some(sub) = app
                .get_subcommands()
                .find(|s| s.get_name() == cmd_name.as_str())
            {
                let _ = sub.clone().print_help();
            }
        } else {
            let _ = app.print_help();
        }
        return Ok(());
    }

    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_target(cli.verbose >= 2)
        .format_timestamp(if cli.verbose >= 2 {
            Some(env_logger::TimestampPrecision::Millis)
        } else {
            None
        })
        .init();

    debug!(
        "portreg v{} (verbose level: {}, locale: {locale}, requested: {})",
        env!("CARGO_PKG_VERSION"),
        cli.verbose,
        cli.lang.as_deref().unwrap_or("auto")
    );

    let config = if let Some(ref path) = cli.config_path {
        Config::load_from_path(path)
    } else {
        Config::load()
    };

    match &cli.command {
        Commands::List { json } => {
            let registry = commands::open_session(&cli, &config);
            commands::list::cmd_list(&registry, *json)
        },
        Commands::Select { json } => {
            let mut registry = commands::open_session(&cli, &config);
            commands::select::cmd_select(&cli, &mut registry, *json)
        },
        Commands::Resolve { id, json } => {
            let registry = commands::open_session(&cli, &config);
            commands::resolve::cmd_resolve(&cli, &registry, *id, *json)
        },
        Commands::Completions { shell } => {
            commands::completions::cmd_completions(*shell);
            Ok(())
        },
    }
}
