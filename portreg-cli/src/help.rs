//! Localized help output and locale selection.
//!
//! `--help` is rendered from the clap definition of [`Cli`]; every visible
//! string is looked up in the message catalogue first and the doc-comment
//! English is kept when a key is missing.

use clap::{Arg, ArgAction, Command, CommandFactory};
use rust_i18n::t;

use crate::Cli;

/// Supported locales for i18n.
pub(crate) const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// Best supported locale for the system settings.
pub(crate) fn detect_locale() -> String {
    let system_locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    match_locale(&system_locale)
}

/// Map a locale string (`zh_CN.UTF-8`, `zh`, `en-US`, `C`, ...) onto one of
/// [`SUPPORTED_LOCALES`]. Unknown languages fall back to English.
pub(crate) fn match_locale(locale: &str) -> String {
    let locale = locale.split('.').next().unwrap_or(locale).replace('_', "-");
    if SUPPORTED_LOCALES.contains(&locale.as_str()) {
        return locale;
    }

    match locale.split('-').next().map(str::to_lowercase).as_deref() {
        Some("zh") => "zh-CN".to_string(),
        _ => "en".to_string(),
    }
}

/// Catalogue text for `key`, or `None` when no locale defines it.
pub(crate) fn localized(key: &str) -> Option<String> {
    let text = t!(key).to_string();
    (text != key).then_some(text)
}

/// The CLI with translated about texts, argument help and headings.
pub(crate) fn build_localized_command() -> Command {
    Cli::command()
        .about(t!("app.about").to_string())
        .help_template(root_template())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg(builtin_flag("help", 'h', ArgAction::Help))
        .arg(builtin_flag("version", 'V', ArgAction::Version))
        .mut_args(localize_arg)
        .mut_subcommands(|sub| {
            let template = command_template(&sub);
            let sub = match localized(&format!("cmd.{}.about", sub.get_name())) {
                Some(about) => sub.about(about),
                None => sub,
            };
            sub.help_template(template).mut_args(localize_arg)
        })
}

fn builtin_flag(id: &'static str, short: char, action: ArgAction) -> Arg {
    Arg::new(id).short(short).long(id).action(action).global(true)
}

fn root_template() -> String {
    format!(
        "{{about}}\n\n{usage}:\n  {{usage}}\n\n{commands}:\n{{subcommands}}\n\n{options}:\n{{options}}\n",
        usage = t!("help.usage_heading"),
        commands = t!("help.commands_heading"),
        options = t!("help.options_heading"),
    )
}

/// Only `resolve` and `completions` take positionals; the others get no
/// empty arguments section.
fn command_template(sub: &Command) -> String {
    let mut template = format!("{{about}}\n\n{}:\n  {{usage}}\n", t!("help.usage_heading"));
    if sub.get_positionals().next().is_some() {
        template.push_str(&format!(
            "\n{}:\n{{positionals}}\n",
            t!("help.arguments_heading")
        ));
    }
    template.push_str(&format!("\n{}:\n{{options}}\n", t!("help.options_heading")));
    template
}

/// Replace an argument's help with `arg.<id>.help` when the catalogue has it.
fn localize_arg(arg: Arg) -> Arg {
    match localized(&format!("arg.{}.help", arg.get_id())) {
        Some(help) => arg.help(help),
        None => arg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_chinese_variants() {
        assert_eq!(match_locale("zh_CN.UTF-8"), "zh-CN");
        assert_eq!(match_locale("zh-CN"), "zh-CN");
        assert_eq!(match_locale("zh"), "zh-CN");
        assert_eq!(match_locale("zh_TW"), "zh-CN");
    }

    #[test]
    fn test_locale_english_and_fallback() {
        assert_eq!(match_locale("en_US.UTF-8"), "en");
        assert_eq!(match_locale("en"), "en");
        assert_eq!(match_locale("C"), "en");
        assert_eq!(match_locale("POSIX"), "en");
        assert_eq!(match_locale("de_DE.UTF-8"), "en");
    }

    #[test]
    fn test_localized_command_lists_only_real_commands() {
        let cmd = build_localized_command();
        let names: Vec<&str> = cmd.get_subcommands().map(Command::get_name).collect();
        assert_eq!(names, ["list", "select", "resolve", "completions"]);
    }

    #[test]
    fn test_arguments_section_only_with_positionals() {
        let cli = Cli::command();
        let template = |name: &str| command_template(cli.find_subcommand(name).unwrap());
        assert!(template("resolve").contains("{positionals}"));
        assert!(template("completions").contains("{positionals}"));
        assert!(!template("list").contains("{positionals}"));
        assert!(!template("select").contains("{positionals}"));
    }

    #[test]
    fn test_localized_missing_key() {
        assert_eq!(localized("no.such.key"), None);
    }

    #[test]
    fn test_localize_arg_unknown_key_keeps_help() {
        let arg = localize_arg(Arg::new("no_such_arg_xyz").help("from doc comment"));
        assert_eq!(
            arg.get_help().map(ToString::to_string).as_deref(),
            Some("from doc comment")
        );
    }
}
