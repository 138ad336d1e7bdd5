//! Command dispatch logic for mqtt-exporter

use super::{InitArgs, ReplayArgs, ValidateArgs, init_config, replay_messages, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "mqtt-exporter", author, version, long_about = None, display_name = "mqtt-exporter")]
#[command(about = "Export values published on MQTT topics as Prometheus metrics")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file and list the metrics it exports
    Validate(ValidateArgs),
    /// Replay recorded messages and print the resulting metrics
    Replay(Box<ReplayArgs>),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Init(init_args) => init_config(host, init_args),
        Command::Validate(validate_args) => validate_config(host, validate_args),
        Command::Replay(replay_args) => replay_messages(host, replay_args).await,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::LogLevel;
    use camino::Utf8Path;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_replay_options() {
        let cli = Cli::parse_from([
            "mqtt-exporter",
            "replay",
            "--config",
            "c.yml",
            "--input",
            "m.jsonl",
            "--output",
            "out.prom",
            "--log-level",
            "debug",
        ]);
        let Command::Replay(args) = cli.command else {
            panic!("expected replay command");
        };
        assert_eq!(args.config.path().map(Utf8Path::as_str), Some("c.yml"));
        assert_eq!(args.input.as_deref().map(Utf8Path::as_str), Some("m.jsonl"));
        assert_eq!(args.output.as_deref().map(Utf8Path::as_str), Some("out.prom"));
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn init_path_is_optional() {
        let cli = Cli::parse_from(["mqtt-exporter", "init"]);
        assert!(matches!(cli.command, Command::Init(InitArgs { output: None })));
    }
}
