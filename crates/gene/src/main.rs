//! GeNe - geth node launcher
//!
//! Turns a node configuration, entered as flags or through the TUI form,
//! into a geth command line and supervises the process it starts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gene_logging::LogConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "gene", version, about = "Configure and launch a geth node")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Node executable to launch
    #[arg(
        long,
        global = true,
        env = cli::config::GETH_ENV,
        default_value = cli::config::DEFAULT_GETH_PATH
    )]
    geth: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the node with the given settings and supervise it
    Start(cli::start::StartArgs),

    /// Print the command line `start` would run, without running it
    Args(cli::args::ArgsArgs),

    /// Kill every running process with the node's name
    Stop(cli::stop::StopArgs),

    /// List every configurable field and the flag it maps to
    Flags(cli::flags::FlagsArgs),

    /// Show resolved configuration paths
    Config(cli::config::ConfigArgs),

    /// Launch the interactive TUI
    Tui(cli::tui::TuiArgs),
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Start(args) => args.json,
        Commands::Args(args) => args.json,
        Commands::Flags(args) => args.json,
        Commands::Config(args) => args.json,
        Commands::Stop(_) | Commands::Tui(_) => false,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let is_tui_mode = matches!(cli.command, Commands::Tui(_));
    let json_mode = command_wants_json(&cli.command);

    let _log_guard = match gene_logging::init_logging(LogConfig {
        app_name: "gene",
        verbose: cli.verbose,
        tui_mode: is_tui_mode,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let geth = cli.geth;

    match cli.command {
        Commands::Start(args) => cli::start::run(&geth, args),
        Commands::Args(args) => cli::args::run(&geth, args),
        Commands::Stop(args) => cli::stop::run(&geth, args),
        Commands::Flags(args) => cli::flags::run(args),
        Commands::Config(args) => cli::config::run(&geth, args),
        Commands::Tui(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cli::tui::run(&geth, args))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_geth_flag_overrides_default() {
        let cli = Cli::parse_from(["gene", "--geth", "/opt/geth", "args"]);
        assert_eq!(cli.geth, PathBuf::from("/opt/geth"));
    }

    #[test]
    fn test_node_flags_parse_under_start() {
        let cli = Cli::parse_from([
            "gene",
            "start",
            "--detach",
            "--miner.etherbase",
            "0xABC",
            "--http.api",
            "eth,net",
        ]);
        match cli.command {
            Commands::Start(args) => {
                assert!(args.detach);
                assert_eq!(args.node.etherbase.as_deref(), Some("0xABC"));
                assert_eq!(args.node.http_api, vec!["eth", "net"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_json_mode_detection() {
        let cli = Cli::parse_from(["gene", "flags", "--json"]);
        assert!(command_wants_json(&cli.command));

        let cli = Cli::parse_from(["gene", "stop"]);
        assert!(!command_wants_json(&cli.command));
    }
}
