//! Args command - show the node invocation without starting it

use crate::cli::node_args::NodeArgs;
use crate::cli::output::print_json;
use anyhow::Result;
use clap::Args;
use gene::{build_arguments, collect_snapshot, render_command_line, NodeLaunchConfig};
use serde::Serialize;
use std::path::Path;

/// Arguments for the args command
#[derive(Debug, Args)]
pub struct ArgsArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// Output binary, argument vector and collected snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Invocation {
    binary: String,
    args: Vec<String>,
    config: NodeLaunchConfig,
}

/// Execute the args command
pub fn run(geth: &Path, args: ArgsArgs) -> Result<()> {
    let config = collect_snapshot(&args.node);
    let node_args = build_arguments(&config);
    let binary = geth.display().to_string();

    if args.json {
        print_json(&Invocation {
            binary,
            args: node_args,
            config,
        })
    } else {
        println!("{}", render_command_line(&binary, &node_args));
        Ok(())
    }
}
