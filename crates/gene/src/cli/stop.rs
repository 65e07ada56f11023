//! Stop command - name-based cleanup of node processes
//!
//! This kills every process with the given name, including nodes this
//! launcher did not start. `start` and `tui` stop their own child by
//! handle; this command is the manual fallback.

use crate::cli::error::HelpfulError;
use anyhow::Result;
use clap::Args;
use gene::process_name_for;
use std::path::Path;
use tracing::info;

/// Arguments for the stop command
#[derive(Debug, Args)]
pub struct StopArgs {
    /// Process name to kill (defaults to the file name of --geth)
    #[arg(long)]
    pub name: Option<String>,
}

/// Execute the stop command
pub fn run(geth: &Path, args: StopArgs) -> Result<()> {
    let name = match args.name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => process_name_for(geth).ok_or_else(|| HelpfulError::no_process_name(geth))?,
    };

    info!(name = %name, "Stopping all node processes by name");
    gene::terminate_all(&name);
    println!("Requested stop of all '{}' processes", name);
    Ok(())
}
