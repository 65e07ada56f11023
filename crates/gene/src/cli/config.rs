//! Configuration paths for GeNe
//!
//! Simple path resolution with sensible defaults.
//! Logs live under ~/.gene/ unless GENE_HOME says otherwise.

use crate::cli::output::{print_json, print_table};
use anyhow::Result;
use clap::Args;
use gene::{process_name_for, NodeLauncher};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use gene_logging::{gene_home, logs_dir, node_log_path};

/// Environment variable selecting the node executable.
pub const GETH_ENV: &str = "GETH";

/// Node executable used when GETH is unset: a sibling of the working directory.
pub const DEFAULT_GETH_PATH: &str = "../geth";

/// Arguments for the config command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Show resolved settings in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolvedConfig {
    geth: String,
    geth_resolved: Option<PathBuf>,
    process_name: Option<String>,
    home: PathBuf,
    logs: PathBuf,
    node_log: PathBuf,
}

fn resolve(geth: &Path) -> ResolvedConfig {
    ResolvedConfig {
        geth: geth.display().to_string(),
        geth_resolved: NodeLauncher::new(geth).resolve_binary().ok(),
        process_name: process_name_for(geth),
        home: gene_home(),
        logs: logs_dir(),
        node_log: node_log_path(),
    }
}

/// Run the config command - shows resolved settings
pub fn run(geth: &Path, args: ConfigArgs) -> Result<()> {
    let resolved = resolve(geth);

    if args.json {
        return print_json(&resolved);
    }

    let geth_status = match &resolved.geth_resolved {
        Some(path) => format!("found at {}", path.display()),
        None => "not found".to_string(),
    };

    print_table(
        &["SETTING", "VALUE"],
        vec![
            vec![format!("Node binary (${})", GETH_ENV), resolved.geth.clone()],
            vec!["Node binary status".to_string(), geth_status],
            vec![
                "Process name".to_string(),
                resolved.process_name.clone().unwrap_or_else(|| "-".to_string()),
            ],
            vec!["Home".to_string(), resolved.home.display().to_string()],
            vec!["Logs".to_string(), resolved.logs.display().to_string()],
            vec!["Node log (tui)".to_string(), resolved.node_log.display().to_string()],
        ],
    );
    Ok(())
}
