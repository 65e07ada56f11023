//! Start command - launch the node with flags built from the command line
//!
//! In the foreground the launcher stays up until the node exits or a
//! SIGINT/SIGTERM arrives, then stops the instance it started. With
//! `--detach` it prints the pid and returns, leaving the node running.

use crate::cli::error::HelpfulError;
use crate::cli::node_args::NodeArgs;
use crate::cli::output::{format_duration, print_json};
use anyhow::{Context, Result};
use clap::Args;
use gene::{build_arguments, collect_snapshot, process_name_for, render_command_line, NodeLauncher};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Arguments for the start command
#[derive(Debug, Args)]
pub struct StartArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// Return right after spawning instead of supervising the node
    #[arg(long)]
    pub detach: bool,

    /// Seconds the node gets to exit after SIGTERM before it is killed
    #[arg(long, value_name = "SECS", default_value_t = gene::DEFAULT_GRACE_PERIOD.as_secs())]
    pub grace_secs: u64,

    /// Also kill every process with the node's name on exit
    #[arg(long)]
    pub kill_by_name_on_exit: bool,

    /// Print the started pid and arguments as JSON (with --detach)
    #[arg(long, requires = "detach")]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StartedNode<'a> {
    pid: u32,
    binary: String,
    args: &'a [String],
}

/// Execute the start command
pub fn run(geth: &Path, args: StartArgs) -> Result<()> {
    let snapshot = collect_snapshot(&args.node);
    let node_args = build_arguments(&snapshot);

    info!(
        etherbase = %snapshot.etherbase,
        data_dir = %snapshot.data_dir,
        p2p_port = %snapshot.p2p_port,
        http_port = %snapshot.http_port,
        "Configuring node with user parameters"
    );
    info!(
        "Starting node: {}",
        render_command_line(&geth.display().to_string(), &node_args)
    );

    // Signals must be caught from before the node exists.
    let shutdown = if args.detach {
        None
    } else {
        Some(install_shutdown_flag()?)
    };

    let launcher = NodeLauncher::new(geth);
    let mut handle = launcher.launch(&node_args).map_err(HelpfulError::from)?;

    if args.detach {
        if args.json {
            print_json(&StartedNode {
                pid: handle.pid(),
                binary: handle.binary().display().to_string(),
                args: &node_args,
            })?;
        } else {
            println!("Started {} (pid {})", handle.binary().display(), handle.pid());
        }
        return Ok(());
    }

    let shutdown = shutdown.unwrap_or_default();
    let exited = handle
        .wait_until(&shutdown)
        .context("Failed to wait for node process")?;

    match exited {
        Some(status) => {
            info!(
                uptime = %format_duration(handle.uptime()),
                "Node exited on its own: {}", status
            );
        }
        None => {
            let pid = handle.pid();
            let uptime = handle.uptime();
            match handle.terminate(Duration::from_secs(args.grace_secs)) {
                Ok(status) => info!(
                    pid,
                    uptime = %format_duration(uptime),
                    "Node shut down: {}", status
                ),
                Err(err) => warn!(pid, "Failed to stop node: {}", err),
            }
        }
    }

    if args.kill_by_name_on_exit {
        match process_name_for(geth) {
            Some(name) => gene::terminate_all(&name),
            None => warn!("No process name for {}; skipping kill-by-name", geth.display()),
        }
    }

    info!("Exited");
    Ok(())
}

/// Raise a flag on SIGINT/SIGTERM (Ctrl+C on Windows).
fn install_shutdown_flag() -> Result<Arc<AtomicBool>> {
    let shutdown_flag = Arc::new(AtomicBool::new(false));
    let shutdown_flag_handler = shutdown_flag.clone();

    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals =
            Signals::new([SIGINT, SIGTERM]).context("Failed to install signal handlers")?;
        std::thread::spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!("Received signal {}, stopping node...", sig);
                shutdown_flag_handler.store(true, Ordering::SeqCst);
            }
        });
    }

    #[cfg(windows)]
    {
        ctrlc::set_handler(move || {
            info!("Received Ctrl+C, stopping node...");
            shutdown_flag_handler.store(true, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl+C handler")?;
    }

    Ok(shutdown_flag)
}
