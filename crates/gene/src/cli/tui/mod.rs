//! Terminal User Interface for GeNe
//!
//! Tabbed form over every node flag with a live command preview. The node
//! started from here writes its output to the node log so the screen stays
//! readable.

pub mod app;
pub mod event;
pub mod form;
pub mod ui;

use anyhow::{Context, Result};
use clap::Args;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gene::{ChildStdio, NodeLauncher};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;
use std::path::Path;
use tracing::info;

use crate::cli::config::node_log_path;
use crate::cli::tui::app::App;
use crate::cli::tui::event::{Event, EventHandler};

/// TUI command arguments
#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Seconds the node gets to exit after SIGTERM before it is killed
    #[arg(long, value_name = "SECS", default_value_t = gene::DEFAULT_GRACE_PERIOD.as_secs())]
    pub grace_secs: u64,

    /// Also kill every process with the node's name on exit
    #[arg(long)]
    pub kill_by_name_on_exit: bool,
}

/// Run the TUI
pub async fn run(geth: &Path, args: TuiArgs) -> Result<()> {
    gene_logging::ensure_logs_dir()?;
    let node_log = node_log_path();
    info!("Node output goes to {}", node_log.display());

    let launcher = NodeLauncher::new(geth).with_stdio(ChildStdio::AppendTo(node_log));
    let mut app = App::new(args, geth.to_path_buf(), launcher);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(std::time::Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // The node goes down whether the loop ended cleanly or not.
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run the application loop
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => app.handle_key(key)?,
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
    }

    Ok(())
}
