//! Application state for the TUI

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gene::view_state::{rows, FormRow};
use gene::{
    build_arguments, collect_snapshot, process_name_for, FieldId, FieldKind, FormMode,
    NodeHandle, NodeLauncher, Tab, API_MODULES,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use super::form::FormState;
use super::TuiArgs;
use crate::cli::error::HelpfulError;

/// Severity of the footer message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Main application state
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub tab: Tab,
    /// Selected row on the current tab
    pub selected: usize,
    /// Highlighted module on a list row
    pub module_cursor: usize,
    /// Text input mode for the selected row
    pub editing: bool,
    /// "Show HTTP & WS API methods" switch
    pub show_api_methods: bool,
    pub form: FormState,
    /// Node arguments for the current form, rebuilt on every change
    pub preview: Vec<String>,
    pub status: Option<StatusMessage>,
    pub node: Option<NodeHandle>,
    geth: PathBuf,
    launcher: NodeLauncher,
    grace: Duration,
    kill_by_name_on_exit: bool,
}

impl App {
    pub fn new(args: TuiArgs, geth: PathBuf, launcher: NodeLauncher) -> Self {
        let mut app = Self {
            running: true,
            tab: Tab::Basic,
            selected: 0,
            module_cursor: 0,
            editing: false,
            show_api_methods: false,
            form: FormState::new(),
            preview: Vec::new(),
            status: None,
            node: None,
            geth,
            launcher,
            grace: Duration::from_secs(args.grace_secs),
            kill_by_name_on_exit: args.kill_by_name_on_exit,
        };
        app.refresh();
        app
    }

    pub fn geth(&self) -> &std::path::Path {
        &self.geth
    }

    pub fn mode(&self) -> FormMode {
        self.form.mode(self.show_api_methods)
    }

    pub fn rows(&self) -> Vec<FormRow> {
        rows(self.tab, self.mode())
    }

    pub fn selected_row(&self) -> Option<FormRow> {
        self.rows().get(self.selected).copied()
    }

    fn selected_field(&self) -> Option<FieldId> {
        match self.selected_row() {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }

    /// Recompute derived state after any change.
    fn refresh(&mut self) {
        let count = self.rows().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        self.preview = build_arguments(&collect_snapshot(&self.form));
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    /// Handle a key press.
    ///
    /// Errors are fatal: a node that cannot be spawned ends the session.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return Ok(());
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.editing = false;
            return self.start_node();
        }

        if self.editing {
            self.handle_edit_key(key);
        } else {
            self.handle_nav_key(key)?;
        }
        self.refresh();
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(field) = self.selected_field() else {
            self.editing = false;
            return;
        };

        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => self.form.pop_char(field),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.set_text(field, "");
            }
            KeyCode::Char(ch) => self.form.push_char(field, ch),
            _ => {}
        }
    }

    fn handle_nav_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.tab.prev()),
            KeyCode::Char(ch @ '1'..='4') => {
                let idx = ch as usize - '1' as usize;
                self.switch_tab(Tab::ALL[idx]);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.rows().len();
                if self.selected + 1 < count {
                    self.selected += 1;
                    self.module_cursor = 0;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.module_cursor = 0;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.module_cursor = self.module_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.module_cursor + 1 < API_MODULES.len() {
                    self.module_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('s') => return self.start_node(),
            KeyCode::Char('x') => self.stop_node(),
            _ => {}
        }
        Ok(())
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
        self.module_cursor = 0;
    }

    fn activate_selected(&mut self) {
        match self.selected_row() {
            Some(FormRow::ShowApiMethods) => self.show_api_methods = !self.show_api_methods,
            Some(FormRow::Field(field)) => match field.kind() {
                FieldKind::Text => self.editing = true,
                FieldKind::Toggle => self.form.flip(field),
                FieldKind::List => {
                    if let Some(module) = API_MODULES.get(self.module_cursor) {
                        self.form.toggle_module(field, module);
                    }
                }
            },
            None => {}
        }
    }

    /// Collect the form, build the arguments and start the node.
    pub fn start_node(&mut self) -> anyhow::Result<()> {
        if let Some(node) = &self.node {
            let pid = node.pid();
            self.set_status(
                StatusLevel::Warn,
                format!("Node already running (pid {}); press x to stop it first", pid),
            );
            return Ok(());
        }

        let snapshot = collect_snapshot(&self.form);
        let args = build_arguments(&snapshot);
        info!(
            etherbase = %snapshot.etherbase,
            data_dir = %snapshot.data_dir,
            p2p_port = %snapshot.p2p_port,
            http_port = %snapshot.http_port,
            "Configuring node with user parameters"
        );

        let handle = self.launcher.launch(&args).map_err(HelpfulError::from)?;
        self.set_status(
            StatusLevel::Info,
            format!("Node started (pid {}) with {} arguments", handle.pid(), args.len()),
        );
        self.node = Some(handle);
        Ok(())
    }

    /// Stop the node this session started.
    pub fn stop_node(&mut self) {
        let Some(handle) = self.node.take() else {
            self.set_status(StatusLevel::Warn, "No node running");
            return;
        };

        let pid = handle.pid();
        match handle.terminate(self.grace) {
            Ok(status) => self.set_status(StatusLevel::Info, format!("Node {} stopped: {}", pid, status)),
            Err(err) => {
                warn!(pid, "Failed to stop node: {}", err);
                self.set_status(StatusLevel::Warn, format!("Failed to stop node {}: {}", pid, err));
            }
        }
    }

    /// Periodic update: notice a node that exited by itself.
    pub fn tick(&mut self) {
        let exited = match self.node.as_mut().map(|node| node.try_status()) {
            Some(Ok(Some(status))) => Some(status.to_string()),
            Some(Err(err)) => {
                warn!("Failed to poll node status: {}", err);
                None
            }
            _ => None,
        };

        if let Some(status) = exited {
            self.node = None;
            self.set_status(StatusLevel::Warn, format!("Node exited: {}", status));
        }
    }

    /// Stop our node on the way out; optional name-based sweep afterwards.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.node.take() {
            let pid = handle.pid();
            if let Err(err) = handle.terminate(self.grace) {
                warn!(pid, "Failed to stop node on exit: {}", err);
            }
        }

        if self.kill_by_name_on_exit {
            match process_name_for(&self.geth) {
                Some(name) => gene::terminate_all(&name),
                None => warn!("No process name for {}; skipping kill-by-name", self.geth.display()),
            }
        }
        info!("Exited");
    }
}
