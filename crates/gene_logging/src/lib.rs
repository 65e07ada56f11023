//! Shared logging utilities for GeNe binaries.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "gene=info,gene_logging=info";
const HOME_ENV: &str = "GENE_HOME";
const HOME_DIR_NAME: &str = ".gene";

/// Logging configuration shared by GeNe binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// The terminal belongs to the TUI; console output is limited to errors.
    pub tui_mode: bool,
}

/// Keeps the non-blocking file writer alive. Drop it last.
#[must_use = "dropping the guard stops the file writer"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// A missing logs directory is not fatal: the file layer is skipped and
/// logging continues on the console only.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let mut guard = None;
    let file_layer = match ensure_logs_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(
                dir,
                format!("{}.log", sanitize_name(config.app_name)),
            );
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(file_filter.clone()),
            )
        }
        Err(err) => {
            eprintln!("Warning: failed to create logs directory: {:#}", err);
            None
        }
    };

    let console_filter = if config.tui_mode {
        EnvFilter::new("error")
    } else if config.verbose {
        EnvFilter::new("gene=debug,gene_logging=debug")
    } else {
        file_filter
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(BoxMakeWriter::new(std::io::stderr))
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

/// Get the GeNe home directory: `$GENE_HOME` or ~/.gene
pub fn gene_home() -> PathBuf {
    resolve_home(std::env::var_os(HOME_ENV), dirs::home_dir())
}

fn resolve_home(override_path: Option<OsString>, user_home: Option<PathBuf>) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => user_home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(HOME_DIR_NAME),
    }
}

/// Get the logs directory: <home>/logs
pub fn logs_dir() -> PathBuf {
    gene_home().join("logs")
}

/// Where the node's stdout/stderr go when the terminal is taken.
pub fn node_log_path() -> PathBuf {
    logs_dir().join("node.log")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_override_wins() {
        let home = resolve_home(
            Some(OsString::from("/srv/gene")),
            Some(PathBuf::from("/home/alice")),
        );
        assert_eq!(home, PathBuf::from("/srv/gene"));
    }

    #[test]
    fn test_empty_override_falls_back_to_user_home() {
        let home = resolve_home(Some(OsString::new()), Some(PathBuf::from("/home/alice")));
        assert_eq!(home, PathBuf::from("/home/alice/.gene"));
    }

    #[test]
    fn test_missing_user_home_uses_current_dir() {
        let home = resolve_home(None, None);
        assert_eq!(home, PathBuf::from("./.gene"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("gene"), "gene");
        assert_eq!(sanitize_name("gene tui/1"), "gene_tui_1");
    }
}
