//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use gene::LaunchError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Node binary does not exist
    pub fn binary_not_found(path: &Path) -> Self {
        Self::new(format!("Node binary not found: {}", path.display()))
            .with_context("GeNe launches an existing geth executable; it does not ship one")
            .with_suggestions([
                format!("TRY: Check that the file exists: ls -la {}", path.display()),
                "TRY: Point GeNe at geth: GETH=/path/to/geth gene start".to_string(),
                "TRY: Pass it explicitly: gene --geth /path/to/geth start".to_string(),
            ])
    }

    /// Binary exists but could not be started
    pub fn spawn_failed(path: &Path, reason: &str) -> Self {
        Self::new(format!("Failed to start node: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check the file is executable: chmod +x {}", path.display()),
                format!("TRY: Run it by hand to see the error: {} version", path.display()),
            ])
    }

    /// Log file for node output could not be opened
    pub fn node_log_unavailable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot open node log: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Set GENE_HOME to a writable directory".to_string(),
                format!("TRY: Check permissions: ls -la {}", path.display()),
            ])
    }

    /// No name to kill by
    pub fn no_process_name(path: &Path) -> Self {
        Self::new(format!("Cannot derive a process name from: {}", path.display()))
            .with_context("Name-based stop needs the binary's file name")
            .with_suggestion("TRY: Name it explicitly: gene stop --name geth")
    }
}

impl From<LaunchError> for HelpfulError {
    fn from(err: LaunchError) -> Self {
        match &err {
            LaunchError::BinaryNotFound(path) => HelpfulError::binary_not_found(path),
            LaunchError::Spawn { binary, source } => {
                HelpfulError::spawn_failed(binary, &source.to_string())
            }
            LaunchError::LogFile { path, source } => {
                HelpfulError::node_log_unavailable(path, &source.to_string())
            }
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Machine-readable form of an error, for `--json` commands.
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        }),
        None => serde_json::json!({
            "error": format!("{:#}", err),
            "context": null,
            "suggestions": [],
        }),
    }
}

/// Print an error as JSON on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let value = error_json(err);
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While starting the node")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While starting the node"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_binary_not_found_mentions_env_var() {
        let err: HelpfulError =
            LaunchError::BinaryNotFound(PathBuf::from("/nonexistent/geth")).into();

        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/geth"));
        assert!(display.contains("GETH="));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_spawn_failure_carries_os_reason() {
        let err: HelpfulError = LaunchError::Spawn {
            binary: PathBuf::from("./geth"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        }
        .into();

        assert_eq!(err.context.as_deref(), Some("Permission denied"));
        assert!(err.suggestions.iter().any(|s| s.contains("chmod +x")));
    }

    #[test]
    fn test_error_json_for_helpful_error() {
        let err = anyhow::Error::new(HelpfulError::new("boom").with_suggestion("TRY: again"));
        let value = error_json(&err);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["suggestions"][0], "TRY: again");
    }

    #[test]
    fn test_error_json_for_plain_error() {
        let err = anyhow::anyhow!("plain failure");
        let value = error_json(&err);
        assert_eq!(value["error"], "plain failure");
        assert!(value["context"].is_null());
    }
}
