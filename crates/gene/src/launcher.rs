//! Node process lifecycle
//!
//! [`NodeLauncher`] spawns the node binary without waiting for it and hands
//! back a [`NodeHandle`]. Shutdown goes through the handle so only the
//! instance we started is stopped; [`terminate_all`] is the blunt
//! name-based fallback and is never used implicitly.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// How often wait loops poll the child.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default time a node gets to exit after SIGTERM before it is killed.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("node binary not found: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("failed to spawn {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open node log {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the child's stdout and stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStdio {
    /// Share the host's streams.
    Inherit,
    /// Append both streams to a file; used when the host owns the terminal.
    AppendTo(PathBuf),
}

/// Spawns the node binary.
#[derive(Debug, Clone)]
pub struct NodeLauncher {
    binary: PathBuf,
    stdio: ChildStdio,
}

impl NodeLauncher {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            stdio: ChildStdio::Inherit,
        }
    }

    pub fn with_stdio(mut self, stdio: ChildStdio) -> Self {
        self.stdio = stdio;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Locate the binary. Paths are checked as given; bare names are
    /// looked up on `PATH`.
    pub fn resolve_binary(&self) -> Result<PathBuf, LaunchError> {
        if self.binary.components().count() > 1 || self.binary.is_absolute() {
            if self.binary.is_file() {
                return Ok(self.binary.clone());
            }
            return Err(LaunchError::BinaryNotFound(self.binary.clone()));
        }

        which::which(&self.binary).map_err(|_| LaunchError::BinaryNotFound(self.binary.clone()))
    }

    /// Start the node with `args` and return immediately.
    pub fn launch(&self, args: &[String]) -> Result<NodeHandle, LaunchError> {
        let binary = self.resolve_binary()?;

        let mut cmd = Command::new(&binary);
        cmd.args(args).stdin(Stdio::null());

        match &self.stdio {
            ChildStdio::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            ChildStdio::AppendTo(path) => {
                let open_err = |source| LaunchError::LogFile {
                    path: path.clone(),
                    source,
                };
                let out = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(open_err)?;
                let err = out.try_clone().map_err(open_err)?;
                cmd.stdout(out).stderr(err);
            }
        }

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            binary: binary.clone(),
            source,
        })?;

        info!(
            pid = child.id(),
            binary = %binary.display(),
            args = args.len(),
            "Started node"
        );

        Ok(NodeHandle {
            child,
            binary,
            started_at: Instant::now(),
        })
    }
}

/// A node instance started by this process.
#[derive(Debug)]
pub struct NodeHandle {
    child: Child,
    binary: PathBuf,
    started_at: Instant,
}

impl NodeHandle {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Exit status if the node has already stopped.
    pub fn try_status(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Block until the node exits or `stop` is raised.
    ///
    /// Returns `None` when interrupted; the node is left running.
    pub fn wait_until(&mut self, stop: &AtomicBool) -> io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(Some(status));
            }
            if stop.load(Ordering::SeqCst) {
                return Ok(None);
            }
            std::thread::sleep(EXIT_POLL_INTERVAL);
        }
    }

    /// Stop this instance: SIGTERM, then a kill after `grace`.
    pub fn terminate(mut self, grace: Duration) -> io::Result<ExitStatus> {
        if let Some(status) = self.child.try_wait()? {
            debug!(pid = self.pid(), "Node already exited: {}", status);
            return Ok(status);
        }

        if !request_stop(&self.child)? {
            debug!(pid = self.pid(), "No graceful stop on this platform, killing");
            self.child.kill()?;
            return self.child.wait();
        }

        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if let Some(status) = self.child.try_wait()? {
                info!(pid = self.pid(), "Node stopped: {}", status);
                return Ok(status);
            }
            std::thread::sleep(EXIT_POLL_INTERVAL);
        }

        warn!(
            pid = self.pid(),
            grace_secs = grace.as_secs(),
            "Node ignored stop request, killing"
        );
        self.child.kill()?;
        self.child.wait()
    }
}

/// Ask the child to exit. `Ok(false)` means the platform has no graceful
/// stop and the caller should kill right away.
#[cfg(unix)]
fn request_stop(child: &Child) -> io::Result<bool> {
    let pid = libc::pid_t::try_from(child.id())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
    // SAFETY: plain syscall on a pid we own and have not reaped yet.
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc == 0 {
        Ok(true)
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn request_stop(_child: &Child) -> io::Result<bool> {
    Ok(false)
}

/// Process name used for name-based cleanup: the binary's file name.
pub fn process_name_for(binary: &Path) -> Option<String> {
    binary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Kill every process called `process_name`, ours or not.
///
/// Fire-and-forget: the outcome is not verified and failures are only
/// logged.
pub fn terminate_all(process_name: &str) {
    let mut cmd = kill_by_name_command(process_name);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    match cmd.spawn() {
        Ok(child) => info!(
            pid = child.id(),
            name = process_name,
            "Requested termination of all matching processes"
        ),
        Err(err) => warn!(name = process_name, "Failed to run kill-by-name: {}", err),
    }
}

#[cfg(unix)]
fn kill_by_name_command(process_name: &str) -> Command {
    let mut cmd = Command::new("killall");
    cmd.arg(process_name);
    cmd
}

#[cfg(windows)]
fn kill_by_name_command(process_name: &str) -> Command {
    let mut cmd = Command::new("taskkill");
    cmd.args(["/IM", process_name, "/F"]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_not_found() {
        let launcher = NodeLauncher::new("/nonexistent/dir/geth");
        let err = launcher.launch(&[]).unwrap_err();
        assert!(matches!(err, LaunchError::BinaryNotFound(_)));
        assert!(err.to_string().contains("/nonexistent/dir/geth"));
    }

    #[test]
    fn test_missing_bare_name_is_not_found() {
        let launcher = NodeLauncher::new("gene-no-such-node-binary");
        assert!(matches!(
            launcher.resolve_binary(),
            Err(LaunchError::BinaryNotFound(_))
        ));
    }

    #[test]
    fn test_directory_is_not_a_binary() {
        let dir = tempfile::TempDir::new().unwrap();
        let launcher = NodeLauncher::new(dir.path());
        assert!(matches!(
            launcher.resolve_binary(),
            Err(LaunchError::BinaryNotFound(_))
        ));
    }

    #[test]
    fn test_process_name_for() {
        assert_eq!(process_name_for(Path::new("../geth")), Some("geth".to_string()));
        assert_eq!(
            process_name_for(Path::new("/opt/eth/bin/geth")),
            Some("geth".to_string())
        );
        assert_eq!(process_name_for(Path::new("/")), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_terminate_kills_without_waiting_for_grace() {
        let handle = NodeLauncher::new("cmd")
            .launch(&["/C".to_string(), "ping -n 30 127.0.0.1 >NUL".to_string()])
            .unwrap();

        let started = Instant::now();
        let status = handle.terminate(Duration::from_secs(30)).unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(!status.success());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        #[test]
        fn test_non_executable_file_fails_to_spawn() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = dir.path().join("geth");
            std::fs::write(&path, "not a program").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

            let err = NodeLauncher::new(&path).launch(&[]).unwrap_err();
            assert!(matches!(err, LaunchError::Spawn { .. }), "got {:?}", err);
        }

        #[test]
        fn test_launch_returns_without_waiting() {
            let launcher = NodeLauncher::new("sleep");
            let started = Instant::now();
            let mut handle = launcher.launch(&["30".to_string()]).unwrap();

            assert!(started.elapsed() < Duration::from_secs(5));
            assert!(handle.pid() > 0);
            assert!(handle.try_status().unwrap().is_none());

            let status = handle.terminate(Duration::from_secs(5)).unwrap();
            assert!(!status.success());
        }

        #[test]
        fn test_terminate_after_exit_reports_status() {
            let mut handle = NodeLauncher::new("true").launch(&[]).unwrap();
            let stop = AtomicBool::new(false);
            let status = handle.wait_until(&stop).unwrap();
            assert!(status.is_some_and(|s| s.success()));

            let status = handle.terminate(Duration::from_secs(1)).unwrap();
            assert!(status.success());
        }

        #[test]
        fn test_wait_until_returns_on_stop_flag() {
            let mut handle = NodeLauncher::new("sleep")
                .launch(&["30".to_string()])
                .unwrap();
            let stop = AtomicBool::new(true);

            assert!(handle.wait_until(&stop).unwrap().is_none());
            handle.terminate(Duration::from_secs(5)).unwrap();
        }

        #[test]
        fn test_sigterm_stops_node_before_grace_expires() {
            let handle = NodeLauncher::new("sleep")
                .launch(&["30".to_string()])
                .unwrap();

            let started = Instant::now();
            let status = handle.terminate(Duration::from_secs(20)).unwrap();

            assert!(started.elapsed() < Duration::from_secs(10));
            assert_eq!(
                std::os::unix::process::ExitStatusExt::signal(&status),
                Some(libc::SIGTERM)
            );
        }

        #[test]
        fn test_node_ignoring_sigterm_is_killed_after_grace() {
            let handle = NodeLauncher::new("sh")
                .launch(&[
                    "-c".to_string(),
                    "trap '' TERM; while :; do sleep 0.1; done".to_string(),
                ])
                .unwrap();
            // Give the shell time to install its trap.
            std::thread::sleep(Duration::from_millis(200));

            let grace = Duration::from_millis(500);
            let started = Instant::now();
            let status = handle.terminate(grace).unwrap();

            assert!(started.elapsed() >= grace);
            assert!(!status.success());
            assert_eq!(
                std::os::unix::process::ExitStatusExt::signal(&status),
                Some(libc::SIGKILL)
            );
        }

        #[test]
        fn test_terminate_all_with_unknown_name_returns() {
            terminate_all("gene-no-such-node-process");
        }

        #[test]
        fn test_output_appended_to_log_file() {
            let dir = tempfile::TempDir::new().unwrap();
            let log = dir.path().join("node.log");
            std::fs::write(&log, "previous run\n").unwrap();

            let launcher =
                NodeLauncher::new("sh").with_stdio(ChildStdio::AppendTo(log.clone()));
            let mut handle = launcher
                .launch(&["-c".to_string(), "echo out; echo err >&2".to_string()])
                .unwrap();
            let stop = AtomicBool::new(false);
            handle.wait_until(&stop).unwrap();

            let content = std::fs::read_to_string(&log).unwrap();
            assert!(content.starts_with("previous run\n"));
            assert!(content.contains("out"));
            assert!(content.contains("err"));
        }
    }
}
