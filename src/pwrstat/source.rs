//! pwrstat Status Source
//!
//! Obtains a raw report and hands it to the [`parser`](super::parser).
//!
//! - **Live**: runs `pwrstat -status` (command and arguments configurable) and
//!   captures standard output. The child gets a bounded amount of time to exit
//!   and close its output; on expiry it is killed. A descendant that keeps the
//!   pipe open past the deadline is left to the reader thread, which finishes
//!   once the pipe closes.
//! - **Replay**: reads a previously captured report from disk, for offline use
//!   and tests.
//!
//! Every failure is reported as [`ExporterError::SourceUnavailable`]. Readable
//! but malformed text is not a failure; it parses to a sparse record.
//!
//! Both strategies block the calling thread. The HTTP layer calls them from
//! `tokio::task::spawn_blocking`.

use crate::config::SourceConfig;
use crate::error::{ExporterError, Result};
use crate::pwrstat::parser;
use crate::pwrstat::types::StatusRecord;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Where pwrstat reports come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSource {
    /// Invoke the pwrstat executable
    Live {
        command: String,
        args: Vec<String>,
        timeout: Duration,
    },
    /// Read a captured report file
    Replay { path: PathBuf },
}

impl StatusSource {
    /// `pwrstat -status` with the given timeout
    pub fn live(timeout: Duration) -> Self {
        Self::Live {
            command: "pwrstat".to_string(),
            args: vec!["-status".to_string()],
            timeout,
        }
    }

    pub fn replay(path: impl Into<PathBuf>) -> Self {
        Self::Replay { path: path.into() }
    }

    /// Short description for log messages
    pub fn describe(&self) -> String {
        match self {
            Self::Live { command, args, .. } => {
                if args.is_empty() {
                    command.clone()
                } else {
                    format!("{} {}", command, args.join(" "))
                }
            }
            Self::Replay { path } => format!("file {}", path.display()),
        }
    }

    /// Fetch and parse one report
    pub fn fetch(&self) -> Result<StatusRecord> {
        let report = self.read_report()?;
        let record = parser::parse(&report);
        debug!("Parsed {} fields from {}", record.len(), self.describe());
        Ok(record)
    }

    /// Fetch the raw report text
    pub fn read_report(&self) -> Result<String> {
        match self {
            Self::Live {
                command,
                args,
                timeout,
            } => run_command(command, args, *timeout),
            Self::Replay { path } => std::fs::read_to_string(path).map_err(|e| {
                ExporterError::source_io(format!("failed to read {}: {}", path.display(), e), e)
            }),
        }
    }
}

impl From<&SourceConfig> for StatusSource {
    fn from(config: &SourceConfig) -> Self {
        match &config.replay_file {
            Some(path) => Self::replay(path.clone()),
            None => Self::Live {
                command: config.command.clone(),
                args: config.args.clone(),
                timeout: Duration::from_secs(config.timeout_seconds),
            },
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `command` and return its stdout, killing it once `timeout` has elapsed
fn run_command(command: &str, args: &[String], timeout: Duration) -> Result<String> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ExporterError::source_io(format!("failed to run {}: {}", command, e), e))?;

    // Drain stdout on its own thread so a chatty child cannot block on a full pipe
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ExporterError::source_unavailable("child stdout was not captured"))?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut out = Vec::new();
        let _ = tx.send(stdout.read_to_end(&mut out).map(|_| out));
    });

    let start = Instant::now();
    let timed_out = || {
        ExporterError::source_unavailable(format!("{} timed out after {:?}", command, timeout))
    };

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if start.elapsed() >= timeout => {
                kill_and_reap(&mut child);
                return Err(timed_out());
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(ExporterError::source_io(
                    format!("failed to wait for {}: {}", command, e),
                    e,
                ));
            }
        }
    };

    if !status.success() {
        return Err(ExporterError::source_unavailable(format!(
            "{} exited with {}",
            command, status
        )));
    }

    // The child has exited, but anything it left behind may still hold stdout
    let out = match rx.recv_timeout(timeout.saturating_sub(start.elapsed())) {
        Ok(read) => read.map_err(|e| {
            ExporterError::source_io(format!("failed to read output of {}: {}", command, e), e)
        })?,
        Err(RecvTimeoutError::Timeout) => return Err(timed_out()),
        Err(RecvTimeoutError::Disconnected) => {
            return Err(ExporterError::source_unavailable(
                "stdout reader thread panicked",
            ))
        }
    };

    String::from_utf8(out).map_err(|_| {
        ExporterError::source_unavailable(format!("{} produced non UTF-8 output", command))
    })
}
