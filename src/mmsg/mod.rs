//! Access to the mango compositor through its `mmsg` control tool.
//!
//! `mmsg` is a line-oriented CLI: each query is a separate short-lived process
//! whose stdout is parsed by [`parse`]. The [`Mmsg`] trait is the seam the
//! bridge talks to, so tests can substitute scripted output for the real
//! binary.

pub mod parse;

use std::future::Future;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::MmsgError;

/// Default time a single `mmsg` invocation may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The read-only facts the bridge polls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `-T`: number of tags.
    TagCount,
    /// `-g -t`: occupied/active masks per monitor.
    Tags,
    /// `-g -l`: current layout.
    Layout,
    /// `-g -c`: focused client title and app id.
    Client,
}

impl Query {
    /// Flags passed to `mmsg` for this query.
    pub fn flags(self) -> &'static [&'static str] {
        match self {
            Query::TagCount => &["-T"],
            Query::Tags => &["-g", "-t"],
            Query::Layout => &["-g", "-l"],
            Query::Client => &["-g", "-c"],
        }
    }
}

/// Mutating commands issued on behalf of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `-l next`: advance to the next layout.
    NextLayout,
    /// `-t <n>`: view tag `n`.
    SwitchTag(u32),
}

impl Action {
    /// Flags passed to `mmsg` for this action.
    pub fn flags(&self) -> Vec<String> {
        match self {
            Action::NextLayout => vec!["-l".to_string(), "next".to_string()],
            Action::SwitchTag(tag) => vec!["-t".to_string(), tag.to_string()],
        }
    }
}

/// Build the full argument list, putting `-o <monitor>` first when filtering.
pub fn build_args<S: AsRef<str>>(monitor: Option<&str>, flags: &[S]) -> Vec<String> {
    let mut args = Vec::with_capacity(flags.len() + 2);
    if let Some(monitor) = monitor {
        args.push("-o".to_string());
        args.push(monitor.to_string());
    }
    args.extend(flags.iter().map(|f| f.as_ref().to_string()));
    args
}

/// Trait for running `mmsg`.
///
/// Implementations must be `Send + Sync` since the bridge's polling task owns
/// a shared handle to them.
pub trait Mmsg: Send + Sync + 'static {
    /// Run `mmsg` with `args` and return its trimmed stdout.
    ///
    /// Fails on a missing binary, a timeout or a non-zero exit status.
    fn run(&self, args: &[String]) -> impl Future<Output = Result<String, MmsgError>> + Send;
}

impl<T: Mmsg> Mmsg for Arc<T> {
    fn run(&self, args: &[String]) -> impl Future<Output = Result<String, MmsgError>> + Send {
        (**self).run(args)
    }
}

/// Runs the real `mmsg` binary as a child process.
#[derive(Debug, Clone)]
pub struct MmsgCommand {
    program: String,
    timeout: Duration,
}

impl MmsgCommand {
    /// Create a runner for `program` (a name looked up on `$PATH`, or a path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for MmsgCommand {
    fn default() -> Self {
        Self::new("mmsg")
    }
}

impl Mmsg for MmsgCommand {
    async fn run(&self, args: &[String]) -> Result<String, MmsgError> {
        trace!(program = %self.program, ?args, "Running mmsg");

        // A child still running at the deadline is left to finish on its own;
        // tokio reaps it in the background.
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(false);
        let output = command.output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MmsgError::NotFound(self.program.clone()));
            }
            Ok(Err(e)) => return Err(MmsgError::Spawn(e)),
            Err(_) => return Err(MmsgError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(MmsgError::Exited {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Run a read-only query, collapsing every failure into `None`.
pub async fn query<M: Mmsg>(mmsg: &M, monitor: Option<&str>, query: Query) -> Option<String> {
    let args = build_args(monitor, query.flags());
    match mmsg.run(&args).await {
        Ok(output) => Some(output),
        Err(e) => {
            debug!(?query, "mmsg query failed: {}", e);
            None
        }
    }
}

/// Issue a mutating command. The result is ignored apart from a debug log.
pub async fn dispatch<M: Mmsg>(mmsg: &M, monitor: Option<&str>, action: &Action) {
    let args = build_args(monitor, action.flags().as_slice());
    if let Err(e) = mmsg.run(&args).await {
        debug!(?action, "mmsg command failed: {}", e);
    }
}
