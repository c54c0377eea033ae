// Invocation Domain Model
// What the caller asks for (arguments + spawn options) and how a run ended

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Stdio handling for a child stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    /// Share the parent's stream
    #[default]
    Inherit,
    /// Expose the stream on the process handle
    Piped,
    /// Discard
    Null,
}

/// Spawn configuration
///
/// stdout is not configurable here: the launcher always pipes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnOptions {
    pub current_dir: Option<PathBuf>,
    /// Variables set on top of the inherited (or filtered) environment
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Variables removed from the inherited environment
    #[serde(default)]
    pub env_remove: Vec<String>,
    /// When set, the parent environment is cleared and only these names pass through
    pub env_allowlist: Option<Vec<String>>,
    #[serde(default)]
    pub stdin: StdioMode,
    #[serde(default)]
    pub stderr: StdioMode,
}

impl SpawnOptions {
    pub fn piped_stderr(mut self) -> Self {
        self.stderr = StdioMode::Piped;
        self
    }

    pub fn null_stdin(mut self) -> Self {
        self.stdin = StdioMode::Null;
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Ordered arguments plus spawn options
#[derive(Debug, Clone, Default)]
pub struct InvocationRequest {
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

impl InvocationRequest {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            options: SpawnOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SpawnOptions) -> Self {
        self.options = options;
        self
    }
}

/// How a child process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProcessExit {
    /// Normal exit with a status code
    Code(i32),
    /// Killed by a signal (Unix)
    Signal(i32),
    /// Neither code nor signal available
    Unknown,
}

impl ProcessExit {
    pub fn success(self) -> bool {
        self == ProcessExit::Code(0)
    }

    pub fn code(self) -> Option<i32> {
        match self {
            ProcessExit::Code(c) => Some(c),
            _ => None,
        }
    }
}

impl From<std::process::ExitStatus> for ProcessExit {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ProcessExit::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ProcessExit::Signal(sig);
            }
        }

        ProcessExit::Unknown
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessExit::Code(c) => write!(f, "exit code {}", c),
            ProcessExit::Signal(s) => write!(f, "signal {}", s),
            ProcessExit::Unknown => write!(f, "unknown termination"),
        }
    }
}
