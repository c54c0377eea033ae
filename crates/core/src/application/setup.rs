// Structured Completion (setup use case)
// `--json --no-color --config <path> [--max-error <n>]` -> buffered stdout/stderr -> parsed JSON

use crate::constants::{FLAG_CONFIG, FLAG_JSON, FLAG_MAX_ERROR, FLAG_NO_COLOR};
use crate::domain::{ExecutableLocation, InvocationRequest, SpawnOptions, ToolSpec};
use crate::error::{OutputDecodeError, Result, ShimError};
use crate::port::{ByteStream, ProcessHandle, ProcessLauncher};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

/// Setup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupOptions {
    /// Path to the tool's configuration file, passed through verbatim
    pub config: String,

    /// Error budget; omitted from argv when `None` or `0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_error: Option<u32>,
}

impl SetupOptions {
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            max_error: None,
        }
    }

    pub fn with_max_error(mut self, max_error: u32) -> Self {
        self.max_error = Some(max_error);
        self
    }

    /// Argument vector handed to the native binary
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            FLAG_JSON.to_string(),
            FLAG_NO_COLOR.to_string(),
            FLAG_CONFIG.to_string(),
            self.config.clone(),
        ];

        if let Some(n) = self.max_error.filter(|n| *n != 0) {
            args.push(FLAG_MAX_ERROR.to_string());
            args.push(n.to_string());
        }

        args
    }

    /// Invocation with both output streams piped and stdin closed
    pub fn to_request(&self) -> InvocationRequest {
        InvocationRequest::new(self.to_args())
            .with_options(SpawnOptions::default().piped_stderr().null_stdin())
    }
}

/// Execute setup use case
///
/// # Arguments
///
/// * `launcher` - Process launcher (injected for testability)
/// * `tool` - Tool identity, used to label failures
/// * `location` - Resolved executable
/// * `options` - Setup request
pub async fn execute<T: DeserializeOwned>(
    launcher: &dyn ProcessLauncher,
    tool: &ToolSpec,
    location: &ExecutableLocation,
    options: &SetupOptions,
) -> Result<T> {
    let request = options.to_request();

    info!(
        program = %location.program(),
        args = ?request.args,
        "Starting structured invocation"
    );

    let handle = launcher.launch(location, &request)?;
    complete(&tool.name, handle).await
}

/// Drain both streams and wait for exit, then turn the outcome into a value
///
/// The exit status is only acted on once stdout and stderr have both reached
/// EOF, so trailing output written just before exit is never lost.
pub async fn complete<T: DeserializeOwned>(tool: &str, handle: ProcessHandle) -> Result<T> {
    let start = Instant::now();
    let pid = handle.id();
    let (stdout, stderr, mut child) = handle.into_parts();

    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();

    let outcome = tokio::try_join!(
        drain(stdout, &mut stdout_buf),
        drain_optional(stderr, &mut stderr_buf),
        child.wait(),
    );

    let exit = match outcome {
        Ok((_, _, exit)) => exit,
        Err(e) => {
            // The wait future is gone; do not leave the tool running unobserved
            warn!(tool = %tool, pid = ?pid, error = %e, "Reading tool output failed, killing process");
            if let Err(kill_err) = child.start_kill() {
                warn!(tool = %tool, pid = ?pid, error = %kill_err, "Failed to kill process");
            }
            return Err(e.into());
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;

    if !exit.success() {
        let stderr = String::from_utf8_lossy(&stderr_buf).trim().to_string();
        warn!(
            tool = %tool,
            pid = ?pid,
            exit = %exit,
            duration_ms = %duration_ms,
            "Structured invocation failed"
        );
        return Err(ShimError::ProcessFailed {
            tool: tool.to_string(),
            exit,
            stderr,
        });
    }

    info!(
        tool = %tool,
        pid = ?pid,
        stdout_bytes = stdout_buf.len(),
        stderr_bytes = stderr_buf.len(),
        duration_ms = %duration_ms,
        "Structured invocation completed"
    );

    decode_output(&stdout_buf).map_err(|source| {
        warn!(tool = %tool, error = %source, "Malformed tool output");
        ShimError::MalformedOutput {
            tool: tool.to_string(),
            source,
        }
    })
}

/// UTF-8 decode, trim, parse as JSON
pub fn decode_output<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, OutputDecodeError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(serde_json::from_str(text.trim())?)
}

async fn drain(mut stream: ByteStream, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    stream.read_to_end(buf).await
}

async fn drain_optional(stream: Option<ByteStream>, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    match stream {
        Some(stream) => drain(stream, buf).await,
        None => Ok(0),
    }
}
