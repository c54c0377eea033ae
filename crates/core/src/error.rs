// Central Error Type for the Shim

use crate::domain::ProcessExit;
use thiserror::Error;

/// Shim-level error type
///
/// Every variant is terminal: nothing here is retried internally.
#[derive(Error, Debug)]
pub enum ShimError {
    #[error("{tool} does not support your platform ({os}/{arch})")]
    UnsupportedPlatform {
        tool: String,
        os: String,
        arch: String,
    },

    #[error(
        "Can't find the binary package \"{package}\" in the node_modules, try to reinstall package."
    )]
    MissingBinaryPackage { package: String },

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} error: {stderr}")]
    ProcessFailed {
        tool: String,
        exit: ProcessExit,
        stderr: String,
    },

    #[error("Malformed output from {tool}: {source}")]
    MalformedOutput {
        tool: String,
        #[source]
        source: OutputDecodeError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why stdout of a successful run could not be turned into a value
#[derive(Error, Debug)]
pub enum OutputDecodeError {
    #[error("stdout is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("stdout is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShimError {
    /// Stable machine-readable kind, used in CLI JSON output and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ShimError::UnsupportedPlatform { .. } => "UNSUPPORTED_PLATFORM",
            ShimError::MissingBinaryPackage { .. } => "MISSING_BINARY_PACKAGE",
            ShimError::SpawnFailed { .. } => "SPAWN_FAILED",
            ShimError::ProcessFailed { .. } => "PROCESS_FAILED",
            ShimError::MalformedOutput { .. } => "MALFORMED_OUTPUT",
            ShimError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias using ShimError
pub type Result<T> = std::result::Result<T, ShimError>;
