// Shim constants (No magic values)

/// Default executable base name of the wrapped tool
pub const DEFAULT_TOOL_NAME: &str = "virtual-node-env";

/// Default package scope the per-platform packages are published under
pub const DEFAULT_NAMESPACE: &str = "@axetroy";

/// Suffix appended to the executable name on Windows only
pub const WINDOWS_EXE_SUFFIX: &str = ".exe";

/// Manifest file whose presence marks an installed package directory
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Directory searched by the node-style resolver
pub const NODE_MODULES_DIR: &str = "node_modules";

// Structured-mode flags (output contract with the native binary)

/// Request machine-readable JSON on stdout
pub const FLAG_JSON: &str = "--json";

/// Suppress ANSI styling
pub const FLAG_NO_COLOR: &str = "--no-color";

/// Path to the tool's configuration file (required)
pub const FLAG_CONFIG: &str = "--config";

/// Optional error budget
pub const FLAG_MAX_ERROR: &str = "--max-error";

// Environment variables read by the sdk / cli

pub const ENV_TOOL: &str = "BINLAUNCH_TOOL";
pub const ENV_NAMESPACE: &str = "BINLAUNCH_NAMESPACE";
pub const ENV_BINARY_PATH: &str = "BINLAUNCH_BINARY_PATH";
pub const ENV_PACKAGE_PATH: &str = "BINLAUNCH_PACKAGE_PATH";
pub const ENV_PROJECT_DIR: &str = "BINLAUNCH_PROJECT_DIR";
pub const ENV_LOG_FORMAT: &str = "BINLAUNCH_LOG_FORMAT";
