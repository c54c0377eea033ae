// Port Layer - Interfaces for external dependencies

pub mod package_resolver;
pub mod process_launcher;

// Re-exports
pub use package_resolver::{ChainResolver, PackageResolver};
pub use process_launcher::{ByteStream, ChildProcess, ProcessHandle, ProcessLauncher};
