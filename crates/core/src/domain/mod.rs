// Domain Layer - Pure types, no I/O

pub mod invocation;
pub mod location;
pub mod platform;
pub mod tool;

// Re-exports
pub use invocation::{InvocationRequest, ProcessExit, SpawnOptions, StdioMode};
pub use location::{ExecutableLocation, LocationSource};
pub use platform::{Arch, Os, PlatformKey};
pub use tool::ToolSpec;
