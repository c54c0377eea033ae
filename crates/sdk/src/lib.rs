//! binlaunch SDK - Rust library for invoking a prebuilt native tool
//!
//! Resolves the per-platform executable once, then launches it either in raw
//! mode (live process handle) or structured mode (parsed JSON result).
//!
//! # Example
//!
//! ```no_run
//! use binlaunch_sdk::{resolve_executable, SetupOptions, SpawnOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Resolve once at startup
//!     let shim = resolve_executable()?;
//!
//!     // Structured mode
//!     let report = shim
//!         .setup(&SetupOptions::new("./vne.toml").with_max_error(5))
//!         .await?;
//!     println!("{}", report);
//!
//!     // Raw mode
//!     let mut handle = shim.exec(["--version"], SpawnOptions::default())?;
//!     let exit = handle.wait().await?;
//!     println!("exited with {}", exit);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod shim;

pub use binlaunch_core::application::SetupOptions;
pub use binlaunch_core::domain::{
    ExecutableLocation, LocationSource, PlatformKey, ProcessExit, SpawnOptions, StdioMode,
    ToolSpec,
};
pub use binlaunch_core::port::ProcessHandle;
pub use binlaunch_core::{OutputDecodeError, Result, ShimError};
pub use binlaunch_infra_system::terminate_gracefully;
pub use config::ShimSettings;
pub use shim::{locate, resolve_executable, Shim};
