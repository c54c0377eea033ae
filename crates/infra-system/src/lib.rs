// binlaunch Infrastructure - System Adapters
// Implements: ProcessLauncher, PackageResolver

pub mod package_resolver_impl;
pub mod subprocess_launcher;

pub use package_resolver_impl::{NodeModulesResolver, SearchPathResolver};
pub use subprocess_launcher::{terminate_gracefully, SubprocessLauncher};
