// Binary Locator
// (OS, arch) -> package name -> installation directory -> executable path

use crate::domain::{ExecutableLocation, PlatformKey, ToolSpec};
use crate::error::{Result, ShimError};
use crate::port::PackageResolver;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maps the host platform to the installed prebuilt executable
///
/// Performs read-only lookups through the injected resolver; holds no state
/// besides its configuration, so one instance can serve any number of callers.
pub struct BinaryLocator {
    tool: ToolSpec,
    resolver: Arc<dyn PackageResolver>,
}

impl BinaryLocator {
    /// Create a new locator
    ///
    /// # Arguments
    /// * `tool` - Tool identity (executable name + package scope)
    /// * `resolver` - Package-resolution primitive of the host ecosystem
    pub fn new(tool: ToolSpec, resolver: Arc<dyn PackageResolver>) -> Self {
        Self { tool, resolver }
    }

    pub fn tool(&self) -> &ToolSpec {
        &self.tool
    }

    /// Validate raw OS/arch names
    ///
    /// # Errors
    /// - ShimError::UnsupportedPlatform if either value has no mapping
    pub fn platform_key(&self, os: &str, arch: &str) -> Result<PlatformKey> {
        PlatformKey::parse(os, arch).ok_or_else(|| {
            warn!(os = %os, arch = %arch, tool = %self.tool.name, "Unsupported platform");
            ShimError::UnsupportedPlatform {
                tool: self.tool.name.clone(),
                os: os.to_string(),
                arch: arch.to_string(),
            }
        })
    }

    /// Locate the executable for a known platform
    ///
    /// # Errors
    /// - ShimError::MissingBinaryPackage if the platform package is not installed
    pub fn locate(&self, key: PlatformKey) -> Result<ExecutableLocation> {
        let package_id = self.tool.package_id(key);

        debug!(
            platform = %key,
            package = %package_id,
            resolver = %self.resolver.describe(),
            "Resolving binary package"
        );

        let install_dir = self.resolver.resolve(&package_id).ok_or_else(|| {
            warn!(package = %package_id, "Binary package not installed");
            ShimError::MissingBinaryPackage {
                package: package_id.clone(),
            }
        })?;

        let path = install_dir.join(self.tool.executable_file_name(key.os));

        info!(
            platform = %key,
            package = %package_id,
            path = %path.display(),
            "Executable located"
        );

        Ok(ExecutableLocation::from_package(path, key, package_id))
    }

    /// Locate from raw OS/arch names (`win32`/`x64`, `linux`/`aarch64`, ...)
    pub fn locate_raw(&self, os: &str, arch: &str) -> Result<ExecutableLocation> {
        let key = self.platform_key(os, arch)?;
        self.locate(key)
    }

    /// Locate for the platform this binary runs on
    pub fn locate_current(&self) -> Result<ExecutableLocation> {
        let (os, arch) = PlatformKey::host_raw();
        self.locate_raw(os, arch)
    }
}
