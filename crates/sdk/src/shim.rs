//! Shim Implementation

use crate::config::ShimSettings;
use binlaunch_core::application::{setup, BinaryLocator, SetupOptions};
use binlaunch_core::domain::{
    ExecutableLocation, InvocationRequest, PlatformKey, SpawnOptions, ToolSpec,
};
use binlaunch_core::port::{ProcessHandle, ProcessLauncher};
use binlaunch_core::Result;
use binlaunch_infra_system::SubprocessLauncher;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

/// Resolved native tool, ready to invoke
///
/// Cheap to clone; clones share the same resolved location and launcher, and
/// may be used from any number of tasks concurrently.
///
/// # Example
///
/// ```no_run
/// use binlaunch_sdk::{resolve_executable, SetupOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let shim = resolve_executable()?;
/// let report = shim.setup(&SetupOptions::new("./vne.toml")).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Shim {
    inner: Arc<ShimInner>,
}

struct ShimInner {
    tool: ToolSpec,
    location: ExecutableLocation,
    launcher: Arc<dyn ProcessLauncher>,
}

impl Shim {
    /// Assemble from already-resolved parts (custom launchers, tests)
    pub fn new(
        tool: ToolSpec,
        location: ExecutableLocation,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            inner: Arc::new(ShimInner {
                tool,
                location,
                launcher,
            }),
        }
    }

    /// Locate the executable per `settings` and pair it with a subprocess launcher
    ///
    /// # Errors
    /// - ShimError::UnsupportedPlatform
    /// - ShimError::MissingBinaryPackage
    pub fn resolve(settings: &ShimSettings) -> Result<Self> {
        let location = locate(settings)?;
        Ok(Self::new(
            settings.tool.clone(),
            location,
            Arc::new(SubprocessLauncher::new()),
        ))
    }

    pub fn tool(&self) -> &ToolSpec {
        &self.inner.tool
    }

    pub fn location(&self) -> &ExecutableLocation {
        &self.inner.location
    }

    /// Raw mode: spawn with `args` and return the live process
    ///
    /// stdout is always piped on the returned handle; stderr only if
    /// `options.stderr` is `Piped`.
    pub fn exec<I, S>(&self, args: I, options: SpawnOptions) -> Result<ProcessHandle>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = InvocationRequest::new(args).with_options(options);
        self.inner.launcher.launch(&self.inner.location, &request)
    }

    /// Structured mode: run with `--json --no-color --config ...` and parse stdout
    ///
    /// # Errors
    /// - ShimError::SpawnFailed
    /// - ShimError::ProcessFailed (non-zero exit, message carries stderr)
    /// - ShimError::MalformedOutput (exit 0 but stdout is not JSON)
    pub async fn setup(&self, options: &SetupOptions) -> Result<serde_json::Value> {
        self.setup_as(options).await
    }

    /// Structured mode with a typed result
    pub async fn setup_as<T: DeserializeOwned>(&self, options: &SetupOptions) -> Result<T> {
        setup::execute(
            self.inner.launcher.as_ref(),
            &self.inner.tool,
            &self.inner.location,
            options,
        )
        .await
    }
}

impl std::fmt::Debug for Shim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shim")
            .field("tool", &self.inner.tool)
            .field("location", &self.inner.location)
            .finish()
    }
}

/// Resolve the executable location only
///
/// An explicit `binary_override` skips the platform lookup entirely.
pub fn locate(settings: &ShimSettings) -> Result<ExecutableLocation> {
    let (os, arch) = PlatformKey::host_raw();

    if let Some(path) = &settings.binary_override {
        info!(path = %path.display(), "Using binary override");
        return Ok(ExecutableLocation::from_override(
            path.clone(),
            PlatformKey::parse(os, arch),
        ));
    }

    let locator = BinaryLocator::new(settings.tool.clone(), Arc::new(settings.resolver()));
    locator.locate_raw(os, arch)
}

/// Explicit one-time initialization from the process environment
///
/// Call once at startup and keep the returned [`Shim`]; nothing is resolved
/// implicitly.
pub fn resolve_executable() -> Result<Shim> {
    Shim::resolve(&ShimSettings::from_env())
}
