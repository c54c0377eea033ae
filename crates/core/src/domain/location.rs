// Executable Location (resolved once, immutable afterwards)

use crate::domain::platform::PlatformKey;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where the resolved executable came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationSource {
    /// Found inside the per-platform package
    Package { package: String },
    /// Set explicitly (BINLAUNCH_BINARY_PATH)
    Override,
}

/// Absolute path to the native binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableLocation {
    pub path: PathBuf,
    pub platform: Option<PlatformKey>,
    pub source: LocationSource,
}

impl ExecutableLocation {
    pub fn from_package(
        path: impl Into<PathBuf>,
        platform: PlatformKey,
        package: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            platform: Some(platform),
            source: LocationSource::Package {
                package: package.into(),
            },
        }
    }

    pub fn from_override(path: impl Into<PathBuf>, platform: Option<PlatformKey>) -> Self {
        Self {
            path: path.into(),
            platform,
            source: LocationSource::Override,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display form used in logs and error messages
    pub fn program(&self) -> String {
        self.path.display().to_string()
    }
}
