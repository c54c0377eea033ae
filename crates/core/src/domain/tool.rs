// Tool Domain Model
// Identity of the wrapped native tool and the naming of its per-platform packages

use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_TOOL_NAME, WINDOWS_EXE_SUFFIX};
use crate::domain::platform::{Os, PlatformKey};
use serde::{Deserialize, Serialize};

/// Wrapped tool identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Executable base name, also the package-name prefix
    pub name: String,
    /// Package scope, e.g. `@axetroy`
    pub namespace: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// `<tool>-<os>-<arch>`, unique per platform
    pub fn package_name(&self, key: PlatformKey) -> String {
        format!(
            "{}-{}-{}",
            self.name,
            key.os.package_label(),
            key.arch.package_label()
        )
    }

    /// `<namespace>/<package-name>`, as handed to the package resolver
    pub fn package_id(&self, key: PlatformKey) -> String {
        let name = self.package_name(key);
        if self.namespace.is_empty() {
            name
        } else {
            format!("{}/{}", self.namespace, name)
        }
    }

    /// Executable file name; `.exe` iff Windows
    pub fn executable_file_name(&self, os: Os) -> String {
        if os.is_windows() {
            format!("{}{}", self.name, WINDOWS_EXE_SUFFIX)
        } else {
            self.name.clone()
        }
    }
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_NAME, DEFAULT_NAMESPACE)
    }
}
