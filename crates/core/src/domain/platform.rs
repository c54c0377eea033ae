// Platform Domain Model
// (operating system, architecture) pairs the prebuilt packages are published for

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported operating systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    MacOS,
    Linux,
}

/// Supported CPU architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm64,
    X64,
}

impl Os {
    pub const ALL: [Os; 3] = [Os::Windows, Os::MacOS, Os::Linux];

    /// Parse an OS name as reported by Node (`win32`, `darwin`) or Rust (`windows`, `macos`)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "win32" | "windows" => Some(Os::Windows),
            "darwin" | "macos" => Some(Os::MacOS),
            "linux" => Some(Os::Linux),
            _ => None,
        }
    }

    /// Segment used in per-platform package names
    pub fn package_label(self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::MacOS => "darwin",
            Os::Linux => "linux",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Os::Windows
    }
}

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::Arm64, Arch::X64];

    /// Parse an architecture name as reported by Node (`x64`) or Rust (`x86_64`, `aarch64`)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "arm64" | "aarch64" => Some(Arch::Arm64),
            "x64" | "x86_64" | "amd64" => Some(Arch::X64),
            _ => None,
        }
    }

    /// Segment used in per-platform package names
    pub fn package_label(self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X64 => "amd64",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_label())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_label())
    }
}

/// (OS, architecture) pair
///
/// Every constructible key is supported; unsupported raw values are rejected
/// by [`PlatformKey::parse`] before a key exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformKey {
    pub os: Os,
    pub arch: Arch,
}

impl PlatformKey {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Two-level lookup: OS first, then architecture. `None` if either is unknown.
    pub fn parse(os: &str, arch: &str) -> Option<Self> {
        let os = Os::parse(os)?;
        let arch = Arch::parse(arch)?;
        Some(Self { os, arch })
    }

    /// Raw host values this binary was compiled for
    pub fn host_raw() -> (&'static str, &'static str) {
        (std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Every supported pair
    pub fn all() -> impl Iterator<Item = PlatformKey> {
        Os::ALL
            .into_iter()
            .flat_map(|os| Arch::ALL.into_iter().map(move |arch| PlatformKey { os, arch }))
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
