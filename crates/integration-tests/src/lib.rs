//! Shared fixtures for end-to-end tests
//!
//! Installs a stub "native binary" (a shell script) into a temporary
//! `node_modules` tree laid out exactly like the real per-platform packages.

use binlaunch_core::constants::{NODE_MODULES_DIR, PACKAGE_MANIFEST};
use binlaunch_core::domain::{PlatformKey, ToolSpec};
use binlaunch_sdk::ShimSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project with one installed stub package
pub struct StubInstall {
    pub root: TempDir,
    pub package_dir: PathBuf,
    pub executable: PathBuf,
    pub tool: ToolSpec,
}

impl StubInstall {
    /// Settings that resolve through this project's node_modules only
    pub fn settings(&self) -> ShimSettings {
        ShimSettings {
            tool: self.tool.clone(),
            binary_override: None,
            search_paths: Vec::new(),
            project_dir: self.root.path().to_path_buf(),
        }
    }
}

/// Host platform key; the e2e suites only run on supported hosts
pub fn host_key() -> PlatformKey {
    let (os, arch) = PlatformKey::host_raw();
    PlatformKey::parse(os, arch).expect("e2e tests require a supported host platform")
}

/// Install a package for the host platform whose executable runs `body` under /bin/sh
pub fn install_stub(body: &str) -> StubInstall {
    let root = tempfile::tempdir().expect("create temp project");
    let tool = ToolSpec::default();
    let key = host_key();

    let package_dir = root
        .path()
        .join(NODE_MODULES_DIR)
        .join(tool.package_id(key));
    fs::create_dir_all(&package_dir).expect("create package dir");
    fs::write(
        package_dir.join(PACKAGE_MANIFEST),
        format!(r#"{{"name":"{}","version":"0.0.0-test"}}"#, tool.package_id(key)),
    )
    .expect("write package.json");

    let executable = package_dir.join(tool.executable_file_name(key.os));
    write_script(&executable, body);

    StubInstall {
        root,
        package_dir,
        executable,
        tool,
    }
}

/// Install the package directory without its executable
pub fn install_empty_package() -> StubInstall {
    let stub = install_stub("exit 0");
    fs::remove_file(&stub.executable).expect("remove stub executable");
    stub
}

/// Write an executable /bin/sh script
pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).expect("write stub script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).expect("chmod stub");
    }
}

/// Script body that prints its argv as a JSON array of strings
pub const ECHO_ARGS_AS_JSON: &str = r#"printf '['
sep=''
for a in "$@"; do
  printf '%s"%s"' "$sep" "$a"
  sep=','
done
printf ']\n'"#;
