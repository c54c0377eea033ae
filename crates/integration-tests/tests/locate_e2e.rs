//! Locator End-to-End Tests
//!
//! Real filesystem layout, real resolvers, no mocks.
#![cfg(unix)]

use binlaunch_core::application::BinaryLocator;
use binlaunch_core::domain::{LocationSource, PlatformKey, ToolSpec};
use binlaunch_core::port::{ChainResolver, PackageResolver};
use binlaunch_core::ShimError;
use binlaunch_infra_system::{NodeModulesResolver, SearchPathResolver};
use binlaunch_integration_tests::{host_key, install_stub};
use binlaunch_sdk::{locate, ShimSettings};
use std::sync::Arc;

#[test]
fn test_locate_stub_through_node_modules() {
    let stub = install_stub("exit 0");

    let location = locate(&stub.settings()).unwrap();

    assert_eq!(
        location.path().canonicalize().unwrap(),
        stub.executable.canonicalize().unwrap()
    );
    assert_eq!(
        location.path().file_name().unwrap().to_str().unwrap(),
        "virtual-node-env"
    );
    assert_eq!(location.platform, Some(host_key()));
    assert!(location.path().is_absolute());
}

#[test]
fn test_locate_from_nested_project_dir() {
    let stub = install_stub("exit 0");
    let nested = stub.root.path().join("packages").join("web");
    std::fs::create_dir_all(&nested).unwrap();

    let settings = ShimSettings {
        project_dir: nested,
        ..stub.settings()
    };

    let location = locate(&settings).unwrap();
    assert_eq!(
        location.source,
        LocationSource::Package {
            package: ToolSpec::default().package_id(host_key())
        }
    );
}

#[test]
fn test_missing_package_is_reported_with_name() {
    let empty = tempfile::tempdir().unwrap();
    let settings = ShimSettings {
        project_dir: empty.path().to_path_buf(),
        ..ShimSettings::default()
    };

    let err = locate(&settings).unwrap_err();

    let expected = ToolSpec::default().package_id(host_key());
    assert!(matches!(err, ShimError::MissingBinaryPackage { ref package } if *package == expected));
    assert!(err.to_string().contains("reinstall"));
}

#[test]
fn test_unsupported_platform_with_real_resolver() {
    let stub = install_stub("exit 0");
    let locator = BinaryLocator::new(
        ToolSpec::default(),
        Arc::new(NodeModulesResolver::new(stub.root.path())),
    );

    for (os, arch) in [("freebsd", "x64"), ("linux", "ia32"), ("aix", "ppc64")] {
        let err = locator.locate_raw(os, arch).unwrap_err();
        assert!(
            matches!(err, ShimError::UnsupportedPlatform { .. }),
            "{os}/{arch} should be unsupported"
        );
    }
}

#[test]
fn test_search_path_takes_precedence_over_node_modules() {
    let stub = install_stub("exit 0");
    let alt = tempfile::tempdir().unwrap();
    let alt_pkg = alt.path().join(ToolSpec::default().package_id(host_key()));
    std::fs::create_dir_all(&alt_pkg).unwrap();

    let settings = ShimSettings {
        search_paths: vec![alt.path().to_path_buf()],
        ..stub.settings()
    };

    let location = locate(&settings).unwrap();
    assert!(location.path().starts_with(alt_pkg.canonicalize().unwrap()));
}

#[test]
fn test_windows_packages_resolve_to_exe() {
    let stub = install_stub("exit 0");
    let tool = ToolSpec::default();

    // Every package id resolves to the same directory; only the file name varies
    let resolver: Arc<dyn PackageResolver> = Arc::new(ChainResolver::new(vec![Arc::new(
        SearchPathResolver::new(vec![stub.root.path().join("node_modules")]),
    )]));
    for key in PlatformKey::all() {
        std::fs::create_dir_all(stub.root.path().join("node_modules").join(tool.package_id(key)))
            .unwrap();
    }

    let locator = BinaryLocator::new(tool, resolver);
    for key in PlatformKey::all() {
        let location = locator.locate(key).unwrap();
        let name = location.path().file_name().unwrap().to_str().unwrap().to_string();
        if key.os.is_windows() {
            assert_eq!(name, "virtual-node-env.exe");
        } else {
            assert_eq!(name, "virtual-node-env");
        }
    }
}
