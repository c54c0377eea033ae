// Package resolver implementations
// reason: filesystem probing stays out of core
use std::path::{Path, PathBuf};
use tracing::debug;

use binlaunch_core::constants::{NODE_MODULES_DIR, PACKAGE_MANIFEST};
use binlaunch_core::port::PackageResolver;

/// Node-style resolution
///
/// Walks from `start_dir` up through every ancestor and checks
/// `<dir>/node_modules/<package-id>/package.json`, the same order Node uses
/// for `require.resolve("<package-id>/package.json")`.
pub struct NodeModulesResolver {
    start_dir: PathBuf,
}

impl NodeModulesResolver {
    /// `start_dir` is made absolute up front so the walk reaches the filesystem root
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: absolutize(start_dir.into()),
        }
    }

    /// Candidate package directories, nearest first
    fn candidates<'a>(&'a self, package_id: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.start_dir
            .ancestors()
            // node never looks in node_modules/node_modules
            .filter(|dir| dir.file_name().map_or(true, |name| name != NODE_MODULES_DIR))
            .map(move |dir| dir.join(NODE_MODULES_DIR).join(package_id))
    }
}

impl PackageResolver for NodeModulesResolver {
    fn resolve(&self, package_id: &str) -> Option<PathBuf> {
        self.candidates(package_id).find_map(|candidate| {
            let found = is_package_dir(&candidate);
            debug!(candidate = %candidate.display(), found = %found, "node_modules probe");
            found.then(|| absolutize(candidate))
        })
    }

    fn describe(&self) -> String {
        format!("node_modules({})", self.start_dir.display())
    }
}

/// Explicit directory list (BINLAUNCH_PACKAGE_PATH, NODE_PATH)
///
/// For each directory checks `<dir>/<package-id>` and then the unscoped
/// `<dir>/<package-name>`; a plain directory is enough, no manifest needed.
pub struct SearchPathResolver {
    dirs: Vec<PathBuf>,
}

impl SearchPathResolver {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl PackageResolver for SearchPathResolver {
    fn resolve(&self, package_id: &str) -> Option<PathBuf> {
        let unscoped = unscoped_name(package_id);

        for dir in &self.dirs {
            let mut candidates = vec![dir.join(package_id)];
            if unscoped != package_id {
                candidates.push(dir.join(unscoped));
            }

            for candidate in candidates {
                let found = candidate.is_dir();
                debug!(candidate = %candidate.display(), found = %found, "search path probe");
                if found {
                    return Some(absolutize(candidate));
                }
            }
        }
        None
    }

    fn describe(&self) -> String {
        format!("search_path({} dirs)", self.dirs.len())
    }
}

/// `@scope/name` -> `name`
fn unscoped_name(package_id: &str) -> &str {
    package_id.rsplit('/').next().unwrap_or(package_id)
}

/// Canonical path when possible, otherwise anchored at the current directory
fn absolutize(path: PathBuf) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

/// True if `dir` looks like an installed package
pub fn is_package_dir(dir: &Path) -> bool {
    dir.join(PACKAGE_MANIFEST).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PKG: &str = "@axetroy/virtual-node-env-linux-amd64";

    fn install(root: &Path, package_id: &str) -> PathBuf {
        let dir = root.join(NODE_MODULES_DIR).join(package_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PACKAGE_MANIFEST), r#"{"name":"x"}"#).unwrap();
        dir
    }

    #[test]
    fn test_node_modules_in_start_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = install(tmp.path(), PKG);

        let resolver = NodeModulesResolver::new(tmp.path());

        assert_eq!(resolver.resolve(PKG), Some(dir.canonicalize().unwrap()));
    }

    #[test]
    fn test_node_modules_found_in_ancestor() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = install(tmp.path(), PKG);
        let nested = tmp.path().join("packages").join("app").join("src");
        fs::create_dir_all(&nested).unwrap();

        let resolver = NodeModulesResolver::new(&nested);

        assert_eq!(resolver.resolve(PKG), Some(dir.canonicalize().unwrap()));
    }

    #[test]
    fn test_nearest_node_modules_wins() {
        let tmp = tempfile::tempdir().unwrap();
        install(tmp.path(), PKG);
        let app = tmp.path().join("app");
        let near = install(&app, PKG);

        let resolver = NodeModulesResolver::new(&app);

        assert_eq!(resolver.resolve(PKG), Some(near.canonicalize().unwrap()));
    }

    /// Restores the working directory when dropped
    struct CwdGuard(PathBuf);

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    #[test]
    fn test_relative_start_dir_walks_past_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = install(tmp.path(), PKG);
        let app = tmp.path().join("app");
        fs::create_dir_all(app.join("src")).unwrap();

        let _guard = CwdGuard(std::env::current_dir().unwrap());
        std::env::set_current_dir(&app).unwrap();

        let from_cwd = NodeModulesResolver::new(".");
        let from_subdir = NodeModulesResolver::new("src");

        assert_eq!(from_cwd.resolve(PKG), Some(dir.canonicalize().unwrap()));
        assert_eq!(from_subdir.resolve(PKG), Some(dir.canonicalize().unwrap()));
    }

    #[test]
    fn test_directory_without_manifest_is_not_a_package() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(NODE_MODULES_DIR).join(PKG);
        fs::create_dir_all(&dir).unwrap();

        let resolver = NodeModulesResolver::new(tmp.path());

        assert!(!is_package_dir(&dir));
        assert_eq!(resolver.resolve(PKG), None);
    }

    #[test]
    fn test_search_path_scoped_and_unscoped() {
        let tmp = tempfile::tempdir().unwrap();
        let scoped_root = tmp.path().join("scoped");
        let flat_root = tmp.path().join("flat");
        fs::create_dir_all(scoped_root.join(PKG)).unwrap();
        fs::create_dir_all(flat_root.join("virtual-node-env-darwin-arm64")).unwrap();

        let resolver = SearchPathResolver::new(vec![scoped_root.clone(), flat_root.clone()]);

        assert_eq!(
            resolver.resolve(PKG),
            Some(scoped_root.join(PKG).canonicalize().unwrap())
        );
        assert_eq!(
            resolver.resolve("@axetroy/virtual-node-env-darwin-arm64"),
            Some(
                flat_root
                    .join("virtual-node-env-darwin-arm64")
                    .canonicalize()
                    .unwrap()
            )
        );
        assert_eq!(resolver.resolve("@axetroy/virtual-node-env-windows-arm64"), None);
    }

    #[test]
    fn test_unscoped_name() {
        assert_eq!(unscoped_name("@scope/name"), "name");
        assert_eq!(unscoped_name("name"), "name");
    }
}
