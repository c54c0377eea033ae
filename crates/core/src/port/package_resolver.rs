// Package Resolver Port
// "Given a package identifier, return its installation directory, or nothing if not installed"

use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Host package-resolution primitive
///
/// Implementations:
/// - NodeModulesResolver: node-style ancestor walk over node_modules (infra-system)
/// - SearchPathResolver: explicit directory list (infra-system)
/// - ChainResolver: first hit among several resolvers
pub trait PackageResolver: Send + Sync {
    /// Installation directory of `package_id` (e.g. `@scope/name`), if installed
    fn resolve(&self, package_id: &str) -> Option<PathBuf>;

    /// Short name for logs
    fn describe(&self) -> String;
}

/// Tries each resolver in order and returns the first hit
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn PackageResolver>>,
}

impl ChainResolver {
    pub fn new(resolvers: Vec<Arc<dyn PackageResolver>>) -> Self {
        Self { resolvers }
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PackageResolver for ChainResolver {
    fn resolve(&self, package_id: &str) -> Option<PathBuf> {
        for resolver in &self.resolvers {
            if let Some(dir) = resolver.resolve(package_id) {
                debug!(
                    package = %package_id,
                    resolver = %resolver.describe(),
                    dir = %dir.display(),
                    "Package resolved"
                );
                return Some(dir);
            }
            debug!(
                package = %package_id,
                resolver = %resolver.describe(),
                "Package not found by resolver"
            );
        }
        None
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.resolvers.iter().map(|r| r.describe()).collect();
        format!("chain[{}]", inner.join(", "))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock resolver backed by an in-memory map
    pub struct MockPackageResolver {
        packages: HashMap<String, PathBuf>,
        lookups: Mutex<Vec<String>>,
    }

    impl MockPackageResolver {
        pub fn new() -> Self {
            Self {
                packages: HashMap::new(),
                lookups: Mutex::new(Vec::new()),
            }
        }

        pub fn with_package(mut self, package_id: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
            self.packages.insert(package_id.into(), dir.into());
            self
        }

        /// Package ids asked for, in order
        pub fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl Default for MockPackageResolver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PackageResolver for MockPackageResolver {
        fn resolve(&self, package_id: &str) -> Option<PathBuf> {
            self.lookups.lock().unwrap().push(package_id.to_string());
            self.packages.get(package_id).cloned()
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }
}
