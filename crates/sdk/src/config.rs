//! Environment-driven settings
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BINLAUNCH_TOOL` | executable base name | `virtual-node-env` |
//! | `BINLAUNCH_NAMESPACE` | package scope | `@axetroy` |
//! | `BINLAUNCH_BINARY_PATH` | skip platform lookup, use this executable | unset |
//! | `BINLAUNCH_PACKAGE_PATH` | extra package directories (path list, `~` expanded) | unset |
//! | `BINLAUNCH_PROJECT_DIR` | start directory for the node_modules walk | current dir |
//!
//! `NODE_PATH` entries are searched after `BINLAUNCH_PACKAGE_PATH`.

use binlaunch_core::constants::{
    DEFAULT_NAMESPACE, DEFAULT_TOOL_NAME, ENV_BINARY_PATH, ENV_NAMESPACE, ENV_PACKAGE_PATH,
    ENV_PROJECT_DIR, ENV_TOOL,
};
use binlaunch_core::domain::ToolSpec;
use binlaunch_core::port::{ChainResolver, PackageResolver};
use binlaunch_infra_system::{NodeModulesResolver, SearchPathResolver};
use std::path::PathBuf;
use std::sync::Arc;

const NODE_PATH: &str = "NODE_PATH";

/// Settings for locating the executable
#[derive(Debug, Clone)]
pub struct ShimSettings {
    pub tool: ToolSpec,
    pub binary_override: Option<PathBuf>,
    pub search_paths: Vec<PathBuf>,
    pub project_dir: PathBuf,
}

impl ShimSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (empty values count as unset)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tool = ToolSpec::new(
            get(ENV_TOOL).unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string()),
            get(ENV_NAMESPACE).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        );

        let binary_override = get(ENV_BINARY_PATH).map(|p| expand(&p));

        let search_paths = [ENV_PACKAGE_PATH, NODE_PATH]
            .into_iter()
            .filter_map(&get)
            .flat_map(|list| split_path_list(&list))
            .collect();

        let project_dir = get(ENV_PROJECT_DIR)
            .map(|p| expand(&p))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            tool,
            binary_override,
            search_paths,
            project_dir,
        }
    }

    /// Search paths first, then the node_modules walk from `project_dir`
    pub fn resolver(&self) -> ChainResolver {
        let mut resolvers: Vec<Arc<dyn PackageResolver>> = Vec::new();
        if !self.search_paths.is_empty() {
            resolvers.push(Arc::new(SearchPathResolver::new(self.search_paths.clone())));
        }
        resolvers.push(Arc::new(NodeModulesResolver::new(self.project_dir.clone())));
        ChainResolver::new(resolvers)
    }
}

impl Default for ShimSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn split_path_list(list: &str) -> Vec<PathBuf> {
    std::env::split_paths(list)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| expand(&p.to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = ShimSettings::from_lookup(lookup(&[]));

        assert_eq!(settings.tool, ToolSpec::default());
        assert!(settings.binary_override.is_none());
        assert!(settings.search_paths.is_empty());
    }

    #[test]
    fn test_tool_and_namespace_override() {
        let settings = ShimSettings::from_lookup(lookup(&[
            ("BINLAUNCH_TOOL", "mytool"),
            ("BINLAUNCH_NAMESPACE", "@acme"),
        ]));

        assert_eq!(settings.tool, ToolSpec::new("mytool", "@acme"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let settings = ShimSettings::from_lookup(lookup(&[
            ("BINLAUNCH_TOOL", ""),
            ("BINLAUNCH_BINARY_PATH", "  "),
        ]));

        assert_eq!(settings.tool.name, DEFAULT_TOOL_NAME);
        assert!(settings.binary_override.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_search_paths_split_and_ordered() {
        let settings = ShimSettings::from_lookup(lookup(&[
            ("BINLAUNCH_PACKAGE_PATH", "/opt/a:/opt/b"),
            ("NODE_PATH", "/usr/lib/node_modules"),
        ]));

        assert_eq!(
            settings.search_paths,
            vec![
                PathBuf::from("/opt/a"),
                PathBuf::from("/opt/b"),
                PathBuf::from("/usr/lib/node_modules"),
            ]
        );
        assert!(settings.resolver().describe().starts_with("chain[search_path(3 dirs)"));
    }

    #[test]
    fn test_tilde_expansion() {
        let settings =
            ShimSettings::from_lookup(lookup(&[("BINLAUNCH_BINARY_PATH", "~/bin/virtual-node-env")]));

        let path = settings.binary_override.unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("bin/virtual-node-env"));
    }

    #[test]
    fn test_project_dir_from_env() {
        let settings =
            ShimSettings::from_lookup(lookup(&[("BINLAUNCH_PROJECT_DIR", "/srv/app")]));

        assert_eq!(settings.project_dir, PathBuf::from("/srv/app"));
        assert_eq!(settings.resolver().describe(), "chain[node_modules(/srv/app)]");
    }
}
