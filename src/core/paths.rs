//! Store path resolution.

use crate::constants;
use crate::models::config::ToolConfig;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub store: PathBuf,
    pub lock: PathBuf,
}

impl StorePaths {
    /// Resolve the store from the CLI arg, then config, then the default name.
    pub fn resolve(file_arg: Option<PathBuf>, config: &ToolConfig) -> Self {
        if let Some(file) = file_arg {
            return Self::from_store(file);
        }
        if let Some(file) = &config.store.path {
            return Self::from_store(file.clone());
        }
        Self::from_store(PathBuf::from(constants::DEFAULT_STORE_FILE))
    }

    /// Derive the sidecar lock path from a store file.
    pub fn from_store(store: PathBuf) -> Self {
        let mut lock: OsString = store.clone().into_os_string();
        lock.push(constants::LOCK_SUFFIX);
        Self {
            store,
            lock: PathBuf::from(lock),
        }
    }
}

impl std::fmt::Display for StorePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.store.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store() {
        let paths = StorePaths::from_store(PathBuf::from("/srv/user.htpasswd"));
        assert_eq!(paths.store, PathBuf::from("/srv/user.htpasswd"));
        assert_eq!(paths.lock, PathBuf::from("/srv/user.htpasswd.lock"));
    }

    #[test]
    fn test_resolve_default() {
        let paths = StorePaths::resolve(None, &ToolConfig::default());
        assert_eq!(paths.store, PathBuf::from("user.htpasswd"));
    }

    #[test]
    fn test_resolve_prefers_cli_over_config() {
        let mut config = ToolConfig::default();
        config.store.path = Some(PathBuf::from("from-config.htpasswd"));
        let paths = StorePaths::resolve(Some(PathBuf::from("from-cli.htpasswd")), &config);
        assert_eq!(paths.store, PathBuf::from("from-cli.htpasswd"));

        let paths = StorePaths::resolve(None, &config);
        assert_eq!(paths.store, PathBuf::from("from-config.htpasswd"));
    }
}
