//! Project root discovery.
//!
//! A project root is the nearest directory (starting at `start` and walking
//! up to the filesystem root) that contains `.viralfy/config.json`.

use crate::error::{Result, ViralfyError};
use crate::paths;
use std::path::{Path, PathBuf};

/// Walk upward from `start` and return the first directory holding the
/// sentinel config file. A relative `start` is taken from the current
/// directory.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_root_from(&cwd, start)
}

/// [`find_root`] with an explicit base for a relative `start`.
pub fn find_root_from(cwd: &Path, start: &Path) -> Option<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        cwd.join(start)
    };
    let found = start
        .ancestors()
        .find(|dir| paths::config_path(dir).is_file())
        .map(Path::to_path_buf);
    if let Some(root) = &found {
        tracing::debug!(root = %root.display(), "discovered project root");
    }
    found
}

/// Like [`find_root`], but a missing project is an error.
pub fn ensure_root(start: &Path) -> Result<PathBuf> {
    find_root(start).ok_or(ViralfyError::NotInitialized)
}

pub fn is_initialized(start: &Path) -> bool {
    find_root(start).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plant_sentinel(dir: &Path) {
        let cfg = paths::config_path(dir);
        std::fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        std::fs::write(cfg, "{}").unwrap();
    }

    #[test]
    fn finds_root_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("a/b");
        plant_sentinel(&root);
        let deep = root.join("c/d");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_root(&deep), Some(root.clone()));
        assert_eq!(find_root(&root), Some(root));
    }

    #[test]
    fn sibling_tree_is_not_initialized() {
        let tmp = TempDir::new().unwrap();
        plant_sentinel(&tmp.path().join("a/b"));
        let other = tmp.path().join("x/y");
        std::fs::create_dir_all(&other).unwrap();

        assert_eq!(find_root(&other), None);
        assert!(!is_initialized(&other));
        assert!(matches!(
            ensure_root(&other),
            Err(ViralfyError::NotInitialized)
        ));
    }

    #[test]
    fn config_dir_without_config_file_is_ignored() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(paths::CONFIG_DIR)).unwrap();
        assert_eq!(find_root(tmp.path()), None);
    }

    #[test]
    fn relative_start_climbs_past_its_first_component() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("a");
        plant_sentinel(&root);
        let deep = root.join("b/c");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_root_from(&deep, Path::new(".")), Some(root.clone()));
        assert_eq!(find_root_from(&root, Path::new("b")), Some(root.clone()));
        assert_eq!(find_root_from(tmp.path(), Path::new("a/b/c")), Some(root));
    }

    #[test]
    fn absolute_start_ignores_base() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        plant_sentinel(&root);
        let elsewhere = TempDir::new().unwrap();
        assert_eq!(find_root_from(elsewhere.path(), &root), Some(root.clone()));
    }

    #[test]
    fn nearest_root_wins() {
        let tmp = TempDir::new().unwrap();
        plant_sentinel(tmp.path());
        let inner = tmp.path().join("inner");
        plant_sentinel(&inner);
        assert_eq!(find_root(&inner.join("deeper")), Some(inner));
    }
}
