//! Data-home and per-file path resolution.
//!
//! A dataset's files live under a "data home" directory. Resolution order:
//! explicit caller argument, then the MIRKIT_DATA_HOME environment variable,
//! then `~/mir_datasets`. Read paths (validation, loading) never create
//! directories; only the download path does, via [ensure_data_home].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::error::DataError;

/// Directory under the user's home used when nothing else is configured.
pub const DEFAULT_DATA_HOME_DIR: &str = "mir_datasets";

/// Environment override for the default data home.
pub const DATA_HOME_ENV: &str = "MIRKIT_DATA_HOME";

/// Resolve the data home without touching the filesystem.
pub fn resolve_data_home(root: Option<&Path>) -> PathBuf {
    if let Some(root) = root {
        return root.to_path_buf();
    }
    if let Some(env_root) = env::var_os(DATA_HOME_ENV) {
        return PathBuf::from(env_root);
    }
    match dirs::home_dir() {
        Some(home) => home.join(DEFAULT_DATA_HOME_DIR),
        None => PathBuf::from(DEFAULT_DATA_HOME_DIR),
    }
}

/// Resolve the data home and create it on disk. Write path only: downloads
/// land here. Validation and loading go through [resolve_data_home] so that
/// checking for a nonexistent dataset copy leaves no directories behind.
pub fn ensure_data_home(root: Option<&Path>) -> Result<PathBuf, DataError> {
    let home = resolve_data_home(root);
    fs::create_dir_all(&home).map_err(|err| DataError::Io {
        path: home.clone(),
        source: err,
    })?;
    Ok(home)
}

/// Join a manifest-relative path onto the data home. A `None` relative path
/// means the role is absent for this track, not an error. The result is never
/// checked for existence; that is the validator's job.
pub fn resolve_file(data_home: &Path, relative: Option<&str>) -> Option<PathBuf> {
    relative.map(|rel| data_home.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        let home = resolve_data_home(Some(Path::new("/srv/corpora")));
        assert_eq!(home, PathBuf::from("/srv/corpora"));
    }

    #[test]
    fn absent_relative_path_resolves_to_none() {
        assert_eq!(resolve_file(Path::new("/data"), None), None);
    }

    #[test]
    fn relative_path_joins_onto_home() {
        let resolved = resolve_file(Path::new("/data/beatles"), Some("audio/01.wav"));
        assert_eq!(resolved, Some(PathBuf::from("/data/beatles/audio/01.wav")));
    }

    #[test]
    fn resolve_does_not_create_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("never_created");
        let home = resolve_data_home(Some(&root));
        assert_eq!(home, root);
        assert!(!root.exists());
    }

    #[test]
    fn ensure_creates_the_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("made_on_demand");
        let home = ensure_data_home(Some(&root)).expect("ensure");
        assert_eq!(home, root);
        assert!(root.is_dir());
    }
}
