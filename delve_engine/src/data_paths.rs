//! Runtime data directory lookup.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Overrides every other candidate when set.
pub const DATA_DIR_ENV: &str = "DELVE_DATA_DIR";

/// Cached path to the directory containing the engine's runtime data files.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

/// Resolve the most likely location of the runtime data directory.
fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let mut candidates = Vec::new();

    // Common layouts: workspace root and flattened `data/`.
    candidates.push(PathBuf::from("delve_engine/data"));
    candidates.push(PathBuf::from("data"));

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("delve_engine/data"));
        candidates.push(dir.join("data"));

        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("delve_engine/data"));
            candidates.push(parent.join("data"));
        }
    }

    first_existing(candidates).unwrap_or_else(|| PathBuf::from("delve_engine/data"))
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_first_directory_that_exists() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let found = first_existing([missing, dir.path().to_path_buf()]);
        assert_eq!(found.as_deref(), Some(dir.path()));
        assert!(first_existing(Vec::new()).is_none());
    }
}
