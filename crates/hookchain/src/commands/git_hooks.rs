//! Git repository helpers
//!
//! This module provides:
//!
//! - [`find_git_root`] - Find the repository root using gix
//! - [`locate_config`] - Pick the configuration file for this invocation

use hookchain_core::{CONFIG_FILE_NAME, Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the git repository root directory.
///
/// Uses gix to discover the repository from the given path.
///
/// # Errors
///
/// Returns an error if not in a git repository or the repository is bare.
pub fn find_git_root(start_path: &Path) -> Result<PathBuf> {
    let repo = gix::discover(start_path)
        .map_err(|e| Error::configuration(format!("Not in a git repository: {e}")))?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| Error::configuration("Cannot operate in a bare repository"))?;

    Ok(workdir.to_path_buf())
}

/// Configuration file to load.
///
/// An explicit path (from `--config` or `HOOKCHAIN_CONFIG`) wins. Otherwise
/// `hookchain.toml` at the work-tree root, then in `cwd`. Returns `None` when
/// nothing exists, which means no hooks are configured.
#[must_use]
pub fn locate_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let candidates = find_git_root(cwd)
        .map_err(|e| debug!(error = %e, "No git work tree, using current directory"))
        .ok()
        .map(|root| root.join(CONFIG_FILE_NAME))
        .into_iter()
        .chain(std::iter::once(cwd.join(CONFIG_FILE_NAME)));

    for candidate in candidates {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Using configuration file");
            return Some(candidate);
        }
    }
    None
}
