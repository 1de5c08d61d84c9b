//! # IO Utilities
//!
//! Location of the `.launchpad` runtime directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the runtime directory path (.launchpad)
///
/// Holds the favorites database and the optional `config.json`.
pub fn get_runtime_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("LAUNCHPAD_RUNTIME_PATH") {
        return PathBuf::from(path);
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".launchpad")
}

/// Create `path` and any missing parents
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {:?}", path))?;
    Ok(path.to_path_buf())
}
