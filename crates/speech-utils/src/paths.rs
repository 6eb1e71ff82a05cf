//! Project root and working directory helpers

use crate::error::UtilsError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the project root
pub const ROOT_ENV: &str = "SPEECH_ROOT";

/// Project root: `$SPEECH_ROOT` when set, otherwise the workspace root
pub fn project_root() -> PathBuf {
    if let Some(root) = std::env::var_os(ROOT_ENV) {
        return PathBuf::from(root);
    }
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Target for [`chdir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkDir {
    /// The project root
    Root,
    /// An explicit directory
    Path(PathBuf),
}

/// Change the process working directory; returns the new directory
pub fn chdir(to: WorkDir) -> Result<PathBuf, UtilsError> {
    let target = match to {
        WorkDir::Root => project_root(),
        WorkDir::Path(path) => path,
    };
    std::env::set_current_dir(&target).map_err(UtilsError::io(&target))?;
    info!("Working directory changed to {}", target.display());
    Ok(target)
}
