//! Persisted service state reset

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::BootstrapError;

/// Files the service persists in its data directory
const STATE_FILES: [&str; 4] = [
    "config.xml",
    "prowlarr.db",
    "prowlarr.db-shm",
    "prowlarr.db-wal",
];

/// Delete persisted state under `dir`
///
/// Files that do not exist are skipped. Returns the paths actually removed.
pub fn reset_state(dir: &Path) -> Result<Vec<PathBuf>, BootstrapError> {
    let mut removed = Vec::new();

    for name in STATE_FILES {
        let path = dir.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed {}", path.display());
                removed.push(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} not present", path.display());
            }
            Err(source) => return Err(BootstrapError::Io { path, source }),
        }
    }

    Ok(removed)
}
