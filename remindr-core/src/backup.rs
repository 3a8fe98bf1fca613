//! Byte-for-byte backups of the data file.
//!
//! The backup of `events.dat` lives next to it as `events.dat.backup`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RemindrResult;

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Copy the data file to its backup path.
/// Returns false if there is no data file to back up.
pub fn create_backup(path: &Path) -> RemindrResult<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let backup = backup_path(path);
    copy_replacing(path, &backup)?;
    tracing::info!(from = %path.display(), to = %backup.display(), "created backup");
    Ok(true)
}

/// Copy the backup over the data file.
/// Returns false if no backup exists.
pub fn restore_backup(path: &Path) -> RemindrResult<bool> {
    let backup = backup_path(path);
    if !backup.exists() {
        return Ok(false);
    }

    copy_replacing(&backup, path)?;
    tracing::info!(from = %backup.display(), to = %path.display(), "restored backup");
    Ok(true)
}

/// Copy via a temp file and rename, so `to` is never left half-written.
fn copy_replacing(from: &Path, to: &Path) -> RemindrResult<()> {
    let mut temp = to.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    if let Err(e) = fs::copy(from, &temp).and_then(|_| fs::rename(&temp, to)) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}
