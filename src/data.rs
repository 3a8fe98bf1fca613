//! The data file a command works on.
//!
//! Opening never fails: a file that cannot be read is reported and the
//! command continues with an empty store. Such a store is never written back
//! unless forced, so the unreadable file stays around for `restore`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use remindr_core::EventStore;

pub struct DataFile {
    path: PathBuf,
    pub store: EventStore,
    unreadable: bool,
}

impl DataFile {
    pub fn open(path: PathBuf, max_events: Option<usize>) -> Self {
        let (store, unreadable) = match EventStore::load(&path) {
            Ok(Some(store)) => (store, false),
            Ok(None) => (EventStore::new(), false),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Could not read {}: {}", path.display(), e).yellow()
                );
                eprintln!("{}", "Continuing with an empty event list.".yellow());
                (EventStore::new(), true)
            }
        };

        DataFile {
            path,
            store: store.with_capacity_limit(max_events),
            unreadable,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to disk.
    pub fn save(&self) -> Result<()> {
        if self.unreadable {
            anyhow::bail!(
                "Not saving: {} could not be read and would be overwritten.\n\
                Run `remindr restore` to go back to the last backup, or \
                `remindr save --force` to start over.",
                self.path.display()
            );
        }
        self.save_unchecked()
    }

    /// Write the store back even if the file it came from was unreadable.
    pub fn save_unchecked(&self) -> Result<()> {
        self.store
            .save(&self.path)
            .with_context(|| format!("Failed to save events to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use remindr_core::Priority;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.dat");

        let mut data = DataFile::open(path.clone(), None);
        assert!(data.store.is_empty());

        let event = data
            .store
            .create_event("x", "", Utc::now(), Priority::Low)
            .unwrap();
        data.store.add(event).unwrap();
        data.save().unwrap();

        assert_eq!(DataFile::open(path, None).store.len(), 1);
    }

    #[test]
    fn unreadable_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.dat");
        std::fs::write(&path, b"garbage").unwrap();

        let data = DataFile::open(path.clone(), None);
        assert!(data.store.is_empty());
        assert!(data.save().is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"garbage");

        data.save_unchecked().unwrap();
        assert!(DataFile::open(path, None).store.is_empty());
    }

    #[test]
    fn capacity_comes_from_config() {
        let dir = TempDir::new().unwrap();
        let data = DataFile::open(dir.path().join("events.dat"), Some(5));
        assert_eq!(data.store.capacity_limit(), Some(5));
    }
}
