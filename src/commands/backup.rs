use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use remindr_core::backup::{backup_path, create_backup, restore_backup};

pub fn create(path: &Path) -> Result<()> {
    let created = create_backup(path)
        .with_context(|| format!("Failed to back up {}", path.display()))?;

    if created {
        println!(
            "{}",
            format!("Backed up to {}", backup_path(path).display()).green()
        );
    } else {
        println!("{}", format!("Nothing to back up: {} does not exist", path.display()).dimmed());
    }
    Ok(())
}

pub fn restore(path: &Path) -> Result<()> {
    let restored = restore_backup(path)
        .with_context(|| format!("Failed to restore {}", path.display()))?;

    if !restored {
        anyhow::bail!("No backup found at {}", backup_path(path).display());
    }

    println!(
        "{}",
        format!("Restored {} from backup", path.display()).green()
    );
    Ok(())
}
