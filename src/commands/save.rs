use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use remindr_core::EventStore;

use crate::data::DataFile;
use crate::render::pluralize;

pub fn run(data: &DataFile, force: bool) -> Result<()> {
    if force {
        data.save_unchecked()?;
    } else {
        data.save()?;
    }

    let count = data.store.len();
    println!(
        "{}",
        format!(
            "Saved {} {} to {}",
            count,
            pluralize("event", count),
            data.path().display()
        )
        .green()
    );
    Ok(())
}

/// Unlike the other commands, a read failure here is the result, not a warning.
pub fn reload(path: &Path) -> Result<()> {
    let loaded =
        EventStore::load(path).with_context(|| format!("Failed to read {}", path.display()))?;

    match loaded {
        Some(store) => {
            let count = store.len();
            println!(
                "{}",
                format!(
                    "Loaded {} {} from {}",
                    count,
                    pluralize("event", count),
                    path.display()
                )
                .green()
            );
        }
        None => println!(
            "{}",
            format!("No data file at {}, starting empty", path.display()).dimmed()
        ),
    }
    Ok(())
}
