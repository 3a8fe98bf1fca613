use anyhow::Result;
use owo_colors::OwoColorize;
use remindr_core::EventId;

use crate::data::DataFile;

pub fn run(data: &mut DataFile, id: EventId) -> Result<()> {
    if !data.store.mark_completed(id)? {
        println!("{}", "Event is already marked as completed".dimmed());
        return Ok(());
    }
    data.save()?;

    let title = data.store.find(id)?.title().to_string();
    println!("{}", format!("Completed: {}", title).green());
    Ok(())
}
