use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use remindr_core::EventId;

use crate::data::DataFile;
use crate::render::render_details;

pub fn run(data: &mut DataFile, id: EventId, force: bool) -> Result<()> {
    let event = data.store.find(id)?;

    // Confirm unless --force
    if !force {
        println!("{}", render_details(event));
        println!();
        let confirmed = Confirm::new()
            .with_prompt("Delete this event?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Delete cancelled".dimmed());
            return Ok(());
        }
    }

    let removed = data.store.remove(id)?;
    data.save()?;

    println!("{}", format!("Deleted: {}", removed.title()).red());
    Ok(())
}
