use anyhow::Result;
use owo_colors::OwoColorize;
use remindr_core::Priority;

use crate::data::DataFile;
use crate::render::Render;
use crate::utils::when::parse_when;

pub fn run(
    data: &mut DataFile,
    title: String,
    description: String,
    at: &str,
    priority: Priority,
) -> Result<()> {
    let scheduled_at = parse_when(at)?;

    let event = data
        .store
        .create_event(title, description, scheduled_at, priority)?;
    let line = event.render();
    data.store.add(event)?;
    data.save()?;

    println!("{}", "Added:".green());
    println!("{}", line);

    Ok(())
}
