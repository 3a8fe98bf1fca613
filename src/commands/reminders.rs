use anyhow::Result;
use owo_colors::OwoColorize;

use crate::data::DataFile;
use crate::render::{Render, pluralize};

pub fn run(data: &DataFile, hours: u32) -> Result<()> {
    let due = data.store.due_events();
    let upcoming = data.store.upcoming_events(hours);

    if due.is_empty() && upcoming.is_empty() {
        println!("{}", "No immediate reminders".dimmed());
        return Ok(());
    }

    if !due.is_empty() {
        println!("{}", format!("Due ({})", due.len()).red().bold());
        for event in &due {
            println!("{}", event.render());
        }
    }

    if !upcoming.is_empty() {
        if !due.is_empty() {
            println!();
        }
        let heading = format!(
            "Next {} {} ({})",
            hours,
            pluralize("hour", hours as usize),
            upcoming.len()
        );
        println!("{}", heading.cyan().bold());
        for event in &upcoming {
            println!("{}", event.render());
        }
    }

    Ok(())
}
