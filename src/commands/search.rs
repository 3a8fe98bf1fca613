use anyhow::Result;
use owo_colors::OwoColorize;

use crate::data::DataFile;
use crate::render::{pluralize, render_list};
use crate::utils::when::parse_date;

pub fn run(data: &DataFile, text: Option<&str>, date: Option<&str>) -> Result<()> {
    let (events, label) = match (text, date) {
        (_, Some(date)) => {
            let day = parse_date(date)?;
            (data.store.search_by_date(day), day.format("%Y-%m-%d").to_string())
        }
        (Some(text), None) => (data.store.search_by_title(text), format!("'{}'", text)),
        (None, None) => anyhow::bail!("Give a title to search for, or --date"),
    };

    if !events.is_empty() {
        println!(
            "{}",
            format!("Found {} {}:", events.len(), pluralize("event", events.len())).dimmed()
        );
    }
    println!(
        "{}",
        render_list(&events, &format!("No events found matching {}", label))
    );

    Ok(())
}
