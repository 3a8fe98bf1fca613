use anyhow::Result;
use remindr_core::EventId;

use crate::data::DataFile;
use crate::render::render_details;

pub fn run(data: &DataFile, id: EventId) -> Result<()> {
    let event = data.store.find(id)?;
    println!("{}", render_details(event));
    Ok(())
}
