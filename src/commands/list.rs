use anyhow::Result;
use remindr_core::{Event, Priority};

use crate::data::DataFile;
use crate::render::render_list;

/// Which events `list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Upcoming,
    Due,
    Priority(Priority),
    ByTime,
}

impl View {
    pub fn from_flags(upcoming: bool, due: bool, priority: Option<Priority>, by_time: bool) -> Self {
        if upcoming {
            View::Upcoming
        } else if due {
            View::Due
        } else if let Some(p) = priority {
            View::Priority(p)
        } else if by_time {
            View::ByTime
        } else {
            View::All
        }
    }

    fn select(self, data: &DataFile) -> Vec<Event> {
        match self {
            View::All => data.store.all(),
            View::Upcoming => data.store.future_events(),
            View::Due => data.store.due_events(),
            View::Priority(p) => data.store.events_by_priority(p),
            View::ByTime => data.store.chronological(),
        }
    }

    fn empty_message(self) -> String {
        match self {
            View::All | View::ByTime => "No events found".to_string(),
            View::Upcoming => "No upcoming events".to_string(),
            View::Due => "No due events".to_string(),
            View::Priority(p) => format!("No events with {} priority", p),
        }
    }
}

pub fn run(data: &DataFile, view: View) -> Result<()> {
    let events = view.select(data);
    println!("{}", render_list(&events, &view.empty_message()));
    Ok(())
}
