//! Terminal rendering for remindr types.
//!
//! Extension traits that add colored output to remindr-core types using
//! owo_colors.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use remindr_core::{Event, EventStatus, Priority};

/// Colored terminal output for `remindr` commands.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Priority {
    fn render(&self) -> String {
        match self {
            Priority::High => self.label().red().bold().to_string(),
            Priority::Medium => self.label().yellow().to_string(),
            Priority::Low => self.label().blue().to_string(),
        }
    }
}

impl Render for EventStatus {
    fn render(&self) -> String {
        let label = self.to_string();
        match self {
            EventStatus::Completed => label.green().to_string(),
            EventStatus::Due => label.red().to_string(),
            EventStatus::Upcoming => label.cyan().to_string(),
        }
    }
}

/// One line per event: id, priority, title, time and status.
impl Render for Event {
    fn render(&self) -> String {
        render_line(self, Utc::now())
    }
}

fn render_line(event: &Event, now: DateTime<Utc>) -> String {
    let id = format!("#{}", event.id());
    let title = if event.is_completed() {
        event.title().strikethrough().to_string()
    } else {
        event.title().to_string()
    };

    format!(
        "{:>5} {:<8} {} {} {}",
        id.dimmed(),
        event.priority().render(),
        title,
        event.formatted_time().dimmed(),
        event.status_at(now).render(),
    )
}

/// Every field of an event, one per line.
pub fn render_details(event: &Event) -> String {
    let mut lines = vec![
        format!("{} {}", "ID:".dimmed(), event.id()),
        format!("{} {}", "Title:".dimmed(), event.title().bold()),
    ];
    if !event.description().is_empty() {
        lines.push(format!("{} {}", "Description:".dimmed(), event.description()));
    }
    lines.push(format!("{} {}", "When:".dimmed(), event.formatted_time()));
    lines.push(format!("{} {}", "Priority:".dimmed(), event.priority().render()));
    lines.push(format!(
        "{} {}",
        "Status:".dimmed(),
        event.status_at(Utc::now()).render()
    ));
    lines.join("\n")
}

/// Render a list of events, or `empty` when there are none.
pub fn render_list(events: &[Event], empty: &str) -> String {
    if events.is_empty() {
        return empty.dimmed().to_string();
    }
    events
        .iter()
        .map(|e| e.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use remindr_core::IdAllocator;

    #[test]
    fn line_contains_id_title_and_status() {
        let mut ids = IdAllocator::starting_at(12);
        let event = Event::new(
            &mut ids,
            "Pay rent",
            "",
            Utc.timestamp_opt(1_000, 0).unwrap(),
            Priority::High,
        )
        .unwrap();

        let line = render_line(&event, Utc.timestamp_opt(2_000, 0).unwrap());
        assert!(line.contains("#12"));
        assert!(line.contains("Pay rent"));
        assert!(line.contains("High"));
        assert!(line.contains("Due"));
    }

    #[test]
    fn details_skip_empty_description() {
        let mut ids = IdAllocator::new();
        let event = Event::new(&mut ids, "Gym", "", Utc::now(), Priority::Low).unwrap();
        assert!(!render_details(&event).contains("Description"));
    }

    #[test]
    fn empty_list_shows_message() {
        assert!(render_list(&[], "No events found").contains("No events found"));
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }
}
