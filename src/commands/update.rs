use anyhow::Result;
use owo_colors::OwoColorize;
use remindr_core::{EventFields, EventId, Priority};

use crate::data::DataFile;
use crate::render::render_details;
use crate::utils::when::parse_when;

/// Requested edits. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub description: Option<String>,
    pub at: Option<String>,
    pub priority: Option<Priority>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.at.is_none()
            && self.priority.is_none()
    }

    /// Apply the edits on top of `current`.
    fn apply(self, current: EventFields) -> Result<EventFields> {
        let scheduled_at = match self.at {
            Some(at) => parse_when(&at)?,
            None => current.scheduled_at,
        };

        Ok(EventFields {
            title: self.title.unwrap_or(current.title),
            description: self.description.unwrap_or(current.description),
            scheduled_at,
            priority: self.priority.unwrap_or(current.priority),
            completed: current.completed,
        })
    }
}

pub fn run(data: &mut DataFile, id: EventId, changes: Changes) -> Result<()> {
    let current = data.store.find(id)?.fields();

    if changes.is_empty() {
        println!("{}", "Nothing to update".dimmed());
        return Ok(());
    }

    let fields = changes.apply(current)?;
    data.store.update(id, fields)?;
    data.save()?;

    println!("{}", "Updated:".green());
    println!("{}", render_details(data.store.find(id)?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn current() -> EventFields {
        EventFields {
            title: "Dentist".to_string(),
            description: "Checkup".to_string(),
            scheduled_at: Utc.timestamp_opt(1_000, 0).unwrap(),
            priority: Priority::Medium,
            completed: true,
        }
    }

    #[test]
    fn unspecified_fields_are_kept() {
        let changes = Changes {
            title: Some("Orthodontist".to_string()),
            ..Default::default()
        };

        let fields = changes.apply(current()).unwrap();
        assert_eq!(fields.title, "Orthodontist");
        assert_eq!(fields.description, "Checkup");
        assert_eq!(fields.scheduled_at, current().scheduled_at);
        assert_eq!(fields.priority, Priority::Medium);
        assert!(fields.completed);
    }

    #[test]
    fn priority_and_description_change() {
        let changes = Changes {
            description: Some(String::new()),
            priority: Some(Priority::High),
            ..Default::default()
        };

        let fields = changes.apply(current()).unwrap();
        assert_eq!(fields.description, "");
        assert_eq!(fields.priority, Priority::High);
    }

    #[test]
    fn bad_time_is_an_error() {
        let changes = Changes {
            at: Some("not a date at all xyz".to_string()),
            ..Default::default()
        };
        assert!(changes.apply(current()).is_err());
    }

    #[test]
    fn empty_changes_detected() {
        assert!(Changes::default().is_empty());
    }
}
