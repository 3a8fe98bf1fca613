//! Reminder events and their priorities.
//!
//! An `Event` is a single scheduled reminder. Its id is handed out by an
//! `IdAllocator` when the event is created and never changes afterwards;
//! every other field can be edited.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RemindrError, RemindrResult};

/// Identifier of an event. Always positive.
pub type EventId = u64;

/// How urgent an event is. A lower level means more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Numeric level as stored on disk (1, 2 or 3).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Validate a raw level. Anything outside 1..=3 is rejected, never clamped.
    pub fn from_level(level: i64) -> RemindrResult<Self> {
        match level {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(RemindrError::InvalidPriority(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl TryFrom<i64> for Priority {
    type Error = RemindrError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        Priority::from_level(level)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts either the numeric level ("1") or the label ("high", any case).
impl FromStr for Priority {
    type Err = RemindrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(level) = trimmed.parse::<i64>() {
            return Priority::from_level(level);
        }

        Priority::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RemindrError::InvalidPriority(trimmed.to_string()))
    }
}

/// Display status of an event at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Completed,
    Due,
    Upcoming,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            EventStatus::Completed => "Completed",
            EventStatus::Due => "Due",
            EventStatus::Upcoming => "Upcoming",
        };
        write!(f, "{}", label)
    }
}

/// Hands out monotonically increasing event ids.
///
/// Ids are never reused: `observe` moves the counter past any id that was
/// created elsewhere (e.g. read back from disk).
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: EventId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id is `next` (at least 1).
    pub fn starting_at(next: EventId) -> Self {
        IdAllocator { next: next.max(1) }
    }

    /// The id the next call to `allocate` will return.
    pub fn peek(&self) -> EventId {
        self.next
    }

    /// Hand out the next id. Fails once the id space is used up.
    pub fn allocate(&mut self) -> RemindrResult<EventId> {
        let id = self.next;
        if id == EventId::MAX {
            return Err(RemindrError::IdsExhausted);
        }
        self.next = id + 1;
        Ok(id)
    }

    /// Record an id allocated elsewhere so it is never handed out again.
    /// Observing the largest usable id leaves the allocator exhausted.
    pub fn observe(&mut self, id: EventId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }
}

/// Everything about an event except its id.
///
/// Used as the replacement record for `EventStore::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub priority: Priority,
    pub completed: bool,
}

/// A scheduled reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    title: String,
    description: String,
    scheduled_at: DateTime<Utc>,
    priority: Priority,
    completed: bool,
}

impl Event {
    /// Create a new, not yet completed event with a fresh id from `ids`.
    pub fn new(
        ids: &mut IdAllocator,
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        priority: Priority,
    ) -> RemindrResult<Self> {
        Ok(Event {
            id: ids.allocate()?,
            title: title.into(),
            description: description.into(),
            scheduled_at: whole_seconds(scheduled_at),
            priority,
            completed: false,
        })
    }

    /// Like `new`, but validates a raw priority level first.
    pub fn with_level(
        ids: &mut IdAllocator,
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        level: i64,
    ) -> RemindrResult<Self> {
        let priority = Priority::from_level(level)?;
        Self::new(ids, title, description, scheduled_at, priority)
    }

    /// Rebuild an event that already has an id (update or decode).
    pub(crate) fn from_parts(id: EventId, fields: EventFields) -> Self {
        Event {
            id,
            title: fields.title,
            description: fields.description,
            scheduled_at: whole_seconds(fields.scheduled_at),
            priority: fields.priority,
            completed: fields.completed,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Stored at whole-second precision, the resolution of the data file.
    pub fn set_scheduled_at(&mut self, scheduled_at: DateTime<Utc>) {
        self.scheduled_at = whole_seconds(scheduled_at);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Copy of every field except the id.
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            description: self.description.clone(),
            scheduled_at: self.scheduled_at,
            priority: self.priority,
            completed: self.completed,
        }
    }

    // TIME RELEVANCE:

    /// Scheduled strictly after `now` and not completed.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at > now && !self.completed
    }

    /// Scheduled at or before `now` and not completed.
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now && !self.completed
    }

    pub fn is_upcoming(&self) -> bool {
        self.is_upcoming_at(Utc::now())
    }

    pub fn is_due(&self) -> bool {
        self.is_due_at(Utc::now())
    }

    /// Scheduled in `(now, now + hours]` and not completed.
    pub fn is_within_hours_at(&self, now: DateTime<Utc>, hours: u32) -> bool {
        // A horizon past chrono's range has no upper bound.
        let horizon = now.checked_add_signed(Duration::hours(i64::from(hours)));
        self.is_upcoming_at(now) && horizon.is_none_or(|h| self.scheduled_at <= h)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        if self.completed {
            EventStatus::Completed
        } else if self.is_due_at(now) {
            EventStatus::Due
        } else {
            EventStatus::Upcoming
        }
    }

    /// The calendar date the event falls on in local wall-clock time.
    pub fn local_date(&self) -> NaiveDate {
        self.scheduled_at.with_timezone(&Local).date_naive()
    }

    /// Scheduled time as local wall-clock `YYYY-MM-DD HH:MM:SS`.
    pub fn formatted_time(&self) -> String {
        self.scheduled_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    // ORDERING:

    /// Store order: priority ascending, then scheduled time ascending.
    pub fn compare(&self, other: &Event) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.scheduled_at.cmp(&other.scheduled_at))
    }

    pub fn precedes(&self, other: &Event) -> bool {
        self.compare(other) == Ordering::Less
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
