//! The ordered event store.
//!
//! Events are kept in a vector sorted by priority, then scheduled time.
//! Inserts find their slot with a binary search; events that compare equal
//! keep insertion order (a new event goes after its equals).

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use crate::codec;
use crate::error::{RemindrError, RemindrResult};
use crate::event::{Event, EventFields, EventId, IdAllocator, Priority};

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    ids: IdAllocator,
    capacity: Option<usize>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of stored events. Events already stored are kept even
    /// if they exceed the limit; only further `add` calls are refused.
    pub fn with_capacity_limit(mut self, limit: Option<usize>) -> Self {
        self.capacity = limit;
        self
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// The allocator new events draw their ids from.
    pub fn ids(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Build a new event with an id from this store's allocator.
    /// The event is not inserted; pass it to `add`.
    pub fn create_event(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        priority: Priority,
    ) -> RemindrResult<Event> {
        Event::new(&mut self.ids, title, description, scheduled_at, priority)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate in store order without copying.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    // MUTATIONS:

    /// Insert an event at its sorted position.
    pub fn add(&mut self, event: Event) -> RemindrResult<()> {
        if self.position(event.id()).is_some() {
            return Err(RemindrError::DuplicateId(event.id()));
        }
        if let Some(limit) = self.capacity {
            if self.events.len() >= limit {
                return Err(RemindrError::CapacityExceeded(limit));
            }
        }

        self.ids.observe(event.id());
        self.insert_sorted(event);
        Ok(())
    }

    /// Remove and return the event with `id`.
    pub fn remove(&mut self, id: EventId) -> RemindrResult<Event> {
        let index = self.position(id).ok_or(RemindrError::NotFound(id))?;
        let removed = self.events.remove(index);
        tracing::debug!(id, "removed event");
        Ok(removed)
    }

    /// Replace every field of event `id`, keeping the id, and re-sort it.
    pub fn update(&mut self, id: EventId, fields: EventFields) -> RemindrResult<()> {
        let index = self.position(id).ok_or(RemindrError::NotFound(id))?;
        self.events.remove(index);
        self.insert_sorted(Event::from_parts(id, fields));
        Ok(())
    }

    /// Mark event `id` completed in place. Completion does not affect order.
    ///
    /// Returns false if the event was already completed.
    pub fn mark_completed(&mut self, id: EventId) -> RemindrResult<bool> {
        let index = self.position(id).ok_or(RemindrError::NotFound(id))?;
        let event = &mut self.events[index];
        if event.is_completed() {
            return Ok(false);
        }
        event.set_completed(true);
        tracing::debug!(id, "marked event completed");
        Ok(true)
    }

    // QUERIES:

    pub fn find(&self, id: EventId) -> RemindrResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id() == id)
            .ok_or(RemindrError::NotFound(id))
    }

    /// Snapshot of every event in store order.
    pub fn all(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Events whose title contains `needle` (case-sensitive substring match;
    /// an empty needle matches everything).
    pub fn search_by_title(&self, needle: &str) -> Vec<Event> {
        self.select(|e| e.title().contains(needle))
    }

    /// Events falling on `date` in local wall-clock time.
    pub fn search_by_date(&self, date: NaiveDate) -> Vec<Event> {
        self.select(|e| e.local_date() == date)
    }

    pub fn events_by_priority(&self, priority: Priority) -> Vec<Event> {
        self.select(|e| e.priority() == priority)
    }

    pub fn due_events(&self) -> Vec<Event> {
        self.due_events_at(Utc::now())
    }

    pub fn due_events_at(&self, now: DateTime<Utc>) -> Vec<Event> {
        self.select(|e| e.is_due_at(now))
    }

    /// Not completed and scheduled in `(now, now + within_hours]`.
    pub fn upcoming_events(&self, within_hours: u32) -> Vec<Event> {
        self.upcoming_events_at(Utc::now(), within_hours)
    }

    pub fn upcoming_events_at(&self, now: DateTime<Utc>, within_hours: u32) -> Vec<Event> {
        self.select(|e| e.is_within_hours_at(now, within_hours))
    }

    /// Every not-completed event scheduled after now, however far out.
    pub fn future_events(&self) -> Vec<Event> {
        self.future_events_at(Utc::now())
    }

    pub fn future_events_at(&self, now: DateTime<Utc>) -> Vec<Event> {
        self.select(|e| e.is_upcoming_at(now))
    }

    /// Snapshot ordered by scheduled time alone. The store keeps its own order.
    pub fn chronological(&self) -> Vec<Event> {
        let mut events = self.all();
        events.sort_by_key(|e| e.scheduled_at());
        events
    }

    // PERSISTENCE:

    /// Write the store to `path` through the file codec.
    pub fn save(&self, path: &Path) -> RemindrResult<()> {
        codec::save(&self.events, path)
    }

    /// Read a store from `path`. `Ok(None)` means there was no file yet.
    pub fn load(path: &Path) -> RemindrResult<Option<EventStore>> {
        codec::load(path)
    }

    // Internal:

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id() == id)
    }

    fn insert_sorted(&mut self, event: Event) {
        let index = self
            .events
            .partition_point(|existing| !event.precedes(existing));
        tracing::debug!(id = event.id(), index, "inserted event");
        self.events.insert(index, event);
    }

    fn select<F>(&self, keep: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        self.events.iter().filter(|e| keep(*e)).cloned().collect()
    }
}
