//! Core types for remindr.
//!
//! This crate holds everything the CLI builds on:
//! - `Event` and `Priority`, plus the `IdAllocator` that hands out event ids
//! - `EventStore`, the priority-then-time ordered collection of events
//! - `codec` for the length-prefixed data file, and `backup` for its copies
//! - `config` for the global configuration file

pub mod backup;
pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod store;

pub use error::{RemindrError, RemindrResult};
pub use event::{Event, EventFields, EventId, EventStatus, IdAllocator, Priority};
pub use store::EventStore;
