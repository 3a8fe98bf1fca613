//! Error types for remindr.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in remindr operations.
#[derive(Error, Debug)]
pub enum RemindrError {
    #[error("Invalid priority '{0}': expected 1 (High), 2 (Medium) or 3 (Low)")]
    InvalidPriority(String),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("An event with id {0} is already stored")]
    DuplicateId(EventId),

    #[error("No event ids left to allocate")]
    IdsExhausted,

    #[error("Event store is full ({0} events)")]
    CapacityExceeded(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for remindr operations.
pub type RemindrResult<T> = Result<T, RemindrError>;
