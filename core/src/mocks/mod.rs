//! In-memory repository implementations.
//!
//! Simple, lock-protected versions of every repository trait for unit and
//! integration tests and for the demo binary. Each repository is a cheap
//! shared handle: clones see the same data.

use crate::error::{BookingError, Result};
use std::sync::{Arc, Mutex};

pub mod booking;
pub mod enrollment;
pub mod room;
pub mod ticket;

pub use booking::InMemoryBookingRepository;
pub use enrollment::InMemoryEnrollmentRepository;
pub use room::InMemoryRoomRepository;
pub use ticket::InMemoryTicketRepository;

/// Switch that makes a repository fail every call while it is set.
///
/// Used to check that data-layer errors reach the caller unchanged.
#[derive(Debug, Clone, Default)]
pub struct FailureSwitch {
    message: Arc<Mutex<Option<String>>>,
}

impl FailureSwitch {
    /// Fail every following call with `BookingError::Repository(message)`.
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.message.lock() {
            *guard = Some(message.into());
        }
    }

    /// Stop failing.
    pub fn recover(&self) {
        if let Ok(mut guard) = self.message.lock() {
            *guard = None;
        }
    }

    /// Returns the configured error, if any.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Repository` while the switch is set, and
    /// `BookingError::Internal` if the lock is poisoned.
    pub fn check(&self) -> Result<()> {
        match self
            .message
            .lock()
            .map_err(|_| BookingError::Internal)?
            .as_ref()
        {
            Some(message) => Err(BookingError::Repository(message.clone())),
            None => Ok(()),
        }
    }
}
