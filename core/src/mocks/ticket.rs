//! In-memory ticket repository.

use super::FailureSwitch;
use crate::error::{BookingError, Result};
use crate::providers::TicketRepository;
use crate::types::{EnrollmentId, Ticket};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory ticket repository, keyed by enrollment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketRepository {
    tickets: Arc<Mutex<HashMap<EnrollmentId, Ticket>>>,
    failure: FailureSwitch,
}

impl InMemoryTicketRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a ticket, replacing any previous one of the same enrollment.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Internal` if the lock is poisoned.
    pub fn insert(&self, ticket: Ticket) -> Result<()> {
        self.tickets
            .lock()
            .map_err(|_| BookingError::Internal)?
            .insert(ticket.enrollment_id, ticket);
        Ok(())
    }

    /// Failure switch for this repository.
    #[must_use]
    pub const fn failure(&self) -> &FailureSwitch {
        &self.failure
    }
}

impl TicketRepository for InMemoryTicketRepository {
    fn find_ticket_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = Result<Option<Ticket>>> + Send {
        let tickets = Arc::clone(&self.tickets);
        let failure = self.failure.clone();

        async move {
            failure.check()?;
            Ok(tickets
                .lock()
                .map_err(|_| BookingError::Internal)?
                .get(&enrollment_id)
                .cloned())
        }
    }
}
