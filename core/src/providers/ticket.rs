//! Ticket repository trait.

use crate::error::Result;
use crate::types::{EnrollmentId, Ticket};
use std::future::Future;

/// Ticket repository.
pub trait TicketRepository: Send + Sync {
    /// Find the ticket held by an enrollment, joined with its ticket type.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    fn find_ticket_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = Result<Option<Ticket>>> + Send;
}
