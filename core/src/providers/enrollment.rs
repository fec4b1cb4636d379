//! Enrollment repository trait.

use crate::error::Result;
use crate::types::{Enrollment, UserId};
use std::future::Future;

/// Enrollment repository.
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment of a user, with its addresses.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    fn find_with_address_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Enrollment>>> + Send;
}
