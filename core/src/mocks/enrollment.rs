//! In-memory enrollment repository.

use super::FailureSwitch;
use crate::error::{BookingError, Result};
use crate::providers::EnrollmentRepository;
use crate::types::{Enrollment, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory enrollment repository, keyed by owning user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: Arc<Mutex<HashMap<UserId, Enrollment>>>,
    failure: FailureSwitch,
}

impl InMemoryEnrollmentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an enrollment, replacing any previous one of the same user.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Internal` if the lock is poisoned.
    pub fn insert(&self, enrollment: Enrollment) -> Result<()> {
        self.enrollments
            .lock()
            .map_err(|_| BookingError::Internal)?
            .insert(enrollment.user_id, enrollment);
        Ok(())
    }

    /// Failure switch for this repository.
    #[must_use]
    pub const fn failure(&self) -> &FailureSwitch {
        &self.failure
    }
}

impl EnrollmentRepository for InMemoryEnrollmentRepository {
    fn find_with_address_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Enrollment>>> + Send {
        let enrollments = Arc::clone(&self.enrollments);
        let failure = self.failure.clone();

        async move {
            failure.check()?;
            Ok(enrollments
                .lock()
                .map_err(|_| BookingError::Internal)?
                .get(&user_id)
                .cloned())
        }
    }
}
