//! Error types for booking eligibility operations.

use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Every way a booking operation can fail.
///
/// The first three variants are the business outcomes a caller is expected
/// to handle. The remaining ones report a failing collaborator and are passed
/// through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    // ═══════════════════════════════════════════════════════════
    // Request Errors
    // ═══════════════════════════════════════════════════════════

    /// The request is malformed (missing or zero room id).
    #[error("Bad request")]
    BadRequest,

    /// A referenced room or booking does not exist.
    #[error("No result for this search!")]
    NotFound,

    /// The request is well formed but a booking rule forbids it: the ticket
    /// is not eligible, the room is full, or the booking belongs to someone
    /// else.
    #[error("Cannot booking this room! Overcapacity!")]
    CannotBook,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// A repository call failed.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Internal state was unusable (e.g. a poisoned lock).
    #[error("Internal error")]
    Internal,
}

impl BookingError {
    /// Stable error name, as reported to clients of the booking API.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hotel_booking_core::BookingError;
    /// assert_eq!(BookingError::CannotBook.name(), "CannotBookingError");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequestError",
            Self::NotFound => "NotFoundError",
            Self::CannotBook => "CannotBookingError",
            Self::Repository(_) => "RepositoryError",
            Self::Internal => "InternalError",
        }
    }

    /// HTTP status a transport layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::CannotBook => 403,
            Self::NotFound => 404,
            Self::Repository(_) | Self::Internal => 500,
        }
    }

    /// Returns `true` if the error is the caller's to fix, not the system's.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hotel_booking_core::BookingError;
    /// assert!(BookingError::BadRequest.is_user_error());
    /// assert!(!BookingError::Internal.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::BadRequest | Self::NotFound | Self::CannotBook)
    }
}
