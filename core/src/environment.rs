//! Booking environment.
//!
//! Bundles the collaborators the booking rules need so they can be passed
//! in explicitly and swapped for in-memory versions in tests.

use crate::providers::{BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository};
use chrono::{DateTime, Utc};

/// Clock trait - abstracts time for testability.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Booking environment.
///
/// # Type Parameters
///
/// - `E`: Enrollment repository
/// - `T`: Ticket repository
/// - `R`: Room repository
/// - `B`: Booking repository
#[derive(Debug, Clone)]
pub struct BookingEnvironment<E, T, R, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    R: RoomRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Enrollment repository.
    pub enrollments: E,

    /// Ticket repository.
    pub tickets: T,

    /// Room repository.
    pub rooms: R,

    /// Booking repository (reads and writes).
    pub bookings: B,
}

impl<E, T, R, B> BookingEnvironment<E, T, R, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    R: RoomRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub const fn new(enrollments: E, tickets: T, rooms: R, bookings: B) -> Self {
        Self {
            enrollments,
            tickets,
            rooms,
            bookings,
        }
    }
}
