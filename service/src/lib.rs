//! # Hotel Booking Service
//!
//! Decides whether a user may reserve, or move, a hotel room tied to their
//! event ticket.
//!
//! - [`BookingService`]: the rules, generic over the repositories
//! - [`config`]: environment-driven configuration, including the
//!   [`CapacityGuard`] that picks how capacity is enforced on write
//! - [`metrics`]: Prometheus counters and histograms for every call
//!
//! ## Example
//!
//! ```
//! use hotel_booking_service::{in_memory_service, BookingError, RoomId, UserId};
//!
//! # tokio_test::block_on(async {
//! let service = in_memory_service();
//! let result = service.book_room(UserId::new(1), RoomId::default()).await;
//! assert_eq!(result, Err(BookingError::BadRequest));
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod metrics;
pub mod service;

pub use config::{BookingConfig, CapacityGuard, ConfigError};
pub use hotel_booking_core::{BookingError, Result, RoomId, UserId};
pub use service::BookingService;

use hotel_booking_core::environment::BookingEnvironment;
use hotel_booking_core::mocks::{
    InMemoryBookingRepository, InMemoryEnrollmentRepository, InMemoryRoomRepository,
    InMemoryTicketRepository,
};

/// Booking service over the in-memory repositories.
pub type InMemoryBookingService = BookingService<
    InMemoryEnrollmentRepository,
    InMemoryTicketRepository,
    InMemoryRoomRepository,
    InMemoryBookingRepository,
>;

/// A booking service over fresh, empty in-memory repositories.
#[must_use]
pub fn in_memory_service() -> InMemoryBookingService {
    let rooms = InMemoryRoomRepository::new();
    BookingService::new(BookingEnvironment::new(
        InMemoryEnrollmentRepository::new(),
        InMemoryTicketRepository::new(),
        rooms.clone(),
        InMemoryBookingRepository::new(rooms),
    ))
}
