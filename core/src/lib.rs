//! # Hotel Booking Core
//!
//! Domain types, errors and repository traits for hotel booking eligibility.
//!
//! A user may hold a hotel room only when their event ticket is paid, for
//! in-person attendance and includes the hotel, and only while the room has
//! fewer bookings than its capacity. This crate describes the data those
//! rules read; `hotel-booking-service` applies them.
//!
//! ## Core Concepts
//!
//! - **Types**: `Enrollment`, `Ticket`, `TicketType`, `Room`, `Booking`
//! - **Providers**: one repository trait per kind of record
//! - **Environment**: the four repositories, injected together
//! - **Mocks**: in-memory repositories (`test-utils` feature, on by default)
//!
//! ## Example
//!
//! ```
//! use hotel_booking_core::environment::BookingEnvironment;
//! use hotel_booking_core::mocks::{
//!     InMemoryBookingRepository, InMemoryEnrollmentRepository, InMemoryRoomRepository,
//!     InMemoryTicketRepository,
//! };
//!
//! let rooms = InMemoryRoomRepository::new();
//! let env = BookingEnvironment::new(
//!     InMemoryEnrollmentRepository::new(),
//!     InMemoryTicketRepository::new(),
//!     rooms.clone(),
//!     InMemoryBookingRepository::new(rooms),
//! );
//! # let _ = env;
//! ```

#![forbid(unsafe_code)]

pub mod environment;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod providers;
pub mod types;

pub use environment::{BookingEnvironment, Clock, SystemClock};
pub use error::{BookingError, Result};
pub use providers::{BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository};
pub use types::*;
