//! # Hotel Booking Testing
//!
//! Testing utilities for the hotel booking service.
//!
//! This crate provides:
//! - A deterministic clock
//! - Fixture factories for enrollments, tickets, rooms and bookings
//! - [`BookingWorld`]: the in-memory repositories with seeding helpers
//! - [`BookingScenario`]: a Given-When-Then runner for one service call
//! - proptest strategies for tickets and room occupancy
//!
//! ## Example
//!
//! ```ignore
//! use hotel_booking_testing::{BookingScenario, BookingCommand, assertions};
//! use hotel_booking_core::BookingError;
//!
//! #[tokio::test]
//! async fn full_room_rejects_booking() {
//!     BookingScenario::new()
//!         .given(|world| {
//!             world.add_room(1, 3).fill_room(1, 3).add_eligible_user(7);
//!         })
//!         .when(BookingCommand::book_room(7, 1))
//!         .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
//!         .run()
//!         .await;
//! }
//! ```

use chrono::{DateTime, Utc};
use hotel_booking_core::environment::Clock;

pub mod fixtures;
pub mod properties;
pub mod scenario;
pub mod world;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use hotel_booking_testing::mocks::FixedClock;
    /// use hotel_booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a test-writer tracing subscriber once per test binary.
///
/// Honours `RUST_LOG`; defaults to `debug` for the booking crates.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_booking_service=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use scenario::{BookingCommand, BookingScenario, CommandOutput, assertions};
pub use world::BookingWorld;
