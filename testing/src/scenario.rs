//! Given-When-Then scenarios for the booking service.
//!
//! ```ignore
//! use hotel_booking_testing::{BookingScenario, BookingCommand, assertions};
//!
//! BookingScenario::new()
//!     .given(|world| {
//!         world.add_room(1, 3).add_eligible_user(7);
//!     })
//!     .when(BookingCommand::book_room(7, 1))
//!     .then_result(|result| assertions::assert_booked(result, 7, 1))
//!     .then_world(|world| assert_eq!(world.occupancy(1), 1))
//!     .run()
//!     .await;
//! ```

#![allow(clippy::module_name_repetitions)] // BookingScenario is the natural name

use crate::world::BookingWorld;
use hotel_booking_core::error::Result;
use hotel_booking_core::types::{Booking, BookingWithRoom, Room, RoomId, UserId};
use hotel_booking_service::CapacityGuard;

/// A service call to run in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingCommand {
    /// `check_enrollment_ticket`
    CheckEnrollmentTicket {
        /// Requesting user
        user_id: UserId,
    },
    /// `check_valid_booking`
    CheckValidBooking {
        /// Room to check
        room_id: RoomId,
    },
    /// `get_booking`
    GetBooking {
        /// Requesting user
        user_id: UserId,
    },
    /// `book_room`
    BookRoom {
        /// Requesting user
        user_id: UserId,
        /// Room to book
        room_id: RoomId,
    },
    /// `change_booking_room`
    ChangeBookingRoom {
        /// Requesting user
        user_id: UserId,
        /// New room
        room_id: RoomId,
    },
}

impl BookingCommand {
    /// `book_room(user_id, room_id)`
    #[must_use]
    pub const fn book_room(user_id: i32, room_id: i32) -> Self {
        Self::BookRoom {
            user_id: UserId::new(user_id),
            room_id: RoomId::new(room_id),
        }
    }

    /// `change_booking_room(user_id, room_id)`
    #[must_use]
    pub const fn change_booking_room(user_id: i32, room_id: i32) -> Self {
        Self::ChangeBookingRoom {
            user_id: UserId::new(user_id),
            room_id: RoomId::new(room_id),
        }
    }

    /// `check_enrollment_ticket(user_id)`
    #[must_use]
    pub const fn check_enrollment_ticket(user_id: i32) -> Self {
        Self::CheckEnrollmentTicket {
            user_id: UserId::new(user_id),
        }
    }

    /// `check_valid_booking(room_id)`
    #[must_use]
    pub const fn check_valid_booking(room_id: i32) -> Self {
        Self::CheckValidBooking {
            room_id: RoomId::new(room_id),
        }
    }

    /// `get_booking(user_id)`
    #[must_use]
    pub const fn get_booking(user_id: i32) -> Self {
        Self::GetBooking {
            user_id: UserId::new(user_id),
        }
    }
}

/// What a successful command returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// The ticket check passed
    Eligible,
    /// The room check passed
    Vacant(Room),
    /// The user's booking
    Found(BookingWithRoom),
    /// A created or moved booking
    Booked(Booking),
}

impl CommandOutput {
    /// The booking carried by the output, if any.
    #[must_use]
    pub const fn booking(&self) -> Option<&Booking> {
        match self {
            Self::Found(found) => Some(&found.booking),
            Self::Booked(booking) => Some(booking),
            Self::Eligible | Self::Vacant(_) => None,
        }
    }
}

/// Type alias for world setup functions
type Setup = Box<dyn FnOnce(&BookingWorld)>;

/// Type alias for result assertion functions
type ResultAssertion = Box<dyn FnOnce(&Result<CommandOutput>)>;

/// Type alias for world assertion functions
type WorldAssertion = Box<dyn FnOnce(&BookingWorld)>;

/// Fluent Given-When-Then test for one booking service call.
pub struct BookingScenario {
    world: BookingWorld,
    capacity_guard: CapacityGuard,
    setups: Vec<Setup>,
    command: Option<BookingCommand>,
    result_assertions: Vec<ResultAssertion>,
    world_assertions: Vec<WorldAssertion>,
}

impl Default for BookingScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingScenario {
    /// Create a scenario over an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            world: BookingWorld::new(),
            capacity_guard: CapacityGuard::default(),
            setups: Vec::new(),
            command: None,
            result_assertions: Vec::new(),
            world_assertions: Vec::new(),
        }
    }

    /// Use a specific capacity guard.
    #[must_use]
    pub const fn with_capacity_guard(mut self, capacity_guard: CapacityGuard) -> Self {
        self.capacity_guard = capacity_guard;
        self
    }

    /// Seed the world (Given)
    #[must_use]
    pub fn given<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&BookingWorld) + 'static,
    {
        self.setups.push(Box::new(setup));
        self
    }

    /// Set the command to run (When)
    #[must_use]
    pub const fn when(mut self, command: BookingCommand) -> Self {
        self.command = Some(command);
        self
    }

    /// Add an assertion about the command result (Then)
    #[must_use]
    pub fn then_result<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Result<CommandOutput>) + 'static,
    {
        self.result_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the world after the command (Then)
    #[must_use]
    pub fn then_world<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&BookingWorld) + 'static,
    {
        self.world_assertions.push(Box::new(assertion));
        self
    }

    /// Run the scenario and execute all assertions.
    ///
    /// # Panics
    ///
    /// Panics if no command was set with `when()`, or if any assertion fails.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub async fn run(self) {
        for setup in self.setups {
            setup(&self.world);
        }

        let command = self.command.expect("Command must be set with when()");
        let service = self.world.service(self.capacity_guard);

        let result = match command {
            BookingCommand::CheckEnrollmentTicket { user_id } => service
                .check_enrollment_ticket(user_id)
                .await
                .map(|()| CommandOutput::Eligible),
            BookingCommand::CheckValidBooking { room_id } => service
                .check_valid_booking(room_id)
                .await
                .map(CommandOutput::Vacant),
            BookingCommand::GetBooking { user_id } => {
                service.get_booking(user_id).await.map(CommandOutput::Found)
            }
            BookingCommand::BookRoom { user_id, room_id } => service
                .book_room(user_id, room_id)
                .await
                .map(CommandOutput::Booked),
            BookingCommand::ChangeBookingRoom { user_id, room_id } => service
                .change_booking_room(user_id, room_id)
                .await
                .map(CommandOutput::Booked),
        };

        for assertion in self.result_assertions {
            assertion(&result);
        }

        for assertion in self.world_assertions {
            assertion(&self.world);
        }
    }
}

/// Helper assertions for command results
pub mod assertions {
    use super::CommandOutput;
    use hotel_booking_core::error::{BookingError, Result};
    use hotel_booking_core::types::{RoomId, UserId};

    /// Assert that the command failed with `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the command succeeded or failed with another error.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_rejected(result: &Result<CommandOutput>, expected: &BookingError) {
        match result {
            Err(error) => assert_eq!(error, expected, "Rejected with the wrong error"),
            Ok(output) => panic!("Expected {expected:?}, but the command returned {output:?}"),
        }
    }

    /// Assert that the command succeeded.
    ///
    /// # Panics
    ///
    /// Panics if the command failed.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_accepted(result: &Result<CommandOutput>) {
        if let Err(error) = result {
            panic!("Expected success, but the command failed with {error:?}");
        }
    }

    /// Assert that the command returned a booking of `user_id` in `room_id`.
    ///
    /// # Panics
    ///
    /// Panics if the command failed or returned no matching booking.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_booked(result: &Result<CommandOutput>, user_id: i32, room_id: i32) {
        let booking = match result {
            Ok(output) => output
                .booking()
                .unwrap_or_else(|| panic!("Expected a booking, got {output:?}")),
            Err(error) => panic!("Expected a booking, but the command failed with {error:?}"),
        };
        assert_eq!(booking.user_id, UserId::new(user_id));
        assert_eq!(booking.room_id, RoomId::new(room_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_booking_core::error::BookingError;

    #[tokio::test]
    async fn test_scenario_runs_setup_command_and_assertions() {
        BookingScenario::new()
            .given(|world| {
                world.add_room(1, 3).add_eligible_user(7);
            })
            .when(BookingCommand::book_room(7, 1))
            .then_result(|result| assertions::assert_booked(result, 7, 1))
            .then_world(|world| assert_eq!(world.occupancy(1), 1))
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_scenario_reports_rejections() {
        BookingScenario::new()
            .when(BookingCommand::check_valid_booking(9))
            .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
            .run()
            .await;
    }

    #[test]
    fn test_command_output_booking() {
        assert!(CommandOutput::Eligible.booking().is_none());
    }
}
