//! Seeded in-memory data layer for service tests.

#![allow(clippy::expect_used)] // Seeding helpers fail the test on a poisoned lock

use crate::fixtures;
use crate::mocks::test_clock;
use hotel_booking_core::environment::BookingEnvironment;
use hotel_booking_core::mocks::{
    InMemoryBookingRepository, InMemoryEnrollmentRepository, InMemoryRoomRepository,
    InMemoryTicketRepository,
};
use hotel_booking_core::types::{Booking, NewBooking, RoomId, TicketStatus, UserId};
use hotel_booking_service::{BookingService, CapacityGuard, InMemoryBookingService};
use std::sync::Arc;

/// First user id used for the occupants created by [`BookingWorld::fill_room`].
pub const OCCUPANT_BASE_ID: i32 = 10_000;

/// The four in-memory repositories, with seeding helpers.
///
/// Clones share the same data, so a world can be seeded after a service
/// was built from it.
#[derive(Debug, Clone)]
pub struct BookingWorld {
    /// Enrollment repository
    pub enrollments: InMemoryEnrollmentRepository,
    /// Ticket repository
    pub tickets: InMemoryTicketRepository,
    /// Room repository
    pub rooms: InMemoryRoomRepository,
    /// Booking repository, stamping rows with [`test_clock`]
    pub bookings: InMemoryBookingRepository,
}

impl Default for BookingWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWorld {
    /// An empty world.
    #[must_use]
    pub fn new() -> Self {
        let rooms = InMemoryRoomRepository::new();
        Self {
            enrollments: InMemoryEnrollmentRepository::new(),
            tickets: InMemoryTicketRepository::new(),
            bookings: InMemoryBookingRepository::with_clock(rooms.clone(), Arc::new(test_clock())),
            rooms,
        }
    }

    /// The repositories as a booking environment.
    #[must_use]
    pub fn environment(
        &self,
    ) -> BookingEnvironment<
        InMemoryEnrollmentRepository,
        InMemoryTicketRepository,
        InMemoryRoomRepository,
        InMemoryBookingRepository,
    > {
        BookingEnvironment::new(
            self.enrollments.clone(),
            self.tickets.clone(),
            self.rooms.clone(),
            self.bookings.clone(),
        )
    }

    /// A service over this world.
    #[must_use]
    pub fn service(&self, capacity_guard: CapacityGuard) -> InMemoryBookingService {
        BookingService::new(self.environment()).with_capacity_guard(capacity_guard)
    }

    /// Add a room.
    ///
    /// # Panics
    ///
    /// Panics if the repository lock is poisoned.
    pub fn add_room(&self, room_id: i32, capacity: u32) -> &Self {
        self.rooms
            .insert(fixtures::room(RoomId::new(room_id), capacity))
            .expect("room repository poisoned");
        self
    }

    /// Enroll a user without giving them a ticket.
    ///
    /// # Panics
    ///
    /// Panics if the repository lock is poisoned.
    pub fn add_enrollment(&self, user_id: i32) -> &Self {
        self.enrollments
            .insert(fixtures::enrollment(UserId::new(user_id)))
            .expect("enrollment repository poisoned");
        self
    }

    /// Enroll a user and give them a ticket with the given properties.
    ///
    /// # Panics
    ///
    /// Panics if a repository lock is poisoned.
    pub fn add_ticket_holder(
        &self,
        user_id: i32,
        status: TicketStatus,
        is_remote: bool,
        includes_hotel: bool,
    ) -> &Self {
        let enrollment = fixtures::enrollment(UserId::new(user_id));
        let ticket = fixtures::ticket(
            fixtures::ticket_type(is_remote, includes_hotel),
            enrollment.id,
            status,
        );
        self.enrollments
            .insert(enrollment)
            .expect("enrollment repository poisoned");
        self.tickets.insert(ticket).expect("ticket repository poisoned");
        self
    }

    /// Enroll a user with a paid, in-person, hotel-including ticket.
    pub fn add_eligible_user(&self, user_id: i32) -> &Self {
        self.add_ticket_holder(user_id, TicketStatus::Paid, false, true)
    }

    /// Book a room directly, bypassing every rule.
    ///
    /// # Panics
    ///
    /// Panics if the repository lock is poisoned.
    pub fn add_booking(&self, user_id: i32, room_id: i32) -> Booking {
        self.bookings
            .insert(NewBooking {
                room_id: RoomId::new(room_id),
                user_id: UserId::new(user_id),
            })
            .expect("booking repository poisoned")
    }

    /// Put `count` bookings of fresh occupants (ids from
    /// [`OCCUPANT_BASE_ID`]) into a room.
    ///
    /// # Panics
    ///
    /// Panics if the repository lock is poisoned.
    pub fn fill_room(&self, room_id: i32, count: usize) -> &Self {
        let room = fixtures::room(RoomId::new(room_id), 0);
        for booking in fixtures::bookings_for_room(&room, UserId::new(OCCUPANT_BASE_ID), count) {
            self.add_booking(booking.user_id.get(), room_id);
        }
        self
    }

    /// Every stored booking, ordered by id.
    ///
    /// # Panics
    ///
    /// Panics if the repository lock is poisoned.
    #[must_use]
    pub fn all_bookings(&self) -> Vec<Booking> {
        self.bookings.all().expect("booking repository poisoned")
    }

    /// Number of bookings in a room.
    #[must_use]
    pub fn occupancy(&self, room_id: i32) -> usize {
        self.all_bookings()
            .iter()
            .filter(|b| b.room_id == RoomId::new(room_id))
            .count()
    }
}
