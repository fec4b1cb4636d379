//! Booking service - the eligibility and capacity rules.
//!
//! Each operation is a fixed sequence of repository lookups followed by
//! checks, and optionally one write:
//!
//! ```text
//! book_room(user, room)
//!   room id zero?                        → BadRequest
//!   enrollment → ticket eligible?        → CannotBook
//!   room exists?                         → NotFound
//!   bookings in room < capacity?         → CannotBook
//!   create booking
//!
//! change_booking_room(user, room)
//!   room id zero?                        → BadRequest
//!   room exists? bookings < capacity?    → NotFound / CannotBook
//!   user has a booking?                  → CannotBook
//!   move booking to room (same id)
//! ```
//!
//! The service keeps no state between calls.

use crate::config::{BookingConfig, CapacityGuard};
use crate::metrics::{BookingMetrics, BookingOperation};
use hotel_booking_core::environment::BookingEnvironment;
use hotel_booking_core::error::{BookingError, Result};
use hotel_booking_core::providers::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};
use hotel_booking_core::types::{
    Booking, BookingUpdate, BookingWithRoom, NewBooking, Room, RoomId, UserId,
};
use std::future::Future;
use std::time::Instant;

/// Booking eligibility service.
///
/// # Type Parameters
///
/// - `E`: Enrollment repository
/// - `T`: Ticket repository
/// - `R`: Room repository
/// - `B`: Booking repository
#[derive(Debug, Clone)]
pub struct BookingService<E, T, R, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    R: RoomRepository + Clone,
    B: BookingRepository + Clone,
{
    env: BookingEnvironment<E, T, R, B>,
    capacity_guard: CapacityGuard,
}

impl<E, T, R, B> BookingService<E, T, R, B>
where
    E: EnrollmentRepository + Clone,
    T: TicketRepository + Clone,
    R: RoomRepository + Clone,
    B: BookingRepository + Clone,
{
    /// Create a service using the default [`CapacityGuard::ReadThenWrite`].
    #[must_use]
    pub fn new(env: BookingEnvironment<E, T, R, B>) -> Self {
        Self {
            env,
            capacity_guard: CapacityGuard::default(),
        }
    }

    /// Create a service configured from `config`.
    #[must_use]
    pub fn from_config(env: BookingEnvironment<E, T, R, B>, config: &BookingConfig) -> Self {
        Self::new(env).with_capacity_guard(config.capacity_guard)
    }

    /// Set the capacity guard.
    #[must_use]
    pub const fn with_capacity_guard(mut self, capacity_guard: CapacityGuard) -> Self {
        self.capacity_guard = capacity_guard;
        self
    }

    /// The capacity guard in use.
    #[must_use]
    pub const fn capacity_guard(&self) -> CapacityGuard {
        self.capacity_guard
    }

    /// The injected repositories.
    #[must_use]
    pub const fn environment(&self) -> &BookingEnvironment<E, T, R, B> {
        &self.env
    }

    /// Check that the user's ticket allows a hotel booking.
    ///
    /// # Errors
    ///
    /// - `CannotBook` if the user has no enrollment, the enrollment has no
    ///   ticket, or the ticket is reserved, remote, or without hotel
    /// - `Repository` if a lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn check_enrollment_ticket(&self, user_id: UserId) -> Result<()> {
        observed(
            BookingOperation::CheckEnrollmentTicket,
            self.ensure_ticket_eligible(user_id),
        )
        .await
    }

    /// Check that the room exists and has a free place.
    ///
    /// Returns the room on success.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the room does not exist (checked first)
    /// - `CannotBook` if the room already holds `capacity` bookings
    /// - `Repository` if a lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn check_valid_booking(&self, room_id: RoomId) -> Result<Room> {
        observed(
            BookingOperation::CheckValidBooking,
            self.ensure_room_vacant(room_id),
        )
        .await
    }

    /// The user's booking, with its room.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no booking
    /// - `Repository` if the lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, user_id: UserId) -> Result<BookingWithRoom> {
        observed(BookingOperation::GetBooking, async {
            self.env
                .bookings
                .find_by_user_id(user_id)
                .await?
                .ok_or(BookingError::NotFound)
        })
        .await
    }

    /// Book a room for the user.
    ///
    /// Ticket eligibility is checked before room capacity.
    ///
    /// # Errors
    ///
    /// - `BadRequest` if `room_id` is zero
    /// - `CannotBook` if the ticket is not eligible or the room is full
    /// - `NotFound` if the room does not exist
    /// - `Repository` if a lookup or the write fails
    #[tracing::instrument(skip(self))]
    pub async fn book_room(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        observed(BookingOperation::BookRoom, async {
            if room_id.is_unset() {
                return Err(BookingError::BadRequest);
            }

            self.ensure_ticket_eligible(user_id).await?;
            let room = self.ensure_room_vacant(room_id).await?;

            let new_booking = NewBooking { room_id, user_id };
            let booking = match self.capacity_guard {
                CapacityGuard::ReadThenWrite => self.env.bookings.create(new_booking).await?,
                CapacityGuard::Atomic => self
                    .env
                    .bookings
                    .create_if_vacant(new_booking, room.capacity)
                    .await?
                    .ok_or_else(|| lost_race(user_id, room_id))?,
            };

            tracing::info!(
                booking_id = %booking.id,
                user_id = %user_id,
                room_id = %room_id,
                "Room booked"
            );
            BookingMetrics::record_created();

            Ok(booking)
        })
        .await
    }

    /// Move the user's booking to another room, keeping its id.
    ///
    /// The capacity check counts every booking of the target room, including
    /// the user's own if they already are in it.
    ///
    /// # Errors
    ///
    /// - `BadRequest` if `room_id` is zero
    /// - `NotFound` if the room does not exist
    /// - `CannotBook` if the room is full or the user has no booking
    /// - `Repository` if a lookup or the write fails
    #[tracing::instrument(skip(self))]
    pub async fn change_booking_room(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        observed(BookingOperation::ChangeBookingRoom, async {
            if room_id.is_unset() {
                return Err(BookingError::BadRequest);
            }

            let room = self.ensure_room_vacant(room_id).await?;

            let current = match self.env.bookings.find_by_user_id(user_id).await? {
                Some(current) if current.booking.user_id == user_id => current,
                Some(current) => {
                    tracing::debug!(
                        user_id = %user_id,
                        booking_id = %current.booking.id,
                        owner_id = %current.booking.user_id,
                        reason = "booking owned by another user",
                        "Booking change rejected"
                    );
                    return Err(BookingError::CannotBook);
                }
                None => {
                    tracing::debug!(user_id = %user_id, reason = "no booking", "Booking change rejected");
                    return Err(BookingError::CannotBook);
                }
            };

            let update = BookingUpdate {
                id: current.booking.id,
                room_id,
                user_id,
            };
            let booking = match self.capacity_guard {
                CapacityGuard::ReadThenWrite => self.env.bookings.upsert_booking(update).await?,
                CapacityGuard::Atomic => self
                    .env
                    .bookings
                    .upsert_if_vacant(update, room.capacity)
                    .await?
                    .ok_or_else(|| lost_race(user_id, room_id))?,
            };

            tracing::info!(
                booking_id = %booking.id,
                user_id = %user_id,
                from_room = %current.booking.room_id,
                to_room = %room_id,
                "Booking moved"
            );
            BookingMetrics::record_changed();

            Ok(booking)
        })
        .await
    }

    async fn ensure_ticket_eligible(&self, user_id: UserId) -> Result<()> {
        let Some(enrollment) = self
            .env
            .enrollments
            .find_with_address_by_user_id(user_id)
            .await?
        else {
            tracing::debug!(user_id = %user_id, reason = "no enrollment", "Booking rejected");
            return Err(BookingError::CannotBook);
        };

        match self
            .env
            .tickets
            .find_ticket_by_enrollment_id(enrollment.id)
            .await?
        {
            Some(ticket) if ticket.allows_hotel_booking() => Ok(()),
            Some(ticket) => {
                tracing::debug!(
                    user_id = %user_id,
                    ticket_id = %ticket.id,
                    status = %ticket.status,
                    is_remote = ticket.ticket_type.is_remote,
                    includes_hotel = ticket.ticket_type.includes_hotel,
                    reason = "ticket not eligible",
                    "Booking rejected"
                );
                Err(BookingError::CannotBook)
            }
            None => {
                tracing::debug!(user_id = %user_id, reason = "no ticket", "Booking rejected");
                Err(BookingError::CannotBook)
            }
        }
    }

    async fn ensure_room_vacant(&self, room_id: RoomId) -> Result<Room> {
        // Both lookups run before either result is inspected.
        let room = self.env.rooms.find_by_id(room_id).await?;
        let bookings = self.env.bookings.find_by_room_id(room_id).await?;

        let Some(room) = room else {
            tracing::debug!(room_id = %room_id, reason = "no room", "Booking rejected");
            return Err(BookingError::NotFound);
        };

        if !room.has_vacancy(bookings.len()) {
            tracing::debug!(
                room_id = %room_id,
                capacity = room.capacity,
                occupied = bookings.len(),
                reason = "room full",
                "Booking rejected"
            );
            return Err(BookingError::CannotBook);
        }

        Ok(room)
    }
}

fn lost_race(user_id: UserId, room_id: RoomId) -> BookingError {
    tracing::warn!(
        user_id = %user_id,
        room_id = %room_id,
        "Room filled up between capacity check and write"
    );
    BookingError::CannotBook
}

async fn observed<O, F>(operation: BookingOperation, call: F) -> Result<O>
where
    F: Future<Output = Result<O>>,
{
    let started = Instant::now();
    let result = call.await;
    BookingMetrics::record_call(operation, started.elapsed());

    if let Err(error) = &result {
        BookingMetrics::record_rejection(operation, error);
        if !error.is_user_error() {
            tracing::error!(
                operation = operation.as_str(),
                error = %error,
                "Booking call failed"
            );
        }
    }

    result
}
