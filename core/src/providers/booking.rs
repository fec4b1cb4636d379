//! Booking repository trait.

use crate::error::Result;
use crate::types::{Booking, BookingUpdate, BookingWithRoom, NewBooking, RoomId, UserId};
use std::future::Future;

/// Booking repository.
///
/// The plain write methods (`create`, `upsert_booking`) do not look at room
/// capacity. The `*_if_vacant` variants must count the room's bookings and
/// write in one atomic step, e.g. inside a serializable transaction or
/// behind a single lock.
pub trait BookingRepository: Send + Sync {
    /// All bookings of a room.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    fn find_by_room_id(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>>> + Send;

    /// The booking of a user, joined with its room.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<BookingWithRoom>>> + Send;

    /// Create a booking.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying insert fails.
    fn create(&self, booking: NewBooking) -> impl Future<Output = Result<Booking>> + Send;

    /// Update the booking with `update.id`, or create it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying write fails.
    fn upsert_booking(&self, update: BookingUpdate)
    -> impl Future<Output = Result<Booking>> + Send;

    /// Create a booking only if the room holds fewer than `capacity` bookings.
    ///
    /// # Returns
    ///
    /// `None` if the room was full at write time.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying write fails.
    fn create_if_vacant(
        &self,
        booking: NewBooking,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send;

    /// Upsert a booking only if the target room holds fewer than `capacity`
    /// bookings.
    ///
    /// # Returns
    ///
    /// `None` if the room was full at write time.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying write fails.
    fn upsert_if_vacant(
        &self,
        update: BookingUpdate,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send;
}
