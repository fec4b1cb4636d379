//! In-memory booking repository.

use super::{FailureSwitch, InMemoryRoomRepository};
use crate::environment::{Clock, SystemClock};
use crate::error::{BookingError, Result};
use crate::providers::BookingRepository;
use crate::types::{
    Booking, BookingId, BookingUpdate, BookingWithRoom, NewBooking, RoomId, UserId, below_capacity,
};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct BookingTable {
    rows: BTreeMap<BookingId, Booking>,
    last_id: i32,
}

impl BookingTable {
    fn occupancy(&self, room_id: RoomId) -> usize {
        self.rows.values().filter(|b| b.room_id == room_id).count()
    }

    fn insert(&mut self, booking: NewBooking, clock: &dyn Clock) -> Booking {
        self.last_id += 1;
        let now = clock.now();
        let row = Booking {
            id: BookingId::new(self.last_id),
            user_id: booking.user_id,
            room_id: booking.room_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(row.id, row.clone());
        row
    }

    fn upsert(&mut self, update: BookingUpdate, clock: &dyn Clock) -> Booking {
        let now = clock.now();
        let row = self
            .rows
            .entry(update.id)
            .and_modify(|row| {
                row.room_id = update.room_id;
                row.user_id = update.user_id;
                row.updated_at = now;
            })
            .or_insert_with(|| Booking {
                id: update.id,
                user_id: update.user_id,
                room_id: update.room_id,
                created_at: now,
                updated_at: now,
            })
            .clone();
        self.last_id = self.last_id.max(update.id.get());
        row
    }
}

/// In-memory booking repository.
///
/// Joins bookings with rooms from the [`InMemoryRoomRepository`] it was
/// built with. Ids are assigned sequentially from 1; timestamps come from the
/// injected [`Clock`].
#[derive(Clone)]
pub struct InMemoryBookingRepository {
    table: Arc<Mutex<BookingTable>>,
    rooms: InMemoryRoomRepository,
    clock: Arc<dyn Clock>,
    failure: FailureSwitch,
}

impl fmt::Debug for InMemoryBookingRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBookingRepository")
            .field("table", &self.table)
            .field("rooms", &self.rooms)
            .finish_non_exhaustive()
    }
}

impl InMemoryBookingRepository {
    /// Create an empty repository using the system clock.
    #[must_use]
    pub fn new(rooms: InMemoryRoomRepository) -> Self {
        Self::with_clock(rooms, Arc::new(SystemClock))
    }

    /// Create an empty repository stamping rows with `clock`.
    #[must_use]
    pub fn with_clock(rooms: InMemoryRoomRepository, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Arc::new(Mutex::new(BookingTable::default())),
            rooms,
            clock,
            failure: FailureSwitch::default(),
        }
    }

    /// Seed a booking directly, bypassing every rule.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Internal` if the lock is poisoned.
    pub fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let mut table = self.table.lock().map_err(|_| BookingError::Internal)?;
        Ok(table.insert(booking, self.clock.as_ref()))
    }

    /// Snapshot of every stored booking, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Internal` if the lock is poisoned.
    pub fn all(&self) -> Result<Vec<Booking>> {
        Ok(self
            .table
            .lock()
            .map_err(|_| BookingError::Internal)?
            .rows
            .values()
            .cloned()
            .collect())
    }

    /// Failure switch for this repository.
    #[must_use]
    pub const fn failure(&self) -> &FailureSwitch {
        &self.failure
    }

    fn find_for_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        let booking = self
            .table
            .lock()
            .map_err(|_| BookingError::Internal)?
            .rows
            .values()
            .find(|b| b.user_id == user_id)
            .cloned();

        let Some(booking) = booking else {
            return Ok(None);
        };

        let room = self.rooms.get(booking.room_id)?.ok_or_else(|| {
            BookingError::Repository(format!(
                "booking {} references missing room {}",
                booking.id, booking.room_id
            ))
        })?;

        Ok(Some(BookingWithRoom { booking, room }))
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn find_by_room_id(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>>> + Send {
        let table = Arc::clone(&self.table);
        let failure = self.failure.clone();

        async move {
            failure.check()?;
            Ok(table
                .lock()
                .map_err(|_| BookingError::Internal)?
                .rows
                .values()
                .filter(|b| b.room_id == room_id)
                .cloned()
                .collect())
        }
    }

    fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<BookingWithRoom>>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            repository.find_for_user(user_id)
        }
    }

    fn create(&self, booking: NewBooking) -> impl Future<Output = Result<Booking>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            repository.insert(booking)
        }
    }

    fn upsert_booking(
        &self,
        update: BookingUpdate,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            let mut table = repository
                .table
                .lock()
                .map_err(|_| BookingError::Internal)?;
            Ok(table.upsert(update, repository.clock.as_ref()))
        }
    }

    fn create_if_vacant(
        &self,
        booking: NewBooking,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            let mut table = repository
                .table
                .lock()
                .map_err(|_| BookingError::Internal)?;

            // Count and insert under the same guard.
            if !below_capacity(table.occupancy(booking.room_id), capacity) {
                return Ok(None);
            }
            Ok(Some(table.insert(booking, repository.clock.as_ref())))
        }
    }

    fn upsert_if_vacant(
        &self,
        update: BookingUpdate,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            let mut table = repository
                .table
                .lock()
                .map_err(|_| BookingError::Internal)?;

            if !below_capacity(table.occupancy(update.room_id), capacity) {
                return Ok(None);
            }
            Ok(Some(table.upsert(update, repository.clock.as_ref())))
        }
    }
}
