//! In-memory room repository.

use super::FailureSwitch;
use crate::error::{BookingError, Result};
use crate::providers::RoomRepository;
use crate::types::{Room, RoomId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory room repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomRepository {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
    failure: FailureSwitch,
}

impl InMemoryRoomRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a room.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Internal` if the lock is poisoned.
    pub fn insert(&self, room: Room) -> Result<()> {
        self.rooms
            .lock()
            .map_err(|_| BookingError::Internal)?
            .insert(room.id, room);
        Ok(())
    }

    /// Synchronous lookup used by the booking repository to join rooms.
    pub(crate) fn get(&self, room_id: RoomId) -> Result<Option<Room>> {
        Ok(self
            .rooms
            .lock()
            .map_err(|_| BookingError::Internal)?
            .get(&room_id)
            .cloned())
    }

    /// Failure switch for this repository.
    #[must_use]
    pub const fn failure(&self) -> &FailureSwitch {
        &self.failure
    }
}

impl RoomRepository for InMemoryRoomRepository {
    fn find_by_id(&self, room_id: RoomId) -> impl Future<Output = Result<Option<Room>>> + Send {
        let repository = self.clone();

        async move {
            repository.failure.check()?;
            repository.get(room_id)
        }
    }
}
