//! Room repository trait.

use crate::error::Result;
use crate::types::{Room, RoomId};
use std::future::Future;

/// Room repository.
pub trait RoomRepository: Send + Sync {
    /// Find a room by id.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    fn find_by_id(&self, room_id: RoomId) -> impl Future<Output = Result<Option<Room>>> + Send;
}
