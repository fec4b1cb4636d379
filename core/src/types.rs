//! Domain types for hotel booking eligibility.
//!
//! These mirror the records owned by the data layer. The service never
//! constructs them itself except as write payloads ([`NewBooking`],
//! [`BookingUpdate`]); everything else arrives through the repositories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw database key.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user
    UserId
);
define_id!(
    /// Identifier of an enrollment
    EnrollmentId
);
define_id!(
    /// Identifier of an enrollment address
    AddressId
);
define_id!(
    /// Identifier of a ticket
    TicketId
);
define_id!(
    /// Identifier of a ticket type
    TicketTypeId
);
define_id!(
    /// Identifier of a hotel
    HotelId
);
define_id!(
    /// Identifier of a room.
    ///
    /// `RoomId::default()` is zero, which the booking API treats as "no room
    /// given".
    RoomId
);
define_id!(
    /// Identifier of a booking
    BookingId
);

impl RoomId {
    /// Returns `true` when no room was given (the id is zero).
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

// ============================================================================
// Enrollment
// ============================================================================

/// A user's registration for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment id
    pub id: EnrollmentId,
    /// Owning user
    pub user_id: UserId,
    /// Full name
    pub name: String,
    /// Brazilian taxpayer number
    pub cpf: String,
    /// Date of birth
    pub birthday: DateTime<Utc>,
    /// Contact phone
    pub phone: String,
    /// Addresses attached to the enrollment
    #[serde(rename = "Address")]
    pub addresses: Vec<Address>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Postal address of an enrollment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address id
    pub id: AddressId,
    /// Postal code
    pub cep: String,
    /// Street
    pub street: String,
    /// City
    pub city: String,
    /// State (two-letter code)
    pub state: String,
    /// House number
    pub number: String,
    /// Neighborhood
    pub neighborhood: String,
    /// Complement, if any
    pub address_detail: Option<String>,
    /// Enrollment this address belongs to
    pub enrollment_id: EnrollmentId,
}

// ============================================================================
// Tickets
// ============================================================================

/// Payment status of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TicketStatus {
    /// Ticket reserved but not paid yet
    Reserved,
    /// Ticket paid
    Paid,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved => write!(f, "RESERVED"),
            Self::Paid => write!(f, "PAID"),
        }
    }
}

/// A category of ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Ticket type id
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Price in cents
    pub price: i64,
    /// Online-only attendance
    pub is_remote: bool,
    /// Hotel stay included
    pub includes_hotel: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// A purchased admission, joined with its [`TicketType`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket id
    pub id: TicketId,
    /// Enrollment holding the ticket
    pub enrollment_id: EnrollmentId,
    /// Payment status
    pub status: TicketStatus,
    /// Ticket type id
    pub ticket_type_id: TicketTypeId,
    /// The ticket type itself
    #[serde(rename = "TicketType")]
    pub ticket_type: TicketType,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Returns `true` if the holder may book a hotel room with this ticket.
    ///
    /// The ticket must not be merely reserved, must be for in-person
    /// attendance, and its type must include the hotel.
    #[must_use]
    pub fn allows_hotel_booking(&self) -> bool {
        self.status != TicketStatus::Reserved
            && !self.ticket_type.is_remote
            && self.ticket_type.includes_hotel
    }
}

// ============================================================================
// Rooms and bookings
// ============================================================================

/// A bookable hotel room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room id
    pub id: RoomId,
    /// Room label, e.g. "101"
    pub name: String,
    /// Maximum number of bookings
    pub capacity: u32,
    /// Hotel the room belongs to
    pub hotel_id: HotelId,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Returns `true` if one more booking fits next to `occupied` existing ones.
    #[must_use]
    pub fn has_vacancy(&self, occupied: usize) -> bool {
        below_capacity(occupied, self.capacity)
    }
}

/// Returns `true` if `occupied` bookings leave a place free under `capacity`.
#[must_use]
pub fn below_capacity(occupied: usize, capacity: u32) -> bool {
    usize::try_from(capacity).is_ok_and(|capacity| occupied < capacity)
}

/// A user's assignment to a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking id
    pub id: BookingId,
    /// Guest
    pub user_id: UserId,
    /// Booked room
    pub room_id: RoomId,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// A booking joined with its room, as returned by the per-user lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    /// The booking
    #[serde(flatten)]
    pub booking: Booking,
    /// The booked room
    #[serde(rename = "Room")]
    pub room: Room,
}

/// Payload for creating a booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// Room to book
    pub room_id: RoomId,
    /// Guest
    pub user_id: UserId,
}

/// Payload for moving an existing booking to another room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    /// Booking to update
    pub id: BookingId,
    /// New room
    pub room_id: RoomId,
    /// Guest
    pub user_id: UserId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ticket(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: TicketId::new(1),
            enrollment_id: EnrollmentId::new(1),
            status,
            ticket_type_id: TicketTypeId::new(1),
            ticket_type: TicketType {
                id: TicketTypeId::new(1),
                name: "Presencial + Hotel".to_string(),
                price: 60_000,
                is_remote,
                includes_hotel,
                created_at: now,
                updated_at: now,
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn room(capacity: u32) -> Room {
        let now = Utc::now();
        Room {
            id: RoomId::new(1),
            name: "101".to_string(),
            capacity,
            hotel_id: HotelId::new(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_room_id_zero_is_unset() {
        assert!(RoomId::default().is_unset());
        assert!(!RoomId::new(7).is_unset());
    }

    #[test]
    fn test_paid_in_person_hotel_ticket_is_eligible() {
        assert!(ticket(TicketStatus::Paid, false, true).allows_hotel_booking());
    }

    #[test]
    fn test_ineligible_tickets() {
        assert!(!ticket(TicketStatus::Reserved, false, true).allows_hotel_booking());
        assert!(!ticket(TicketStatus::Paid, true, true).allows_hotel_booking());
        assert!(!ticket(TicketStatus::Paid, false, false).allows_hotel_booking());
    }

    #[test]
    fn test_zero_capacity_room_is_always_full() {
        assert!(!room(0).has_vacancy(0));
    }

    #[test]
    fn test_ticket_serializes_with_api_field_names() {
        let json = serde_json::to_value(ticket(TicketStatus::Paid, false, true)).unwrap();
        assert_eq!(json["status"], "PAID");
        assert_eq!(json["enrollmentId"], 1);
        assert_eq!(json["TicketType"]["includesHotel"], true);
    }

    proptest! {
        #[test]
        fn prop_vacancy_iff_below_capacity(capacity in 0u32..64, occupied in 0usize..128) {
            let expected = occupied < capacity as usize;
            prop_assert_eq!(room(capacity).has_vacancy(occupied), expected);
        }

        #[test]
        fn prop_eligibility_matches_rule(paid in any::<bool>(), is_remote in any::<bool>(), includes_hotel in any::<bool>()) {
            let status = if paid { TicketStatus::Paid } else { TicketStatus::Reserved };
            let eligible = ticket(status, is_remote, includes_hotel).allows_hotel_booking();
            prop_assert_eq!(eligible, paid && !is_remote && includes_hotel);
        }
    }
}
