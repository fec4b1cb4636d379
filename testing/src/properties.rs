//! Property-based testing strategies using proptest.

use crate::fixtures;
use hotel_booking_core::types::{EnrollmentId, Ticket, TicketStatus, TicketType};
use proptest::prelude::*;

/// Any ticket status.
pub fn ticket_status() -> impl Strategy<Value = TicketStatus> {
    prop_oneof![Just(TicketStatus::Reserved), Just(TicketStatus::Paid)]
}

/// Any of the four ticket types.
pub fn ticket_type() -> impl Strategy<Value = TicketType> {
    (any::<bool>(), any::<bool>())
        .prop_map(|(is_remote, includes_hotel)| fixtures::ticket_type(is_remote, includes_hotel))
}

/// Any ticket held by enrollment 1.
pub fn ticket() -> impl Strategy<Value = Ticket> {
    (ticket_type(), ticket_status())
        .prop_map(|(ticket_type, status)| fixtures::ticket(ticket_type, EnrollmentId::new(1), status))
}

/// A ticket that does not allow a hotel booking.
pub fn ineligible_ticket() -> impl Strategy<Value = Ticket> {
    ticket().prop_filter("ticket must be ineligible", |t| !t.allows_hotel_booking())
}

/// A room capacity together with an occupancy at or above it.
pub fn full_room() -> impl Strategy<Value = (u32, usize)> {
    (0u32..16).prop_flat_map(|capacity| (Just(capacity), capacity as usize..capacity as usize + 8))
}

/// A room capacity together with an occupancy strictly below it.
pub fn vacant_room() -> impl Strategy<Value = (u32, usize)> {
    (1u32..16).prop_flat_map(|capacity| (Just(capacity), 0..capacity as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_ineligible_tickets_are_ineligible(ticket in ineligible_ticket()) {
            prop_assert!(!ticket.allows_hotel_booking());
        }

        #[test]
        fn prop_full_rooms_have_no_vacancy((capacity, occupied) in full_room()) {
            let room = fixtures::room(hotel_booking_core::types::RoomId::new(1), capacity);
            prop_assert!(!room.has_vacancy(occupied));
        }

        #[test]
        fn prop_vacant_rooms_have_vacancy((capacity, occupied) in vacant_room()) {
            let room = fixtures::room(hotel_booking_core::types::RoomId::new(1), capacity);
            prop_assert!(room.has_vacancy(occupied));
        }
    }
}
