//! Fixture factories for domain records.
//!
//! Every factory is deterministic: timestamps come from [`test_clock`] and
//! ids are derived from the arguments, so two calls with the same input
//! produce equal records.
//!
//! [`test_clock`]: crate::mocks::test_clock

use crate::mocks::test_clock;
use chrono::{DateTime, Duration, Utc};
use hotel_booking_core::environment::Clock;
use hotel_booking_core::types::{
    Address, AddressId, Booking, BookingId, Enrollment, EnrollmentId, HotelId, Room, RoomId,
    Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, UserId,
};

fn now() -> DateTime<Utc> {
    test_clock().now()
}

/// A ticket type with the given attendance and hotel flags.
#[must_use]
pub fn ticket_type(is_remote: bool, includes_hotel: bool) -> TicketType {
    let (id, name, price) = match (is_remote, includes_hotel) {
        (true, false) => (1, "Online", 10_000),
        (true, true) => (2, "Online + Hotel", 35_000),
        (false, false) => (3, "Presencial", 25_000),
        (false, true) => (4, "Presencial + Hotel", 60_000),
    };

    TicketType {
        id: TicketTypeId::new(id),
        name: name.to_string(),
        price,
        is_remote,
        includes_hotel,
        created_at: now(),
        updated_at: now(),
    }
}

/// The only ticket type that allows a hotel booking: in person, with hotel.
#[must_use]
pub fn hotel_ticket_type() -> TicketType {
    ticket_type(false, true)
}

/// A ticket of `ticket_type` held by `enrollment_id`.
#[must_use]
pub fn ticket(ticket_type: TicketType, enrollment_id: EnrollmentId, status: TicketStatus) -> Ticket {
    Ticket {
        id: TicketId::new(enrollment_id.get()),
        enrollment_id,
        status,
        ticket_type_id: ticket_type.id,
        ticket_type,
        created_at: now(),
        updated_at: now(),
    }
}

/// An enrollment of `user_id` with a single address.
///
/// The enrollment id equals the user id.
#[must_use]
pub fn enrollment(user_id: UserId) -> Enrollment {
    let id = EnrollmentId::new(user_id.get());

    Enrollment {
        id,
        user_id,
        name: format!("Guest {user_id}"),
        cpf: format!("{:011}", user_id.get().unsigned_abs()),
        birthday: now() - Duration::days(365 * 30),
        phone: "(21) 98999-9999".to_string(),
        addresses: vec![Address {
            id: AddressId::new(user_id.get()),
            cep: "20000-000".to_string(),
            street: "Rua do Ouvidor".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            number: "42".to_string(),
            neighborhood: "Centro".to_string(),
            address_detail: None,
            enrollment_id: id,
        }],
        created_at: now(),
        updated_at: now(),
    }
}

/// A room of hotel 1.
#[must_use]
pub fn room(room_id: RoomId, capacity: u32) -> Room {
    Room {
        id: room_id,
        name: format!("{}", 100 + room_id.get()),
        capacity,
        hotel_id: HotelId::new(1),
        created_at: now(),
        updated_at: now(),
    }
}

/// `count` bookings of `room`, for consecutive users starting at `first_user`.
///
/// Booking ids start at 1.
#[must_use]
pub fn bookings_for_room(room: &Room, first_user: UserId, count: usize) -> Vec<Booking> {
    (0..count)
        .map(|offset| {
            let offset = i32::try_from(offset).unwrap_or(i32::MAX);
            Booking {
                id: BookingId::new(offset.saturating_add(1)),
                user_id: UserId::new(first_user.get().saturating_add(offset)),
                room_id: room.id,
                created_at: now(),
                updated_at: now(),
            }
        })
        .collect()
}
