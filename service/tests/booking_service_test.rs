//! Integration tests for the booking rules, run against the in-memory
//! repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use hotel_booking_core::environment::BookingEnvironment;
use hotel_booking_core::error::Result;
use hotel_booking_core::mocks::InMemoryBookingRepository;
use hotel_booking_core::providers::BookingRepository;
use hotel_booking_core::types::{Booking, BookingUpdate, BookingWithRoom, NewBooking};
use hotel_booking_core::{BookingError, BookingId, RoomId, TicketStatus, UserId};
use hotel_booking_service::{BookingService, CapacityGuard};
use hotel_booking_testing::{
    BookingCommand, BookingScenario, BookingWorld, CommandOutput, assertions, init_test_tracing,
};
use std::future::Future;

// ============================================================================
// check_enrollment_ticket
// ============================================================================

#[tokio::test]
async fn test_user_without_enrollment_cannot_book() {
    init_test_tracing();
    BookingScenario::new()
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_enrollment_without_ticket_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_enrollment(1);
        })
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_reserved_ticket_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_ticket_holder(1, TicketStatus::Reserved, false, true);
        })
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_remote_ticket_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_ticket_holder(1, TicketStatus::Paid, true, true);
        })
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_ticket_without_hotel_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_ticket_holder(1, TicketStatus::Paid, false, false);
        })
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_paid_in_person_hotel_ticket_passes() {
    BookingScenario::new()
        .given(|world| {
            world.add_eligible_user(1);
        })
        .when(BookingCommand::check_enrollment_ticket(1))
        .then_result(|result| assert_eq!(result, &Ok(CommandOutput::Eligible)))
        .run()
        .await;
}

// ============================================================================
// check_valid_booking
// ============================================================================

#[tokio::test]
async fn test_missing_room_is_not_found() {
    BookingScenario::new()
        .when(BookingCommand::check_valid_booking(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
        .run()
        .await;
}

#[tokio::test]
async fn test_full_room_cannot_be_booked() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).fill_room(1, 3);
        })
        .when(BookingCommand::check_valid_booking(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_overbooked_room_cannot_be_booked() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 2).fill_room(1, 5);
        })
        .when(BookingCommand::check_valid_booking(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_zero_capacity_room_cannot_be_booked() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 0);
        })
        .when(BookingCommand::check_valid_booking(1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_room_with_one_place_left_passes() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).fill_room(1, 2);
        })
        .when(BookingCommand::check_valid_booking(1))
        .then_result(|result| match result {
            Ok(CommandOutput::Vacant(room)) => {
                assert_eq!(room.id, RoomId::new(1));
                assert_eq!(room.capacity, 3);
            }
            other => panic!("Expected a vacant room, got {other:?}"),
        })
        .run()
        .await;
}

// ============================================================================
// get_booking
// ============================================================================

#[tokio::test]
async fn test_user_without_booking_is_not_found() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 4);
            world.add_booking(5, 1);
        })
        .when(BookingCommand::get_booking(6))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
        .run()
        .await;
}

#[tokio::test]
async fn test_user_zero_is_not_found() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 4);
            world.add_booking(5, 1);
        })
        .when(BookingCommand::get_booking(0))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
        .run()
        .await;
}

#[tokio::test]
async fn test_get_booking_returns_booking_with_room() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 4).add_room(2, 4);
            world.add_booking(4, 2);
            world.add_booking(5, 1);
        })
        .when(BookingCommand::get_booking(5))
        .then_result(|result| match result {
            Ok(CommandOutput::Found(found)) => {
                assert_eq!(found.booking.id, BookingId::new(2));
                assert_eq!(found.booking.user_id, UserId::new(5));
                assert_eq!(found.room.id, RoomId::new(1));
            }
            other => panic!("Expected the user's booking, got {other:?}"),
        })
        .run()
        .await;
}

// ============================================================================
// book_room
// ============================================================================

#[tokio::test]
async fn test_book_room_with_zero_room_id_is_bad_request() {
    BookingScenario::new()
        .when(BookingCommand::book_room(0, 0))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::BadRequest))
        .run()
        .await;
}

#[tokio::test]
async fn test_book_room_rejects_zero_room_before_any_lookup() {
    let world = BookingWorld::new();
    world.enrollments.failure().fail_with("must not be called");
    world.rooms.failure().fail_with("must not be called");

    let result = world
        .service(CapacityGuard::default())
        .book_room(UserId::new(1), RoomId::default())
        .await;

    assert_eq!(result, Err(BookingError::BadRequest));
}

#[tokio::test]
async fn test_book_room_creates_booking() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).add_eligible_user(7);
        })
        .when(BookingCommand::book_room(7, 1))
        .then_result(|result| assertions::assert_booked(result, 7, 1))
        .then_world(|world| {
            assert_eq!(world.occupancy(1), 1);
            assert_eq!(world.all_bookings()[0].user_id, UserId::new(7));
        })
        .run()
        .await;
}

#[tokio::test]
async fn test_book_full_room_fails_regardless_of_ticket() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).fill_room(1, 3).add_eligible_user(7);
        })
        .when(BookingCommand::book_room(7, 1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .then_world(|world| assert_eq!(world.occupancy(1), 3))
        .run()
        .await;
}

#[tokio::test]
async fn test_book_room_checks_ticket_before_room() {
    // The room does not exist, but the ineligible ticket is reported first.
    BookingScenario::new()
        .given(|world| {
            world.add_ticket_holder(7, TicketStatus::Reserved, false, true);
        })
        .when(BookingCommand::book_room(7, 99))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_book_missing_room_is_not_found() {
    BookingScenario::new()
        .given(|world| {
            world.add_eligible_user(7);
        })
        .when(BookingCommand::book_room(7, 99))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
        .then_world(|world| assert!(world.all_bookings().is_empty()))
        .run()
        .await;
}

#[tokio::test]
async fn test_book_room_does_not_limit_bookings_per_user() {
    // One active booking per user is assumed, not enforced.
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).add_room(2, 3).add_eligible_user(7);
            world.add_booking(7, 2);
        })
        .when(BookingCommand::book_room(7, 1))
        .then_result(|result| assertions::assert_booked(result, 7, 1))
        .then_world(|world| assert_eq!(world.all_bookings().len(), 2))
        .run()
        .await;
}

// ============================================================================
// change_booking_room
// ============================================================================

#[tokio::test]
async fn test_change_booking_with_zero_room_id_is_bad_request() {
    BookingScenario::new()
        .when(BookingCommand::change_booking_room(7, 0))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::BadRequest))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_moves_booking_and_keeps_id() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).add_room(2, 3);
            world.add_booking(7, 1);
        })
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| {
            assertions::assert_booked(result, 7, 2);
            let booking = result.as_ref().unwrap().booking().unwrap();
            assert_eq!(booking.id, BookingId::new(1));
        })
        .then_world(|world| {
            assert_eq!(world.occupancy(1), 0);
            assert_eq!(world.occupancy(2), 1);
        })
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_does_not_check_ticket() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).add_room(2, 3);
            world.add_ticket_holder(7, TicketStatus::Reserved, true, false);
            world.add_booking(7, 1);
        })
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| assertions::assert_booked(result, 7, 2))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_without_booking_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(2, 3);
        })
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_checks_room_before_booking() {
    BookingScenario::new()
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::NotFound))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_to_full_room_cannot_book() {
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 3).add_room(2, 2).fill_room(2, 2);
            world.add_booking(7, 1);
        })
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .then_world(|world| assert_eq!(world.occupancy(1), 1))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_counts_own_booking_in_target_room() {
    // Moving within a single-place room the user already holds is refused:
    // the user's own booking counts against the capacity.
    BookingScenario::new()
        .given(|world| {
            world.add_room(1, 1);
            world.add_booking(7, 1);
        })
        .when(BookingCommand::change_booking_room(7, 1))
        .then_result(|result| assertions::assert_rejected(result, &BookingError::CannotBook))
        .run()
        .await;
}

#[tokio::test]
async fn test_change_booking_with_atomic_guard() {
    BookingScenario::new()
        .with_capacity_guard(CapacityGuard::Atomic)
        .given(|world| {
            world.add_room(1, 3).add_room(2, 3);
            world.add_booking(7, 1);
        })
        .when(BookingCommand::change_booking_room(7, 2))
        .then_result(|result| assertions::assert_booked(result, 7, 2))
        .then_world(|world| assert_eq!(world.all_bookings().len(), 1))
        .run()
        .await;
}

/// Booking repository that answers every per-user lookup with the booking
/// of `owner`.
#[derive(Debug, Clone)]
struct ForeignOwnerBookings {
    inner: InMemoryBookingRepository,
    owner: UserId,
}

impl BookingRepository for ForeignOwnerBookings {
    fn find_by_room_id(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>>> + Send {
        self.inner.find_by_room_id(room_id)
    }

    fn find_by_user_id(
        &self,
        _user_id: UserId,
    ) -> impl Future<Output = Result<Option<BookingWithRoom>>> + Send {
        self.inner.find_by_user_id(self.owner)
    }

    fn create(&self, booking: NewBooking) -> impl Future<Output = Result<Booking>> + Send {
        self.inner.create(booking)
    }

    fn upsert_booking(
        &self,
        update: BookingUpdate,
    ) -> impl Future<Output = Result<Booking>> + Send {
        self.inner.upsert_booking(update)
    }

    fn create_if_vacant(
        &self,
        booking: NewBooking,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send {
        self.inner.create_if_vacant(booking, capacity)
    }

    fn upsert_if_vacant(
        &self,
        update: BookingUpdate,
        capacity: u32,
    ) -> impl Future<Output = Result<Option<Booking>>> + Send {
        self.inner.upsert_if_vacant(update, capacity)
    }
}

#[tokio::test]
async fn test_change_booking_refuses_booking_of_another_user() {
    for capacity_guard in [CapacityGuard::ReadThenWrite, CapacityGuard::Atomic] {
        let world = BookingWorld::new();
        world.add_room(1, 3).add_room(2, 3);
        world.add_booking(99, 1);
        let before = world.all_bookings();

        let env = BookingEnvironment::new(
            world.enrollments.clone(),
            world.tickets.clone(),
            world.rooms.clone(),
            ForeignOwnerBookings {
                inner: world.bookings.clone(),
                owner: UserId::new(99),
            },
        );
        let service = BookingService::new(env).with_capacity_guard(capacity_guard);

        let result = service
            .change_booking_room(UserId::new(7), RoomId::new(2))
            .await;

        assert_eq!(result, Err(BookingError::CannotBook));
        assert_eq!(world.all_bookings(), before);
        assert_eq!(world.all_bookings()[0].user_id, UserId::new(99));
        assert_eq!(world.occupancy(1), 1);
    }
}

// ============================================================================
// Repository failures
// ============================================================================

#[tokio::test]
async fn test_enrollment_lookup_failure_is_propagated() {
    let world = BookingWorld::new();
    world.add_room(1, 3).add_eligible_user(7);
    world.enrollments.failure().fail_with("connection refused");

    let result = world
        .service(CapacityGuard::default())
        .book_room(UserId::new(7), RoomId::new(1))
        .await;

    assert_eq!(
        result,
        Err(BookingError::Repository("connection refused".to_string()))
    );
}

#[tokio::test]
async fn test_booking_lookup_failure_surfaces_before_missing_room() {
    // Bookings are fetched before the room's existence is inspected.
    let world = BookingWorld::new();
    world.bookings.failure().fail_with("timeout");

    let result = world
        .service(CapacityGuard::default())
        .check_valid_booking(RoomId::new(42))
        .await;

    assert_eq!(result, Err(BookingError::Repository("timeout".to_string())));
}

#[tokio::test]
async fn test_write_failure_leaves_no_booking() {
    let world = BookingWorld::new();
    world.add_room(1, 3).add_eligible_user(7);
    let service = world.service(CapacityGuard::Atomic);
    world.bookings.failure().fail_with("read only");

    let result = service.book_room(UserId::new(7), RoomId::new(1)).await;

    assert!(matches!(result, Err(BookingError::Repository(_))));
    world.bookings.failure().recover();
    assert!(world.all_bookings().is_empty());
}
