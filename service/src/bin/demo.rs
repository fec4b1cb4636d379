//! Hotel Booking Demo
//!
//! Walks through the booking rules against in-memory repositories:
//! - A paid, in-person guest books a room
//! - A remote guest is refused
//! - The first guest moves to another room
//! - A booking into a full room is refused
//!
//! Every result is printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! BOOKING_CAPACITY_GUARD=atomic METRICS_ENABLED=true cargo run --bin demo
//! ```

use chrono::Utc;
use hotel_booking_core::environment::BookingEnvironment;
use hotel_booking_core::mocks::{
    InMemoryBookingRepository, InMemoryEnrollmentRepository, InMemoryRoomRepository,
    InMemoryTicketRepository,
};
use hotel_booking_core::types::{
    Address, AddressId, Enrollment, EnrollmentId, HotelId, Room, RoomId, Ticket, TicketId,
    TicketStatus, TicketType, TicketTypeId, UserId,
};
use hotel_booking_service::metrics::MetricsServer;
use hotel_booking_service::{BookingConfig, BookingService, Result as BookingResult};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = BookingConfig::from_env();
    config.validate()?;

    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut metrics = None;
    if config.metrics.enabled {
        let mut server = MetricsServer::new(config.metrics_addr()?);
        server.start()?;
        metrics = Some(server);
    }

    println!("\n============================================");
    println!("   Hotel Booking - Demo");
    println!("   Capacity guard: {}", config.capacity_guard);
    println!("============================================\n");

    let rooms = InMemoryRoomRepository::new();
    let enrollments = InMemoryEnrollmentRepository::new();
    let tickets = InMemoryTicketRepository::new();
    let bookings = InMemoryBookingRepository::new(rooms.clone());

    rooms.insert(room(1, "101", 1))?;
    rooms.insert(room(2, "102", 2))?;

    // Guest 1: paid, in person, hotel included
    enrollments.insert(enrollment(1, "Ana Souza"))?;
    tickets.insert(ticket(1, TicketStatus::Paid, false, true))?;
    // Guest 2: paid, remote
    enrollments.insert(enrollment(2, "Bruno Lima"))?;
    tickets.insert(ticket(2, TicketStatus::Paid, true, false))?;
    // Guest 3: paid, in person, hotel included
    enrollments.insert(enrollment(3, "Carla Dias"))?;
    tickets.insert(ticket(3, TicketStatus::Paid, false, true))?;

    let service = BookingService::from_config(
        BookingEnvironment::new(enrollments, tickets, rooms, bookings),
        &config,
    );

    println!("1. Guest 1 books room 101");
    print_result(&service.book_room(UserId::new(1), RoomId::new(1)).await)?;

    println!("2. Guest 2 (remote ticket) books room 102");
    print_result(&service.book_room(UserId::new(2), RoomId::new(2)).await)?;

    println!("3. Guest 1 moves to room 102");
    print_result(&service.change_booking_room(UserId::new(1), RoomId::new(2)).await)?;

    println!("4. Guest 1 looks up their booking");
    print_result(&service.get_booking(UserId::new(1)).await)?;

    println!("5. Guest 3 books room 101, now free again");
    print_result(&service.book_room(UserId::new(3), RoomId::new(1)).await)?;

    println!("6. Guest 1 tries to move back to the full room 101");
    print_result(&service.change_booking_room(UserId::new(1), RoomId::new(1)).await)?;

    if let Some(rendered) = metrics.as_ref().and_then(MetricsServer::render) {
        println!("Metrics:\n{rendered}");
    }

    Ok(())
}

fn print_result<T: Serialize>(result: &BookingResult<T>) -> anyhow::Result<()> {
    let json = match result {
        Ok(value) => serde_json::to_string_pretty(value)?,
        Err(error) => serde_json::to_string_pretty(&serde_json::json!({
            "name": error.name(),
            "status": error.status_code(),
            "message": error.to_string(),
        }))?,
    };
    println!("{json}\n");
    Ok(())
}

fn room(id: i32, name: &str, capacity: u32) -> Room {
    let now = Utc::now();
    Room {
        id: RoomId::new(id),
        name: name.to_string(),
        capacity,
        hotel_id: HotelId::new(1),
        created_at: now,
        updated_at: now,
    }
}

fn enrollment(user_id: i32, name: &str) -> Enrollment {
    let now = Utc::now();
    Enrollment {
        id: EnrollmentId::new(user_id),
        user_id: UserId::new(user_id),
        name: name.to_string(),
        cpf: format!("000.000.000-{user_id:02}"),
        birthday: now,
        phone: "(21) 99999-0000".to_string(),
        addresses: vec![Address {
            id: AddressId::new(user_id),
            cep: "20000-000".to_string(),
            street: "Rua das Flores".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            number: "10".to_string(),
            neighborhood: "Centro".to_string(),
            address_detail: None,
            enrollment_id: EnrollmentId::new(user_id),
        }],
        created_at: now,
        updated_at: now,
    }
}

fn ticket(enrollment_id: i32, status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Ticket {
    let now = Utc::now();
    let ticket_type = TicketType {
        id: TicketTypeId::new(enrollment_id),
        name: if is_remote { "Online" } else { "Presencial" }.to_string(),
        price: if includes_hotel { 60_000 } else { 25_000 },
        is_remote,
        includes_hotel,
        created_at: now,
        updated_at: now,
    };
    Ticket {
        id: TicketId::new(enrollment_id),
        enrollment_id: EnrollmentId::new(enrollment_id),
        status,
        ticket_type_id: ticket_type.id,
        ticket_type,
        created_at: now,
        updated_at: now,
    }
}
