//! Repository traits for the data the booking rules read and write.
//!
//! The service depends on these traits only. Production wires in
//! implementations backed by the database; tests and the demo use the
//! in-memory versions from [`crate::mocks`].
//!
//! Every lookup returns `Ok(None)` (or an empty `Vec`) when nothing matches.
//! `Err` is reserved for a failing data layer.

pub mod booking;
pub mod enrollment;
pub mod room;
pub mod ticket;

pub use booking::BookingRepository;
pub use enrollment::EnrollmentRepository;
pub use room::RoomRepository;
pub use ticket::TicketRepository;
