//! Prometheus metrics for the booking service.
//!
//! Every public service operation records:
//! - a request counter, labelled by operation
//! - a rejection counter, labelled by operation and error name
//! - a duration histogram
//!
//! Successful writes also bump `bookings_created_total` or
//! `bookings_changed_total`.
//!
//! # Example
//!
//! ```rust,no_run
//! use hotel_booking_service::metrics::MetricsServer;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.start()?;
//! println!("{}", server.render().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use hotel_booking_core::BookingError;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics recorder handle.
///
/// Installs the global recorder; the rendered text is what a scrape
/// endpoint at `addr` would serve.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a new metrics server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Socket address the scrape endpoint is meant for (e.g., `0.0.0.0:9090`)
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Register metric descriptions and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., by another test) this logs a
    /// warning and succeeds without a handle.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!(addr = %self.addr, "Metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the recorder was not installed by this server.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(
        "booking_requests_total",
        "Total number of booking service calls, by operation"
    );
    describe_counter!(
        "booking_rejections_total",
        "Total number of failed booking service calls, by operation and reason"
    );
    describe_counter!("bookings_created_total", "Total number of bookings created");
    describe_counter!(
        "bookings_changed_total",
        "Total number of bookings moved to another room"
    );
    describe_histogram!(
        "booking_operation_duration_seconds",
        "Time taken by a booking service call"
    );
}

/// Booking service operations, as metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOperation {
    /// `check_enrollment_ticket`
    CheckEnrollmentTicket,
    /// `check_valid_booking`
    CheckValidBooking,
    /// `get_booking`
    GetBooking,
    /// `book_room`
    BookRoom,
    /// `change_booking_room`
    ChangeBookingRoom,
}

impl BookingOperation {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckEnrollmentTicket => "check_enrollment_ticket",
            Self::CheckValidBooking => "check_valid_booking",
            Self::GetBooking => "get_booking",
            Self::BookRoom => "book_room",
            Self::ChangeBookingRoom => "change_booking_room",
        }
    }
}

/// Booking metrics recorder.
pub struct BookingMetrics;

impl BookingMetrics {
    /// Record a finished call.
    pub fn record_call(operation: BookingOperation, duration: Duration) {
        counter!("booking_requests_total", "operation" => operation.as_str()).increment(1);
        histogram!("booking_operation_duration_seconds", "operation" => operation.as_str())
            .record(duration.as_secs_f64());
    }

    /// Record a failed call.
    pub fn record_rejection(operation: BookingOperation, error: &BookingError) {
        counter!(
            "booking_rejections_total",
            "operation" => operation.as_str(),
            "reason" => error.name()
        )
        .increment(1);
    }

    /// Record a created booking.
    pub fn record_created() {
        counter!("bookings_created_total").increment(1);
    }

    /// Record a booking moved to another room.
    pub fn record_changed() {
        counter!("bookings_changed_total").increment(1);
    }
}
