//! Configuration management for the booking service.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors from configuration validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// Metrics are enabled but no port is set.
    #[error("METRICS_PORT must be non-zero when metrics are enabled")]
    MissingMetricsPort,
}

/// How the room capacity rule is enforced when a booking is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityGuard {
    /// Count the room's bookings, compare, then write in a separate call.
    ///
    /// Two concurrent requests for the last place can both pass the count
    /// and both be written.
    #[default]
    ReadThenWrite,

    /// Count and write in one repository call that the repository makes
    /// atomic (`create_if_vacant` / `upsert_if_vacant`).
    Atomic,
}

impl FromStr for CapacityGuard {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read-then-write" | "read_then_write" => Ok(Self::ReadThenWrite),
            "atomic" => Ok(Self::Atomic),
            _ => Err(ConfigError::InvalidValue {
                key: "BOOKING_CAPACITY_GUARD",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CapacityGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadThenWrite => write!(f, "read-then-write"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// Booking service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Capacity enforcement strategy
    pub capacity_guard: CapacityGuard,
    /// Tracing filter directives, e.g. `info,hotel_booking_service=debug`
    pub log_level: String,
    /// Prometheus metrics exporter
    pub metrics: MetricsConfig,
}

/// Metrics exporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder
    pub enabled: bool,
    /// Metrics server host (for Prometheus scraping)
    pub host: String,
    /// Metrics server port
    pub port: u16,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            capacity_guard: CapacityGuard::default(),
            log_level: "info,hotel_booking_service=debug".to_string(),
            metrics: MetricsConfig {
                enabled: false,
                host: "0.0.0.0".to_string(),
                port: 9090,
            },
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults; call
    /// [`validate`](Self::validate) to reject an unusable combination.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            capacity_guard: lookup("BOOKING_CAPACITY_GUARD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.capacity_guard),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.metrics.enabled),
                host: lookup("METRICS_HOST").unwrap_or(defaults.metrics.host),
                port: lookup("METRICS_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.metrics.port),
            },
        }
    }

    /// Set the capacity guard.
    #[must_use]
    pub const fn with_capacity_guard(mut self, capacity_guard: CapacityGuard) -> Self {
        self.capacity_guard = capacity_guard;
        self
    }

    /// Enable or disable the metrics exporter.
    #[must_use]
    pub const fn with_metrics_enabled(mut self, enabled: bool) -> Self {
        self.metrics.enabled = enabled;
        self
    }

    /// Check the configuration for unusable combinations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingMetricsPort` if metrics are enabled on
    /// port 0, or `ConfigError::InvalidValue` if the log filter does not
    /// parse or the metrics host does not form a socket address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_filter()?;
        if self.metrics.enabled {
            if self.metrics.port == 0 {
                return Err(ConfigError::MissingMetricsPort);
            }
            self.metrics_addr()?;
        }
        Ok(())
    }

    /// Tracing filter built from `log_level`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the directives do not parse.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_level).map_err(|_| ConfigError::InvalidValue {
            key: "RUST_LOG",
            value: self.log_level.clone(),
        })
    }

    /// Socket address of the metrics exporter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if host and port do not parse.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.metrics.host, self.metrics.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "METRICS_HOST",
            value: raw,
        })
    }
}
