//! Kiosk configuration loaded from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("At least one seat area is required")]
    NoAreas,
    #[error("Seats per area must be positive")]
    NoSeats,
    #[error("Initial occupancy must be within [0, 1], got {0}")]
    OccupancyOutOfRange(f64),
    #[error("Simulation period must be positive")]
    ZeroPeriod,
    #[error("Channel buffer must be positive")]
    ZeroBuffer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Shown on the kiosk header next to the QR code
    pub property_name: String,
    pub seat_areas: Vec<String>,
    pub seats_per_area: usize,
    /// Share of seats occupied at start-up
    pub initial_occupancy: f64,
    pub simulation_enabled: bool,
    pub simulation_period: Duration,
    /// Fixed seed for the occupancy RNG; `None` draws from entropy
    pub rng_seed: Option<u64>,
    pub channel_buffer: usize,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            property_name: "售楼处".to_string(),
            seat_areas: vec!["A区".to_string(), "B区".to_string(), "C区".to_string()],
            seats_per_area: 12,
            initial_occupancy: 0.2,
            simulation_enabled: true,
            simulation_period: Duration::from_secs(5),
            rng_seed: None,
            channel_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_areas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(String::from)
        .collect()
}

impl KioskConfig {
    /// Load configuration from `KIOSK_*` environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            property_name: env::var("KIOSK_PROPERTY_NAME").unwrap_or(defaults.property_name),
            seat_areas: env::var("KIOSK_SEAT_AREAS")
                .map(|raw| parse_areas(&raw))
                .unwrap_or(defaults.seat_areas),
            seats_per_area: parsed("KIOSK_SEATS_PER_AREA").unwrap_or(defaults.seats_per_area),
            initial_occupancy: parsed("KIOSK_INITIAL_OCCUPANCY").unwrap_or(defaults.initial_occupancy),
            simulation_enabled: parsed("KIOSK_SIMULATION_ENABLED").unwrap_or(defaults.simulation_enabled),
            simulation_period: parsed("KIOSK_SIMULATION_PERIOD_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulation_period),
            rng_seed: parsed("KIOSK_RNG_SEED"),
            channel_buffer: parsed("KIOSK_CHANNEL_BUFFER").unwrap_or(defaults.channel_buffer),
            log_filter: env::var("KIOSK_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Quiet, deterministic settings: empty lounge, no simulator.
    pub fn for_tests() -> Self {
        Self {
            initial_occupancy: 0.0,
            simulation_enabled: false,
            rng_seed: Some(42),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seat_areas.is_empty() {
            return Err(ConfigError::NoAreas);
        }
        if self.seats_per_area == 0 {
            return Err(ConfigError::NoSeats);
        }
        if !(0.0..=1.0).contains(&self.initial_occupancy) {
            return Err(ConfigError::OccupancyOutOfRange(self.initial_occupancy));
        }
        if self.simulation_enabled && self.simulation_period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::ZeroBuffer);
        }
        Ok(())
    }
}
