//! Sensor event model
//!
//! Classifies ambient temperature / humidity readings against the
//! configured engine thresholds and snapshots them as timestamped records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Ambient temperature reported for an emergency stop (°C)
pub const EMERGENCY_TEMPERATURE: f32 = 999.0;

/// Ambient humidity reported for an emergency stop (%)
pub const EMERGENCY_HUMIDITY: u16 = 888;

/// Lowest accepted ambient temperature reading (°C)
pub const TEMPERATURE_MIN: f32 = -20.0;

/// Highest accepted ambient temperature reading (°C)
pub const TEMPERATURE_MAX: f32 = 60.0;

/// Highest accepted ambient humidity reading (%)
pub const HUMIDITY_MAX: u16 = 100;

/// What a pair of sensor readings means for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Operator hit the emergency switch
    Emergency,
    /// Humidity at or under the threshold, engine stays off
    StopByHumidity,
    /// Humidity over the threshold, engine starts
    BootByHumidity,
    /// Ambient temperature under the engine-off threshold
    StopByTemperature,
    /// Ambient temperature over the engine-on threshold with humidity at
    /// or over the threshold
    BootByTemperature,
}

impl EventKind {
    /// Classify a reading against the thresholds in `config`.
    ///
    /// The branches are checked in priority order: temperature boot,
    /// temperature stop, humidity boot, humidity stop (the catch-all).
    pub fn classify(temperature: f32, humidity: u16, config: &Config) -> Self {
        if temperature > config.engine_on_temperature && humidity >= config.humidity_threshold {
            EventKind::BootByTemperature
        } else if temperature < config.engine_off_temperature {
            EventKind::StopByTemperature
        } else if humidity > config.humidity_threshold {
            EventKind::BootByHumidity
        } else {
            EventKind::StopByHumidity
        }
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Emergency => "Emergency",
            EventKind::StopByHumidity => "Stop by humidity",
            EventKind::BootByHumidity => "Boot by humidity",
            EventKind::StopByTemperature => "Stop by temperature",
            EventKind::BootByTemperature => "Boot by temperature",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Operator identification stamped on every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Badge number
    pub id: u32,
    /// Full name
    pub name: String,
}

/// One logged sensor event.
///
/// Carries both the readings and the threshold values that were in force
/// when the event was taken, so old records stay interpretable after a
/// configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// When the reading was taken
    pub timestamp: DateTime<Local>,
    /// Classification of the reading
    pub kind: EventKind,
    /// Who logged it
    pub operator: Operator,
    /// Ambient temperature reading (°C)
    pub temperature: f32,
    /// Ambient humidity reading (%)
    pub humidity: u16,
    /// Engine-on temperature threshold at the time (°C)
    pub engine_on_temperature: f32,
    /// Engine-off temperature threshold at the time (°C)
    pub engine_off_temperature: f32,
    /// Humidity threshold at the time (%)
    pub humidity_threshold: u16,
}

impl EventRecord {
    /// Build a record for a fresh sensor reading, classified against the
    /// current configuration and timestamped now.
    pub fn new(temperature: f32, humidity: u16, config: &Config, operator: Operator) -> Self {
        Self {
            timestamp: Local::now(),
            kind: EventKind::classify(temperature, humidity, config),
            operator,
            temperature,
            humidity,
            engine_on_temperature: config.engine_on_temperature,
            engine_off_temperature: config.engine_off_temperature,
            humidity_threshold: config.humidity_threshold,
        }
    }

    /// Build the sentinel record written when the emergency switch is hit.
    pub fn emergency(config: &Config, operator: Operator) -> Self {
        Self {
            timestamp: Local::now(),
            kind: EventKind::Emergency,
            operator,
            temperature: EMERGENCY_TEMPERATURE,
            humidity: EMERGENCY_HUMIDITY,
            engine_on_temperature: config.engine_on_temperature,
            engine_off_temperature: config.engine_off_temperature,
            humidity_threshold: config.humidity_threshold,
        }
    }

    /// `true` for records produced by the emergency switch
    pub fn is_emergency(&self) -> bool {
        self.kind == EventKind::Emergency
    }
}
