//! Core domain types for Waylog.
//!
//! A [`Workout`] is constructed fully initialized: its derived metric
//! (pace or speed) and its description are computed inside the
//! constructor, and the value is never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Workout discriminant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Title-case label used in descriptions ("Running on April 14")
    pub fn title(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "running"),
            WorkoutKind::Cycling => write!(f, "cycling"),
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(crate::Error::Validation(format!(
                "Unknown workout type: {other}"
            ))),
        }
    }
}

/// Variant-specific payload carrying the per-variant derived metric.
///
/// Internally tagged so a stored workout round-trips back into the same
/// typed variant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Minutes per kilometer, duration / distance
        pace_min_km: f64,
    },
    Cycling {
        /// Meters climbed; may be zero
        elevation_gain_m: f64,
        /// Kilometers per hour, distance / (duration / 60)
        speed_kmh: f64,
    },
}

/// A logged workout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// Kilometers
    pub distance_km: f64,
    /// Minutes
    pub duration_min: f64,
    /// Computed once at construction, e.g. "Running on April 14"
    pub description: String,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    /// Construct a running workout, computing its pace.
    ///
    /// Inputs are assumed validated; construction always succeeds.
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        let pace_min_km = duration_min / distance_km;
        Self::build(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_km,
            },
        )
    }

    /// Construct a cycling workout, computing its speed.
    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let speed_kmh = distance_km / (duration_min / 60.0);
        Self::build(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_kmh,
            },
        )
    }

    fn build(coords: Coords, distance_km: f64, duration_min: f64, details: WorkoutDetails) -> Self {
        let date = Utc::now();
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };
        let description = format!("{} on {}", kind.title(), date.format("%B %-d"));

        Self {
            id: Uuid::new_v4(),
            date,
            coords,
            distance_km,
            duration_min,
            description,
            details,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}
