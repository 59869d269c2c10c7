//! Pure mapping from workouts to their two view shapes: a map marker
//! and a list entry. No domain logic and no mutation happens here.

use crate::types::{Coords, Workout, WorkoutDetails, WorkoutKind};
use uuid::Uuid;

/// Marker description for the map widget
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub coords: Coords,
    pub kind: WorkoutKind,
    pub icon: &'static str,
    /// Popup caption, icon plus description
    pub caption: String,
}

/// One formatted detail line of a list entry
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// List-entry description for the sidebar
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    /// Correlation key embedded in the rendered entry so click events
    /// can be traced back to the workout
    pub id: Uuid,
    pub kind: WorkoutKind,
    pub title: String,
    pub rows: Vec<DetailRow>,
}

/// Icon for a workout kind
pub fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃",
        WorkoutKind::Cycling => "🚴",
    }
}

/// Build the marker description for a workout.
pub fn marker(workout: &Workout) -> Marker {
    let kind = workout.kind();
    let icon = icon(kind);
    Marker {
        coords: workout.coords,
        kind,
        icon,
        caption: format!("{} {}", icon, workout.description),
    }
}

/// Build the list-entry description for a workout.
///
/// Distance and duration render as entered; derived metrics render to
/// one decimal place.
pub fn list_entry(workout: &Workout) -> ListEntry {
    let kind = workout.kind();
    let mut rows = vec![
        DetailRow {
            icon: icon(kind),
            value: format!("{}", workout.distance_km),
            unit: "km",
        },
        DetailRow {
            icon: "⏱",
            value: format!("{}", workout.duration_min),
            unit: "min",
        },
    ];

    match workout.details {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_km,
        } => {
            rows.push(DetailRow {
                icon: "⚡",
                value: format!("{pace_min_km:.1}"),
                unit: "min/km",
            });
            rows.push(DetailRow {
                icon: "🦶",
                value: format!("{cadence_spm}"),
                unit: "spm",
            });
        }
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_kmh,
        } => {
            rows.push(DetailRow {
                icon: "⚡",
                value: format!("{speed_kmh:.1}"),
                unit: "km/h",
            });
            rows.push(DetailRow {
                icon: "⛰",
                value: format!("{elevation_gain_m}"),
                unit: "m",
            });
        }
    }

    ListEntry {
        id: workout.id,
        kind,
        title: workout.description.clone(),
        rows,
    }
}
