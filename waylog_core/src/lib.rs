#![forbid(unsafe_code)]

//! Core domain model and application logic for Waylog, a map-based
//! workout log.
//!
//! This crate provides:
//! - Domain types (workouts, coordinates, kinds)
//! - Input validation
//! - Persistence (string storage boundary, collection snapshots)
//! - View rendering (markers, list entries)
//! - The application controller and its service boundaries

pub mod types;
pub mod error;
pub mod validation;
pub mod config;
pub mod logging;
pub mod storage;
pub mod snapshot;
pub mod render;
pub mod services;
pub mod controller;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use storage::{FileStore, MemoryStore, StringStore};
pub use snapshot::{WorkoutStore, STORAGE_KEY};
pub use render::{list_entry, marker, DetailRow, ListEntry, Marker};
pub use services::{Geolocator, MapService, Ui};
pub use controller::{App, AppEvent, FormFields, FormState};
