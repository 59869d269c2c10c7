//! Whole-collection persistence for the workout log.
//!
//! The entire ordered collection is serialized to a single string under
//! a fixed key and rewritten after every successful addition. Loading
//! reconstructs fully typed workouts, so restored entries keep their
//! derived metrics and can be placed on the map.

use crate::storage::StringStore;
use crate::types::Workout;
use crate::Result;

/// Storage key holding the serialized collection
pub const STORAGE_KEY: &str = "workouts";

/// Persistence adapter between the workout collection and a [`StringStore`]
pub struct WorkoutStore<S: StringStore> {
    store: S,
}

impl<S: StringStore> WorkoutStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialize and overwrite the full ordered collection.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let snapshot = serde_json::to_string(workouts)?;
        self.store.set(STORAGE_KEY, &snapshot)?;
        tracing::debug!("Saved {} workouts", workouts.len());
        Ok(())
    }

    /// Load the persisted collection.
    ///
    /// An absent key means no prior data and yields an empty collection.
    /// Malformed content is logged and treated the same way, so a
    /// damaged snapshot degrades to an empty log instead of taking the
    /// application down.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(snapshot) = self.store.get(STORAGE_KEY)? else {
            tracing::info!("No stored workouts found, starting empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Workout>>(&snapshot) {
            Ok(workouts) => {
                tracing::debug!("Loaded {} workouts", workouts.len());
                Ok(workouts)
            }
            Err(e) => {
                tracing::warn!("Stored workouts are unreadable: {}. Starting empty.", e);
                Ok(Vec::new())
            }
        }
    }

    /// Delete the storage key. Clearing the in-memory collection (or
    /// restarting) completes the reset.
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(STORAGE_KEY)
    }
}
