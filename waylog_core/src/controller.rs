//! Application controller.
//!
//! Owns the workout collection and the form-visibility state machine,
//! and orchestrates validation, construction, rendering, and
//! persistence in response to discrete UI events. Everything runs
//! synchronously on the calling thread; the collection is only mutated
//! inside [`App::handle`] for a submit event.

use crate::render;
use crate::services::{Geolocator, MapService, Ui};
use crate::snapshot::WorkoutStore;
use crate::storage::StringStore;
use crate::types::{Coords, Workout, WorkoutKind};
use crate::validation;
use crate::Result;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Raw form fields as entered. Coercion and validation happen on submit;
/// only the fields for the active kind participate.
#[derive(Clone, Debug, Default)]
pub struct FormFields {
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Discrete UI events consumed by the controller
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// The user clicked the map at the given coordinates
    MapClicked(Coords),
    /// The form's type selector changed
    TypeChanged(WorkoutKind),
    /// The form was submitted with the given raw fields
    FormSubmitted(FormFields),
    /// A list entry identified by the embedded workout id was clicked
    ListEntryClicked(Uuid),
}

/// Form visibility state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    /// Visible with the given kind's extra field shown
    Visible(WorkoutKind),
}

/// The application controller, generic over its service boundaries
pub struct App<M: MapService, U: Ui, S: StringStore> {
    map: M,
    ui: U,
    store: WorkoutStore<S>,
    workouts: Vec<Workout>,
    form: FormState,
    pending_click: Option<Coords>,
    zoom: u8,
    map_ready: bool,
    cooldown: Duration,
    locked_until: Option<Instant>,
}

impl<M: MapService, U: Ui, S: StringStore> App<M, U, S> {
    pub fn new(map: M, ui: U, store: S, zoom: u8, cooldown: Duration) -> Self {
        Self {
            map,
            ui,
            store: WorkoutStore::new(store),
            workouts: Vec::new(),
            form: FormState::Hidden,
            pending_click: None,
            zoom,
            map_ready: false,
            cooldown,
            locked_until: None,
        }
    }

    /// Load persisted workouts, then try to bring the map up at the
    /// user's position.
    ///
    /// Without a position the application runs in list-only mode:
    /// entries still render, but click-to-add, markers, and
    /// view-centering stay unavailable.
    pub fn start<G: Geolocator>(&mut self, geo: &G) -> Result<()> {
        self.workouts = self.store.load()?;

        match geo.current_position() {
            Ok(center) => {
                self.map.init_view(center, self.zoom);
                self.map_ready = true;
                for workout in &self.workouts {
                    self.map.add_marker(&render::marker(workout));
                }
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.ui.alert("Could not get your position");
            }
        }

        for workout in &self.workouts {
            self.ui.push_entry(&render::list_entry(workout));
        }

        Ok(())
    }

    /// Dispatch a single UI event.
    pub fn handle(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::MapClicked(coords) => {
                self.on_map_clicked(coords);
                Ok(())
            }
            AppEvent::TypeChanged(kind) => {
                self.on_type_changed(kind);
                Ok(())
            }
            AppEvent::FormSubmitted(fields) => self.on_form_submitted(fields),
            AppEvent::ListEntryClicked(id) => {
                self.on_entry_clicked(id);
                Ok(())
            }
        }
    }

    fn on_map_clicked(&mut self, coords: Coords) {
        if !self.map_ready {
            tracing::debug!("Ignoring map click, map not initialized");
            return;
        }
        if let Some(until) = self.locked_until {
            if Instant::now() < until {
                tracing::debug!("Ignoring map click during submit cooldown");
                return;
            }
            self.locked_until = None;
        }

        // A click while the form is open re-captures the position but
        // keeps the selected type.
        let kind = match self.form {
            FormState::Visible(kind) => kind,
            FormState::Hidden => WorkoutKind::Running,
        };
        self.pending_click = Some(coords);
        self.form = FormState::Visible(kind);
        self.ui.show_form(kind);
    }

    fn on_type_changed(&mut self, kind: WorkoutKind) {
        if let FormState::Visible(current) = self.form {
            if current != kind {
                self.form = FormState::Visible(kind);
                self.ui.show_form(kind);
            }
        }
    }

    fn on_form_submitted(&mut self, fields: FormFields) -> Result<()> {
        let FormState::Visible(kind) = self.form else {
            tracing::debug!("Ignoring submit, form is hidden");
            return Ok(());
        };
        let Some(coords) = self.pending_click else {
            tracing::debug!("Ignoring submit, no captured map click");
            return Ok(());
        };

        let distance = validation::coerce(&fields.distance);
        let duration = validation::coerce(&fields.duration);

        let checked = match kind {
            WorkoutKind::Running => {
                let cadence = validation::coerce(&fields.cadence);
                validation::check_running(distance, duration, cadence)
                    .map(|()| Workout::running(coords, distance, duration, cadence))
            }
            WorkoutKind::Cycling => {
                let elevation = validation::coerce(&fields.elevation);
                validation::check_cycling(distance, duration, elevation)
                    .map(|()| Workout::cycling(coords, distance, duration, elevation))
            }
        };

        let workout = match checked {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!("Rejected {} submission: {}", kind, e);
                self.ui.alert(&e.to_string());
                return Ok(());
            }
        };

        self.map.add_marker(&render::marker(&workout));
        self.ui.push_entry(&render::list_entry(&workout));
        self.workouts.push(workout);
        self.store.save(&self.workouts)?;

        self.ui.hide_form();
        self.form = FormState::Hidden;
        self.pending_click = None;
        self.locked_until = Some(Instant::now() + self.cooldown);
        Ok(())
    }

    fn on_entry_clicked(&mut self, id: Uuid) {
        if !self.map_ready {
            return;
        }
        match self.workouts.iter().find(|w| w.id == id) {
            Some(workout) => self.map.fly_to(workout.coords, self.zoom),
            None => tracing::debug!("Click on unknown workout id {}", id),
        }
    }

    /// Clear durable storage and the in-memory collection.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.workouts.clear();
        Ok(())
    }

    /// The ordered, insertion-order-preserving collection
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form_state(&self) -> FormState {
        self.form
    }

    /// Whether map-dependent interactions are available
    pub fn map_ready(&self) -> bool {
        self.map_ready
    }

    /// Read access to the persistence adapter
    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }
}
