//! Boundaries to the external collaborators: the map widget, the
//! geolocation source, and the form/list/alert surface.
//!
//! Concrete implementations live with the binary that owns the actual
//! surface; the controller only ever talks to these traits.

use crate::render::{ListEntry, Marker};
use crate::types::{Coords, WorkoutKind};
use crate::Result;

/// Map widget boundary
pub trait MapService {
    /// Place the initial view. Must happen before markers are added.
    fn init_view(&mut self, center: Coords, zoom: u8);

    /// Draw a marker with its popup caption
    fn add_marker(&mut self, marker: &Marker);

    /// Animate the view to the given coordinates
    fn fly_to(&mut self, coords: Coords, zoom: u8);
}

/// Geolocation boundary
pub trait Geolocator {
    /// Resolve the user's current position, `Error::Geolocation` when
    /// no position is available
    fn current_position(&self) -> Result<Coords>;
}

/// Form, list, and alert surface
pub trait Ui {
    /// Reveal the entry form for the given kind, with the matching
    /// extra field (cadence or elevation) shown and the distance field
    /// focused
    fn show_form(&mut self, kind: WorkoutKind);

    /// Clear the fields and hide the form container
    fn hide_form(&mut self);

    /// Append a rendered entry after the form, in insertion order
    fn push_entry(&mut self, entry: &ListEntry);

    /// Blocking user-visible message
    fn alert(&mut self, message: &str);
}
