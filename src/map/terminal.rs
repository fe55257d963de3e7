//! Terminal map surface.
//!
//! [`TerminalMap`] keeps markers in geographic coordinates and projects them
//! onto a character grid at paint time with a plain equirectangular
//! projection. It has no tiles; the map pane shows marker glyphs on an empty
//! field plus the popup of the focused marker.

use super::surface::{Bounds, MapSurface, MarkerHandle, MarkerIcon, Popup};
use crate::domain::Coordinates;

/// Viewport center before any data arrives (central Ecuador).
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(-1.83, -78.18);

/// Half extents of the default viewport, in degrees.
const DEFAULT_HALF_LAT: f64 = 2.5;
const DEFAULT_HALF_LNG: f64 = 3.5;

/// Smallest span a fitted viewport may have, so a single marker (or a
/// cluster at one address) still gets a usable zoom level.
const MIN_SPAN: f64 = 0.02;

/// Fraction of the fitted span added on every side.
const FIT_MARGIN: f64 = 0.1;

/// One marker placed on the terminal map.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedMarker {
    pub handle: MarkerHandle,
    pub at: Coordinates,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
}

/// Character-cell map surface.
#[derive(Debug, Clone)]
pub struct TerminalMap {
    markers: Vec<PlottedMarker>,
    viewport: Bounds,
    focused: Option<MarkerHandle>,
    next_handle: u64,
    /// Count of size invalidations. Markers are re-projected on every
    /// paint, so nothing caches geometry against this value.
    layout_epoch: u64,
}

impl Default for TerminalMap {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            viewport: Bounds::around(DEFAULT_CENTER, DEFAULT_HALF_LAT, DEFAULT_HALF_LNG),
            focused: None,
            next_handle: 0,
            layout_epoch: 0,
        }
    }
}

impl TerminalMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn markers(&self) -> &[PlottedMarker] {
        &self.markers
    }

    #[must_use]
    pub const fn viewport(&self) -> &Bounds {
        &self.viewport
    }

    /// How many times the map was told its size changed.
    #[must_use]
    pub const fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    /// The focused marker, if any.
    #[must_use]
    pub fn focused_marker(&self) -> Option<&PlottedMarker> {
        let handle = self.focused?;
        self.markers.iter().find(|m| m.handle == handle)
    }

    /// Projects `at` into a `rows` × `cols` grid. Returns `(row, col)` or
    /// `None` when the point is outside the viewport.
    #[must_use]
    pub fn project(&self, at: Coordinates, rows: usize, cols: usize) -> Option<(usize, usize)> {
        if rows == 0 || cols == 0 || !self.viewport.contains(at) {
            return None;
        }

        let x = (at.lng - self.viewport.west) / self.viewport.lng_span().max(f64::EPSILON);
        let y = (self.viewport.north - at.lat) / self.viewport.lat_span().max(f64::EPSILON);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let (row, col) = (
            ((y * (rows - 1) as f64).round() as usize).min(rows - 1),
            ((x * (cols - 1) as f64).round() as usize).min(cols - 1),
        );
        Some((row, col))
    }
}

impl MapSurface for TerminalMap {
    fn create_marker(&mut self, at: Coordinates, icon: MarkerIcon) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.push(PlottedMarker {
            handle,
            at,
            icon,
            popup: None,
        });
        handle
    }

    fn bind_popup(&mut self, marker: MarkerHandle, popup: Popup) {
        if let Some(m) = self.markers.iter_mut().find(|m| m.handle == marker) {
            m.popup = Some(popup);
        } else {
            tracing::warn!(marker = marker.0, "popup bound to unknown marker");
        }
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        let half_lat = (bounds.lat_span().max(MIN_SPAN) / 2.0) * (1.0 + FIT_MARGIN);
        let half_lng = (bounds.lng_span().max(MIN_SPAN) / 2.0) * (1.0 + FIT_MARGIN);
        self.viewport = Bounds::around(bounds.center(), half_lat, half_lng);
        tracing::debug!(viewport = ?self.viewport, "viewport fitted");
    }

    fn invalidate_size(&mut self) {
        self.layout_epoch += 1;
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.focused = None;
    }

    fn focus_marker(&mut self, marker: Option<MarkerHandle>) {
        self.focused = marker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_viewport_is_centered_on_ecuador() {
        let map = TerminalMap::new();
        let center = map.viewport().center();
        assert!((center.lat - DEFAULT_CENTER.lat).abs() < 1e-9);
        assert!((center.lng - DEFAULT_CENTER.lng).abs() < 1e-9);
    }

    #[test]
    fn fitted_single_point_gets_minimum_span() {
        let mut map = TerminalMap::new();
        let point = Coordinates::new(-0.18, -78.47);
        map.fit_bounds(&Bounds::around(point, 0.0, 0.0));

        assert!(map.viewport().lat_span() >= MIN_SPAN);
        assert!(map.viewport().contains(point));
        assert_eq!(map.project(point, 11, 21), Some((5, 10)));
    }

    #[test]
    fn projection_maps_corners() {
        let mut map = TerminalMap::new();
        map.viewport = Bounds {
            south: 0.0,
            west: 0.0,
            north: 10.0,
            east: 20.0,
        };
        assert_eq!(map.project(Coordinates::new(10.0, 0.0), 5, 9), Some((0, 0)));
        assert_eq!(map.project(Coordinates::new(0.0, 20.0), 5, 9), Some((4, 8)));
        assert_eq!(map.project(Coordinates::new(11.0, 0.0), 5, 9), None);
    }

    #[test]
    fn clearing_drops_focus() {
        let mut map = TerminalMap::new();
        let handle = map.create_marker(DEFAULT_CENTER, MarkerIcon::Gain);
        map.focus_marker(Some(handle));
        assert!(map.focused_marker().is_some());

        map.clear_markers();
        assert!(map.focused_marker().is_none());
        assert!(map.markers().is_empty());
    }

    #[test]
    fn sync_fits_only_placed_listings() {
        use crate::domain::listing::sample;
        use crate::map::MapSync;

        let point = Coordinates::new(-0.18, -78.48);
        let mut placed = sample("placed", 100_000.0);
        placed.coordinates = Some(point);
        let unplaced = sample("unplaced", 100_000.0);

        let mut map = MapSync::new(TerminalMap::new());
        assert_eq!(map.sync(&[placed, unplaced.clone()]), 1);
        assert!(map.surface().viewport().contains(point));

        let mut empty = MapSync::new(TerminalMap::new());
        let before = *empty.surface().viewport();
        assert_eq!(empty.sync(&[unplaced]), 0);
        assert_eq!(empty.surface().viewport(), &before);
    }

    #[test]
    fn revealing_the_map_counts_one_invalidation() {
        use crate::map::MapSync;

        let mut map = MapSync::new(TerminalMap::new());
        assert_eq!(map.surface().layout_epoch(), 0);
        map.set_visible(true);
        map.set_visible(true);
        assert_eq!(map.surface().layout_epoch(), 1);
    }
}
