//! Listing → marker synchronization.
//!
//! [`MapSync`] mirrors the full listing set onto a [`MapSurface`]. Markers
//! are rebuilt only when the listing set itself is (re)assigned, never on
//! filter changes, and each marker remembers the listing id it stands for so
//! clicks can be routed back into the view state machine.

use super::surface::{Bounds, MapSurface, MarkerHandle, MarkerIcon, Popup};
use crate::app::modes::ViewCommand;
use crate::domain::Listing;
use std::collections::HashMap;

/// Sync adapter between listings and a map surface.
#[derive(Debug)]
pub struct MapSync<S> {
    surface: S,
    /// Marker handle → listing id.
    routes: HashMap<MarkerHandle, String>,
    /// Markers in listing order, for keyboard focus cycling.
    markers: Vec<MarkerHandle>,
    focused: Option<usize>,
    visible: bool,
}

impl<S: MapSurface> MapSync<S> {
    /// Wraps `surface`. The map starts hidden.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            routes: HashMap::new(),
            markers: Vec::new(),
            focused: None,
            visible: false,
        }
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rebuilds all markers from `listings`.
    ///
    /// Clears the surface, places one marker per listing that has
    /// coordinates, binds its popup and click route, then fits the viewport
    /// to the markers. With no markers the viewport is left where it was.
    /// Returns the number of markers placed.
    pub fn sync(&mut self, listings: &[Listing]) -> usize {
        let _span = tracing::debug_span!("map_sync", listings = listings.len()).entered();

        self.surface.clear_markers();
        self.routes.clear();
        self.markers.clear();
        self.focused = None;

        for listing in listings {
            let Some(at) = listing.coordinates else {
                continue;
            };
            let icon = MarkerIcon::from(listing.trend());
            let handle = self.surface.create_marker(at, icon);
            self.surface.bind_popup(handle, Popup::for_listing(listing));
            self.routes.insert(handle, listing.id.clone());
            self.markers.push(handle);
        }

        let bounds = Bounds::covering(listings.iter().filter_map(|l| l.coordinates));
        if let Some(bounds) = bounds {
            self.surface.fit_bounds(&bounds);
        }

        tracing::debug!(
            markers = self.markers.len(),
            skipped = listings.len() - self.markers.len(),
            "markers synced"
        );
        self.markers.len()
    }

    /// Translates a marker click into a selection.
    pub fn route_click(&self, marker: MarkerHandle) -> Option<ViewCommand> {
        let id = self.routes.get(&marker)?;
        tracing::debug!(marker = marker.0, listing_id = %id, "marker clicked");
        Some(ViewCommand::Select(id.clone()))
    }

    /// Shows or hides the map. Showing a hidden map invalidates its size.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.surface.invalidate_size();
        }
        self.visible = visible;
    }

    /// Moves marker focus forward, wrapping. Returns the focused handle.
    pub fn focus_next(&mut self) -> Option<MarkerHandle> {
        self.move_focus(1)
    }

    /// Moves marker focus backward, wrapping.
    pub fn focus_prev(&mut self) -> Option<MarkerHandle> {
        self.move_focus(-1)
    }

    fn move_focus(&mut self, step: isize) -> Option<MarkerHandle> {
        if self.markers.is_empty() {
            return None;
        }
        let len = self.markers.len();
        let next = match (self.focused, step.is_negative()) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        self.focused = Some(next);
        let handle = self.markers[next];
        self.surface.focus_marker(Some(handle));
        Some(handle)
    }

    pub fn focused(&self) -> Option<MarkerHandle> {
        self.focused.map(|i| self.markers[i])
    }

    /// Clicks the focused marker.
    pub fn open_focused(&self) -> Option<ViewCommand> {
        self.focused().and_then(|handle| self.route_click(handle))
    }

    /// Drops marker focus.
    pub fn blur(&mut self) {
        if self.focused.take().is_some() {
            self.surface.focus_marker(None);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeMap};
    use super::*;
    use crate::domain::listing::sample;
    use crate::domain::Coordinates;

    fn located(id: &str, lat: f64, lng: f64, original: f64, current: f64) -> Listing {
        let mut listing = sample(id, current);
        listing.original_price = original;
        listing.coordinates = Some(Coordinates::new(lat, lng));
        listing
    }

    #[test]
    fn listing_without_coordinates_gets_no_marker() {
        let mut map = MapSync::new(FakeMap::default());
        let count = map.sync(&[sample("x", 1.0)]);

        assert_eq!(count, 0);
        assert_eq!(map.surface().calls, vec![Call::Clear]);
    }

    #[test]
    fn markers_carry_icon_and_route() {
        let listings = vec![
            located("up", -2.0, -79.0, 100.0, 120.0),
            sample("none", 5.0),
            located("flat", -0.2, -78.5, 100.0, 100.0),
        ];
        let mut map = MapSync::new(FakeMap::default());
        assert_eq!(map.sync(&listings), 2);

        let creates: Vec<&Call> = map
            .surface()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Create(..)))
            .collect();
        assert_eq!(
            creates,
            vec![
                &Call::Create(Coordinates::new(-2.0, -79.0), MarkerIcon::Gain),
                &Call::Create(Coordinates::new(-0.2, -78.5), MarkerIcon::Loss),
            ]
        );

        assert_eq!(
            map.surface().calls.last(),
            Some(&Call::Fit(Bounds {
                south: -2.0,
                west: -79.0,
                north: -0.2,
                east: -78.5
            }))
        );

        assert_eq!(map.route_click(MarkerHandle(2)), Some(ViewCommand::Select("flat".into())));
        assert_eq!(map.route_click(MarkerHandle(99)), None);
    }

    #[test]
    fn showing_hidden_map_invalidates_once() {
        let mut map = MapSync::new(FakeMap::default());
        map.set_visible(true);
        map.set_visible(true);
        map.set_visible(false);
        map.set_visible(true);

        let invalidations = map
            .surface()
            .calls
            .iter()
            .filter(|c| **c == Call::Invalidate)
            .count();
        assert_eq!(invalidations, 2);
    }

    #[test]
    fn focus_cycles_and_opens() {
        let listings = vec![
            located("a", 1.0, 1.0, 1.0, 1.0),
            located("b", 2.0, 2.0, 1.0, 1.0),
        ];
        let mut map = MapSync::new(FakeMap::default());
        map.sync(&listings);

        assert_eq!(map.open_focused(), None);
        assert_eq!(map.focus_prev(), Some(MarkerHandle(2)));
        assert_eq!(map.focus_next(), Some(MarkerHandle(1)));
        assert_eq!(map.open_focused(), Some(ViewCommand::Select("a".into())));

        map.blur();
        assert_eq!(map.focused(), None);
        assert_eq!(map.surface().calls.last(), Some(&Call::Focus(None)));
    }
}
