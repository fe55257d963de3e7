//! Map capability surface.
//!
//! [`MapSurface`] is the narrow set of operations the sync adapter needs
//! from a map implementation. The production implementation is the terminal
//! plot in [`crate::map::terminal`]; tests use a recording fake.

use crate::domain::{Coordinates, Listing, PriceTrend};
use serde::{Deserialize, Serialize};

/// Opaque marker identifier issued by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// Marker icon variant. Unchanged prices use [`MarkerIcon::Loss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerIcon {
    Gain,
    Loss,
}

impl From<PriceTrend> for MarkerIcon {
    fn from(trend: PriceTrend) -> Self {
        match trend {
            PriceTrend::Up => Self::Gain,
            PriceTrend::Down => Self::Loss,
        }
    }
}

/// Popup content bound to a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub title: String,
    pub original: String,
    pub current: String,
    /// Signed change with percentage, e.g. `+$5,000 (+2.5%)`.
    pub change: String,
    pub icon: MarkerIcon,
}

impl Popup {
    #[must_use]
    pub fn for_listing(listing: &Listing) -> Self {
        use crate::domain::format_usd;

        Self {
            title: listing.address.clone(),
            original: format_usd(listing.original_price),
            current: format_usd(listing.current_price),
            change: listing.price_change().label(),
            icon: listing.trend().into(),
        }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    ///
    /// ```
    /// use homescout::domain::Coordinates;
    /// use homescout::map::Bounds;
    ///
    /// assert_eq!(Bounds::covering(std::iter::empty()), None);
    ///
    /// let b = Bounds::covering([Coordinates::new(-2.0, -79.0), Coordinates::new(-0.2, -78.5)])
    ///     .unwrap();
    /// assert_eq!((b.south, b.north), (-2.0, -0.2));
    /// assert_eq!((b.west, b.east), (-79.0, -78.5));
    /// ```
    pub fn covering(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    south: p.lat,
                    west: p.lng,
                    north: p.lat,
                    east: p.lng,
                },
                Some(b) => Self {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lng),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lng),
                },
            })
        })
    }

    /// A box of the given half extents around `center`.
    #[must_use]
    pub fn around(center: Coordinates, half_lat: f64, half_lng: f64) -> Self {
        Self {
            south: center.lat - half_lat,
            west: center.lng - half_lng,
            north: center.lat + half_lat,
            east: center.lng + half_lng,
        }
    }

    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

/// Operations a map implementation offers to the sync adapter.
///
/// Marker clicks are not part of the trait: the host reports a clicked
/// [`MarkerHandle`] and [`MapSync::route_click`](crate::map::MapSync::route_click)
/// turns it into a view command.
pub trait MapSurface {
    /// Places a marker and returns its handle.
    fn create_marker(&mut self, at: Coordinates, icon: MarkerIcon) -> MarkerHandle;

    /// Attaches popup content to an existing marker.
    fn bind_popup(&mut self, marker: MarkerHandle, popup: Popup);

    /// Moves the viewport so `bounds` is fully visible.
    fn fit_bounds(&mut self, bounds: &Bounds);

    /// Recomputes layout after the map container changed size or visibility.
    fn invalidate_size(&mut self);

    /// Removes every marker.
    fn clear_markers(&mut self);

    /// Highlights one marker and opens its popup, or clears the highlight.
    fn focus_marker(&mut self, marker: Option<MarkerHandle>);
}
