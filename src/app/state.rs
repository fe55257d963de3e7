//! Application state and the patches that mutate it.
//!
//! [`AppState`] is the single source of truth for a plugin session. Its fields
//! are private to the `app` layer: outside code reads them through getters and
//! changes them only by handing a [`StatePatch`] to the
//! [`Dispatcher`](crate::app::Dispatcher), which merges the patch and then
//! recomputes everything derived from it.
//!
//! # State Components
//!
//! - **Listings**: the full normalized set, assigned once when loading ends
//! - **Filtered listings**: always `filter::apply(listings, filter)`
//! - **View**: grid, selected overlay, or full detail ([`ViewState`])
//! - **Current page**: 1-based, reset to 1 by every patch
//! - **Filter spec**: search term, price range, bedroom/bathroom filters
//! - **Flags**: `loading`, `show_filters`, `show_map`
//! - **Version**: incremented on every mutation

use super::modes::{ViewCommand, ViewState};
use crate::domain::{self, FilterSpec, Listing, PriceRange};

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(super) listings: Vec<Listing>,
    pub(super) listings_assigned: bool,
    pub(super) filtered: Vec<Listing>,
    pub(super) view: ViewState,
    pub(super) current_page: usize,
    pub(super) filter: FilterSpec,
    pub(super) max_observed_price: f64,
    pub(super) loading: bool,
    pub(super) show_filters: bool,
    pub(super) show_map: bool,
    pub(super) version: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Initial state: no listings, grid view, page 1, default filters, and
    /// `loading` set until the worker answers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: Vec::new(),
            listings_assigned: false,
            filtered: Vec::new(),
            view: ViewState::Grid,
            current_page: 1,
            filter: FilterSpec::default(),
            max_observed_price: 0.0,
            loading: true,
            show_filters: false,
            show_map: false,
            version: 0,
        }
    }

    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    #[must_use]
    pub fn filtered(&self) -> &[Listing] {
        &self.filtered
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Highest effective price across all listings; the upper end of the
    /// price range after clearing filters.
    #[must_use]
    pub const fn max_observed_price(&self) -> f64 {
        self.max_observed_price
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn show_filters(&self) -> bool {
        self.show_filters
    }

    #[must_use]
    pub const fn show_map(&self) -> bool {
        self.show_map
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Looks up a listing in the full set.
    #[must_use]
    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// The listing in focus on the overlay or detail page.
    ///
    /// Derived from the view state and looked up in the full set, so a
    /// listing stays selected even when the current filters exclude it.
    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.view.selected_id().and_then(|id| self.listing(id))
    }

    /// Merges `patch` into the state. Derived fields are not touched here.
    pub(super) fn merge(&mut self, patch: StatePatch) {
        if let Some(listings) = patch.listings {
            if self.listings_assigned {
                tracing::warn!(
                    existing = self.listings.len(),
                    incoming = listings.len(),
                    "listings already assigned, ignoring reassignment"
                );
            } else {
                self.max_observed_price = domain::max_observed_price(&listings);
                self.listings = listings;
                self.listings_assigned = true;
            }
        }

        if patch.clear_filters {
            self.filter = FilterSpec::cleared(self.max_observed_price);
        }
        if let Some(term) = patch.search_term {
            self.filter.search_term = term;
        }
        if let Some(range) = patch.price_range {
            self.filter.price_range = range;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.filter.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = patch.bathrooms {
            self.filter.bathrooms = bathrooms;
        }

        if let Some(command) = patch.view {
            let listings = &self.listings;
            self.view
                .apply(command, |id| listings.iter().any(|l| l.id == id));
        }

        if let Some(loading) = patch.loading {
            self.loading = loading;
        }
        if let Some(show_filters) = patch.show_filters {
            self.show_filters = show_filters;
        }
        if let Some(show_map) = patch.show_map {
            self.show_map = show_map;
        }
    }
}

/// A partial update to [`AppState`].
///
/// Built with chained setters and applied through
/// [`Dispatcher::update`](crate::app::Dispatcher::update). Unset fields leave
/// the state alone. Within one patch, `clear_filters` is applied before the
/// individual filter fields.
///
/// ```
/// use homescout::app::StatePatch;
///
/// let patch = StatePatch::new().search_term("quito").bedrooms(Some(3));
/// assert!(!patch.is_empty());
/// assert!(StatePatch::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    listings: Option<Vec<Listing>>,
    clear_filters: bool,
    search_term: Option<String>,
    price_range: Option<PriceRange>,
    bedrooms: Option<Option<u32>>,
    bathrooms: Option<Option<u32>>,
    view: Option<ViewCommand>,
    loading: Option<bool>,
    show_filters: Option<bool>,
    show_map: Option<bool>,
}

impl StatePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the full listing set. Honored only once per session.
    #[must_use]
    pub fn listings(mut self, listings: Vec<Listing>) -> Self {
        self.listings = Some(listings);
        self
    }

    /// Resets search, room filters and the price range to `[0, max observed]`.
    #[must_use]
    pub const fn clear_filters(mut self) -> Self {
        self.clear_filters = true;
        self
    }

    #[must_use]
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    #[must_use]
    pub const fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// `None` means "any".
    #[must_use]
    pub const fn bedrooms(mut self, bedrooms: Option<u32>) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    /// `None` means "any".
    #[must_use]
    pub const fn bathrooms(mut self, bathrooms: Option<u32>) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    #[must_use]
    pub fn view(mut self, command: ViewCommand) -> Self {
        self.view = Some(command);
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    #[must_use]
    pub const fn show_filters(mut self, show: bool) -> Self {
        self.show_filters = Some(show);
        self
    }

    #[must_use]
    pub const fn show_map(mut self, show: bool) -> Self {
        self.show_map = Some(show);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the patch touches the filter spec.
    #[must_use]
    pub const fn changes_filters(&self) -> bool {
        self.clear_filters
            || self.search_term.is_some()
            || self.price_range.is_some()
            || self.bedrooms.is_some()
            || self.bathrooms.is_some()
    }
}
