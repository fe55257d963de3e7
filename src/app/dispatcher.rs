//! Render dispatcher: the only writer of [`AppState`].
//!
//! Every mutation goes through [`Dispatcher::update`], which merges a
//! [`StatePatch`], bumps the state version, recomputes the filtered set,
//! resets the page and rebuilds the whole [`Frame`] in a fixed order:
//!
//! ```text
//! merge → version += 1 → filtered = apply(listings, filter) → page = 1
//!       → hero → results → grid → pagination → detail
//! ```
//!
//! There is no diffing. Page turns are the one exception to the full
//! pipeline: [`Dispatcher::turn_page`] moves the page without touching the
//! filters and rebuilds only the grid and the pagination controls.

use super::state::{AppState, StatePatch};
use crate::domain::{self, format_usd, pagination, Listing, PageNav, PAGE_SIZE};
use crate::ui::cards::CardDeck;
use crate::ui::helpers::format_history_date;
use crate::ui::viewmodel::{
    CardView, ControlsView, DetailSurface, DetailView, FragmentKind, Frame, GridView, HeroStats,
    HistoryRow, PaginationView, ResultsCount,
};
use std::collections::HashSet;

/// Owns the application state, the last rendered frame and the card deck.
#[derive(Debug, Default)]
pub struct Dispatcher {
    state: AppState,
    frame: Frame,
    deck: CardDeck,
}

impl Dispatcher {
    /// Starts in the loading state with an empty frame.
    #[must_use]
    pub fn new() -> Self {
        let mut dispatcher = Self::default();
        dispatcher.render_all();
        dispatcher
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub const fn deck(&self) -> &CardDeck {
        &self.deck
    }

    /// Card state is view-only, so callers may change it freely.
    pub fn deck_mut(&mut self) -> &mut CardDeck {
        &mut self.deck
    }

    /// Whether the frame was built from the current state version.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.frame.version == self.state.version
    }

    /// Applies `patch` and re-renders every fragment.
    pub fn update(&mut self, patch: StatePatch) -> &Frame {
        let _span = tracing::debug_span!(
            "dispatch_update",
            version = self.state.version + 1,
            changes_filters = patch.changes_filters()
        )
        .entered();

        self.state.merge(patch);
        self.state.version += 1;
        self.state.filtered = domain::apply(&self.state.listings, &self.state.filter);
        self.state.current_page = 1;

        self.render_all();

        tracing::debug!(
            filtered = self.state.filtered.len(),
            view = ?self.state.view,
            rendered = ?self.frame.rendered,
            "frame rebuilt"
        );
        &self.frame
    }

    /// Moves to the previous or next page.
    ///
    /// Ignored while loading and whenever the grid is covered by the overlay
    /// or the detail page. Returns whether the page changed.
    pub fn turn_page(&mut self, nav: PageNav) -> bool {
        if self.state.loading || !self.state.view.shows_grid() {
            tracing::debug!(view = ?self.state.view, "page turn ignored");
            return false;
        }

        let Some(page) = pagination::turn(
            self.state.current_page,
            nav,
            self.state.filtered.len(),
            PAGE_SIZE,
        ) else {
            return false;
        };

        self.state.current_page = page;
        self.state.version += 1;

        let mut frame = self.frame.clone();
        frame.version = self.state.version;
        frame.rendered.clear();
        for kind in [FragmentKind::Grid, FragmentKind::Pagination] {
            self.render_fragment(&mut frame, kind);
            frame.rendered.push(kind);
        }
        self.frame = frame;
        self.rebuild_deck();

        tracing::debug!(page, total = self.frame.pagination.total_pages, "page turned");
        true
    }

    fn render_all(&mut self) {
        let mut frame = Frame {
            version: self.state.version,
            loading: self.state.loading,
            controls: self.controls(),
            ..Frame::default()
        };

        if !self.state.loading {
            for kind in FragmentKind::ORDER {
                self.render_fragment(&mut frame, kind);
                frame.rendered.push(kind);
            }
        }

        self.frame = frame;
        self.rebuild_deck();
    }

    fn render_fragment(&self, frame: &mut Frame, kind: FragmentKind) {
        match kind {
            FragmentKind::Hero => frame.hero = self.hero(),
            FragmentKind::Results => {
                frame.results = ResultsCount {
                    count: self.state.filtered.len(),
                };
            }
            FragmentKind::Grid => frame.grid = self.grid(),
            FragmentKind::Pagination => frame.pagination = self.pagination(),
            FragmentKind::Detail => frame.detail = self.detail(),
        }
    }

    fn rebuild_deck(&mut self) {
        self.deck.rebuild(
            self.frame
                .grid
                .cards()
                .iter()
                .map(|card| (card.id.as_str(), card.images.len())),
        );
        if let Some(listing) = self.state.selected_listing() {
            self.deck.track(&listing.id, listing.images.len());
        }
    }

    fn controls(&self) -> ControlsView {
        let filter = &self.state.filter;
        ControlsView {
            search_term: filter.search_term.clone(),
            price_label: format!(
                "{} – {}",
                format_usd(filter.price_range.min()),
                format_usd(filter.price_range.max())
            ),
            bedrooms_label: any_or(filter.bedrooms),
            bathrooms_label: any_or(filter.bathrooms),
            show_filters: self.state.show_filters,
            show_map: self.state.show_map,
        }
    }

    fn hero(&self) -> HeroStats {
        let listings = &self.state.listings;
        let min_price = listings
            .iter()
            .map(|l| l.current_price)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |m| m.min(p))));
        let locations = listings
            .iter()
            .map(Listing::location)
            .filter(|loc| !loc.is_empty())
            .collect::<HashSet<_>>()
            .len();

        HeroStats {
            total: listings.len(),
            min_price,
            locations,
        }
    }

    fn grid(&self) -> GridView {
        if !self.state.view.shows_grid() {
            return GridView::Hidden;
        }
        if self.state.filtered.is_empty() {
            return GridView::NoResults;
        }
        let page = domain::paginate(&self.state.filtered, self.state.current_page, PAGE_SIZE);
        GridView::Cards(page.items.iter().map(card_view).collect())
    }

    fn pagination(&self) -> PaginationView {
        let page = pagination::clamp_page(
            self.state.current_page,
            self.state.filtered.len(),
            PAGE_SIZE,
        );
        let total_pages = pagination::total_pages(self.state.filtered.len(), PAGE_SIZE);
        PaginationView {
            page,
            total_pages,
            prev_enabled: page > 1,
            next_enabled: page < total_pages,
            visible: self.state.view.shows_grid() && !self.state.filtered.is_empty(),
        }
    }

    fn detail(&self) -> DetailSurface {
        use super::modes::ViewState;

        match (&self.state.view, self.state.selected_listing()) {
            (ViewState::SelectedOverlay { .. }, Some(listing)) => {
                DetailSurface::Overlay(card_view(listing))
            }
            (ViewState::FullDetail { .. }, Some(listing)) => {
                DetailSurface::Full(detail_view(listing))
            }
            _ => DetailSurface::None,
        }
    }
}

fn any_or(count: Option<u32>) -> String {
    count.map_or_else(|| "Any".to_string(), |n| n.to_string())
}

fn count_label(count: Option<u32>) -> String {
    count.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn card_view(listing: &Listing) -> CardView {
    CardView {
        id: listing.id.clone(),
        address: listing.address.clone(),
        description: listing.description.clone(),
        price_label: format_usd(listing.current_price),
        change_label: listing.price_change().label(),
        trend: listing.trend(),
        bedrooms_label: count_label(listing.bedrooms),
        bathrooms_label: count_label(listing.bathrooms),
        home_type: listing.home_type.clone(),
        status: listing.status.clone(),
        images: listing.images.clone(),
    }
}

fn detail_view(listing: &Listing) -> DetailView {
    let history = listing
        .price_history
        .iter()
        .map(|point| HistoryRow {
            date: format_history_date(point.timestamp.as_deref().unwrap_or_default()),
            price: point.price.map_or_else(|| "-".to_string(), format_usd),
        })
        .collect();

    DetailView {
        id: listing.id.clone(),
        title: listing.address.clone(),
        price_label: format_usd(listing.current_price),
        change_label: listing.price_change().label(),
        trend: listing.trend(),
        description: listing.description.clone(),
        specs: vec![
            ("Bedrooms", count_label(listing.bedrooms)),
            ("Bathrooms", count_label(listing.bathrooms)),
            ("Type", listing.home_type.clone()),
            ("Status", listing.status.clone()),
            ("Direction", listing.direction.clone()),
            ("Last Updated", listing.last_updated.clone()),
        ],
        history,
        images: listing.images.clone(),
    }
}
