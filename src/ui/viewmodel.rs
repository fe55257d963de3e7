//! View model types representing renderable UI state.
//!
//! A [`Frame`] is the display-ready snapshot the dispatcher builds on every
//! state mutation. It contains no business logic, only formatted text and
//! flags, and it records the state version it was built from. Components in
//! [`crate::ui::components`] paint it; they never look at `AppState`.
//!
//! Per-card carousel positions and favorite marks are deliberately absent:
//! they live in the [`CardDeck`](crate::ui::cards::CardDeck) and are merged in
//! at paint time.

use crate::domain::PriceTrend;

/// The five content fragments, in the order the dispatcher renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Hero,
    Results,
    Grid,
    Pagination,
    Detail,
}

impl FragmentKind {
    /// Fixed re-render order used by every full update.
    pub const ORDER: [Self; 5] = [
        Self::Hero,
        Self::Results,
        Self::Grid,
        Self::Pagination,
        Self::Detail,
    ];
}

/// Complete display snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// State version this frame was built from.
    pub version: u64,

    /// While set, only the loading screen is shown.
    pub loading: bool,

    pub controls: ControlsView,
    pub hero: HeroStats,
    pub results: ResultsCount,
    pub grid: GridView,
    pub pagination: PaginationView,
    pub detail: DetailSurface,

    /// Fragments rebuilt by the mutation that produced this frame, in order.
    pub rendered: Vec<FragmentKind>,
}

/// Filter bar and toggles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsView {
    pub search_term: String,
    /// `"$min – $max"`.
    pub price_label: String,
    pub bedrooms_label: String,
    pub bathrooms_label: String,
    pub show_filters: bool,
    pub show_map: bool,
}

/// Statistics over the full, unfiltered listing set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroStats {
    pub total: usize,
    /// Lowest current price; `None` when there are no listings.
    pub min_price: Option<f64>,
    /// Distinct last address segments.
    pub locations: usize,
}

/// Number of listings passing the current filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultsCount {
    pub count: usize,
}

impl ResultsCount {
    /// `"1 property found"` / `"12 properties found"`.
    #[must_use]
    pub fn label(&self) -> String {
        let noun = if self.count == 1 { "property" } else { "properties" };
        format!("{} {noun} found", self.count)
    }
}

/// One card on the grid, or the body of the selected overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub address: String,
    pub description: String,
    pub price_label: String,
    pub change_label: String,
    pub trend: PriceTrend,
    pub bedrooms_label: String,
    pub bathrooms_label: String,
    pub home_type: String,
    pub status: String,
    pub images: Vec<String>,
}

/// The card grid for the current page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GridView {
    /// Another surface covers the grid.
    #[default]
    Hidden,
    /// No listing passes the filters.
    NoResults,
    Cards(Vec<CardView>),
}

impl GridView {
    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Cards(cards) => cards,
            Self::Hidden | Self::NoResults => &[],
        }
    }
}

/// Pagination controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Hidden together with the grid.
    pub visible: bool,
}

impl PaginationView {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// One dated row of a listing's price history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: String,
    pub price: String,
}

/// Full detail page content.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub price_label: String,
    pub change_label: String,
    pub trend: PriceTrend,
    pub description: String,
    /// Label/value pairs: bedrooms, bathrooms, type, status, direction,
    /// last updated.
    pub specs: Vec<(&'static str, String)>,
    pub history: Vec<HistoryRow>,
    pub images: Vec<String>,
}

/// Whatever covers the grid, if anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailSurface {
    #[default]
    None,
    Overlay(CardView),
    Full(DetailView),
}
