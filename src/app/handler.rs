//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, map
//! clicks and worker responses, translating them into [`StatePatch`]es for the
//! dispatcher, card deck changes, map calls and [`Action`]s for the runtime.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State changes go through [`Dispatcher::update`] or
//!    [`Dispatcher::turn_page`]; view-only changes go to the card deck or map
//! 4. The handler returns whether a re-render is needed and the actions to
//!    execute
//!
//! # Event Types
//!
//! - **Grid**: `CursorDown`, `CursorUp`, `NextPage`, `PrevPage`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `FocusResults`, `ExitSearch`
//! - **Filters**: price bound adjustments, room filters, `ClearFilters`,
//!   `ToggleFilters`
//! - **Cards**: carousel, favorites
//! - **Views**: `Select`, `ViewDetails`, `Close`, `Back`, `Escape`
//! - **Map**: `ToggleMap`, marker focus and clicks
//! - **Worker**: `LoadRequested`, `LoadAborted`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use homescout::app::{handle_event, Event, Session};
//! use homescout::map::TerminalMap;
//!
//! let mut session = Session::new(TerminalMap::new(), "/host/listings.json", 50_000.0);
//! let (_, actions) = handle_event(&mut session, &Event::LoadRequested)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), homescout::HomescoutError>(())
//! ```

use super::dispatcher::Dispatcher;
use super::modes::{InputMode, ViewCommand, ViewState};
use super::state::StatePatch;
use crate::app::Action;
use crate::domain::error::{HomescoutError, Result};
use crate::domain::{self, PageNav, PriceRange};
use crate::map::{MapSurface, MapSync, MarkerHandle};
use crate::ui::cards::Carousel;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Largest value the room filters cycle through before returning to "any".
const MAX_ROOM_FILTER: u32 = 5;

/// Events triggered by user input, map clicks, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the grid cursor to the next card (wraps to the first).
    CursorDown,
    /// Moves the grid cursor to the previous card (wraps to the last).
    CursorUp,
    NextPage,
    PrevPage,

    /// Enters search mode; printable keys edit the search term.
    SearchMode,
    /// Appends a character to the search term and re-filters.
    Char(char),
    /// Removes the last character of the search term and re-filters.
    Backspace,
    /// Leaves search mode keeping the term and focuses the first result.
    FocusResults,
    /// Leaves search mode and clears the term.
    ExitSearch,

    /// Raises the lower price bound by one step (clamped to the upper bound).
    RaiseMinPrice,
    LowerMinPrice,
    RaiseMaxPrice,
    /// Lowers the upper price bound by one step (clamped to the lower bound).
    LowerMaxPrice,
    /// Steps the bedroom filter through any → 1 → … → 5 → any.
    CycleBedrooms,
    CycleBathrooms,
    ClearFilters,
    ToggleFilters,

    ToggleMap,

    /// Carousel of the focused card (grid cursor, or the open listing).
    CarouselNext,
    CarouselPrev,
    ToggleFavorite,

    /// Opens the overlay for the card under the grid cursor.
    SelectFocused,
    /// Opens the detail page for the card under the cursor or in the overlay.
    ViewFocusedDetails,
    Select(String),
    ViewDetails(String),
    /// Closes the selected overlay.
    Close,
    /// Leaves the detail page.
    Back,
    /// Closes whatever covers the grid, or drops marker focus.
    Escape,

    MarkerNext,
    MarkerPrev,
    /// Clicks the focused marker.
    OpenMarker,
    /// A marker was clicked by the host.
    MarkerClicked(MarkerHandle),

    /// Asks the worker to load the listings document.
    LoadRequested,
    /// A load that cannot start; resolves to an empty listing set.
    LoadAborted,
    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

/// A plugin session: dispatcher, map adapter and input settings.
#[derive(Debug)]
pub struct Session<S> {
    dispatcher: Dispatcher,
    map: MapSync<S>,
    input_mode: InputMode,
    price_step: f64,
    data_file: String,
}

impl<S: MapSurface> Session<S> {
    /// Creates a session in the loading state with the map hidden.
    pub fn new(surface: S, data_file: impl Into<String>, price_step: f64) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            map: MapSync::new(surface),
            input_mode: InputMode::Normal,
            price_step,
            data_file: data_file.into(),
        }
    }

    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub const fn map(&self) -> &MapSync<S> {
        &self.map
    }

    pub const fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    /// The card that carousel and favorite keys act on: the open listing,
    /// or the card under the grid cursor.
    pub fn focused_card(&self) -> Option<String> {
        let state = self.dispatcher.state();
        match state.view() {
            ViewState::Grid => self.dispatcher.deck().focused_id().map(str::to_string),
            ViewState::SelectedOverlay { id } | ViewState::FullDetail { id } => Some(id.clone()),
        }
    }

    /// Focuses the first card of the page.
    pub fn scroll_to_results(&mut self) {
        self.dispatcher.deck_mut().focus_first();
    }

    fn update(&mut self, patch: StatePatch) -> bool {
        self.dispatcher.update(patch);
        true
    }

    /// Ends a pending load with no listings. Returns false when nothing
    /// was loading.
    fn resolve_empty(&mut self) -> bool {
        if !self.dispatcher.state().is_loading() {
            return false;
        }
        self.update(StatePatch::new().listings(Vec::new()).loading(false));
        self.map.sync(&[]);
        true
    }

    fn view(&mut self, command: ViewCommand) -> bool {
        self.update(StatePatch::new().view(command))
    }

    fn price_range(&self) -> PriceRange {
        self.dispatcher.state().filter().price_range
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        if self.input_mode != InputMode::Search {
            return false;
        }
        let mut term = self.dispatcher.state().filter().search_term.clone();
        edit(&mut term);
        tracing::trace!(term = %term, "search term updated");
        self.update(StatePatch::new().search_term(term))
    }

    fn cycle_card(&mut self, direction: Carousel) -> bool {
        self.focused_card()
            .map_or(false, |id| self.dispatcher.deck_mut().cycle_image(&id, direction))
    }
}

fn next_room_filter(current: Option<u32>) -> Option<u32> {
    match current {
        None => Some(1),
        Some(n) if n < MAX_ROOM_FILTER => Some(n + 1),
        Some(_) => None,
    }
}

/// Processes an event, mutates the session, and returns actions to execute.
///
/// Returns whether the UI needs a re-render and the actions to run, in
/// order. Events that do not apply in the current mode are ignored and
/// return `(false, vec![])`.
///
/// # Errors
///
/// Returns [`HomescoutError::Config`] when a load is requested without a
/// configured data file. The session is resolved to an empty listing set
/// first, so it never stays loading.
#[allow(clippy::too_many_lines)]
pub fn handle_event<S: MapSurface>(
    session: &mut Session<S>,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let outcome = match event {
        Event::CursorDown | Event::CursorUp => {
            if !session.dispatcher.state().view().shows_grid() {
                return Ok((false, vec![]));
            }
            let deck = session.dispatcher.deck_mut();
            if matches!(event, Event::CursorDown) {
                deck.cursor_down();
            } else {
                deck.cursor_up();
            }
            (true, vec![])
        }
        Event::NextPage | Event::PrevPage => {
            let nav = if matches!(event, Event::NextPage) {
                PageNav::Next
            } else {
                PageNav::Prev
            };
            if session.dispatcher.turn_page(nav) {
                (true, vec![Action::ScrollToResults])
            } else {
                (false, vec![])
            }
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            session.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::Char(c) => (session.edit_search(|term| term.push(*c)), vec![]),
        Event::Backspace => (
            session.edit_search(|term| {
                term.pop();
            }),
            vec![],
        ),
        Event::FocusResults => {
            session.input_mode = InputMode::Normal;
            (true, vec![Action::ScrollToResults])
        }
        Event::ExitSearch => {
            tracing::debug!(term = %session.dispatcher.state().filter().search_term, "exiting search mode");
            session.input_mode = InputMode::Normal;
            session.update(StatePatch::new().search_term(""));
            (true, vec![])
        }

        Event::RaiseMinPrice | Event::LowerMinPrice => {
            let range = session.price_range();
            let step = if matches!(event, Event::RaiseMinPrice) {
                session.price_step
            } else {
                -session.price_step
            };
            let next = range.with_min(range.min() + step);
            if next == range {
                (false, vec![])
            } else {
                (session.update(StatePatch::new().price_range(next)), vec![])
            }
        }
        Event::RaiseMaxPrice | Event::LowerMaxPrice => {
            let range = session.price_range();
            let step = if matches!(event, Event::RaiseMaxPrice) {
                session.price_step
            } else {
                -session.price_step
            };
            let next = range.with_max(range.max() + step);
            if next == range {
                (false, vec![])
            } else {
                (session.update(StatePatch::new().price_range(next)), vec![])
            }
        }
        Event::CycleBedrooms => {
            let next = next_room_filter(session.dispatcher.state().filter().bedrooms);
            (session.update(StatePatch::new().bedrooms(next)), vec![])
        }
        Event::CycleBathrooms => {
            let next = next_room_filter(session.dispatcher.state().filter().bathrooms);
            (session.update(StatePatch::new().bathrooms(next)), vec![])
        }
        Event::ClearFilters => {
            tracing::debug!("clearing filters");
            (session.update(StatePatch::new().clear_filters()), vec![])
        }
        Event::ToggleFilters => {
            let show = !session.dispatcher.state().show_filters();
            (session.update(StatePatch::new().show_filters(show)), vec![])
        }

        Event::ToggleMap => {
            let show = !session.dispatcher.state().show_map();
            session.update(StatePatch::new().show_map(show));
            session.map.set_visible(show);
            if !show {
                session.map.blur();
            }
            (true, vec![])
        }

        Event::CarouselNext => (session.cycle_card(Carousel::Next), vec![]),
        Event::CarouselPrev => (session.cycle_card(Carousel::Prev), vec![]),
        Event::ToggleFavorite => {
            let toggled = session
                .focused_card()
                .map_or(false, |id| session.dispatcher.deck_mut().toggle_favorite(&id));
            (toggled, vec![])
        }

        Event::SelectFocused => {
            if !session.dispatcher.state().view().shows_grid() {
                return Ok((false, vec![]));
            }
            match session.focused_card() {
                Some(id) => (session.view(ViewCommand::Select(id)), vec![]),
                None => (false, vec![]),
            }
        }
        Event::ViewFocusedDetails => match session.focused_card() {
            Some(id) => (session.view(ViewCommand::ViewDetails(id)), vec![]),
            None => (false, vec![]),
        },
        Event::Select(id) => (session.view(ViewCommand::Select(id.clone())), vec![]),
        Event::ViewDetails(id) => (session.view(ViewCommand::ViewDetails(id.clone())), vec![]),
        Event::Close => (session.view(ViewCommand::Close), vec![]),
        Event::Back => (session.view(ViewCommand::Back), vec![]),
        Event::Escape => match session.dispatcher.state().view() {
            ViewState::SelectedOverlay { .. } => (session.view(ViewCommand::Close), vec![]),
            ViewState::FullDetail { .. } => (session.view(ViewCommand::Back), vec![]),
            ViewState::Grid => {
                let had_focus = session.map.focused().is_some();
                session.map.blur();
                (had_focus, vec![])
            }
        },

        Event::MarkerNext | Event::MarkerPrev => {
            if !session.map.is_visible() {
                return Ok((false, vec![]));
            }
            let focused = if matches!(event, Event::MarkerNext) {
                session.map.focus_next()
            } else {
                session.map.focus_prev()
            };
            (focused.is_some(), vec![])
        }
        Event::OpenMarker => match session.map.open_focused() {
            Some(command) => (session.view(command), vec![]),
            None => (false, vec![]),
        },
        Event::MarkerClicked(handle) => match session.map.route_click(*handle) {
            Some(command) => (session.view(command), vec![]),
            None => {
                tracing::warn!(marker = handle.0, "click on unknown marker");
                (false, vec![])
            }
        },

        Event::LoadRequested => {
            if session.data_file.trim().is_empty() {
                session.resolve_empty();
                return Err(HomescoutError::Config("no data file configured".to_string()));
            }
            tracing::debug!(path = %session.data_file, "requesting listings load");
            (
                false,
                vec![Action::PostToWorker(WorkerMessage::load_listings(
                    session.data_file.clone(),
                ))],
            )
        }
        Event::LoadAborted => {
            tracing::warn!("listings load aborted");
            (session.resolve_empty(), vec![])
        }
        Event::WorkerResponse(response) => {
            if !session.dispatcher.state().is_loading() {
                tracing::warn!("worker response after loading finished, ignoring");
                return Ok((false, vec![]));
            }
            match response {
                WorkerResponse::ListingsLoaded { listings } => {
                    let max = domain::max_observed_price(listings);
                    tracing::debug!(count = listings.len(), max_price = max, "listings loaded");
                    session.update(
                        StatePatch::new()
                            .listings(listings.clone())
                            .loading(false)
                            .price_range(PriceRange::up_to(max)),
                    );
                }
                WorkerResponse::LoadFailed { message } => {
                    let error = HomescoutError::Worker(message.clone());
                    tracing::error!(error = %error, "listings load failed");
                    session.update(StatePatch::new().listings(Vec::new()).loading(false));
                }
            }
            let listings = session.dispatcher.state().listings();
            session.map.sync(listings);
            (true, vec![])
        }

        Event::CloseFocus => (false, vec![Action::CloseFocus]),
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::sample;
    use crate::domain::{Coordinates, Listing};
    use crate::map::sync::fake::{Call, FakeMap};

    fn session_with(listings: Vec<Listing>) -> Session<FakeMap> {
        let mut session = Session::new(FakeMap::default(), "/host/listings.json", 50_000.0);
        handle_event(
            &mut session,
            &Event::WorkerResponse(WorkerResponse::ListingsLoaded { listings }),
        )
        .unwrap();
        session
    }

    fn send(session: &mut Session<FakeMap>, event: Event) -> (bool, Vec<Action>) {
        handle_event(session, &event).unwrap()
    }

    #[test]
    fn load_sets_range_to_max_observed() {
        let session = session_with(vec![sample("a", 100_000.0), sample("b", 400_000.0)]);
        let state = session.dispatcher().state();
        assert!(!state.is_loading());
        assert_eq!(state.filter().price_range, PriceRange::new(0.0, 400_000.0));
        assert_eq!(state.filtered().len(), 2);
    }

    #[test]
    fn load_failure_resolves_to_empty_set() {
        let mut session = Session::new(FakeMap::default(), "/nowhere.json", 50_000.0);
        let (render, _) = send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::LoadFailed {
                message: "boom".into(),
            }),
        );
        assert!(render);
        assert!(!session.dispatcher().state().is_loading());
        assert!(session.dispatcher().state().listings().is_empty());
        assert_eq!(session.map().surface().calls, vec![Call::Clear]);
    }

    #[test]
    fn late_worker_response_is_ignored() {
        let mut session = session_with(vec![sample("a", 1.0)]);
        let (render, _) = send(
            &mut session,
            Event::WorkerResponse(WorkerResponse::ListingsLoaded {
                listings: vec![sample("b", 2.0)],
            }),
        );
        assert!(!render);
        assert_eq!(session.dispatcher().state().listings()[0].id, "a");
    }

    #[test]
    fn load_request_posts_data_file() {
        let mut session = Session::new(FakeMap::default(), "/host/l.json", 1.0);
        let (_, actions) = send(&mut session, Event::LoadRequested);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::load_listings("/host/l.json".into()))]
        );

        let mut unconfigured = Session::new(FakeMap::default(), " ", 1.0);
        assert!(matches!(
            handle_event(&mut unconfigured, &Event::LoadRequested),
            Err(HomescoutError::Config(_))
        ));
        assert!(!unconfigured.dispatcher().state().is_loading());
        assert!(unconfigured.dispatcher().state().listings().is_empty());
    }

    #[test]
    fn aborted_load_resolves_to_empty_set() {
        let mut session = Session::new(FakeMap::default(), "/host/l.json", 1.0);
        assert!(session.dispatcher().state().is_loading());

        let (render, actions) = send(&mut session, Event::LoadAborted);
        assert!(render);
        assert!(actions.is_empty());
        assert!(!session.dispatcher().state().is_loading());
        assert_eq!(session.map().surface().calls, vec![Call::Clear]);

        // Once resolved, a second abort changes nothing.
        assert_eq!(send(&mut session, Event::LoadAborted), (false, vec![]));
    }

    #[test]
    fn typing_filters_only_in_search_mode() {
        let mut a = sample("a", 1.0);
        a.address = "Casa Cumbayá".into();
        let mut session = session_with(vec![a, sample("b", 2.0)]);

        assert_eq!(send(&mut session, Event::Char('c')), (false, vec![]));

        send(&mut session, Event::SearchMode);
        for c in "CUMB".chars() {
            send(&mut session, Event::Char(c));
        }
        assert_eq!(session.dispatcher().state().filtered().len(), 1);

        send(&mut session, Event::Backspace);
        assert_eq!(session.dispatcher().state().filter().search_term, "CUM");

        let (_, actions) = send(&mut session, Event::FocusResults);
        assert_eq!(actions, vec![Action::ScrollToResults]);
        assert_eq!(session.input_mode(), InputMode::Normal);
        assert_eq!(session.dispatcher().state().filter().search_term, "CUM");

        send(&mut session, Event::SearchMode);
        send(&mut session, Event::ExitSearch);
        assert_eq!(session.dispatcher().state().filter().search_term, "");
        assert_eq!(session.dispatcher().state().filtered().len(), 2);
    }

    #[test]
    fn price_adjustments_clamp() {
        let mut session = session_with(vec![sample("a", 100_000.0), sample("b", 120_000.0)]);

        for _ in 0..5 {
            send(&mut session, Event::RaiseMinPrice);
        }
        let range = session.dispatcher().state().filter().price_range;
        assert_eq!(range.min(), 120_000.0);
        assert_eq!(range.max(), 120_000.0);
        assert_eq!(session.dispatcher().state().filtered().len(), 1);

        assert_eq!(send(&mut session, Event::RaiseMinPrice), (false, vec![]));

        send(&mut session, Event::LowerMaxPrice);
        assert_eq!(session.dispatcher().state().filter().price_range.max(), 120_000.0);

        for _ in 0..5 {
            send(&mut session, Event::LowerMinPrice);
        }
        assert_eq!(session.dispatcher().state().filter().price_range.min(), 0.0);
    }

    #[test]
    fn room_filters_cycle_back_to_any() {
        let mut session = session_with(vec![sample("a", 1.0)]);
        for expected in [Some(1), Some(2), Some(3), Some(4), Some(5), None] {
            send(&mut session, Event::CycleBedrooms);
            assert_eq!(session.dispatcher().state().filter().bedrooms, expected);
        }
    }

    #[test]
    fn escape_closes_overlay_then_detail() {
        let mut session = session_with(vec![sample("a", 1.0), sample("b", 2.0)]);

        send(&mut session, Event::CursorDown);
        send(&mut session, Event::SelectFocused);
        assert_eq!(
            session.dispatcher().state().view(),
            &ViewState::SelectedOverlay { id: "b".into() }
        );

        send(&mut session, Event::ViewFocusedDetails);
        assert_eq!(
            session.dispatcher().state().view(),
            &ViewState::FullDetail { id: "b".into() }
        );

        assert_eq!(send(&mut session, Event::CursorDown), (false, vec![]));
        assert_eq!(send(&mut session, Event::NextPage), (false, vec![]));

        send(&mut session, Event::Escape);
        assert_eq!(session.dispatcher().state().view(), &ViewState::Grid);
    }

    #[test]
    fn carousel_acts_on_focused_card() {
        let mut listing = sample("a", 1.0);
        listing.images = vec!["/images/1.jpg".into(), "/images/2.jpg".into()];
        let mut session = session_with(vec![listing]);

        assert!(send(&mut session, Event::CarouselNext).0);
        assert_eq!(session.dispatcher().deck().card("a").map(|c| c.image_index), Some(1));
        send(&mut session, Event::CarouselNext);
        assert_eq!(session.dispatcher().deck().card("a").map(|c| c.image_index), Some(0));

        send(&mut session, Event::ToggleFavorite);
        assert!(session.dispatcher().deck().card("a").is_some_and(|c| c.favorite));
    }

    #[test]
    fn map_toggle_and_marker_focus() {
        let mut located = sample("a", 1.0);
        located.coordinates = Some(Coordinates::new(-0.2, -78.5));
        let mut session = session_with(vec![located]);

        assert_eq!(send(&mut session, Event::MarkerNext), (false, vec![]));

        send(&mut session, Event::ToggleMap);
        assert!(session.dispatcher().state().show_map());
        assert!(session.map().is_visible());
        assert!(session.map().surface().calls.contains(&Call::Invalidate));

        assert!(send(&mut session, Event::MarkerNext).0);
        send(&mut session, Event::OpenMarker);
        assert_eq!(
            session.dispatcher().state().view(),
            &ViewState::SelectedOverlay { id: "a".into() }
        );
    }

    #[test]
    fn marker_click_selects_listing() {
        let mut located = sample("a", 1.0);
        located.coordinates = Some(Coordinates::new(-0.2, -78.5));
        let mut session = session_with(vec![located]);

        send(&mut session, Event::MarkerClicked(MarkerHandle(1)));
        assert_eq!(
            session.dispatcher().state().view(),
            &ViewState::SelectedOverlay { id: "a".into() }
        );
        assert_eq!(send(&mut session, Event::MarkerClicked(MarkerHandle(9))), (false, vec![]));
    }

    #[test]
    fn page_turn_scrolls_to_results() {
        let listings = (1..=45).map(|i| sample(&i.to_string(), 1.0)).collect();
        let mut session = session_with(listings);

        assert_eq!(send(&mut session, Event::PrevPage), (false, vec![]));
        assert_eq!(send(&mut session, Event::NextPage), (true, vec![Action::ScrollToResults]));
        assert_eq!(session.dispatcher().state().current_page(), 2);
    }

    #[test]
    fn select_then_close_returns_to_grid() {
        let mut session = session_with(vec![sample("abc", 100_000.0), sample("xyz", 200_000.0)]);

        let (render, _) = send(&mut session, Event::Select("abc".into()));
        assert!(render);
        let state = session.dispatcher().state();
        assert_eq!(state.view(), &ViewState::SelectedOverlay { id: "abc".into() });
        assert_eq!(state.selected_listing().map(|l| l.id.as_str()), Some("abc"));
        assert!(!state.view().shows_grid());

        send(&mut session, Event::Close);
        let state = session.dispatcher().state();
        assert_eq!(state.view(), &ViewState::Grid);
        assert!(state.selected_listing().is_none());
    }

    mod flows {
        use super::super::*;
        use crate::map::TerminalMap;
        use crate::ui::GridView;
        use crate::worker::ListingWorker;
        use std::io::Write;
        use tempfile::NamedTempFile;

        fn document(count: usize) -> String {
            let listings: Vec<String> = (0..count)
                .map(|i| {
                    let beds = i % 4 + 1;
                    format!(
                        r#"{{"id": "L{i}", "address": "{i} Calle Larga, Cuenca", "description": "Casa {i}",
                            "currentPrice": {price}, "bedrooms": {beds}, "bathrooms": 1,
                            "lat": -2.9{i}, "lng": -79.0,
                            "priceHistory": [{{"price": {orig}, "timestamp": "2024-03-01T10:00:00Z"}}]}}"#,
                        price = 100_000 + i * 10_000,
                        orig = 90_000 + i * 10_000,
                    )
                })
                .collect();
            format!(r#"{{"listings": [{}]}}"#, listings.join(","))
        }

        /// Runs a load request through the worker the way the plugin shim does.
        fn load(session: &mut Session<TerminalMap>) {
            let (_, actions) = handle_event(session, &Event::LoadRequested).unwrap();
            let [Action::PostToWorker(message)] = actions.as_slice() else {
                panic!("expected one worker message, got {actions:?}");
            };

            let payload = serde_json::to_string(message).unwrap();
            let reply = ListingWorker::new().handle_payload(&payload).unwrap();
            let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
            handle_event(session, &Event::WorkerResponse(response)).unwrap();
        }

        fn loaded(count: usize) -> (NamedTempFile, Session<TerminalMap>) {
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "{}", document(count)).unwrap();
            let mut session = Session::new(
                TerminalMap::new(),
                file.path().to_string_lossy().into_owned(),
                50_000.0,
            );
            assert!(session.dispatcher().frame().loading);
            load(&mut session);
            (file, session)
        }

        #[test]
        fn worker_load_fills_catalogue_and_map() {
            let (_file, session) = loaded(25);

            let dispatcher = session.dispatcher();
            let state = dispatcher.state();
            assert!(!state.is_loading());
            assert_eq!(state.listings().len(), 25);
            assert_eq!(state.filter().price_range.max(), state.max_observed_price());
            assert_eq!(session.map().marker_count(), 25);

            let frame = dispatcher.frame();
            assert_eq!(frame.hero.total, 25);
            assert_eq!(frame.hero.locations, 1);
            assert_eq!(frame.grid.cards().len(), 20);
            assert_eq!(frame.pagination.label(), "Page 1 of 2");
        }

        #[test]
        fn unreadable_document_resolves_to_empty_set() {
            let mut session =
                Session::new(TerminalMap::new(), "/nonexistent/listings.json", 50_000.0);
            load(&mut session);

            let state = session.dispatcher().state();
            assert!(!state.is_loading());
            assert!(state.listings().is_empty());
            assert_eq!(session.dispatcher().frame().grid, GridView::NoResults);
        }

        #[test]
        fn filter_change_resets_page() {
            let (_file, mut session) = loaded(45);

            handle_event(&mut session, &Event::NextPage).unwrap();
            handle_event(&mut session, &Event::NextPage).unwrap();
            assert_eq!(session.dispatcher().state().current_page(), 3);

            handle_event(&mut session, &Event::CycleBedrooms).unwrap();
            let state = session.dispatcher().state();
            assert_eq!(state.filter().bedrooms, Some(1));
            assert_eq!(state.current_page(), 1);
            assert!(state.filtered().iter().all(|l| l.bedrooms == Some(1)));
        }

        #[test]
        fn search_then_clear_filters_restores_everything() {
            let (_file, mut session) = loaded(12);

            handle_event(&mut session, &Event::SearchMode).unwrap();
            for c in "casa 1".chars() {
                handle_event(&mut session, &Event::Char(c)).unwrap();
            }
            let (_, actions) = handle_event(&mut session, &Event::FocusResults).unwrap();
            assert_eq!(actions, vec![Action::ScrollToResults]);
            // "Casa 1", "Casa 10" and "Casa 11"
            assert_eq!(session.dispatcher().state().filtered().len(), 3);

            handle_event(&mut session, &Event::LowerMaxPrice).unwrap();
            handle_event(&mut session, &Event::CycleBathrooms).unwrap();
            handle_event(&mut session, &Event::ClearFilters).unwrap();

            let state = session.dispatcher().state();
            assert!(state.filter().search_term.is_empty());
            assert_eq!(state.filter().bedrooms, None);
            assert_eq!(state.filter().bathrooms, None);
            assert_eq!(state.filter().price_range.min(), 0.0);
            assert_eq!(state.filter().price_range.max(), state.max_observed_price());
            assert_eq!(state.filtered().len(), 12);
        }

        #[test]
        fn marker_click_opens_overlay_and_details_lock_the_grid() {
            let (_file, mut session) = loaded(30);

            handle_event(&mut session, &Event::ToggleMap).unwrap();
            handle_event(&mut session, &Event::MarkerNext).unwrap();
            handle_event(&mut session, &Event::OpenMarker).unwrap();
            assert!(matches!(
                session.dispatcher().state().view(),
                ViewState::SelectedOverlay { .. }
            ));

            handle_event(&mut session, &Event::ViewFocusedDetails).unwrap();
            assert!(session.dispatcher().state().view().is_scroll_locked());
            let (render, _) = handle_event(&mut session, &Event::NextPage).unwrap();
            assert!(!render);
            assert_eq!(session.dispatcher().state().current_page(), 1);

            handle_event(&mut session, &Event::Escape).unwrap();
            assert_eq!(session.dispatcher().state().view(), &ViewState::Grid);
        }
    }
}
