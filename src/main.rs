//! Zellij plugin and worker entry points.
//!
//! A thin layer between the Homescout library and the Zellij plugin system.
//! It implements `ZellijPlugin` and `ZellijWorker`, translates Zellij events
//! into library events and library actions into Zellij calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Session, key mapping, rendering
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ HomescoutWorker  │   │  ← Reads and normalizes the document
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build the session
//! 2. **Subscribe**: Key, `CustomMessage` and `PermissionRequestResult` events
//! 3. **Permission granted**: Post `LoadListings` to the worker
//! 4. **Update**: Translate events, delegate to the library
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`k`, `Down`/`Up`: Move the card cursor
//! - `n`/`p`, `Right`/`Left`: Next / previous page
//! - `s`: Select the card (overlay), `Enter`: Open details
//! - `Esc`: Close overlay, leave details, or drop marker focus
//! - `,`/`.`: Previous / next photo, `v`: Toggle favorite
//! - `/`: Search, `f`: Filter panel, `c`: Clear filters
//! - `b`/`a`: Cycle bedrooms / bathrooms filter
//! - `(`/`)`: Lower / raise the minimum price
//! - `-`/`+`: Lower / raise the maximum price
//! - `m`: Map, `[`/`]`: Previous / next marker, `o`: Open marker
//! - `q`: Close plugin
//!
//! In search mode:
//! - Printable keys: Type
//! - `Backspace`: Delete
//! - `Enter`: Keep the term and focus the results
//! - `Esc`: Clear the term

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use homescout::map::TerminalMap;
use homescout::worker::{ListingWorker, WorkerMessage, WorkerResponse};
use homescout::{handle_event, Action, Config, Event, InputMode, Session, Theme};

register_plugin!(State);
register_worker!(HomescoutWorker, homescout_worker, HOMESCOUT_WORKER);

/// Worker name used for IPC in both directions.
const WORKER_NAME: &str = "homescout";

/// Zellij worker shim around [`ListingWorker`].
#[derive(Default, Serialize, Deserialize)]
struct HomescoutWorker {
    inner: ListingWorker,
}

/// Worker tracing is installed once per worker lifetime.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

impl ZellijWorker<'_> for HomescoutWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            homescout::observability::init_worker_tracing();
        }

        let Some(response) = self.inner.handle_payload(&payload) else {
            return;
        };
        post_message_to_plugin(PluginMessage {
            name: message,
            payload: response,
            worker_name: None,
        });
    }
}

/// Plugin state wrapper.
struct State {
    session: Session<TerminalMap>,
    theme: Theme,
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        let (session, theme) = homescout::initialize(&Config::default());
        Self {
            session,
            theme,
            worker_name: WORKER_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the session, requests permissions and
    /// subscribes to events. Loading starts once access is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        homescout::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(data_file = %config.data_file, price_step = config.price_step, "parsed configuration");
        let (session, theme) = homescout::initialize(&config);
        self.session = session;
        self.theme = theme;

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::FullHdAccess,
        ]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through the library and executes
    /// the resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted - loading listings");
                        Event::LoadRequested
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - listings cannot be read");
                        Event::LoadAborted
                    }
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        homescout::ui::render(&self.session, &self.theme, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.session, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                // The session may have changed before the error.
                true
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.session.input_mode() == InputMode::Search {
            return Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Right | BareKey::Char('n') => Event::NextPage,
            BareKey::Left | BareKey::Char('p') => Event::PrevPage,
            BareKey::Enter => Event::ViewFocusedDetails,
            BareKey::Char('s') => Event::SelectFocused,
            BareKey::Esc => Event::Escape,
            BareKey::Char(',') => Event::CarouselPrev,
            BareKey::Char('.') => Event::CarouselNext,
            BareKey::Char('v') => Event::ToggleFavorite,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::ToggleFilters,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('b') => Event::CycleBedrooms,
            BareKey::Char('a') => Event::CycleBathrooms,
            BareKey::Char('(') => Event::LowerMinPrice,
            BareKey::Char(')') => Event::RaiseMinPrice,
            BareKey::Char('-') => Event::LowerMaxPrice,
            BareKey::Char('+' | '=') => Event::RaiseMaxPrice,
            BareKey::Char('m') => Event::ToggleMap,
            BareKey::Char('[') => Event::MarkerPrev,
            BareKey::Char(']') => Event::MarkerNext,
            BareKey::Char('o') => Event::OpenMarker,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps worker responses to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
            Action::ScrollToResults => {
                self.session.scroll_to_results();
            }
        }
    }
}
