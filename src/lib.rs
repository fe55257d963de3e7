//! Homescout: a Zellij plugin for browsing real-estate listings.
//!
//! Homescout loads a JSON listings document in a background worker and
//! presents it as a filterable, paginated catalogue:
//! - Text search over address and description, price range and room filters
//! - Twenty cards per page with an image carousel and favorites
//! - A selected overlay and a full detail page with price history
//! - A terminal map pane with one marker per filtered listing

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin + Worker Shims (main.rs)             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - View state machine                               │
//! │  - Render dispatcher (sole state writer)            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Map Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (map/)        │   │ (worker/)     │
//! │ - Components  │   │ - Surface API │   │ - Load + IPC  │
//! │ - Card deck   │   │ - Marker sync │   │               │
//! │ - Theming     │   │ - Terminal map│   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         │ - Normalizer  │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Listing model, filter engine, pagination         │
//! │  - Sandbox paths                                    │
//! └─────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session, events, view state and the render dispatcher
//! - [`domain`]: Listing model, money, filter engine and pagination
//! - [`infrastructure`]: Sandbox path handling
//! - [`map`]: Map surface trait, marker sync and the terminal map
//! - [`storage`]: Raw document parsing and normalization
//! - [`worker`]: Background loader and its message protocol
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/homescout.wasm" {
//!         data_file "~/listings.json"
//!         price_step "25000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load` parses the configuration, installs tracing, builds the session
//!    and requests filesystem access.
//! 2. When access is granted the plugin posts `LoadListings` to the worker.
//! 3. The worker reads and normalizes the document and answers with
//!    `ListingsLoaded` (or `LoadFailed`).
//! 4. The session stores the listings, widens the price filter to the highest
//!    observed price and places the map markers; the catalogue replaces the
//!    loading screen.
//!
//! # Example
//!
//! ```rust
//! use homescout::{handle_event, initialize, Config, Event};
//!
//! let (mut session, _theme) = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut session, &Event::LoadRequested)?;
//! assert_eq!(actions.len(), 1);
//!
//! let (render, _) = handle_event(&mut session, &Event::ToggleFilters)?;
//! assert!(render);
//! # Ok::<(), homescout::HomescoutError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod map;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Dispatcher, Event, InputMode, Session, StatePatch, ViewState};
pub use domain::{HomescoutError, Result};
pub use ui::Theme;

use map::TerminalMap;
use std::collections::BTreeMap;

/// Default listings document, relative to the host home directory.
pub const DEFAULT_DATA_FILE: &str = "~/listings.json";

/// Default price filter step in dollars.
pub const DEFAULT_PRICE_STEP: f64 = 50_000.0;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/homescout.wasm" {
///     data_file "~/data/quito.json"
///     price_step "10000"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "homescout=debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Sandbox path of the listings document, with `~` already expanded.
    pub data_file: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    /// Amount each price-bound key press moves the filter.
    pub price_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: infrastructure::expand_tilde(DEFAULT_DATA_FILE),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            price_step: DEFAULT_PRICE_STEP,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_file`: blank values fall back to `~/listings.json`; `~` is
    ///   expanded to the sandbox mount
    /// - `price_step`: positive number, otherwise 50 000
    /// - `theme`, `theme_file`, `trace_level`: taken as-is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use homescout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_file".to_string(), "~/data/quito.json".to_string());
    /// map.insert("price_step".to_string(), "10000".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_file, "/host/data/quito.json");
    /// assert!((config.price_step - 10_000.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let data_file = config
            .get("data_file")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DATA_FILE);

        let price_step = config
            .get("price_step")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(DEFAULT_PRICE_STEP);

        Self {
            data_file: infrastructure::expand_tilde(data_file),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            price_step,
        }
    }
}

/// Builds the session and resolves the theme.
///
/// A theme file wins over a theme name; either falls back to the default
/// theme when it cannot be loaded. The session starts in the loading state
/// with the map centred on its default viewport.
#[must_use]
pub fn initialize(config: &Config) -> (Session<TerminalMap>, Theme) {
    tracing::debug!(data_file = %config.data_file, "initializing homescout plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(
                        theme_name = %theme_name,
                        available = ?Theme::builtin_names().collect::<Vec<_>>(),
                        "unknown theme, using default"
                    );
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let session = Session::new(TerminalMap::new(), config.data_file.clone(), config.price_step);
    (session, theme)
}
