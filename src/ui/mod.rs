//! User interface rendering layer with component-based architecture.
//!
//! This module turns the dispatcher's [`Frame`] into ANSI-styled terminal
//! output through composable rendering components. It provides theme support,
//! a responsive vertical layout and the ephemeral per-card view state.
//!
//! # Architecture
//!
//! ```text
//! StatePatch → Dispatcher::update → Frame ─┐
//!                                CardDeck ─┼→ render → ANSI Output
//!                             TerminalMap ─┘
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Frame types representing renderable UI state
//! - [`cards`]: Carousel position, favorites and grid cursor per card
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (cursor, width fitting, dates)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust,no_run
//! use homescout::app::Session;
//! use homescout::map::TerminalMap;
//! use homescout::ui::{render, Theme};
//!
//! let session = Session::new(TerminalMap::new(), "/host/listings.json", 50_000.0);
//! render(&session, &Theme::default(), 24, 80); // Prints the loading screen
//! ```
//!
//! [`Frame`]: viewmodel::Frame

pub mod cards;
pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use cards::{CardDeck, CardState, Carousel};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardView, ControlsView, DetailSurface, DetailView, FragmentKind, Frame, GridView, HeroStats,
    HistoryRow, PaginationView, ResultsCount,
};
