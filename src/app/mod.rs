//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the
//! domain/storage/worker/map layers. It owns the application state and turns
//! input into state changes and side effects.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → StatePatch → Dispatcher → Frame
//!                           ↑                ↓
//!                           │             Actions → Worker
//!                           └──── Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`dispatcher`]: The single writer of [`AppState`] and builder of frames
//! - [`handler`]: Event processing and the [`Session`] it operates on
//! - [`modes`]: View state machine and input mode
//! - [`state`]: Application state and [`StatePatch`]
//!
//! # Example
//!
//! ```rust
//! use homescout::app::{handle_event, Event, Session};
//! use homescout::map::TerminalMap;
//!
//! let mut session = Session::new(TerminalMap::new(), "/host/listings.json", 50_000.0);
//! let (render, _actions) = handle_event(&mut session, &Event::ToggleFilters)?;
//! assert!(render);
//! assert!(session.dispatcher().state().show_filters());
//! # Ok::<(), homescout::HomescoutError>(())
//! ```

pub mod actions;
pub mod dispatcher;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use dispatcher::Dispatcher;
pub use handler::{handle_event, Event, Session};
pub use modes::{InputMode, ViewCommand, ViewState};
pub use state::{AppState, StatePatch};
