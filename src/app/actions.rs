//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued together. The plugin runtime in
//! `main.rs` executes them in order; nothing in the library performs them.
//!
//! # Example
//!
//! ```rust
//! use homescout::app::Action;
//! use homescout::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_listings("/host/listings.json".into())),
//!     Action::ScrollToResults,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used for the initial load of the listings document.
    PostToWorker(WorkerMessage),

    /// Brings the top of the results grid into view after a page turn.
    ScrollToResults,
}
