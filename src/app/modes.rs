//! View and input mode state machines.
//!
//! [`ViewState`] decides which surface is active: the paginated grid, the
//! selected-listing overlay, or the full detail view. Being a single enum, at
//! most one listing is ever in focus and the overlay and detail view can never
//! be open together.
//!
//! ```text
//!            select(id)                  view_details(id)
//!   Grid ───────────────▶ SelectedOverlay    Grid ───────────────▶ FullDetail
//!    ▲                         │              ▲                        │
//!    └──────── close ──────────┘              └──────── back ──────────┘
//!
//!   SelectedOverlay ── view_details(id) ──▶ FullDetail
//!   FullDetail      ── select(id) ────────▶ SelectedOverlay
//! ```
//!
//! [`InputMode`] decides how key presses are interpreted.

use serde::{Deserialize, Serialize};

/// Which listing surface is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    /// Paginated card grid. The initial state.
    #[default]
    Grid,

    /// Compact overlay for one listing, typically opened from a map marker.
    /// The grid is hidden while it is open.
    SelectedOverlay { id: String },

    /// Full-screen detail page. Grid scrolling and page turns are locked.
    FullDetail { id: String },
}

/// Transitions accepted by [`ViewState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Select(String),
    ViewDetails(String),
    Close,
    Back,
}

impl ViewState {
    /// Applies `command` and returns whether the state changed.
    ///
    /// `exists` reports whether a listing id is known; commands naming an
    /// unknown id are ignored. `Close` only leaves the overlay and `Back`
    /// only leaves the detail view; anywhere else they do nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use homescout::app::{ViewCommand, ViewState};
    ///
    /// let known = |id: &str| id == "7";
    /// let mut view = ViewState::Grid;
    ///
    /// assert!(view.apply(ViewCommand::Select("7".into()), known));
    /// assert_eq!(view.selected_id(), Some("7"));
    ///
    /// assert!(!view.apply(ViewCommand::Select("missing".into()), known));
    /// assert!(view.apply(ViewCommand::Close, known));
    /// assert_eq!(view, ViewState::Grid);
    /// ```
    pub fn apply(&mut self, command: ViewCommand, exists: impl Fn(&str) -> bool) -> bool {
        let next = match (&*self, command) {
            (_, ViewCommand::Select(id)) if exists(&id) => Self::SelectedOverlay { id },
            (_, ViewCommand::ViewDetails(id)) if exists(&id) => Self::FullDetail { id },
            (Self::SelectedOverlay { .. }, ViewCommand::Close)
            | (Self::FullDetail { .. }, ViewCommand::Back) => Self::Grid,
            (_, command) => {
                tracing::debug!(?command, state = ?self, "view command ignored");
                return false;
            }
        };

        if *self == next {
            return false;
        }
        tracing::debug!(from = ?self, to = ?next, "view state transition");
        *self = next;
        true
    }

    /// The listing in focus, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::Grid => None,
            Self::SelectedOverlay { id } | Self::FullDetail { id } => Some(id),
        }
    }

    /// Whether the card grid is on screen and accepts cursor and page input.
    #[must_use]
    pub const fn shows_grid(&self) -> bool {
        matches!(self, Self::Grid)
    }

    /// Whether the full detail view holds the scroll lock.
    #[must_use]
    pub const fn is_scroll_locked(&self) -> bool {
        matches!(self, Self::FullDetail { .. })
    }
}

/// Current input handling mode.
///
/// Controls which keybindings are active and whether printable characters are
/// commands or search text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands: navigation, filters, views, map.
    #[default]
    Normal,

    /// Characters edit the search term; every edit re-filters immediately.
    Search,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(id: &str) -> bool {
        matches!(id, "a" | "b")
    }

    #[test]
    fn select_then_close_returns_to_grid() {
        let mut view = ViewState::default();
        assert!(view.apply(ViewCommand::Select("a".into()), known));
        assert_eq!(view, ViewState::SelectedOverlay { id: "a".into() });
        assert!(!view.shows_grid());

        assert!(view.apply(ViewCommand::Close, known));
        assert_eq!(view, ViewState::Grid);
        assert_eq!(view.selected_id(), None);
    }

    #[test]
    fn detail_and_overlay_switch_directly() {
        let mut view = ViewState::default();
        view.apply(ViewCommand::Select("a".into()), known);
        assert!(view.apply(ViewCommand::ViewDetails("b".into()), known));
        assert_eq!(view, ViewState::FullDetail { id: "b".into() });
        assert!(view.is_scroll_locked());

        assert!(view.apply(ViewCommand::Select("a".into()), known));
        assert_eq!(view, ViewState::SelectedOverlay { id: "a".into() });
    }

    #[test]
    fn unknown_ids_and_mismatched_exits_are_noops() {
        let mut view = ViewState::default();
        assert!(!view.apply(ViewCommand::Select("zzz".into()), known));
        assert!(!view.apply(ViewCommand::Close, known));
        assert!(!view.apply(ViewCommand::Back, known));
        assert_eq!(view, ViewState::Grid);

        view.apply(ViewCommand::ViewDetails("a".into()), known);
        assert!(!view.apply(ViewCommand::Close, known));
        assert!(view.apply(ViewCommand::Back, known));
    }

    #[test]
    fn reselecting_same_listing_is_not_a_change() {
        let mut view = ViewState::SelectedOverlay { id: "a".into() };
        assert!(!view.apply(ViewCommand::Select("a".into()), known));
    }
}
