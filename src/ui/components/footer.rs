//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.
//! The hints depend on the input mode and on what covers the grid.

use crate::app::{InputMode, ViewState};
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;

/// Keybinding hints for the current mode.
///
/// ```rust
/// use homescout::app::{InputMode, ViewState};
/// use homescout::ui::components::keybindings;
///
/// let hints = keybindings(InputMode::Search, &ViewState::Grid, false);
/// assert!(hints.starts_with("type to search"));
/// ```
#[must_use]
pub fn keybindings(mode: InputMode, view: &ViewState, map_visible: bool) -> &'static str {
    match (mode, view) {
        (InputMode::Search, _) => "type to search | enter: results | esc: clear",
        (InputMode::Normal, ViewState::SelectedOverlay { .. }) => {
            "enter: details | ,/.: photos | v: favorite | esc: close | q: quit"
        }
        (InputMode::Normal, ViewState::FullDetail { .. }) => {
            ",/.: photos | v: favorite | esc: back | q: quit"
        }
        (InputMode::Normal, ViewState::Grid) if map_visible => {
            "[/]: markers | o: open | m: hide map | j/k: move | /: search | q: quit"
        }
        (InputMode::Normal, ViewState::Grid) => {
            "j/k: move | s: select | enter: details | n/p: page | /: search | f: filters | m: map | q: quit"
        }
    }
}

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling. Pads
/// the line to fill the entire terminal width. Hints wider than the terminal
/// are truncated.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, help_text: &str, theme: &Theme, cols: usize) -> usize {
    let text_len = help_text.chars().count().min(cols);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{}", fit(help_text, text_len));
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
