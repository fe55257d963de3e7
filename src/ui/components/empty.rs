//! Empty state component renderers.
//!
//! This module renders the loading screen shown until the listings arrive and
//! the no-results message that replaces the grid when nothing passes the
//! filters.

use crate::infrastructure::display_path;
use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;

/// Renders a centered two-line message starting at `row`.
///
/// The message uses the `empty_state_fg` theme color, and the subtitle uses
/// `text_dim` with dim styling.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_empty_state(row: usize, message: &str, subtitle: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(subtitle, cols);
    print!("{}", Theme::reset());
    row + 2
}

/// Loading screen, drawn a third of the way down the pane. `source` is the
/// listings document being read.
pub fn render_loading(source: &str, theme: &Theme, rows: usize, cols: usize) {
    render_empty_state(
        (rows / 3).max(2),
        "Loading listings…",
        &format!("Reading {}", display_path(source)),
        theme,
        cols,
    );
}

/// Replaces the grid when the filtered set is empty.
pub fn render_no_results(row: usize, theme: &Theme, cols: usize) -> usize {
    render_empty_state(
        row + 1,
        "No properties match your filters",
        "Press 'c' to clear filters or '/' to change the search",
        theme,
        cols,
    )
}
