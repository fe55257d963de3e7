//! Search box and filter panel renderers.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ControlsView;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the search term. The box is
/// horizontally centered with margins on both sides. While `typing`, a block
/// cursor follows the term and the border uses the accent color.
///
/// # Returns
///
/// The next available row position (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
pub fn render_search_bar(
    row: usize,
    controls: &ControlsView,
    typing: bool,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if typing {
        &theme.colors.accent
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if typing { "█" } else { "" };
    let search_text = format!(" Search: {}{cursor}", controls.search_term);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&search_text, inner_width));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the one-line filter panel: price range and room filters.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_filter_panel(row: usize, controls: &ControlsView, theme: &Theme, cols: usize) -> usize {
    let text = filter_line(controls);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{}", fit(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}

fn filter_line(controls: &ControlsView) -> String {
    format!(
        " Price {}   Beds {}   Baths {}",
        controls.price_label, controls.bedrooms_label, controls.bathrooms_label
    )
}
