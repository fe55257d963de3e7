//! Pagination controls renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationView;

/// Renders `‹ Prev   Page x of y   Next ›` centered at `row`.
///
/// Disabled buttons are dimmed. Nothing is drawn when the pagination is not
/// visible (grid covered or no results).
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_pagination(row: usize, view: &PaginationView, theme: &Theme, cols: usize) -> usize {
    if !view.visible {
        return row;
    }

    let prev = "‹ Prev (p)";
    let next = "(n) Next ›";
    let label = view.label();
    let width = prev.chars().count() + label.chars().count() + next.chars().count() + 6;
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print_button(prev, view.prev_enabled, theme);
    print!("   {}{label}{}   ", Theme::fg(&theme.colors.text_normal), Theme::reset());
    print_button(next, view.next_enabled, theme);
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    row + 1
}

fn print_button(text: &str, enabled: bool, theme: &Theme) {
    if enabled {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    } else {
        print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    }
    print!("{text}");
    print!("{}", Theme::reset());
}
