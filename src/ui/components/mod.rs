//! Composable UI component renderers.
//!
//! Each component paints one part of the interface at a given row and
//! returns the next free row, so layouts are plain sequences of calls.
//!
//! # Components
//!
//! - [`header`]: Title bar and hero statistics
//! - [`controls`]: Search box and filter panel
//! - [`map`]: Marker field and popup line
//! - [`grid`]: Results count and listing cards
//! - [`pagination`]: Prev / page label / next
//! - [`detail`]: Selected overlay and full detail page
//! - [`empty`]: Loading screen and no-results message
//! - [`footer`]: Help text and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header + hero statistics]
//! [Border]
//! [Search box - 3 lines]        while searching or a term is set
//! [Filter panel]                when the filters panel is shown
//! [Map pane]                    when the map is shown
//! [Results count + cards | overlay | detail page]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod controls;
mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod map;
mod pagination;

pub use empty::render_loading;
pub use footer::keybindings;

use crate::app::{InputMode, ViewState};
use crate::map::TerminalMap;
use crate::ui::cards::CardDeck;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailSurface, Frame, GridView};

/// Everything one paint needs besides the theme and pane size.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub frame: &'a Frame,
    pub deck: &'a CardDeck,
    pub map: &'a TerminalMap,
    pub view: &'a ViewState,
    pub input_mode: InputMode,
}

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the catalogue layout.
///
/// Rows between the controls and the footer border go to the map pane (a
/// third of the pane at most) and then to whichever of grid, overlay or
/// detail page is active. The pagination controls sit on the last content
/// row.
pub fn render_catalogue(scene: &Scene<'_>, theme: &Theme, rows: usize, cols: usize) {
    let frame = scene.frame;
    let footer_row = rows.saturating_sub(1);
    let footer_border = footer_row.saturating_sub(1);
    let last_content = footer_border.saturating_sub(1);

    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)
    current_row = header::render_header(current_row, &frame.hero, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let typing = scene.input_mode == InputMode::Search;
    if typing || !frame.controls.search_term.is_empty() {
        current_row = controls::render_search_bar(current_row, &frame.controls, typing, theme, cols);
    }
    if frame.controls.show_filters {
        current_row = controls::render_filter_panel(current_row, &frame.controls, theme, cols);
    }

    if frame.controls.show_map {
        let available = (last_content + 1).saturating_sub(current_row);
        let height = (rows / 3).max(map::MIN_MAP_HEIGHT).min(available);
        current_row = map::render_map(current_row, height, scene.map, theme, cols);
    }

    match &frame.detail {
        DetailSurface::Overlay(card) => {
            let state = scene.deck.card(&card.id).copied();
            detail::render_overlay(current_row, last_content, card, state, theme, cols);
        }
        DetailSurface::Full(page) => {
            let state = scene.deck.card(&page.id).copied();
            detail::render_full_detail(current_row, last_content, page, state, theme, cols);
        }
        DetailSurface::None => {
            if current_row <= last_content {
                current_row = grid::render_results(current_row, &frame.results, theme, cols);
            }
            match &frame.grid {
                GridView::Cards(cards) => {
                    grid::render_cards(
                        current_row,
                        last_content.saturating_sub(1),
                        cards,
                        scene.deck,
                        theme,
                        cols,
                    );
                    pagination::render_pagination(last_content, &frame.pagination, theme, cols);
                }
                GridView::NoResults => {
                    empty::render_no_results(current_row, theme, cols);
                }
                GridView::Hidden => {}
            }
        }
    }

    render_border(footer_border, &theme.colors.border, cols);
    footer::render_footer(
        footer_row,
        keybindings(scene.input_mode, scene.view, frame.controls.show_map),
        theme,
        cols,
    );
}
