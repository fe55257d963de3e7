//! Map pane renderer.
//!
//! Paints the [`TerminalMap`] as a bordered field of marker glyphs: `▲` for
//! listings whose price went up, `▼` otherwise. The focused marker is drawn
//! with the selection colors and its popup is printed under the field.

use crate::map::{MarkerIcon, Popup, TerminalMap};
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;

/// Smallest pane that still shows a field: two borders, one field row and
/// the popup line.
pub const MIN_MAP_HEIGHT: usize = 4;

/// One projected cell of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    icon: MarkerIcon,
    focused: bool,
}

/// Renders the map pane in `height` rows starting at `row`.
///
/// # Returns
///
/// The next available row position (row + height), or `row` when the
/// pane does not fit
pub fn render_map(row: usize, height: usize, map: &TerminalMap, theme: &Theme, cols: usize) -> usize {
    if height < MIN_MAP_HEIGHT || cols < 3 {
        return row;
    }
    let field_rows = height - 3;
    let field_cols = cols - 2;
    let canvas = project(map, field_rows, field_cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    let title = fit(&format!(" Map · {} markers ", map.markers().len()), field_cols);
    let title = title.trim_end();
    print!(
        "┌{title}{}┐",
        "─".repeat(field_cols.saturating_sub(title.chars().count()))
    );
    print!("{}", Theme::reset());

    for (i, cells) in canvas.iter().enumerate() {
        position_cursor(row + 1 + i, 1);
        print!("{}│{}", Theme::fg(&theme.colors.border), Theme::reset());
        for cell in cells {
            match cell {
                None => print!(" "),
                Some(cell) => print_cell(*cell, theme),
            }
        }
        print!("{}│{}", Theme::fg(&theme.colors.border), Theme::reset());
    }

    position_cursor(row + 1 + field_rows, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("└{}┘", "─".repeat(field_cols));
    print!("{}", Theme::reset());

    position_cursor(row + 2 + field_rows, 1);
    let popup = map
        .focused_marker()
        .and_then(|m| m.popup.as_ref())
        .map_or_else(|| "[ / ] focus a marker".to_string(), popup_line);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&format!(" {popup}"), cols));
    print!("{}", Theme::reset());

    row + height
}

fn print_cell(cell: Cell, theme: &Theme) {
    if cell.focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        let color = match cell.icon {
            MarkerIcon::Gain => &theme.colors.gain_fg,
            MarkerIcon::Loss => &theme.colors.loss_fg,
        };
        print!("{}", Theme::fg(color));
    }
    print!("{}", glyph(cell.icon));
    print!("{}", Theme::reset());
}

const fn glyph(icon: MarkerIcon) -> char {
    match icon {
        MarkerIcon::Gain => '▲',
        MarkerIcon::Loss => '▼',
    }
}

/// Projects every marker onto a `rows` × `cols` grid. Later markers win a
/// shared cell, except that the focused marker always stays visible.
fn project(map: &TerminalMap, rows: usize, cols: usize) -> Vec<Vec<Option<Cell>>> {
    let mut canvas = vec![vec![None; cols]; rows];
    let focused = map.focused_marker().map(|m| m.handle);

    for marker in map.markers() {
        let Some((r, c)) = map.project(marker.at, rows, cols) else {
            continue;
        };
        let is_focused = focused == Some(marker.handle);
        let slot = &mut canvas[r][c];
        if slot.map_or(true, |cell: Cell| !cell.focused) {
            *slot = Some(Cell {
                icon: marker.icon,
                focused: is_focused,
            });
        }
    }
    canvas
}

/// `"address · $100,000 → $95,000 · -$5,000 (-5.0%)"`.
fn popup_line(popup: &Popup) -> String {
    format!(
        "{} {} · {} → {} · {}",
        glyph(popup.icon),
        popup.title,
        popup.original,
        popup.current,
        popup.change
    )
}
