//! Selected overlay and full detail page renderers.
//!
//! Both surfaces cover the grid. The overlay is a bordered box with the card
//! content and a longer description; the detail page fills the content area
//! with specs, price history and a contact prompt.

use super::grid::{image_line, trend_arrow, trend_color};
use crate::ui::cards::CardState;
use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, DetailView};

const OVERLAY_MARGIN: usize = 4;
const SPEC_LABEL_WIDTH: usize = 14;
const CONTACT_PROMPT: &str = "Interested? Contact an agent to schedule a visit.";

/// Renders the selected overlay between `row` and `last_row`.
///
/// # Layout
///
/// ```text
/// [margin] ┌─ 12 Av. Amazonas, Quito ──────┐
/// [margin] │ $250,000  ▲ +$10,000 (+4.2%)   │
/// [margin] │ 3 bd · 2 ba · House · For Sale │
/// [margin] │                                │
/// [margin] │ description, wrapped           │
/// [margin] │ ▣ 1/4 /images/12.jpg           │
/// [margin] └────────────────────────────────┘
/// ```
///
/// # Returns
///
/// The next available row position
pub fn render_overlay(
    row: usize,
    last_row: usize,
    card: &CardView,
    state: Option<CardState>,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(OVERLAY_MARGIN * 2);
    let inner = box_width.saturating_sub(4);
    let favorite = if state.is_some_and(|s| s.favorite) { " ★" } else { "" };

    let title = fit(&format!(" {}{favorite} ", card.address), inner);
    let title = title.trim_end();
    position_cursor(row, 1);
    print!("{}", " ".repeat(OVERLAY_MARGIN));
    print!("{}┌─", Theme::fg(&theme.colors.accent));
    print!("{}{title}{}", Theme::bold(), Theme::reset());
    print!("{}", Theme::fg(&theme.colors.accent));
    print!(
        "{}┐",
        "─".repeat(box_width.saturating_sub(3 + title.chars().count()))
    );
    print!("{}", Theme::reset());

    let price = format!("{}  ", card.price_label);
    let change = format!("{} {}", trend_arrow(card.trend), card.change_label);
    let price_line_len = price.chars().count() + change.chars().count();

    let mut current_row = row + 1;
    position_cursor(current_row, 1);
    print!("{}", " ".repeat(OVERLAY_MARGIN));
    print!("{}│ {}", Theme::fg(&theme.colors.accent), Theme::bold());
    print!("{}{price}", Theme::fg(&theme.colors.price_fg));
    print!("{}{change}", trend_color(card.trend, theme));
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(inner.saturating_sub(price_line_len)));
    print!("{} │{}", Theme::fg(&theme.colors.accent), Theme::reset());
    current_row += 1;

    let rooms = format!("{} bd · {} ba", card.bedrooms_label, card.bathrooms_label);
    let meta: Vec<&str> = [rooms.as_str(), card.home_type.as_str(), card.status.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    let mut lines = vec![meta.join(" · ")];
    lines.push(String::new());
    lines.extend(wrap(&card.description, inner));
    lines.push(String::new());
    lines.push(image_line(&card.images, state.map_or(0, |s| s.image_index)));

    let bottom = last_row.max(row + 2);
    for line in lines {
        if current_row >= bottom {
            break;
        }
        current_row = boxed_line(current_row, &line, inner, theme);
    }

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(OVERLAY_MARGIN));
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("└{}┘", "─".repeat(box_width.saturating_sub(2)));
    print!("{}", Theme::reset());
    current_row + 1
}

fn boxed_line(row: usize, text: &str, inner: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(OVERLAY_MARGIN));
    print!("{}│ ", Theme::fg(&theme.colors.accent));
    print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(text, inner));
    print!("{} │{}", Theme::fg(&theme.colors.accent), Theme::reset());
    row + 1
}

/// Renders the full detail page between `row` and `last_row`.
///
/// Sections, top to bottom: title, price and change, description, specs,
/// price history, photo position and the contact prompt. Sections that do
/// not fit are cut at `last_row`.
///
/// # Returns
///
/// The next available row position
pub fn render_full_detail(
    row: usize,
    last_row: usize,
    detail: &DetailView,
    state: Option<CardState>,
    theme: &Theme,
    cols: usize,
) -> usize {
    let width = cols.saturating_sub(4);
    let mut page = DetailPage {
        row,
        last_row,
        cols,
    };

    let favorite = if state.is_some_and(|s| s.favorite) { " ★" } else { "" };
    page.line(
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        &format!("{}{favorite}", detail.title),
    );
    page.line(
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.price_fg)),
        &detail.price_label,
    );
    page.line(
        &trend_color(detail.trend, theme),
        &format!("{} {}", trend_arrow(detail.trend), detail.change_label),
    );
    page.blank();

    for line in wrap(&detail.description, width) {
        page.line(&Theme::fg(&theme.colors.text_normal), &line);
    }
    page.blank();

    page.line(&Theme::fg(&theme.colors.accent), "Details");
    for (label, value) in &detail.specs {
        page.line(
            &Theme::fg(&theme.colors.text_normal),
            &format!("{label:<SPEC_LABEL_WIDTH$}{value}"),
        );
    }
    page.blank();

    page.line(&Theme::fg(&theme.colors.accent), "Price history");
    if detail.history.is_empty() {
        page.line(&Theme::fg(&theme.colors.text_dim), "No recorded changes");
    }
    for entry in &detail.history {
        page.line(
            &Theme::fg(&theme.colors.text_normal),
            &format!("{:<SPEC_LABEL_WIDTH$}{}", entry.date, entry.price),
        );
    }
    page.blank();

    page.line(
        &Theme::fg(&theme.colors.text_dim),
        &image_line(&detail.images, state.map_or(0, |s| s.image_index)),
    );
    page.line(&Theme::fg(&theme.colors.empty_state_fg), CONTACT_PROMPT);

    page.row
}

/// Row cursor for the detail page that stops writing past `last_row`.
struct DetailPage {
    row: usize,
    last_row: usize,
    cols: usize,
}

impl DetailPage {
    fn line(&mut self, style: &str, text: &str) {
        if self.row > self.last_row {
            return;
        }
        position_cursor(self.row, 1);
        print!("{style}  {}", fit(text, self.cols.saturating_sub(2)));
        print!("{}", Theme::reset());
        self.row += 1;
    }

    fn blank(&mut self) {
        self.line("", "");
    }
}
