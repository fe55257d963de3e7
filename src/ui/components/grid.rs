//! Results count and card grid renderers.
//!
//! Cards are three lines tall and stacked vertically. When the page holds
//! more cards than fit, the visible window scrolls so the card under the
//! cursor stays on screen.

use crate::domain::PriceTrend;
use crate::ui::cards::{CardDeck, CardState};
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, ResultsCount};

/// Rows used by one card.
pub const CARD_HEIGHT: usize = 3;

/// Renders the results count line.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_results(row: usize, results: &ResultsCount, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(&format!(" {}", results.label()), cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders as many cards as fit between `row` and `last_row` (inclusive).
///
/// # Returns
///
/// The next available row position
pub fn render_cards(
    row: usize,
    last_row: usize,
    cards: &[CardView],
    deck: &CardDeck,
    theme: &Theme,
    cols: usize,
) -> usize {
    let capacity = (last_row + 1).saturating_sub(row) / CARD_HEIGHT;
    let start = window_start(deck.cursor(), capacity);

    let mut current_row = row;
    for (offset, card) in cards.iter().enumerate().skip(start).take(capacity) {
        let state = deck.card(&card.id).copied();
        current_row = render_card(current_row, card, state, offset == deck.cursor(), theme, cols);
    }
    current_row
}

/// First card index shown so that `cursor` is inside a window of `capacity`.
const fn window_start(cursor: usize, capacity: usize) -> usize {
    if capacity == 0 || cursor < capacity {
        0
    } else {
        cursor + 1 - capacity
    }
}

/// Renders one card.
///
/// # Layout
///
/// ```text
/// ▶ ★ $250,000  ▲ +$10,000 (+4.2%)   3 bd · 2 ba
///     12 Av. Amazonas, Quito · House · For Sale
///     ▣ 1/4 /images/12.jpg
/// ```
///
/// The focused card uses the selection colors on its first line.
pub fn render_card(
    row: usize,
    card: &CardView,
    state: Option<CardState>,
    focused: bool,
    theme: &Theme,
    cols: usize,
) -> usize {
    let favorite = state.is_some_and(|s| s.favorite);
    let image_index = state.map_or(0, |s| s.image_index);

    position_cursor(row, 1);
    if focused {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("{}", fit(&summary_line(card, favorite), cols));
    } else {
        print!("  ");
        if favorite {
            print!("{}★ ", Theme::fg(&theme.colors.favorite_fg));
        } else {
            print!("  ");
        }
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.price_fg));
        print!("{}", card.price_label);
        print!("{}", Theme::reset());
        print!("  {}", trend_color(card.trend, theme));
        print!("{} {}", trend_arrow(card.trend), card.change_label);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let used = 4 + card.price_label.chars().count() + 4 + card.change_label.chars().count();
        print!("{}", fit(&room_badges(card), cols.saturating_sub(used)));
    }
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&format!("    {}", meta_line(card)), cols));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&format!("    {}", image_line(&card.images, image_index)), cols));
    print!("{}", Theme::reset());

    row + CARD_HEIGHT
}

pub(crate) fn trend_color(trend: PriceTrend, theme: &Theme) -> String {
    match trend {
        PriceTrend::Up => Theme::fg(&theme.colors.gain_fg),
        PriceTrend::Down => Theme::fg(&theme.colors.loss_fg),
    }
}

pub(crate) const fn trend_arrow(trend: PriceTrend) -> char {
    match trend {
        PriceTrend::Up => '▲',
        PriceTrend::Down => '▼',
    }
}

/// First line of the focused card, printed in one color.
fn summary_line(card: &CardView, favorite: bool) -> String {
    format!(
        "▶ {} {}  {} {}{}",
        if favorite { "★" } else { " " },
        card.price_label,
        trend_arrow(card.trend),
        card.change_label,
        room_badges(card),
    )
}

fn room_badges(card: &CardView) -> String {
    format!("   {} bd · {} ba", card.bedrooms_label, card.bathrooms_label)
}

fn meta_line(card: &CardView) -> String {
    let kind: Vec<&str> = [card.home_type.as_str(), card.status.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if kind.is_empty() {
        card.address.clone()
    } else {
        format!("{} · {}", card.address, kind.join(" · "))
    }
}

/// `"▣ 2/5 /images/12.jpg"`; the index wraps into range.
pub(crate) fn image_line(images: &[String], index: usize) -> String {
    match images.len() {
        0 => "▣ no image".to_string(),
        n => {
            let i = index % n;
            format!("▣ {}/{n} {}", i + 1, images[i])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardView {
        CardView {
            id: "1".into(),
            address: "12 Av. Amazonas, Quito".into(),
            description: String::new(),
            price_label: "$250,000".into(),
            change_label: "+$10,000 (+4.2%)".into(),
            trend: PriceTrend::Up,
            bedrooms_label: "3".into(),
            bathrooms_label: "-".into(),
            home_type: "House".into(),
            status: String::new(),
            images: vec!["/images/a.jpg".into(), "/images/b.jpg".into()],
        }
    }

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(window_start(0, 4), 0);
        assert_eq!(window_start(3, 4), 0);
        assert_eq!(window_start(4, 4), 1);
        assert_eq!(window_start(19, 4), 16);
        assert_eq!(window_start(5, 0), 0);
    }

    #[test]
    fn card_lines() {
        let card = card();
        assert_eq!(meta_line(&card), "12 Av. Amazonas, Quito · House");
        assert_eq!(image_line(&card.images, 3), "▣ 2/2 /images/b.jpg");
        assert_eq!(
            summary_line(&card, true),
            "▶ ★ $250,000  ▲ +$10,000 (+4.2%)   3 bd · - ba"
        );
    }
}
