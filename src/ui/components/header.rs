//! Header component renderer.
//!
//! This module renders the plugin title bar and the hero statistics line
//! beneath it.

use crate::domain::format_usd;
use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeroStats;

const TITLE: &str = "Homescout";

/// Renders the title bar and hero statistics starting at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [left padding] Homescout [right padding]
/// [left padding] 45 listings · from $95,000 · 6 locations [right padding]
/// ```
///
/// The title is bold and uses `header_fg` with the optional `header_bg`. The
/// statistics line is dimmed. Statistics always describe the full listing
/// set, not the filtered one.
pub fn render_header(row: usize, hero: &HeroStats, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print_centered(TITLE, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&hero_line(hero), cols);
    print!("{}", Theme::reset());

    row + 2
}

fn hero_line(hero: &HeroStats) -> String {
    let listings = if hero.total == 1 { "listing" } else { "listings" };
    let locations = if hero.locations == 1 { "location" } else { "locations" };
    let from = hero
        .min_price
        .map_or_else(|| "no prices yet".to_string(), |p| format!("from {}", format_usd(p)));
    format!(
        "{} {listings} · {from} · {} {locations}",
        hero.total, hero.locations
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_line_pluralizes() {
        let hero = HeroStats {
            total: 1,
            min_price: Some(95_000.0),
            locations: 1,
        };
        assert_eq!(hero_line(&hero), "1 listing · from $95,000 · 1 location");

        let empty = HeroStats::default();
        assert_eq!(hero_line(&empty), "0 listings · no prices yet · 0 locations");
    }
}
