//! Color themes and ANSI styling.
//!
//! A theme is a TOML palette of hex colors. Four Catppuccin flavors are
//! compiled in; any other palette can be loaded from a file with the same
//! keys. Colors are emitted as 24-bit SGR sequences.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! # header_bg = "#1e1e2e"   (optional)
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#89b4fa"
//! price_fg = "#f9e2af"
//! gain_fg = "#a6e3a1"
//! loss_fg = "#f38ba8"
//! favorite_fg = "#eba0ac"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! ```rust
//! use homescout::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-frappe").unwrap();
//! print!("{}$250,000{}", Theme::fg(&theme.colors.price_fg), Theme::reset());
//! ```

use crate::domain::error::{HomescoutError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Compiled-in palettes; the first one is the default.
const BUILTIN: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// Unparsable colors render as white.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

const ESC: &str = "\u{001b}[";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) keyed by what they paint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title line.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focused card and focused marker.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer hints, meta lines, subtitles.
    pub text_dim: String,
    pub border: String,

    /// Search box, active filters, pagination, overlay frame.
    pub accent: String,

    pub price_fg: String,
    /// Price went up.
    pub gain_fg: String,
    /// Price went down or stayed flat.
    pub loss_fg: String,
    pub favorite_fg: String,

    /// Loading and no-results messages.
    pub empty_state_fg: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    /// A compiled-in theme, or `None` for an unknown name.
    ///
    /// ```rust
    /// use homescout::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN.iter().find(|(builtin, _)| *builtin == name)?;
        toml::from_str(source).ok()
    }

    /// Reads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// [`HomescoutError::Theme`] when the file is unreadable or lacks a
    /// required color.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| HomescoutError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| HomescoutError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// 24-bit foreground sequence for `hex`.
    ///
    /// ```rust
    /// use homescout::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::sgr_rgb(38, hex)
    }

    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::sgr_rgb(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    fn sgr_rgb(layer: u8, hex: &str) -> String {
        let (r, g, b) = parse_hex(hex).unwrap_or(FALLBACK_RGB);
        format!("{ESC}{layer};2;{r};{g};{b}m")
    }
}

/// `"#rrggbb"` (leading `#` optional) to an RGB triple.
fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Only if the compiled-in palette is broken.
    fn default() -> Self {
        let (name, _) = BUILTIN[0];
        Self::from_name(name).expect("built-in default theme must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} failed to parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn bad_hex_renders_white() {
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("zz0000"), None);
        assert_eq!(parse_hex(" #A6E3A1 "), Some((0xa6, 0xe3, 0xa1)));
        assert_eq!(Theme::bg("nope"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn incomplete_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"half\"\n[colors]\nheader_fg = \"#000000\"").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(HomescoutError::Theme(_))));
    }
}
