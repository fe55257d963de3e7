//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, width
//! fitting for text that may contain multi-byte characters, and formatting of
//! price history timestamps.
//!
//! # Example
//!
//! ```rust
//! use homescout::ui::helpers::{fit, format_history_date};
//!
//! assert_eq!(fit("Casa en Cumbayá", 8), "Casa en…");
//! assert_eq!(fit("Casa", 6), "Casa  ");
//! assert_eq!(format_history_date("2024-03-01T10:00:00Z"), "2024-03-01");
//! ```

use chrono::{DateTime, NaiveDate, Utc};

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates or pads `text` to exactly `width` characters.
///
/// Truncated text ends with `…`. Operates on characters, not bytes, so
/// accented addresses never split inside a code point.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = String::with_capacity(text.len() + width - len);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - len));
        return out;
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Prints `text` centered in a `cols`-wide line, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let len = text.chars().count().min(cols);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{}", fit(text, len));
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are cut with [`fit`].
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    let mut line = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            len = 0;
        }
        if len > 0 {
            line.push(' ');
            len += 1;
        }
        if word_len > width {
            line.push_str(fit(word, width).trim_end());
            len += width;
        } else {
            line.push_str(word);
            len += word_len;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Renders a price history timestamp as a calendar date.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates and Unix epoch
/// seconds. Anything else is shown as given; an empty timestamp becomes `-`.
#[must_use]
pub fn format_history_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Some(dt) = raw
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("Cumbayá", 7), "Cumbayá");
        assert_eq!(fit("Cumbayá", 4), "Cum…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("Bright house with a large garden", 12),
            vec!["Bright house", "with a large", "garden"]
        );
        assert_eq!(wrap("abcdefgh", 4), vec!["abc…"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn history_dates() {
        assert_eq!(format_history_date("2023-11-05T23:30:00-05:00"), "2023-11-06");
        assert_eq!(format_history_date("2024-01-15"), "2024-01-15");
        assert_eq!(format_history_date("1700000000"), "2023-11-14");
        assert_eq!(format_history_date("last spring"), "last spring");
        assert_eq!(format_history_date("  "), "-");
    }
}
