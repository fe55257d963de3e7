//! Currency formatting and price-change arithmetic.
//!
//! Prices are whole US dollars rendered as `$1,234,567` (no cents). The
//! percentage change is undefined when the reference price is zero; instead of
//! producing an infinite or NaN value, [`PriceChange::percent`] is `None` in
//! that case and the UI prints `n/a`.

/// Formats a dollar amount with thousands separators and no fractional part.
///
/// Values are rounded to the nearest dollar. Negative amounts keep their
/// sign in front of the currency symbol.
///
/// # Examples
///
/// ```
/// use homescout::domain::money::format_usd;
///
/// assert_eq!(format_usd(1_234_567.0), "$1,234,567");
/// assert_eq!(format_usd(999.6), "$1,000");
/// assert_eq!(format_usd(-2500.0), "-$2,500");
/// assert_eq!(format_usd(0.0), "$0");
/// ```
#[must_use]
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let rounded = amount.round();
    let negative = rounded < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rounded.abs() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Difference between a listing's current and original price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    /// `current - original`, in dollars.
    pub amount: f64,
    /// Change relative to the original price, in percent. `None` when the
    /// original price is zero.
    pub percent: Option<f64>,
}

impl PriceChange {
    /// Computes the change from `original` to `current`.
    ///
    /// ```
    /// use homescout::domain::money::PriceChange;
    ///
    /// let change = PriceChange::between(200_000.0, 210_000.0);
    /// assert_eq!(change.amount, 10_000.0);
    /// assert_eq!(change.percent, Some(5.0));
    ///
    /// assert_eq!(PriceChange::between(0.0, 50_000.0).percent, None);
    /// ```
    #[must_use]
    pub fn between(original: f64, current: f64) -> Self {
        let amount = current - original;
        let percent = if original > 0.0 {
            Some(amount / original * 100.0)
        } else {
            None
        };
        Self { amount, percent }
    }

    /// Whether the price went up. Unchanged prices count as not increased.
    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.amount > 0.0
    }

    /// Renders the change as `+$5,000 (+5.0%)`, `-$5,000 (-5.0%)` or
    /// `+$5,000 (n/a)` when there is no usable original price.
    #[must_use]
    pub fn label(&self) -> String {
        let dollars = if self.amount.is_finite() { self.amount.round() } else { 0.0 };
        let sign = if dollars > 0.0 { "+" } else { "" };
        let amount = format!("{sign}{}", format_usd(dollars));
        match self.percent {
            Some(pct) => {
                let pct = format!("{pct:.1}");
                let pct = if pct == "-0.0" { "0.0" } else { pct.as_str() };
                format!("{amount} ({sign}{pct}%)")
            }
            None => format!("{amount} (n/a)"),
        }
    }
}
