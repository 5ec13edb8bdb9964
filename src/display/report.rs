//! Report formatting utilities for terminal output
//!
//! Currency rendering lives here rather than on `Money` so that the numeric
//! core stays locale-independent.

use crate::config::{DigitGrouping, Settings};
use crate::models::Money;

/// How amounts are rendered in reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.currency_symbol.clone(), settings.digit_grouping)
    }

    /// Format an amount with symbol and digit grouping
    ///
    /// # Examples
    /// ```
    /// use budget_recon::config::DigitGrouping;
    /// use budget_recon::display::CurrencyFormat;
    /// use budget_recon::models::Money;
    ///
    /// let inr = CurrencyFormat::new("₹", DigitGrouping::Indian);
    /// assert_eq!(inr.format(Money::from_units(1234567)), "₹12,34,567.00");
    /// let usd = CurrencyFormat::new("$", DigitGrouping::Western);
    /// assert_eq!(usd.format(Money::from_cents(-123456789)), "-$1,234,567.89");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let units = amount.units().unsigned_abs().to_string();
        let grouped = match self.grouping {
            DigitGrouping::Western => group_digits(&units, 3, 3),
            DigitGrouping::Indian => group_digits(&units, 3, 2),
        };
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, self.symbol, grouped, amount.cents_part())
    }

    /// Format an optional stored amount, showing a dash when absent
    pub fn format_opt(&self, amount: Option<Money>) -> String {
        amount.map_or_else(|| "-".to_string(), |m| self.format(m))
    }
}

/// Insert commas: the last `first` digits form one group, then groups of `rest`
fn group_digits(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > rest {
        groups.push(&head[end - rest..end]);
        end -= rest;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let padding = width.saturating_sub(title.chars().count()) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
