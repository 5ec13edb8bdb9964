//! Value normalizer
//!
//! Turns raw extract cells into amounts and serial numbers. Failure is
//! `None`, never an error: uncurated spreadsheets are full of header, footer
//! and blank cells, and callers skip the row when a required field is `None`.

use crate::models::{Cell, Money};

/// Largest magnitude accepted for a single amount (one trillion units)
///
/// Keeps every extract total far inside the `i64` range of `Money`.
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000_000);

/// Longest alphabetic currency code accepted as a prefix or suffix (`Rs`, `INR`)
const MAX_CURRENCY_CODE_LEN: usize = 3;

/// Normalize a cell into an amount
///
/// Numbers are rounded to the nearest hundredth. Text may carry a currency
/// symbol or short code, grouping separators, surrounding whitespace, a
/// leading minus or accounting parentheses. Amounts larger in magnitude than
/// `MAX_AMOUNT` are rejected.
///
/// # Examples
/// ```
/// use budget_recon::models::{Cell, Money};
/// use budget_recon::services::normalize::normalize_amount;
///
/// assert_eq!(normalize_amount(&Cell::from("₹1,200")), Some(Money::from_units(1200)));
/// assert_eq!(normalize_amount(&Cell::from("n/a")), None);
/// ```
pub fn normalize_amount(cell: &Cell) -> Option<Money> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Money::from_f64(*n).filter(within_range),
        Cell::Text(s) => normalize_amount_str(s),
    }
}

/// Normalize a cell into a positive serial number
pub fn normalize_serial(cell: &Cell) -> Option<u32> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX) {
                Some(*n as u32)
            } else {
                None
            }
        }
        Cell::Text(s) => parse_serial_text(s.trim()),
    }
}

/// "7" or an integral decimal like "7.0", as spreadsheets export whole numbers
fn parse_serial_text(s: &str) -> Option<u32> {
    let whole = match s.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.chars().all(|c| c == '0') => {
            whole
        }
        Some(_) => return None,
        None => s,
    };
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    whole.parse::<u32>().ok().filter(|n| *n > 0)
}

fn within_range(amount: &Money) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Normalize a currency-formatted string into an amount
pub fn normalize_amount_str(raw: &str) -> Option<Money> {
    let mut s = raw.trim();
    let mut negative = false;

    // Accounting format: (1,200.00)
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        negative = true;
        s = s[1..s.len() - 1].trim();
    }

    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest.trim_start();
    }

    // Currency prefix: everything before the first digit, minus a leading '.'
    // of something like ".50" and a sign placed after the symbol ("₹-50")
    let first_digit = s.find(|c: char| c.is_ascii_digit())?;
    let (mut prefix, mut body) = s.split_at(first_digit);
    if let Some(trimmed) = prefix.strip_suffix('.') {
        if !trimmed.ends_with(|c: char| c.is_alphabetic()) {
            prefix = trimmed;
            body = &s[prefix.len()..];
        }
    }
    let mut prefix = prefix.trim();
    if let Some(rest) = prefix.strip_suffix('-') {
        negative = !negative;
        prefix = rest.trim_end();
    }
    if !is_currency_marker(prefix) {
        return None;
    }

    // Currency suffix: everything after the last digit ("1200/-", "1200 €")
    let mut end = body.rfind(|c: char| c.is_ascii_digit())? + 1;
    if body[end..].starts_with('.') {
        end += 1;
    }
    let (number, suffix) = body.split_at(end);
    if !is_currency_marker(suffix.trim()) {
        return None;
    }

    let cleaned: String = number
        .chars()
        .filter(|c| !is_grouping_separator(*c))
        .collect();

    Money::parse(&cleaned)
        .ok()
        .filter(within_range)
        .map(|m| if negative { -m } else { m })
}

/// Empty, a run of symbols (₹ $ € £ /-), or a short capitalized code like `Rs.`
fn is_currency_marker(s: &str) -> bool {
    if s.chars().all(|c| !c.is_alphanumeric()) {
        return true;
    }
    let code = s.trim_end_matches('.');
    code.chars().count() <= MAX_CURRENCY_CODE_LEN
        && code.chars().all(|c| c.is_alphabetic())
        && code.starts_with(|c: char| c.is_uppercase())
}

fn is_grouping_separator(c: char) -> bool {
    matches!(c, ',' | '_' | '\'' | ' ' | '\u{a0}' | '\u{202f}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Option<i64> {
        normalize_amount_str(s).map(|m| m.cents())
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(amount("1200"), Some(120000));
        assert_eq!(amount("  1200.5  "), Some(120050));
        assert_eq!(amount(".75"), Some(75));
        assert_eq!(amount("0"), Some(0));
    }

    #[test]
    fn test_currency_symbols_and_grouping() {
        assert_eq!(amount("₹1,200"), Some(120000));
        assert_eq!(amount("₹ 1,20,000.00"), Some(12000000));
        assert_eq!(amount("$1,234,567.89"), Some(123456789));
        assert_eq!(amount("1 200 €"), Some(120000));
        assert_eq!(amount("Rs. 2,500"), Some(250000));
        assert_eq!(amount("INR 2500"), Some(250000));
        assert_eq!(amount("1200/-"), Some(120000));
        assert_eq!(amount("1200."), Some(120000));
        assert_eq!(amount("2500 INR"), Some(250000));
    }

    #[test]
    fn test_negative_forms() {
        assert_eq!(amount("-50"), Some(-5000));
        assert_eq!(amount("(1,200.00)"), Some(-120000));
        assert_eq!(amount("₹-50"), Some(-5000));
        assert_eq!(amount("-₹50"), Some(-5000));
    }

    #[test]
    fn test_unparsable_text() {
        assert_eq!(amount(""), None);
        assert_eq!(amount("   "), None);
        assert_eq!(amount("Total"), None);
        assert_eq!(amount("Annual Budget"), None);
        assert_eq!(amount("Total 1200"), None);
        assert_eq!(amount("12abc"), None);
        assert_eq!(amount("1.2.3"), None);
        assert_eq!(amount("1-2"), None);
        assert_eq!(amount("#REF!"), None);
    }

    #[test]
    fn test_normalize_amount_cells() {
        assert_eq!(normalize_amount(&Cell::Empty), None);
        assert_eq!(
            normalize_amount(&Cell::Number(1000.0)),
            Some(Money::from_units(1000))
        );
        assert_eq!(normalize_amount(&Cell::Number(f64::NAN)), None);
        assert_eq!(
            normalize_amount(&Cell::Text("₹1,200".into())),
            Some(Money::from_units(1200))
        );
    }

    #[test]
    fn test_normalize_serial() {
        assert_eq!(normalize_serial(&Cell::Number(7.0)), Some(7));
        assert_eq!(normalize_serial(&Cell::Text(" 12 ".into())), Some(12));
        assert_eq!(normalize_serial(&Cell::Number(7.5)), None);
        assert_eq!(normalize_serial(&Cell::Number(0.0)), None);
        assert_eq!(normalize_serial(&Cell::Number(-3.0)), None);
        assert_eq!(normalize_serial(&Cell::Text("abc".into())), None);
        assert_eq!(normalize_serial(&Cell::Text("0".into())), None);
        assert_eq!(normalize_serial(&Cell::Empty), None);
    }

    #[test]
    fn test_integral_decimal_text_serial() {
        assert_eq!(normalize_serial(&Cell::Text("1.0".into())), Some(1));
        assert_eq!(normalize_serial(&Cell::Text(" 14.00 ".into())), Some(14));
        assert_eq!(normalize_serial(&Cell::Text("1.5".into())), None);
        assert_eq!(normalize_serial(&Cell::Text("1.".into())), None);
        assert_eq!(normalize_serial(&Cell::Text("0.0".into())), None);
        assert_eq!(normalize_serial(&Cell::Text("-2.0".into())), None);
    }

    #[test]
    fn test_amount_ceiling() {
        assert_eq!(amount("1,000,000,000,000"), Some(MAX_AMOUNT.cents()));
        assert_eq!(amount("-1000000000000"), Some(-MAX_AMOUNT.cents()));
        assert_eq!(amount("1000000000000.01"), None);
        assert_eq!(amount("60000000000000000"), None);
        assert_eq!(normalize_amount(&Cell::Number(6e16)), None);
        assert_eq!(normalize_amount(&Cell::Number(1e12)), Some(MAX_AMOUNT));
    }
}
