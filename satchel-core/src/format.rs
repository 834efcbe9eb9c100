//! Display formatting - currency conversion and search highlighting
//!
//! Amounts are stored in a single base unit (USD). Display conversion uses
//! a static rate table; the rendering conventions (symbol placement,
//! grouping, decimal separator) are tied 1:1 to the selected currency.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Currency;

/// Units of the target currency per one base unit
fn rate(currency: Currency) -> Decimal {
    match currency {
        Currency::Usd => Decimal::ONE,
        Currency::Eur => Decimal::new(92, 2),
        Currency::Gbp => Decimal::new(79, 2),
        Currency::Jpy => Decimal::new(1575, 1),
        Currency::Inr => Decimal::new(8360, 2),
    }
}

/// Format a stored amount text in the user's display currency
///
/// Non-numeric input renders as zero in the base currency.
pub fn format_currency(amount: &str, currency: Currency) -> String {
    match amount.trim().parse::<Decimal>() {
        Ok(value) => format_currency_value(value, currency),
        Err(_) => format_currency_value(Decimal::ZERO, Currency::Usd),
    }
}

/// Format an already-numeric base-unit value in the display currency
pub fn format_currency_value(value: Decimal, currency: Currency) -> String {
    let converted = value * rate(currency);
    let negative = converted < Decimal::ZERO;
    let abs = converted.abs();

    let rendered = match currency {
        Currency::Usd => format!("${}", grouped(abs, 2, ',', '.', Grouping::Thousands)),
        Currency::Gbp => format!("£{}", grouped(abs, 2, ',', '.', Grouping::Thousands)),
        Currency::Eur => format!("{} €", grouped(abs, 2, '.', ',', Grouping::Thousands)),
        // Yen has no minor unit in everyday display
        Currency::Jpy => format!("¥{}", grouped(abs, 0, ',', '.', Grouping::Thousands)),
        Currency::Inr => format!("₹{}", grouped(abs, 2, ',', '.', Grouping::Indian)),
    };

    if negative {
        format!("-{}", rendered)
    } else {
        rendered
    }
}

enum Grouping {
    /// Groups of three: 1,234,567
    Thousands,
    /// Last three digits, then pairs: 12,34,567
    Indian,
}

fn grouped(
    value: Decimal,
    decimals: usize,
    group_sep: char,
    decimal_sep: char,
    grouping: Grouping,
) -> String {
    let rounded =
        value.round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (text, None),
    };

    let mut with_seps = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        let boundary = match grouping {
            Grouping::Thousands => i > 0 && i % 3 == 0,
            Grouping::Indian => i == 3 || (i > 3 && (i - 3) % 2 == 0),
        };
        if boundary {
            with_seps.push(group_sep);
        }
        with_seps.push(c);
    }
    let mut result: String = with_seps.chars().rev().collect();

    if let Some(frac) = frac_part {
        result.push(decimal_sep);
        result.push_str(&frac);
    }
    result
}

/// Wrap every non-overlapping match of the search pattern in `<mark>` tags
///
/// The text is HTML-escaped first and the pattern then runs over the
/// escaped text, so the output is always safe to inject; the trade-off is
/// that a pattern can in principle touch the inside of an entity like
/// `&amp;`. Without a pattern the escaped text passes through unchanged.
pub fn highlight(text: &str, pattern: Option<&Regex>) -> String {
    let escaped = escape_html(text);
    match pattern {
        Some(re) => re.replace_all(&escaped, "<mark>$0</mark>").to_string(),
        None => escaped,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::query::compile_search_pattern;

    #[test]
    fn test_usd_formatting() {
        assert_eq!(format_currency("1234.56", Currency::Usd), "$1,234.56");
        assert_eq!(format_currency("0", Currency::Usd), "$0.00");
        assert_eq!(format_currency("1000000.99", Currency::Usd), "$1,000,000.99");
    }

    #[test]
    fn test_non_numeric_renders_base_zero() {
        assert_eq!(format_currency("lunch money", Currency::Eur), "$0.00");
        assert_eq!(format_currency("", Currency::Jpy), "$0.00");
    }

    #[test]
    fn test_eur_uses_continental_separators() {
        assert_eq!(format_currency("1234.56", Currency::Eur), "1.135,80 €");
    }

    #[test]
    fn test_gbp_formatting() {
        assert_eq!(format_currency("100", Currency::Gbp), "£79.00");
    }

    #[test]
    fn test_jpy_drops_minor_units() {
        assert_eq!(format_currency("10", Currency::Jpy), "¥1,575");
        assert_eq!(format_currency("1000", Currency::Jpy), "¥157,500");
    }

    #[test]
    fn test_inr_uses_indian_grouping() {
        assert_eq!(format_currency("1234.56", Currency::Inr), "₹1,03,209.22");
        assert_eq!(format_currency("10", Currency::Inr), "₹836.00");
    }

    #[test]
    fn test_negative_balance_formatting() {
        assert_eq!(
            format_currency_value("-500".parse().unwrap(), Currency::Usd),
            "-$500.00"
        );
        assert_eq!(
            format_currency_value("-1000".parse().unwrap(), Currency::Eur),
            "-920,00 €"
        );
    }

    #[test]
    fn test_highlight_wraps_every_match() {
        let pattern = compile_search_pattern("bus").unwrap();
        assert_eq!(
            highlight("Bus pass and bus fare", Some(&pattern)),
            "<mark>Bus</mark> pass and <mark>bus</mark> fare"
        );
    }

    #[test]
    fn test_highlight_escapes_before_wrapping() {
        let pattern = compile_search_pattern("coffee").unwrap();
        assert_eq!(
            highlight("<b>coffee</b> & cake", Some(&pattern)),
            "&lt;b&gt;<mark>coffee</mark>&lt;/b&gt; &amp; cake"
        );
    }

    #[test]
    fn test_highlight_without_pattern_passes_through() {
        assert_eq!(highlight("plain text", None), "plain text");
        assert_eq!(highlight("a < b", None), "a &lt; b");
    }

    #[test]
    fn test_highlight_with_non_matching_pattern() {
        let pattern = compile_search_pattern("xyz").unwrap();
        assert_eq!(highlight("nothing here", Some(&pattern)), "nothing here");
    }
}
