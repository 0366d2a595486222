//! Quote rendering. Every numeric field degrades independently to a
//! not-available marker; formatting never fails.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

use super::Quote;
use crate::texts::Lang;

const NOT_AVAILABLE: &str = "?";

/// Thousands-grouped fixed-point rendering, or None for non-finite input.
fn grouped(value: f64, decimals: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };
    let digits: i128 = int_part.parse().ok()?;
    let mut out = digits.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

/// Price rendering: `None`/non-finite → `?`; non-positive → `$0.00`;
/// `>= 1` → grouped with 2 decimals; sub-dollar → full decimal precision
/// without scientific notation or trailing zeros.
pub fn format_price(value: Option<f64>) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if v <= 0.0 {
        return "$0.00".to_string();
    }
    if v >= 1.0 {
        return match grouped(v, 2) {
            Some(s) => format!("${}", s),
            None => NOT_AVAILABLE.to_string(),
        };
    }
    // f64 Display is the shortest round-trip decimal form: no exponent, no
    // trailing zeros, at least one fractional digit for values in (0, 1).
    format!("${}", v)
}

/// Integer-rounded amount with currency prefix (market cap, volume).
pub fn format_amount(value: Option<f64>, prefix: &str) -> String {
    match value.and_then(|v| grouped(v, 0)) {
        Some(s) => format!("{}{}", prefix, s),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Signed 24h change percentage with 2 decimals.
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:+.2}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Renders the full quote block in the given language, with a UTC
/// minute-precision source line.
pub fn format_quote(quote: &Quote, lang: Lang) -> String {
    format_quote_at(quote, lang, Utc::now())
}

pub(crate) fn format_quote_at(quote: &Quote, lang: Lang, now: DateTime<Utc>) -> String {
    let t = lang.texts();
    let stats = &quote.stats;

    let mut lines = vec![
        format!(
            "{} ({})",
            quote.name.as_deref().unwrap_or(NOT_AVAILABLE),
            quote.symbol.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!("{}: {}", t.quote_price, format_price(stats.price)),
        format!(
            "{}: {}",
            t.quote_change,
            format_change(stats.price_change_percentage_24h)
        ),
        format!("{}: {}", t.quote_marketcap, format_amount(stats.market_cap, "$")),
        format!("{}: {}", t.quote_volume, format_amount(stats.volume_24h, "$")),
    ];
    if let Some(rank) = stats.rank.filter(|r| *r > 0) {
        lines.push(format!("{}: #{}", t.quote_rank, rank));
    }
    lines.push(format!(
        "{}: CoinMarketCap - {}",
        t.quote_source,
        now.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::QuoteStats;
    use chrono::TimeZone;

    #[test]
    fn price_over_one_dollar_uses_two_decimals_and_separators() {
        assert_eq!(format_price(Some(1234.5)), "$1,234.50");
        assert_eq!(format_price(Some(1.0)), "$1.00");
        assert_eq!(format_price(Some(1_000_000.004)), "$1,000,000.00");
    }

    #[test]
    fn sub_dollar_price_keeps_full_precision() {
        assert_eq!(format_price(Some(0.0000456)), "$0.0000456");
        assert_eq!(format_price(Some(0.5)), "$0.5");
        assert_eq!(format_price(Some(0.1)), "$0.1");
    }

    #[test]
    fn degenerate_prices_render_fixed_or_marker() {
        assert_eq!(format_price(Some(0.0)), "$0.00");
        assert_eq!(format_price(Some(-2.5)), "$0.00");
        assert_eq!(format_price(None), "?");
        assert_eq!(format_price(Some(f64::NAN)), "?");
    }

    #[test]
    fn amounts_are_integer_rounded_with_separators() {
        assert_eq!(format_amount(Some(1_234_567.89), "$"), "$1,234,568");
        assert_eq!(format_amount(None, "$"), "?");
    }

    #[test]
    fn change_is_signed_with_two_decimals() {
        assert_eq!(format_change(Some(1.234)), "+1.23%");
        assert_eq!(format_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_change(None), "?");
    }

    #[test]
    fn quote_block_renders_all_fields() {
        let quote = Quote {
            name: Some("Bitcoin".to_string()),
            symbol: Some("BTC".to_string()),
            slug: "bitcoin".to_string(),
            stats: QuoteStats {
                price: Some(50_000.0),
                price_change_percentage_24h: Some(2.5),
                market_cap: Some(1_000_000_000.0),
                volume_24h: Some(25_000_000.0),
                rank: Some(1),
            },
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let text = format_quote_at(&quote, Lang::En, now);
        assert_eq!(
            text,
            "Bitcoin (BTC)\n\
             Price: $50,000.00\n\
             24h Change: +2.50%\n\
             Market Cap: $1,000,000,000\n\
             24h Volume: $25,000,000\n\
             Market Cap Rank: #1\n\
             Source: CoinMarketCap - 2024-06-01 12:30 UTC"
        );
    }

    #[test]
    fn quote_block_degrades_per_field_and_skips_missing_rank() {
        let quote = Quote {
            name: None,
            symbol: Some("XYZ".to_string()),
            slug: "xyz".to_string(),
            stats: QuoteStats::default(),
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let text = format_quote_at(&quote, Lang::En, now);
        assert!(text.starts_with("? (XYZ)\nPrice: ?\n24h Change: ?\n"));
        assert!(!text.contains("Rank"));
    }
}
