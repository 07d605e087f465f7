//! Parsing of free-form price strings into a decimal value and currency code.
//!
//! Storefronts format prices every which way: `"£1,234.56"`, `"1.234,56 EUR"`,
//! `"$ 89"`, `"Now only 12,99€"`. The parser never fails; anything it cannot
//! read comes back as `None`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Symbol lookup, scanned in order. A later hit replaces an earlier one.
const CURRENCY_SYMBOLS: [(&str, &str); 4] = [("£", "GBP"), ("€", "EUR"), ("$", "USD"), ("¥", "JPY")];

static ISO_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(GBP|USD|EUR|JPY)\b").expect("valid iso regex"));

/// Group 1: a number ending in a two-digit decimal group that is not followed
/// by another digit. Group 2: an integer, optionally thousands-grouped.
///
/// This departs on purpose from a bare "last separator plus two digits is the
/// decimal part" rule. Under that rule `"¥1,299"` would read as `1,29` and come
/// out as `1.29`; here the trailing guard rejects that split and the grouped
/// integer branch reads it as `1299`.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:[.,]\d{3})*[.,]\d{2}|\d+[.,]\d{2})(?:\D|$)|(\d{1,3}(?:[.,]\d{3})+|\d+)")
        .expect("valid number regex")
});

/// Result of [`parse_price`]. Either half may be missing independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedPrice {
    pub value: Option<Decimal>,
    /// One of `GBP`, `EUR`, `USD`, `JPY`.
    pub currency: Option<&'static str>,
}

/// Parses a price-looking string.
///
/// Currency rules:
/// 1. Any of `£ € $ ¥` anywhere in the text sets the currency.
/// 2. A standalone ISO token (`GBP`, `USD`, `EUR`, `JPY`, any case) overrides
///    a symbol.
///
/// Value rules, applied to the text with all whitespace removed:
/// - The first number shaped like `1,234.56`, `1.234,56`, `1234.56`,
///   `1,234` or `1234` is taken.
/// - With a two-digit tail, the last separator is the decimal point and any
///   earlier separators are thousands grouping.
/// - Without one, every separator is thousands grouping.
#[must_use]
pub fn parse_price(text: &str) -> ParsedPrice {
    if text.is_empty() {
        return ParsedPrice::default();
    }

    let currency = detect_currency(text);

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let Some(caps) = NUMBER_RE.captures(&compact) else {
        return ParsedPrice {
            value: None,
            currency,
        };
    };

    let value = if let Some(decimal) = caps.get(1) {
        normalize_decimal(decimal.as_str())
    } else {
        caps.get(2).and_then(|m| normalize_integer(m.as_str()))
    };

    ParsedPrice { value, currency }
}

/// Detects a currency code from symbols or ISO tokens in `text`.
#[must_use]
pub fn detect_currency(text: &str) -> Option<&'static str> {
    let mut currency = None;
    for (symbol, iso) in CURRENCY_SYMBOLS {
        if text.contains(symbol) {
            currency = Some(iso);
        }
    }

    if let Some(token) = ISO_CODE_RE.captures(text).and_then(|c| c.get(1)) {
        currency = CURRENCY_SYMBOLS
            .iter()
            .map(|(_, iso)| *iso)
            .find(|iso| iso.eq_ignore_ascii_case(token.as_str()));
    }

    currency
}

/// `"1.234,56"` -> `1234.56`. Input always ends in a separator and two digits.
fn normalize_decimal(raw: &str) -> Option<Decimal> {
    let split_at = raw.len().checked_sub(3)?;
    let (whole, fraction) = raw.split_at(split_at);
    let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
    Decimal::from_str(&format!("{whole}.{}", &fraction[1..])).ok()
}

/// `"1,299"` -> `1299`.
fn normalize_integer(raw: &str) -> Option<Decimal> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    Decimal::from_str(&digits).ok()
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
