use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the extraction engine could learn about one product page.
///
/// Every field is optional: a page that yields nothing is still a valid
/// result, never an error. Persistence identity (ids, timestamps) belongs
/// to whoever stores the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: Option<String>,
    /// Absolute URL when the page URL was known, otherwise as found in markup.
    pub image: Option<String>,
    /// Whitespace-collapsed, at most 160 characters.
    pub description: Option<String>,
    /// The price a buyer would pay right now.
    pub price_value: Option<Decimal>,
    /// ISO 4217 code, only when inferable from the page itself.
    pub price_currency: Option<String>,
}

impl ExtractionResult {
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price_value.is_some()
    }

    /// A result is usable when both price and image were found. Anything
    /// less is worth a second pass against the rendered DOM.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.price_value.is_some() && self.image.is_some()
    }

    /// Fills absent fields of `self` from `fallback`.
    ///
    /// Price value and currency travel together: a fallback currency is never
    /// attached to a price that came from `self`.
    #[must_use]
    pub fn merge_missing(self, fallback: ExtractionResult) -> ExtractionResult {
        let (price_value, price_currency) = if self.price_value.is_some() {
            (self.price_value, self.price_currency)
        } else {
            (fallback.price_value, fallback.price_currency)
        };

        ExtractionResult {
            title: self.title.or(fallback.title),
            image: self.image.or(fallback.image),
            description: self.description.or(fallback.description),
            price_value,
            price_currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full() -> ExtractionResult {
        ExtractionResult {
            title: Some("Kettle".to_string()),
            image: Some("https://shop.example/kettle.jpg".to_string()),
            description: Some("A kettle.".to_string()),
            price_value: Some(dec("24.99")),
            price_currency: Some("GBP".to_string()),
        }
    }

    #[test]
    fn default_is_empty_and_unusable() {
        let r = ExtractionResult::default();
        assert!(!r.has_price());
        assert!(!r.is_usable());
    }

    #[test]
    fn usable_requires_price_and_image() {
        let mut r = full();
        assert!(r.is_usable());
        r.image = None;
        assert!(r.has_price());
        assert!(!r.is_usable());
    }

    #[test]
    fn merge_missing_keeps_present_fields() {
        let other = ExtractionResult {
            title: Some("Other".to_string()),
            ..ExtractionResult::default()
        };
        let merged = full().merge_missing(other);
        assert_eq!(merged, full());
    }

    #[test]
    fn merge_missing_moves_price_pair_together() {
        let primary = ExtractionResult {
            title: Some("Kettle".to_string()),
            ..ExtractionResult::default()
        };
        let merged = primary.merge_missing(full());
        assert_eq!(merged.price_value, Some(dec("24.99")));
        assert_eq!(merged.price_currency.as_deref(), Some("GBP"));
        assert_eq!(merged.title.as_deref(), Some("Kettle"));
    }

    #[test]
    fn merge_missing_does_not_borrow_currency_for_own_price() {
        let primary = ExtractionResult {
            price_value: Some(dec("10.00")),
            ..ExtractionResult::default()
        };
        let merged = primary.merge_missing(full());
        assert_eq!(merged.price_value, Some(dec("10.00")));
        assert!(merged.price_currency.is_none());
        assert_eq!(
            merged.image.as_deref(),
            Some("https://shop.example/kettle.jpg")
        );
    }

    #[test]
    fn serializes_price_as_string() {
        let json = serde_json::to_value(full()).unwrap();
        assert_eq!(json["price_value"], "24.99");
        assert_eq!(json["price_currency"], "GBP");
    }
}
