//! Generic and structured-data price candidates.
//!
//! The generic pass walks a fixed, ordered selector pool of regions that
//! often hold prices, then sweeps every element whose class or id mentions
//! "price". The structured pass reads schema.org product blocks, which are
//! machine-authored and therefore outrank anything scraped from free text.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::candidate::{PriceCandidate, Provenance};
use crate::context::{looks_negative, score_element};
use crate::document::{compile_selector, is_struck, region_text, RawDocument};
use crate::jsonld::{structured_products, StructuredProduct};
use crate::metadata::document_currency;
use crate::price::parse_price;

/// Upper bound on any generic-pass score.
pub const GENERIC_SCORE_CEILING: i32 = 40;
/// Fixed score for structured-data candidates; above [`GENERIC_SCORE_CEILING`].
pub const STRUCTURED_SCORE: i32 = 80;

const GENERIC_POOL: [&str; 7] = [
    "[itemprop='price']",
    "meta[itemprop='price']",
    "meta[property='product:price:amount']",
    ".price, .current-price, .price__current, .price-now, .now-price, .sale-price, .product-price__price",
    "#price, #ourprice, #dealprice, #priceblock_ourprice, #priceblock_dealprice",
    ".a-price .a-offscreen",
    "span.x-price-primary .ux-textspans, #prcIsum, #mm-saleDscPrc",
];

static GENERIC_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    GENERIC_POOL
        .iter()
        .map(|css| (*css, compile_selector(css)))
        .collect()
});

static NEAR_PRICE: LazyLock<Selector> =
    LazyLock::new(|| compile_selector("[class*='price'], [id*='price']"));

/// All generic and structured candidates for `document`.
#[must_use]
pub fn collect(document: &RawDocument) -> Vec<PriceCandidate> {
    let html = document.html();
    let products = structured_products(html);
    collect_with_products(html, &products, document_currency(html).as_deref())
}

/// Same as [`collect`], over product blocks the caller already parsed.
pub(crate) fn collect_with_products(
    html: &Html,
    products: &[StructuredProduct],
    doc_currency: Option<&str>,
) -> Vec<PriceCandidate> {
    let mut candidates = generic_candidates(html, doc_currency);
    candidates.extend(structured_candidates(products, doc_currency));
    candidates
}

fn generic_candidates(html: &Html, doc_currency: Option<&str>) -> Vec<PriceCandidate> {
    let mut out = Vec::new();

    for (css, selector) in GENERIC_SELECTORS.iter() {
        for el in html.select(selector) {
            if let Some(c) = generic_candidate(el, Provenance::Selector(*css), doc_currency) {
                out.push(c);
            }
        }
    }

    for el in html.select(&NEAR_PRICE) {
        if let Some(c) = generic_candidate(el, Provenance::NearPrice, doc_currency) {
            out.push(c);
        }
    }

    out
}

/// Rejects struck regions and regions whose text carries a negative keyword,
/// then parses and scores what is left.
fn generic_candidate(
    el: ElementRef<'_>,
    provenance: Provenance,
    doc_currency: Option<&str>,
) -> Option<PriceCandidate> {
    if is_struck(el) {
        return None;
    }

    let text = region_text(el);
    if text.is_empty() || looks_negative(&text.to_lowercase()) {
        return None;
    }

    let parsed = parse_price(&text);
    let value = parsed.value?;

    Some(PriceCandidate {
        value,
        currency: parsed.currency.or(doc_currency).map(str::to_string),
        score: score_element(el).min(GENERIC_SCORE_CEILING),
        provenance,
    })
}

fn structured_candidates<'a>(
    products: &'a [StructuredProduct],
    doc_currency: Option<&'a str>,
) -> impl Iterator<Item = PriceCandidate> + 'a {
    products.iter().filter_map(move |product| {
        Some(PriceCandidate {
            value: product.price?,
            currency: product
                .currency
                .clone()
                .or_else(|| doc_currency.map(str::to_string)),
            score: STRUCTURED_SCORE,
            provenance: Provenance::JsonLd,
        })
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn candidates(body: &str) -> Vec<PriceCandidate> {
        collect(&RawDocument::parse(body, None))
    }

    #[test]
    fn itemprop_meta_content_is_read() {
        let got = candidates(r#"<meta itemprop="price" content="19.99"><p>x</p>"#);
        assert!(got.iter().any(|c| c.value == dec("19.99")
            && c.provenance == Provenance::Selector("[itemprop='price']")));
    }

    #[test]
    fn negative_text_is_rejected() {
        let got = candidates(r#"<span class="price">RRP £199.99</span>"#);
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn struck_region_is_rejected() {
        let got = candidates(r#"<del><span class="price">£199.99</span></del>"#);
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn non_numeric_region_is_skipped() {
        let got = candidates(r#"<span class="price">Call for pricing</span>"#);
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn near_price_sweep_catches_unlisted_classes() {
        let got = candidates(r#"<div class="pdp-price-block">£12.00</div>"#);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].provenance, Provenance::NearPrice);
        assert_eq!(got[0].currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn missing_currency_inherits_document_currency() {
        let got = candidates(
            r#"<meta itemprop="priceCurrency" content="eur"><span class="price">12,50</span>"#,
        );
        assert!(!got.is_empty());
        assert!(got.iter().all(|c| c.currency.as_deref() == Some("EUR")));
    }

    #[test]
    fn generic_score_is_capped() {
        let got = candidates(
            r#"<span class="price current-price now deal total basket" id="ourprice">you pay buy it now bin £10.00</span>"#,
        );
        assert!(!got.is_empty());
        assert!(got.iter().all(|c| c.score <= GENERIC_SCORE_CEILING));
    }

    #[test]
    fn structured_candidate_scores_above_ceiling() {
        let got = candidates(
            r#"<script type="application/ld+json">{"@type":"Product","offers":{"price":"49.99"}}</script>
               <meta property="product:price:currency" content="USD">"#,
        );
        assert_eq!(
            got,
            vec![PriceCandidate {
                value: dec("49.99"),
                currency: Some("USD".to_string()),
                score: STRUCTURED_SCORE,
                provenance: Provenance::JsonLd,
            }]
        );
    }
}
