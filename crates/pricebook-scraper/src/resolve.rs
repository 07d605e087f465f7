//! Turns a parsed page into one [`ExtractionResult`].

use std::cmp::Ordering;

use pricebook_core::ExtractionResult;

use crate::candidate::PriceCandidate;
use crate::collect::collect_with_products;
use crate::document::RawDocument;
use crate::jsonld::structured_products;
use crate::metadata::{best_description, best_image, best_title, document_currency};
use crate::sites::rule_for_host;

/// Extracts title, image, description and price from `document`.
///
/// Never fails. Anything that cannot be found is `None`. Calling this twice
/// on the same document yields the same result.
#[must_use]
pub fn extract_all(document: &RawDocument) -> ExtractionResult {
    let html = document.html();
    let products = structured_products(html);
    let doc_currency = document_currency(html);

    let mut candidates = collect_with_products(html, &products, doc_currency.as_deref());

    if let Some(rule) = document.host().as_deref().and_then(rule_for_host) {
        if let Some(candidate) = (rule.extract)(html) {
            candidates.push(candidate);
        }
    }

    rank_candidates(&mut candidates);
    let winner = candidates.first();
    match winner {
        Some(c) => tracing::debug!(
            provenance = %c.provenance,
            score = c.score,
            value = %c.value,
            candidates = candidates.len(),
            "price resolved"
        ),
        None => tracing::debug!("no price candidates"),
    }

    let (price_value, price_currency) = match winner {
        Some(c) => (
            Some(c.value),
            c.currency.clone().or_else(|| doc_currency.clone()),
        ),
        None => (None, None),
    };

    let structured_name = products.iter().find_map(|p| p.name.as_deref());

    ExtractionResult {
        title: best_title(html, structured_name),
        image: best_image(html, document.url()),
        description: best_description(html),
        price_value,
        price_currency,
    }
}

/// Parses `html` and runs [`extract_all`]. `url` drives site-rule selection
/// and relative image resolution; it is never fetched.
#[must_use]
pub fn extract_listing(html: &str, url: Option<&str>) -> ExtractionResult {
    extract_all(&RawDocument::parse(html, url))
}

/// Best first: highest score, then lowest value among equal scores.
fn rank_candidates(candidates: &mut [PriceCandidate]) {
    candidates.sort_by(rank);
}

fn rank(a: &PriceCandidate, b: &PriceCandidate) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.value.cmp(&b.value))
}
