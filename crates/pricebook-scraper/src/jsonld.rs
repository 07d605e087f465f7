//! schema.org `Product` extraction from `<script type="application/ld+json">`.

use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::document::compile_selector;
use crate::price::parse_price;

static JSONLD_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| compile_selector(r#"script[type="application/ld+json"]"#));

const PRODUCT_TYPES: [&str; 4] = ["Product", "IndividualProduct", "ProductGroup", "ProductModel"];

/// The parts of a structured product block the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StructuredProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    /// Offer-level, else price-specification-level. Document-level
    /// currency is applied by the caller.
    pub currency: Option<String>,
}

/// Every product node across all JSON-LD blocks, in document order.
///
/// Blocks that are not well-formed JSON are skipped.
pub(crate) fn structured_products(html: &Html) -> Vec<StructuredProduct> {
    let mut products = Vec::new();

    for (index, script) in html.select(&JSONLD_SCRIPT).enumerate() {
        let raw = script.text().collect::<String>();
        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(block = index, error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        let mut nodes = Vec::new();
        flatten_nodes(&value, &mut nodes);
        products.extend(
            nodes
                .into_iter()
                .filter(|node| is_product(node))
                .map(product_from_node),
        );
    }

    products
}

/// Flattens top-level arrays and `@graph` containers, at any depth, into
/// one list of candidate nodes.
fn flatten_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_nodes(item, out);
            }
        }
        Value::Object(map) => {
            out.push(value);
            if let Some(graph) = map.get("@graph") {
                flatten_nodes(graph, out);
            }
        }
        _ => {}
    }
}

/// `@type` may be a plain string or an array of strings, optionally
/// prefixed with the schema.org vocabulary.
fn is_product(node: &Value) -> bool {
    let matches = |raw: &str| {
        let bare = raw
            .trim_start_matches("https://schema.org/")
            .trim_start_matches("http://schema.org/")
            .trim_start_matches("schema:");
        PRODUCT_TYPES.iter().any(|t| bare.eq_ignore_ascii_case(t))
    };

    match node.get("@type") {
        Some(Value::String(s)) => matches(s),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

fn product_from_node(node: &Value) -> StructuredProduct {
    let name = node
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let Some(offer) = node.get("offers").and_then(first_object) else {
        return StructuredProduct {
            name,
            ..StructuredProduct::default()
        };
    };
    let specification = offer.get("priceSpecification").and_then(first_object);

    let price = [
        offer.get("price"),
        specification.and_then(|s| s.get("price")),
        offer.get("lowPrice"),
        offer.get("highPrice"),
    ]
    .into_iter()
    .flatten()
    .find_map(value_to_decimal);

    let currency = [
        offer.get("priceCurrency"),
        specification.and_then(|s| s.get("priceCurrency")),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|s| !s.is_empty())
    .map(str::to_ascii_uppercase);

    StructuredProduct {
        name,
        price,
        currency,
    }
}

/// An object, or the first element of an array of objects.
fn first_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.iter().find(|v| v.is_object()),
        _ => None,
    }
}

/// Structured prices arrive as JSON numbers, plain decimal strings
/// (`"49.990"`), or display strings (`"£1,299.00"`).
fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            Decimal::from_str(trimmed)
                .ok()
                .or_else(|| parse_price(trimmed).value)
        }
        _ => None,
    }
}
