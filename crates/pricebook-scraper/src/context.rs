//! Scoring of the markup around a price-looking string.
//!
//! A page usually shows several numbers that look like prices. The context
//! they sit in (text, class, id, tag) says which one a buyer actually pays:
//! "now", "deal" and "price" pull a region up, "was", "rrp", "per month" and
//! shipping wording push it down, and struck-through markup sinks it.
//!
//! Weights:
//!
//! | Signal | Weight |
//! |---|---|
//! | each positive word in text, class or id | +3 |
//! | each negative keyword in text, class or id | -6 |
//! | element is, contains or sits in struck markup | -50 |
//! | `button`, `a` or `input` | -3 |

use scraper::ElementRef;

use crate::document::{collapse_whitespace, contains_struck, is_struck};

const POSITIVE_SIGNALS: [&str; 10] = [
    "current",
    "now",
    "price",
    "ourprice",
    "deal",
    "you pay",
    "basket",
    "total",
    "buy it now",
    "bin",
];

/// Words that mark a number as something other than the live price.
/// Used both for scoring and for outright rejection of a region.
pub(crate) const NEGATIVE_KEYWORDS: [&str; 31] = [
    "was",
    "rrp",
    "list price",
    "listprice",
    "previous",
    "orig",
    "original",
    "save",
    "saving",
    "discount",
    "compare at",
    "compareto",
    "strike",
    "strikethrough",
    "per month",
    "/month",
    "month",
    "from",
    "deposit",
    "credit",
    "trade-in",
    "trade in",
    "postage",
    "shipping",
    "delivery",
    "carriage",
    "fee",
    "voucher",
    "coupon",
    "finance",
    "instalment",
];

const POSITIVE_WEIGHT: i32 = 3;
const NEGATIVE_WEIGHT: i32 = 6;
/// Larger than every positive signal combined.
const STRUCK_PENALTY: i32 = 50;
const INTERACTIVE_PENALTY: i32 = 3;

const INTERACTIVE_TAGS: [&str; 3] = ["button", "a", "input"];

/// Everything the scorer looks at, pre-lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextSignals<'a> {
    pub tag: &'a str,
    pub text: &'a str,
    pub class: &'a str,
    pub id: &'a str,
    /// The element is, contains, or sits inside struck-through markup.
    pub struck: bool,
}

/// Returns `true` if `text_lower` contains any negative keyword.
#[must_use]
pub fn looks_negative(text_lower: &str) -> bool {
    NEGATIVE_KEYWORDS.iter().any(|k| text_lower.contains(k))
}

/// Scores a price region. Higher means more likely to be the live price.
///
/// Pure: the same signals always produce the same score.
#[must_use]
pub fn score(signals: &ContextSignals<'_>) -> i32 {
    let mentions = |word: &str| {
        signals.text.contains(word) || signals.class.contains(word) || signals.id.contains(word)
    };

    let mut total = 0;
    for signal in POSITIVE_SIGNALS {
        if mentions(signal) {
            total += POSITIVE_WEIGHT;
        }
    }
    for keyword in NEGATIVE_KEYWORDS {
        if mentions(keyword) {
            total -= NEGATIVE_WEIGHT;
        }
    }
    if signals.struck {
        total -= STRUCK_PENALTY;
    }
    if INTERACTIVE_TAGS.contains(&signals.tag) {
        total -= INTERACTIVE_PENALTY;
    }
    total
}

/// Reads the signals off a DOM element and scores them.
#[must_use]
pub fn score_element(el: ElementRef<'_>) -> i32 {
    let element = el.value();
    let tag = element.name().to_ascii_lowercase();
    let text = collapse_whitespace(&el.text().collect::<String>()).to_lowercase();
    let class = element.attr("class").unwrap_or_default().to_lowercase();
    let id = element.attr("id").unwrap_or_default().to_lowercase();

    score(&ContextSignals {
        tag: &tag,
        text: &text,
        class: &class,
        id: &id,
        struck: is_struck(el) || contains_struck(el),
    })
}
