//! Host-specific price rules.
//!
//! Large storefronts render their live price in stable, known places. When
//! the page host matches a rule, that rule's answer outranks everything the
//! generic and structured passes found.
//!
//! Adding a site means adding one [`SiteRule`] to [`SITE_RULES`].

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::candidate::{PriceCandidate, Provenance};
use crate::context::looks_negative;
use crate::document::{compile_selector, is_struck, region_text};
use crate::price::parse_price;

/// Score for site-rule candidates; the highest tier.
pub const SITE_SCORE: i32 = 100;

/// A price rule for one storefront.
#[derive(Clone, Copy)]
pub struct SiteRule {
    pub name: &'static str,
    /// Matched against each dot-separated label of the normalized host.
    pub domain_label: &'static str,
    pub extract: fn(&Html) -> Option<PriceCandidate>,
}

impl SiteRule {
    /// `true` when `host` (already normalized) belongs to this site.
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        host.split('.').any(|label| label == self.domain_label)
    }
}

pub static SITE_RULES: [SiteRule; 5] = [
    SiteRule {
        name: "amazon",
        domain_label: "amazon",
        extract: amazon,
    },
    SiteRule {
        name: "ebay",
        domain_label: "ebay",
        extract: ebay,
    },
    SiteRule {
        name: "argos",
        domain_label: "argos",
        extract: argos,
    },
    SiteRule {
        name: "currys",
        domain_label: "currys",
        extract: currys,
    },
    SiteRule {
        name: "johnlewis",
        domain_label: "johnlewis",
        extract: johnlewis,
    },
];

/// The rule registered for `host`, if any.
#[must_use]
pub fn rule_for_host(host: &str) -> Option<&'static SiteRule> {
    SITE_RULES.iter().find(|rule| rule.matches(host))
}

fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|css| compile_selector(css)).collect()
}

static AMAZON: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        "#corePrice_feature_div .a-price .a-offscreen",
        "#priceblock_dealprice",
        "#priceblock_ourprice",
        "#priceblock_saleprice",
        ".a-price .a-offscreen",
    ])
});

static EBAY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        "#prcIsum",
        "#mm-saleDscPrc",
        "span.x-price-primary .ux-textspans",
        r#"span[itemprop="price"]"#,
    ])
});

static ARGOS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[r#"[data-test="product-price"]"#, r#"meta[itemprop="price"]"#])
});

static CURRYS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"meta[itemprop="price"]"#,
        ".product-price .amount, .price .amount",
    ])
});

static JOHNLEWIS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[r#"meta[itemprop="price"]"#, r#"[data-test="price-current"]"#])
});

fn amazon(html: &Html) -> Option<PriceCandidate> {
    // Amazon labels its struck reference price "List Price".
    first_price(html, &AMAZON, "amazon", |text| text.contains("list"))
}

fn ebay(html: &Html) -> Option<PriceCandidate> {
    first_price(html, &EBAY, "ebay", |_| false)
}

fn argos(html: &Html) -> Option<PriceCandidate> {
    first_price(html, &ARGOS, "argos", |_| false)
}

fn currys(html: &Html) -> Option<PriceCandidate> {
    first_price(html, &CURRYS, "currys", |_| false)
}

fn johnlewis(html: &Html) -> Option<PriceCandidate> {
    first_price(html, &JOHNLEWIS, "johnlewis", |_| false)
}

/// First parseable, non-struck, non-negative region across `selectors`, in
/// order. `reject` sees the lower-cased region text.
fn first_price(
    html: &Html,
    selectors: &[Selector],
    site: &'static str,
    reject: impl Fn(&str) -> bool,
) -> Option<PriceCandidate> {
    selectors
        .iter()
        .flat_map(|selector| html.select(selector))
        .filter(|el| !is_struck(*el))
        .find_map(|el| {
            let text = region_text(el);
            let lower = text.to_lowercase();
            if looks_negative(&lower) || reject(&lower) {
                return None;
            }
            let parsed = parse_price(&text);
            Some(PriceCandidate {
                value: parsed.value?,
                currency: parsed.currency.map(str::to_string),
                score: SITE_SCORE,
                provenance: Provenance::Site(site),
            })
        })
}
