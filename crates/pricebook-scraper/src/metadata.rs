//! Best-effort title, image, description and currency lookups.
//!
//! Each lookup is a fixed precedence chain; the first non-empty value wins.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use crate::document::{collapse_whitespace, compile_selector, first_attr};

const DESCRIPTION_MAX_CHARS: usize = 160;
const MIN_INLINE_IMAGE_PX: u32 = 300;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| compile_selector(r#"meta[property="og:title"]"#));
static TWITTER_TITLE: LazyLock<Selector> =
    LazyLock::new(|| compile_selector(r#"meta[name="twitter:title"]"#));
static H1: LazyLock<Selector> = LazyLock::new(|| compile_selector("h1"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| compile_selector("title"));

/// `(selector, attribute)` pairs in preference order.
static IMAGE_SOURCES: LazyLock<Vec<(Selector, &'static str)>> = LazyLock::new(|| {
    [
        (r#"meta[property="og:image"]"#, "content"),
        (r#"meta[name="twitter:image"]"#, "content"),
        ("#landingImage", "src"),
        ("img[data-old-hires]", "data-old-hires"),
        ("img.ux-image-carousel-item--image", "src"),
        ("img#icImg", "src"),
    ]
    .into_iter()
    .map(|(css, attr)| (compile_selector(css), attr))
    .collect()
});
static IMG: LazyLock<Selector> = LazyLock::new(|| compile_selector("img"));

static DESCRIPTION_SOURCES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
        r#"meta[name="twitter:description"]"#,
    ]
    .into_iter()
    .map(compile_selector)
    .collect()
});

static CURRENCY_SOURCES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"meta[itemprop="priceCurrency"]"#,
        r#"meta[property="product:price:currency"]"#,
        r#"meta[name="currency"]"#,
    ]
    .into_iter()
    .map(compile_selector)
    .collect()
});

/// Social title, then the first heading, then `<title>`, then the structured
/// product name.
pub(crate) fn best_title(html: &Html, structured_name: Option<&str>) -> Option<String> {
    first_attr(html, &OG_TITLE, "content")
        .or_else(|| first_attr(html, &TWITTER_TITLE, "content"))
        .or_else(|| first_text(html, &H1))
        .or_else(|| first_text(html, &TITLE))
        .or_else(|| structured_name.map(str::to_string))
        .map(|t| collapse_whitespace(&t))
        .filter(|t| !t.is_empty())
}

/// Social image, then marketplace primary-image conventions, then the first
/// inline image at least 300 wide or tall.
///
/// Relative URLs are resolved against `base` when it is known.
pub(crate) fn best_image(html: &Html, base: Option<&Url>) -> Option<String> {
    let raw = IMAGE_SOURCES
        .iter()
        .find_map(|(selector, attr)| first_attr(html, selector, attr))
        .or_else(|| first_large_image(html))?;

    Some(match base {
        Some(base) => absolutize_url(base, &raw).unwrap_or(raw),
        None => raw,
    })
}

/// Standard or social description, whitespace-collapsed and capped at 160
/// characters including the trailing ellipsis.
pub(crate) fn best_description(html: &Html) -> Option<String> {
    let raw = DESCRIPTION_SOURCES
        .iter()
        .find_map(|selector| first_attr(html, selector, "content"))?;
    let collapsed = collapse_whitespace(&raw);
    if collapsed.is_empty() {
        return None;
    }
    Some(truncate_with_ellipsis(&collapsed, DESCRIPTION_MAX_CHARS))
}

/// Page-level declared currency, upper-cased. Only three-letter codes count;
/// a source holding anything else is skipped in favour of the next one.
pub(crate) fn document_currency(html: &Html) -> Option<String> {
    CURRENCY_SOURCES.iter().find_map(|selector| {
        first_attr(html, selector, "content")
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| c.len() == 3 && c.bytes().all(|b| b.is_ascii_alphabetic()))
    })
}

fn first_text(html: &Html, selector: &Selector) -> Option<String> {
    html.select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn first_large_image(html: &Html) -> Option<String> {
    html.select(&IMG).find_map(|img| {
        let element = img.value();
        let large = [element.attr("width"), element.attr("height")]
            .into_iter()
            .flatten()
            .filter_map(parse_dimension)
            .any(|px| px >= MIN_INLINE_IMAGE_PX);
        if !large {
            return None;
        }
        element
            .attr("src")
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string)
    })
}

/// `"300"`, `" 300px "` -> `300`.
fn parse_dimension(raw: &str) -> Option<u32> {
    raw.trim().trim_end_matches("px").trim().parse::<u32>().ok()
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push('…');
    cut
}

fn absolutize_url(base: &Url, candidate: &str) -> Option<String> {
    base.join(candidate).ok().map(|u| u.to_string())
}
