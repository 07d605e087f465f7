//! Parsed HTML plus the URL it came from, and the DOM helpers every
//! extraction pass shares.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Tags conventionally used to show a superseded price.
const STRUCK_TAGS: [&str; 3] = ["s", "strike", "del"];

/// Class fragments storefronts use for old-price styling instead of `<del>`.
const STRUCK_CLASS_MARKERS: [&str; 4] = ["strike", "old-price", "was-price", "a-text-price"];

/// An HTML document ready for extraction.
///
/// Holds a `scraper::Html`, which is `!Send`; build it, extract, and drop it
/// without crossing an `.await`.
pub struct RawDocument {
    html: Html,
    url: Option<Url>,
}

impl RawDocument {
    /// Parses `html`. A missing, empty, or unparseable `url` is treated as
    /// unknown: no site rules apply and relative image links stay relative.
    #[must_use]
    pub fn parse(html: &str, url: Option<&str>) -> Self {
        let url = url
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Url::parse(raw).ok());
        Self {
            html: Html::parse_document(html),
            url,
        }
    }

    #[must_use]
    pub fn html(&self) -> &Html {
        &self.html
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Lower-cased host with any leading `www.` removed.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        self.url
            .as_ref()
            .and_then(Url::host_str)
            .map(normalize_host)
    }
}

/// `"WWW.Amazon.co.uk"` -> `"amazon.co.uk"`.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let lower = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

pub(crate) fn compile_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text a price region shows a reader: the `content` attribute for `<meta>`,
/// otherwise the visible text, falling back to `content` when that is empty.
///
/// Text inside struck-through markup below `el` is left out, so
/// `<p><del>£150</del> <ins>£129</ins></p>` reads as `£129`.
pub(crate) fn region_text(el: ElementRef<'_>) -> String {
    let content = || {
        el.value()
            .attr("content")
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    if el.value().name().eq_ignore_ascii_case("meta") {
        return content();
    }

    let text = collapse_whitespace(&live_text(el));
    if text.is_empty() {
        content()
    } else {
        text
    }
}

/// Concatenated text of `el`, skipping any text node with a struck element
/// between it and `el`.
fn live_text(el: ElementRef<'_>) -> String {
    let root = el.id();
    let mut out = String::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let struck = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != root)
            .filter_map(ElementRef::wrap)
            .any(marks_struck);
        if !struck {
            out.push_str(text);
        }
    }
    out
}

/// Trimmed, non-empty attribute of the first element matching `selector`.
pub(crate) fn first_attr(html: &Html, selector: &Selector, attr: &str) -> Option<String> {
    html.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `true` when `el` itself, or any ancestor, marks a superseded price.
pub(crate) fn is_struck(el: ElementRef<'_>) -> bool {
    std::iter::once(el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .any(marks_struck)
}

/// `true` when some element below `el` marks a superseded price.
pub(crate) fn contains_struck(el: ElementRef<'_>) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(marks_struck)
}

fn marks_struck(el: ElementRef<'_>) -> bool {
    let element = el.value();
    if STRUCK_TAGS
        .iter()
        .any(|tag| element.name().eq_ignore_ascii_case(tag))
    {
        return true;
    }
    if element
        .attr("data-a-strike")
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    {
        return true;
    }
    element.classes().any(|class| {
        let class = class.to_ascii_lowercase();
        STRUCK_CLASS_MARKERS
            .iter()
            .any(|marker| class.contains(marker))
    })
}
