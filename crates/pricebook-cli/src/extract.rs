//! Command handlers. Each prints one JSON document to stdout.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pricebook_core::{AppConfig, ExtractionResult};
use pricebook_scraper::{parse_price, Acquirer};

/// Fetches `url` (escalating to the renderer when configured and allowed)
/// and prints the extraction result.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or the page could
/// not be acquired by any tier.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    no_render: bool,
    compact: bool,
) -> anyhow::Result<()> {
    let mut acquirer =
        Acquirer::from_config(config).context("failed to build page fetchers")?;
    if no_render {
        acquirer = acquirer.static_only();
    } else if !config.render_enabled() {
        tracing::debug!("no render endpoint configured; static fetch only");
    }

    let result = acquirer
        .acquire(url)
        .await
        .with_context(|| format!("could not acquire document for extraction: {url}"))?;

    log_result(url, &result);
    print_json(&serde_json::to_value(&result)?, compact)
}

/// Extracts from a local HTML file, or stdin when `file` is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub(crate) fn run_parse(file: &Path, url: Option<&str>, compact: bool) -> anyhow::Result<()> {
    let html = read_input(file)?;
    let result = pricebook_scraper::extract_listing(&html, url);

    log_result(&file.display().to_string(), &result);
    print_json(&serde_json::to_value(&result)?, compact)
}

/// Prints `{"value": "...", "currency": "..."}` for one price string.
///
/// # Errors
///
/// Returns an error only if serialization fails.
pub(crate) fn run_price(text: &str) -> anyhow::Result<()> {
    print_json(&price_json(text), true)
}

fn price_json(text: &str) -> serde_json::Value {
    let parsed = parse_price(text);
    serde_json::json!({
        "value": parsed.value.map(|v| v.to_string()),
        "currency": parsed.currency,
    })
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("failed to read HTML from stdin")?;
        return Ok(html);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn log_result(source: &str, result: &ExtractionResult) {
    tracing::info!(
        source,
        has_price = result.has_price(),
        has_image = result.image.is_some(),
        has_title = result.title.is_some(),
        "extraction complete"
    );
}

fn print_json(value: &serde_json::Value, compact: bool) -> anyhow::Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_json_reports_value_and_currency() {
        assert_eq!(
            price_json("£1,234.56"),
            serde_json::json!({"value": "1234.56", "currency": "GBP"})
        );
    }

    #[test]
    fn price_json_nulls_when_unparseable() {
        assert_eq!(
            price_json("no price here"),
            serde_json::json!({"value": null, "currency": null})
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_input(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
