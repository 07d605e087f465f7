//! Static HTML fetches over plain HTTP.

use std::time::Duration;

use pricebook_core::AppConfig;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};

use crate::document::normalize_host;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-GB,en;q=0.9";
/// Used when a 429 carries no parseable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Fetches product pages as a browser would, without running scripts.
///
/// 429s and network failures are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct PageFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// GETs `url` and returns the body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ScraperError::RateLimited`] on HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network failure after all retries.
    /// - [`ScraperError::UnusableDocument`] if the body is empty or a bot
    ///   challenge page.
    pub async fn fetch_static_html(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = parse_page_url(url)?;

        let body = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let parsed = parsed.clone();
            async move {
                let response = self
                    .client
                    .get(parsed.clone())
                    .header(ACCEPT, HTML_ACCEPT)
                    .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ScraperError::RateLimited {
                        domain: parsed.host_str().map(normalize_host).unwrap_or_default(),
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: parsed.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: parsed.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await?;

        if !is_usable_html(&body) {
            return Err(ScraperError::UnusableDocument {
                url: url.to_owned(),
            });
        }

        tracing::debug!(url, bytes = body.len(), "static fetch complete");
        Ok(body)
    }
}

pub(crate) fn parse_page_url(url: &str) -> Result<Url, ScraperError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(parsed)
}

/// Non-empty and not an anti-bot interstitial.
pub(crate) fn is_usable_html(body: &str) -> bool {
    let trimmed = body.trim();
    !trimmed.is_empty() && !looks_like_bot_challenge(trimmed)
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");
    let has_robot_check = lowered.contains("/errors/validatecaptcha");

    has_cloudflare_banner
        || has_challenge_platform
        || has_robot_check
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_unusable() {
        assert!(!is_usable_html("   \n "));
    }

    #[test]
    fn ordinary_page_is_usable() {
        assert!(is_usable_html("<html><body><h1>Kettle</h1></body></html>"));
    }

    #[test]
    fn cloudflare_interstitial_is_unusable() {
        assert!(!is_usable_html(
            "<title>Just a moment...</title><p>Please enable cookies.</p>"
        ));
        assert!(!is_usable_html(
            r#"<script src="/cdn-cgi/challenge-platform/h/b/orchestrate"></script>"#
        ));
    }

    #[test]
    fn amazon_captcha_is_unusable() {
        assert!(!is_usable_html(
            r#"<form action="/errors/validateCaptcha"><input name="field-keywords"></form>"#
        ));
    }

    #[test]
    fn just_a_moment_alone_is_fine() {
        assert!(is_usable_html("<p>Just a moment... your basket is updating</p>"));
    }

    #[test]
    fn page_url_must_be_http() {
        assert!(parse_page_url("https://shop.example/p/1").is_ok());
        assert!(matches!(
            parse_page_url("ftp://shop.example/p/1"),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_page_url("shop.example/p/1"),
            Err(ScraperError::InvalidUrl { .. })
        ));
    }
}
