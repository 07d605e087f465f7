//! Rendered-DOM fetches for pages that only show a price after scripts run.

use std::future::Future;
use std::time::Duration;

use pricebook_core::AppConfig;
use reqwest::Client;
use serde_json::json;

use crate::error::ScraperError;
use crate::fetch::parse_page_url;

/// Extra client-side allowance on top of the time budget the service is given.
const RENDER_CLIENT_SLACK_SECS: u64 = 5;

/// Produces the HTML of a page after its scripts have run.
pub trait Renderer {
    /// # Errors
    ///
    /// Returns [`ScraperError::Render`] (or [`ScraperError::InvalidUrl`]) when
    /// no rendered HTML can be produced.
    fn render(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// A [`Renderer`] backed by an HTTP rendering service.
///
/// POSTs `{"url", "waitUntil": "networkidle", "timeout": <ms>}` to the
/// endpoint and takes the response body as the rendered HTML.
pub struct RenderServiceClient {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl RenderServiceClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                timeout_secs.saturating_add(RENDER_CLIENT_SLACK_SECS),
            ))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            timeout_ms: timeout_secs.saturating_mul(1000),
        })
    }

    /// `None` when no endpoint is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ScraperError> {
        config
            .render_endpoint
            .as_deref()
            .map(|endpoint| Self::new(endpoint, config.render_timeout_secs))
            .transpose()
    }
}

impl Renderer for RenderServiceClient {
    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        parse_page_url(url)?;

        let render_err = |reason: String| ScraperError::Render {
            url: url.to_owned(),
            reason,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "url": url,
                "waitUntil": "networkidle",
                "timeout": self.timeout_ms,
            }))
            .send()
            .await
            .map_err(|e| render_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(render_err(format!("service returned HTTP {}", status.as_u16())));
        }

        let html = response
            .text()
            .await
            .map_err(|e| render_err(e.to_string()))?;
        if html.trim().is_empty() {
            return Err(render_err("service returned an empty document".to_owned()));
        }

        tracing::debug!(url, bytes = html.len(), "render complete");
        Ok(html)
    }
}
