//! Two-tier acquisition: static HTML first, rendered DOM only when the
//! static pass comes up short.

use pricebook_core::{AppConfig, ExtractionResult};

use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::render::{RenderServiceClient, Renderer};
use crate::resolve::extract_listing;

/// Fetches a product page and extracts it, escalating to a [`Renderer`]
/// when the static page has no price or no image.
pub struct Acquirer<R = RenderServiceClient> {
    fetcher: PageFetcher,
    renderer: Option<R>,
}

impl Acquirer<RenderServiceClient> {
    /// Static fetcher plus, when `config.render_endpoint` is set, a
    /// [`RenderServiceClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            PageFetcher::from_config(config)?,
            RenderServiceClient::from_config(config)?,
        ))
    }
}

impl<R: Renderer + Sync> Acquirer<R> {
    #[must_use]
    pub fn new(fetcher: PageFetcher, renderer: Option<R>) -> Self {
        Self { fetcher, renderer }
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Drops the renderer so only static fetches are made.
    #[must_use]
    pub fn static_only(self) -> Self {
        Self {
            renderer: None,
            ..self
        }
    }

    /// Acquires and extracts `url`.
    ///
    /// When both tiers run, the rendered result wins field by field and the
    /// static result fills whatever it lacks.
    ///
    /// # Errors
    ///
    /// Returns the static fetch error when no renderer is configured, or the
    /// render error when the static fetch also failed. An invalid URL fails
    /// at once.
    pub async fn acquire(&self, url: &str) -> Result<ExtractionResult, ScraperError> {
        let static_result = match self.fetcher.fetch_static_html(url).await {
            Ok(html) => Ok(extract_listing(&html, Some(url))),
            Err(err @ ScraperError::InvalidUrl { .. }) => return Err(err),
            Err(err) => Err(err),
        };

        let Some(renderer) = &self.renderer else {
            return static_result;
        };

        match static_result {
            Ok(result) if result.is_usable() => Ok(result),
            Ok(result) => {
                tracing::info!(
                    url,
                    has_price = result.has_price(),
                    has_image = result.image.is_some(),
                    "static page incomplete, escalating to renderer"
                );
                match renderer.render(url).await {
                    Ok(html) => Ok(extract_listing(&html, Some(url)).merge_missing(result)),
                    Err(err) => {
                        tracing::warn!(url, error = %err, "render failed, keeping static result");
                        Ok(result)
                    }
                }
            }
            Err(static_err) => {
                tracing::warn!(url, error = %static_err, "static fetch failed, escalating to renderer");
                let html = renderer.render(url).await?;
                Ok(extract_listing(&html, Some(url)))
            }
        }
    }
}
