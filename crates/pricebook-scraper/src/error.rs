use thiserror::Error;

/// Failures while acquiring a document. Extraction itself never fails.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("document from {url} is empty or a bot challenge page")]
    UnusableDocument { url: String },

    #[error("rendering {url} failed: {reason}")]
    Render { url: String, reason: String },
}
