//! Product-page price and metadata extraction.
//!
//! [`extract_listing`] is the pure core: HTML in, [`ExtractionResult`] out,
//! no I/O and no failure mode. [`Acquirer`] wraps it with static and
//! rendered fetches.
//!
//! [`ExtractionResult`]: pricebook_core::ExtractionResult

pub mod acquire;
pub mod candidate;
pub mod collect;
pub mod context;
pub mod document;
pub mod error;
pub mod fetch;
mod jsonld;
mod metadata;
pub mod price;
mod rate_limit;
pub mod render;
pub mod resolve;
pub mod sites;

pub use acquire::Acquirer;
pub use candidate::{PriceCandidate, Provenance};
pub use collect::collect;
pub use document::RawDocument;
pub use error::ScraperError;
pub use fetch::PageFetcher;
pub use price::{detect_currency, parse_price, ParsedPrice};
pub use render::{RenderServiceClient, Renderer};
pub use resolve::{extract_all, extract_listing};
