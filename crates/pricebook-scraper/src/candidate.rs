use std::fmt;

use rust_decimal::Decimal;

/// Which rule produced a candidate. Used for tracing only, never for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// An entry of the generic selector pool.
    Selector(&'static str),
    /// The class/id `*price*` sweep.
    NearPrice,
    /// A schema.org product block.
    JsonLd,
    /// A host-specific rule, by site name.
    Site(&'static str),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Selector(css) => write!(f, "{css}"),
            Provenance::NearPrice => write!(f, "near:price"),
            Provenance::JsonLd => write!(f, "jsonld"),
            Provenance::Site(name) => write!(f, "site:{name}"),
        }
    }
}

/// One provisional answer to "what does this page cost".
///
/// Scores are only comparable within a single resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCandidate {
    pub value: Decimal,
    pub currency: Option<String>,
    pub score: i32,
    pub provenance: Provenance,
}
