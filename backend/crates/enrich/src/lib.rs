pub mod client;
pub mod models;

use async_trait::async_trait;
use persona_common::error::PersonaResult;

pub use client::{EnrichError, HttpEnricher};

/// Demographic attributes inferred from a first name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub age: i32,
    pub gender: String,
    /// ISO country code of the most likely nationality, or empty when the
    /// provider had no candidates.
    pub nationality: String,
}

#[async_trait]
pub trait Enricher: Send + Sync {
    /// All three attributes or an `Enrichment` error; never a partial result.
    async fn enrich(&self, name: &str) -> PersonaResult<Enrichment>;
}
