use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use persona_common::error::{PersonaError, PersonaResult};
use persona_config::EnrichmentConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{AgeResponse, GenderResponse, NationalityResponse};
use crate::{Enricher, Enrichment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Age,
    Gender,
    Nationality,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("{provider} provider returned HTTP {status}: {body}")]
    HttpError {
        provider: Provider,
        status: StatusCode,
        body: String,
    },

    #[error("{provider} request failed: {source}")]
    RequestError {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} provider has no prediction for {name:?}")]
    NoPrediction { provider: Provider, name: String },

    #[error("enrichment did not finish within {0:?}")]
    Timeout(Duration),
}

impl From<EnrichError> for PersonaError {
    fn from(err: EnrichError) -> Self {
        PersonaError::Enrichment(err.to_string())
    }
}

/// Queries the age, gender and nationality providers over HTTP.
#[derive(Clone)]
pub struct HttpEnricher {
    client: Client,
    config: EnrichmentConfig,
}

impl HttpEnricher {
    pub fn new(config: EnrichmentConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    /// Run the three lookups concurrently under one deadline. The first
    /// failure drops the remaining in-flight requests.
    pub async fn lookup(&self, name: &str) -> Result<Enrichment, EnrichError> {
        let lookups = async {
            tokio::try_join!(
                self.fetch_age(name),
                self.fetch_gender(name),
                self.fetch_nationality(name)
            )
        };

        let budget = self.config.total_timeout();
        let (age, gender, nationality) = tokio::time::timeout(budget, lookups)
            .await
            .map_err(|_| EnrichError::Timeout(budget))??;

        Ok(Enrichment {
            age,
            gender,
            nationality,
        })
    }

    async fn fetch_age(&self, name: &str) -> Result<i32, EnrichError> {
        let resp: AgeResponse = self.fetch(Provider::Age, &self.config.age_url, name).await?;
        resp.age.ok_or_else(|| EnrichError::NoPrediction {
            provider: Provider::Age,
            name: name.to_owned(),
        })
    }

    async fn fetch_gender(&self, name: &str) -> Result<String, EnrichError> {
        let resp: GenderResponse = self
            .fetch(Provider::Gender, &self.config.gender_url, name)
            .await?;
        resp.gender.ok_or_else(|| EnrichError::NoPrediction {
            provider: Provider::Gender,
            name: name.to_owned(),
        })
    }

    async fn fetch_nationality(&self, name: &str) -> Result<String, EnrichError> {
        let resp: NationalityResponse = self
            .fetch(Provider::Nationality, &self.config.nationality_url, name)
            .await?;
        Ok(resp.top_country())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: &str,
        name: &str,
    ) -> Result<T, EnrichError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|source| EnrichError::RequestError { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::HttpError {
                provider,
                status,
                body,
            });
        }

        let payload = response
            .json::<T>()
            .await
            .map_err(|source| EnrichError::RequestError { provider, source })?;

        tracing::debug!(
            %provider,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provider lookup completed"
        );
        Ok(payload)
    }
}

#[async_trait]
impl Enricher for HttpEnricher {
    async fn enrich(&self, name: &str) -> PersonaResult<Enrichment> {
        match self.lookup(name).await {
            Ok(enrichment) => {
                tracing::debug!(name, ?enrichment, "enrichment completed");
                Ok(enrichment)
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "enrichment failed");
                Err(e.into())
            }
        }
    }
}
