//! Species lookup client.
//!
//! Fetches display data from the external species API with a bounded
//! timeout and cache-then-fallback recovery: a lookup never surfaces an
//! error to the reward flow.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use habitflow_core::Species;
use reqwest::{Client, ClientBuilder};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{Clock, SpeciesCache, SystemClock};
use crate::species;

/// Errors from the remote species source. These never leave the client;
/// they are logged and recovered via cache or fallback.
#[derive(Debug, thiserror::Error)]
pub enum SpeciesError {
    /// Transport-level failure (timeout, connect error, bad body)
    #[error("species request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("species API returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Anything that can resolve a species id to display data.
#[async_trait]
pub trait SpeciesProvider: Send + Sync {
    /// Resolve `id`. Implementations must always return a usable species,
    /// degrading to a fallback rather than failing.
    async fn fetch(&self, id: u32) -> Species;
}

/// Configuration for the HTTP species client.
#[derive(Debug, Clone)]
pub struct SpeciesClientConfig {
    /// API base URL
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Cache entry lifetime
    pub cache_ttl: chrono::Duration,
}

impl Default for SpeciesClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout: Duration::from_secs(5),
            cache_ttl: chrono::Duration::minutes(SpeciesCache::DEFAULT_TTL_MINUTES),
        }
    }
}

/// HTTP species client with TTL cache and hardcoded fallback.
pub struct SpeciesClient {
    client: Client,
    base_url: String,
    cache: Mutex<SpeciesCache>,
}

#[derive(serde::Deserialize)]
struct ApiSpecies {
    id: u32,
    name: String,
    types: Vec<ApiTypeSlot>,
}

#[derive(serde::Deserialize)]
struct ApiTypeSlot {
    #[serde(rename = "type")]
    type_ref: ApiTypeRef,
}

#[derive(serde::Deserialize)]
struct ApiTypeRef {
    name: String,
}

impl SpeciesClient {
    /// Client with default configuration on the system clock.
    pub fn new() -> Self {
        Self::with_config(SpeciesClientConfig::default(), Arc::new(SystemClock))
    }

    /// Client with explicit configuration and clock.
    pub fn with_config(config: SpeciesClientConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.base_url,
            cache: Mutex::new(SpeciesCache::with_clock(config.cache_ttl, clock)),
        }
    }

    async fn fetch_remote(&self, id: u32) -> Result<Species, SpeciesError> {
        debug!(species = id, "fetching species from remote source");

        let response = self
            .client
            .get(format!("{}/pokemon/{}", self.base_url, id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeciesError::Status(response.status()));
        }

        let data: ApiSpecies = response.json().await?;

        // Everything but name/types comes from the static tables.
        let mut species = species::static_species(data.id);
        species.name = capitalize(&data.name);
        species.types = data.types.into_iter().map(|t| t.type_ref.name).collect();
        Ok(species)
    }
}

impl Default for SpeciesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeciesProvider for SpeciesClient {
    async fn fetch(&self, id: u32) -> Species {
        {
            let cache = self.cache.lock().await;
            if let Some(species) = cache.get(id) {
                return species.clone();
            }
        }

        match self.fetch_remote(id).await {
            Ok(species) => {
                self.cache.lock().await.insert(species.clone());
                species
            }
            Err(e) => {
                warn!(species = id, error = %e, "species lookup failed, using fallback");
                let mut cache = self.cache.lock().await;
                if let Some(stale) = cache.get_stale(id).or_else(|| cache.get_stale(species::FALLBACK_SPECIES_ID)) {
                    return stale.clone();
                }
                let fallback = species::fallback_species();
                cache.insert(fallback.clone());
                fallback
            }
        }
    }
}

/// Offline provider that builds species purely from the static tables.
/// Used in tests and anywhere network access is undesirable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProvider;

#[async_trait]
impl SpeciesProvider for StaticProvider {
    async fn fetch(&self, id: u32) -> Species {
        species::static_species(id)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
