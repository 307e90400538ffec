//! Typed PokeAPI accessors
//!
//! One method per resource kind. All requests go through the
//! [`CachingFetcher`], so repeated lookups within the TTL stay local.

use std::time::Duration;

use super::fetcher::{CachingFetcher, FetchError, HttpTransport, Transport};
use super::{LocationArea, NamedApiResourceList, Pokemon};

/// Base URL for the public PokeAPI
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

const LOCATION_AREA_ENDPOINT: &str = "location-area/";
const POKEMON_ENDPOINT: &str = "pokemon/";

/// Client for the PokeAPI catalog
#[derive(Debug)]
pub struct PokeApi<T = HttpTransport> {
    base_url: String,
    fetcher: CachingFetcher<T>,
}

impl PokeApi<HttpTransport> {
    /// Create a client for `base_url` over HTTP, caching responses for `ttl`
    pub fn new(base_url: impl Into<String>, ttl: Duration) -> Self {
        Self::with_transport(base_url, HttpTransport::new(), ttl)
    }

    /// Create a client over HTTP using a preconfigured `reqwest` client
    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        ttl: Duration,
    ) -> Self {
        Self::with_transport(base_url, HttpTransport::with_client(client), ttl)
    }
}

impl<T: Transport> PokeApi<T> {
    /// Create a client with a custom transport
    pub fn with_transport(base_url: impl Into<String>, transport: T, ttl: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            fetcher: CachingFetcher::new(transport, ttl),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first page of location areas
    pub fn location_areas_url(&self) -> String {
        format!("{}/{}", self.base_url, LOCATION_AREA_ENDPOINT)
    }

    /// Fetch a page of location areas
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page and is used
    /// verbatim; `None` fetches the first page.
    pub async fn location_areas(
        &self,
        page_url: Option<&str>,
    ) -> Result<NamedApiResourceList, FetchError> {
        match page_url {
            Some(url) => self.fetcher.fetch(url).await,
            None => self.fetcher.fetch(&self.location_areas_url()).await,
        }
    }

    /// Fetch a location area by name or id
    pub async fn location_area(&self, name: &str) -> Result<LocationArea, FetchError> {
        let url = format!("{}/{}{}", self.base_url, LOCATION_AREA_ENDPOINT, name);
        self.fetcher.fetch(&url).await
    }

    /// Fetch a pokemon by name or id
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, FetchError> {
        let url = format!("{}/{}{}", self.base_url, POKEMON_ENDPOINT, name);
        self.fetcher.fetch(&url).await
    }

    pub fn fetcher(&self) -> &CachingFetcher<T> {
        &self.fetcher
    }

    /// Stop the response cache's background sweep and wait for it
    pub async fn shutdown(&self) {
        self.fetcher.shutdown().await;
    }
}
