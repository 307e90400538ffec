//! Cache-aside fetching
//!
//! [`CachingFetcher`] looks a URL up in the shared [`TtlCache`] and only goes
//! to the network on a miss. Results are cached after they decode, so failed
//! requests and malformed bodies never reach the cache.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::{CatalogEntry, Resource};
use crate::cache::TtlCache;

/// Errors that can occur when fetching a catalog resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    /// The body did not match the expected shape
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Whether the server reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// The network side of a fetch: GET a URL and return its JSON body
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let transport_error = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Derives the cache key for a request
///
/// The full URL is the identity, query string included, so different pages
/// of a listing never share an entry.
pub fn cache_key(url: &str) -> String {
    url.trim().to_string()
}

/// Fetch-or-populate layer in front of a [`Transport`]
///
/// Concurrent misses on the same key each go to the network; in-flight
/// requests are not deduplicated.
#[derive(Debug)]
pub struct CachingFetcher<T> {
    transport: T,
    cache: TtlCache<CatalogEntry>,
}

impl<T: Transport> CachingFetcher<T> {
    /// Creates a fetcher with its own cache. Starts the cache's reap loop.
    pub fn new(transport: T, ttl: Duration) -> Self {
        Self {
            transport,
            cache: TtlCache::new(ttl),
        }
    }

    /// Returns the resource at `url`, from cache when present
    ///
    /// On a miss the body is fetched and decoded into `R`, then cached under
    /// [`cache_key`]. Errors are returned as-is and leave the cache unchanged.
    pub async fn fetch<R: Resource>(&self, url: &str) -> Result<R, FetchError> {
        let key = cache_key(url);

        if let Some(hit) = self.cache.get(&key).and_then(R::from_entry) {
            debug!(kind = R::KIND, %key, "cache hit");
            return Ok(hit);
        }

        debug!(kind = R::KIND, %key, "cache miss");
        let body = self.transport.get_json(url).await.inspect_err(|e| {
            warn!(kind = R::KIND, error = %e, "fetch failed");
        })?;

        let resource: R = serde_json::from_value(body).map_err(|source| {
            warn!(kind = R::KIND, error = %source, "response did not decode");
            FetchError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        self.cache.add(key, resource.clone().into_entry());
        Ok(resource)
    }

    pub fn cache(&self) -> &TtlCache<CatalogEntry> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stops the cache's reap loop and waits for it to exit
    pub async fn shutdown(&self) {
        self.cache.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{pikachu_json, MockTransport};
    use crate::api::{LocationArea, NamedApiResourceList, Pokemon};
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);
    const PIKACHU_URL: &str = "https://pokeapi.co/api/v2/pokemon/pikachu";

    #[test]
    fn test_cache_key_keeps_pagination_query() {
        let first = cache_key("https://pokeapi.co/api/v2/location-area/?offset=0&limit=20");
        let second = cache_key("https://pokeapi.co/api/v2/location-area/?offset=20&limit=20");

        assert_ne!(first, second);
        assert_eq!(
            cache_key(" https://pokeapi.co/api/v2/pokemon/mew "),
            "https://pokeapi.co/api/v2/pokemon/mew"
        );
    }

    #[test]
    fn test_not_found_detection() {
        let err = FetchError::Status {
            url: PIKACHU_URL.to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("404"));

        let err = FetchError::Status {
            url: PIKACHU_URL.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_preloaded_entry_is_served_without_io() {
        let fetcher = CachingFetcher::new(MockTransport::new(), TTL);
        let pokemon: Pokemon = serde_json::from_value(pikachu_json()).unwrap();
        fetcher.cache().add(cache_key(PIKACHU_URL), pokemon.clone().into_entry());

        let fetched: Pokemon = fetcher.fetch(PIKACHU_URL).await.expect("Should hit cache");

        assert_eq!(fetched, pokemon);
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_miss_fetches_once_then_hits() {
        let transport = MockTransport::new().with_response(PIKACHU_URL, pikachu_json());
        let fetcher = CachingFetcher::new(transport, TTL);

        let first: Pokemon = fetcher.fetch(PIKACHU_URL).await.expect("First fetch");
        assert_eq!(fetcher.transport().calls(), 1);
        assert!(fetcher.cache().get(&cache_key(PIKACHU_URL)).is_some());

        let second: Pokemon = fetcher.fetch(PIKACHU_URL).await.expect("Second fetch");
        assert_eq!(fetcher.transport().calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let fetcher = CachingFetcher::new(MockTransport::new(), TTL);
        let key = cache_key(PIKACHU_URL);
        assert!(fetcher.cache().get(&key).is_none());

        let result: Result<Pokemon, _> = fetcher.fetch(PIKACHU_URL).await;

        assert!(result.unwrap_err().is_not_found());
        assert!(fetcher.cache().get(&key).is_none());

        // Nothing was cached, so the retry goes to the network again
        let _ = fetcher.fetch::<Pokemon>(PIKACHU_URL).await;
        assert_eq!(fetcher.transport().calls(), 2);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error_and_not_cached() {
        let transport =
            MockTransport::new().with_response(PIKACHU_URL, json!({ "name": "pikachu" }));
        let fetcher = CachingFetcher::new(transport, TTL);

        let result: Result<Pokemon, _> = fetcher.fetch(PIKACHU_URL).await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_distinct_pages_are_cached_separately() {
        let page1 = "https://pokeapi.co/api/v2/location-area/?offset=0&limit=2";
        let page2 = "https://pokeapi.co/api/v2/location-area/?offset=2&limit=2";
        let list = |name: &str| {
            json!({
                "count": 4,
                "next": null,
                "previous": null,
                "results": [{ "name": name, "url": "https://pokeapi.co/api/v2/location-area/1/" }]
            })
        };
        let transport = MockTransport::new()
            .with_response(page1, list("canalave-city-area"))
            .with_response(page2, list("eterna-city-area"));
        let fetcher = CachingFetcher::new(transport, TTL);

        let first: NamedApiResourceList = fetcher.fetch(page1).await.unwrap();
        let second: NamedApiResourceList = fetcher.fetch(page2).await.unwrap();

        assert_eq!(first.results[0].name, "canalave-city-area");
        assert_eq!(second.results[0].name, "eterna-city-area");
        assert_eq!(fetcher.cache().len(), 2);
        assert_eq!(fetcher.transport().calls(), 2);
    }

    #[tokio::test]
    async fn test_entry_of_other_kind_is_refetched() {
        let transport = MockTransport::new().with_response(PIKACHU_URL, pikachu_json());
        let fetcher = CachingFetcher::new(transport, TTL);
        let area = LocationArea {
            id: 1,
            name: "wrong-shape".to_string(),
            pokemon_encounters: Vec::new(),
        };
        fetcher.cache().add(cache_key(PIKACHU_URL), area.into_entry());

        let pokemon: Pokemon = fetcher.fetch(PIKACHU_URL).await.unwrap();

        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(fetcher.transport().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_fetched_again() {
        let ttl = Duration::from_millis(100);
        let transport = MockTransport::new().with_response(PIKACHU_URL, pikachu_json());
        let fetcher = CachingFetcher::new(transport, ttl);

        let _: Pokemon = fetcher.fetch(PIKACHU_URL).await.unwrap();
        tokio::time::sleep(ttl * 2 + Duration::from_millis(1)).await;
        assert!(fetcher.cache().is_empty());

        let _: Pokemon = fetcher.fetch(PIKACHU_URL).await.unwrap();
        assert_eq!(fetcher.transport().calls(), 2);
    }

    #[tokio::test]
    async fn test_shutdown_stops_reaper_and_keeps_serving_hits() {
        let transport = MockTransport::new().with_response(PIKACHU_URL, pikachu_json());
        let fetcher = CachingFetcher::new(transport, TTL);
        let _: Pokemon = fetcher.fetch(PIKACHU_URL).await.unwrap();

        fetcher.shutdown().await;

        assert!(!fetcher.cache().is_reaping());
        let _: Pokemon = fetcher.fetch(PIKACHU_URL).await.unwrap();
        assert_eq!(fetcher.transport().calls(), 1);
    }
}
