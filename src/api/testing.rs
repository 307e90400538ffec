//! Canned transport for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{FetchError, Transport};

/// Serves fixed JSON bodies by URL and counts every request.
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_response(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: StatusCode::NOT_FOUND,
        })
    }
}

pub(crate) fn pikachu_json() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "height": 4,
        "weight": 60,
        "stats": [
            {
                "base_stat": 35,
                "effort": 0,
                "stat": { "name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/" }
            },
            {
                "base_stat": 55,
                "effort": 0,
                "stat": { "name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/" }
            }
        ],
        "types": [
            {
                "slot": 1,
                "type": { "name": "electric", "url": "https://pokeapi.co/api/v2/type/13/" }
            }
        ]
    })
}
