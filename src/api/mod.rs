//! PokeAPI resource shapes and client
//!
//! Only the fields the REPL reads are modelled; serde ignores the rest of
//! each response.

pub mod client;
pub mod fetcher;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{PokeApi, DEFAULT_BASE_URL};
pub use fetcher::{cache_key, CachingFetcher, FetchError, HttpTransport, Transport};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A reference to another resource by name and URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    /// The name of the referenced resource
    pub name: String,
    /// The URL of the referenced resource
    pub url: String,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedApiResourceList {
    /// Total number of resources available
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedApiResource>,
}

/// A section of a location where pokemon can be encountered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Experience gained for defeating this pokemon; null for some forms
    pub base_experience: Option<u32>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedApiResource,
}

/// A cached response, tagged by resource kind
///
/// Every kind shares one cache; the variant records what a key holds so
/// typed lookups never hand back the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    ResourceList(NamedApiResourceList),
    LocationArea(LocationArea),
    Pokemon(Pokemon),
}

/// A response shape that can be decoded and stored in the shared cache
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Kind name used in log output
    const KIND: &'static str;

    fn into_entry(self) -> CatalogEntry;

    /// Returns `None` if the entry holds a different kind
    fn from_entry(entry: CatalogEntry) -> Option<Self>;
}

impl Resource for NamedApiResourceList {
    const KIND: &'static str = "resource-list";

    fn into_entry(self) -> CatalogEntry {
        CatalogEntry::ResourceList(self)
    }

    fn from_entry(entry: CatalogEntry) -> Option<Self> {
        match entry {
            CatalogEntry::ResourceList(list) => Some(list),
            _ => None,
        }
    }
}

impl Resource for LocationArea {
    const KIND: &'static str = "location-area";

    fn into_entry(self) -> CatalogEntry {
        CatalogEntry::LocationArea(self)
    }

    fn from_entry(entry: CatalogEntry) -> Option<Self> {
        match entry {
            CatalogEntry::LocationArea(area) => Some(area),
            _ => None,
        }
    }
}

impl Resource for Pokemon {
    const KIND: &'static str = "pokemon";

    fn into_entry(self) -> CatalogEntry {
        CatalogEntry::Pokemon(self)
    }

    fn from_entry(entry: CatalogEntry) -> Option<Self> {
        match entry {
            CatalogEntry::Pokemon(pokemon) => Some(pokemon),
            _ => None,
        }
    }
}
