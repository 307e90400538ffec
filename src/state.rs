//! Session state shared by every REPL command

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::api::{HttpTransport, PokeApi, Pokemon};

/// A pokemon in the user's pokedex
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Local>,
}

/// Mutable state of one REPL session
pub struct State<T = HttpTransport> {
    pub api: PokeApi<T>,
    /// Link to the page `map` shows next
    pub next_locations_url: Option<String>,
    /// Link to the page `mapb` shows next
    pub prev_locations_url: Option<String>,
    /// Whether `map` has shown any page yet
    pub locations_shown: bool,
    /// Caught pokemon by name
    pub pokedex: BTreeMap<String, CaughtPokemon>,
    /// Source of catch rolls
    pub rng: Box<dyn RngCore + Send>,
}

impl<T> State<T> {
    pub fn new(api: PokeApi<T>) -> Self {
        Self {
            api,
            next_locations_url: None,
            prev_locations_url: None,
            locations_shown: false,
            pokedex: BTreeMap::new(),
            rng: Box::new(StdRng::from_entropy()),
        }
    }
}
