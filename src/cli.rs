//! Command-line interface parsing for the Pokedex REPL
//!
//! Flags can also be given through `POKEDEX_*` environment variables. Parsed
//! values are checked once here and handed to the rest of the program as a
//! [`StartupConfig`].

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Default cache lifetime: five minutes
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A zero TTL would evict entries as soon as they are added
    #[error("Invalid cache TTL: must be at least 1 second")]
    InvalidTtl,

    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex - explore PokeAPI location areas and catch pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// How long fetched responses stay cached, in seconds
    #[arg(
        long,
        value_name = "SECONDS",
        env = "POKEDEX_CACHE_TTL",
        default_value_t = DEFAULT_TTL_SECS
    )]
    pub ttl: u64,

    /// Root of the PokeAPI REST endpoints
    #[arg(long, value_name = "URL", env = "POKEDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log cache and request activity to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated settings for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Lifetime and sweep period of the response cache
    pub cache_ttl: Duration,
    pub base_url: String,
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the validated settings
    /// * `Err(CliError)` if the TTL is zero or the base URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.ttl == 0 {
            return Err(CliError::InvalidTtl);
        }

        let base_url = cli.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_ttl: Duration::from_secs(cli.ttl),
            base_url: base_url.to_string(),
            verbose: cli.verbose,
        })
    }

    /// Tracing filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "pokedex=debug"
        } else {
            "pokedex=warn"
        }
    }
}
