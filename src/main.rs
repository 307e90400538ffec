//! Pokedex - explore PokeAPI from the terminal
//!
//! Parses the command line, sets up logging and the cached API client, then
//! hands control to the REPL until the user exits.

use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pokedex::api::PokeApi;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::repl::Repl;
use pokedex::state::State;

/// Logs go to stderr so they never interleave with command output
fn init_tracing(config: &StartupConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    init_tracing(&config);
    info!(
        base_url = %config.base_url,
        ttl_secs = config.cache_ttl.as_secs(),
        "starting pokedex"
    );

    let client = reqwest::Client::builder()
        .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let api = PokeApi::with_client(config.base_url.clone(), client, config.cache_ttl);
    let mut state = State::new(api);
    let mut repl = Repl::new()?;

    let result = repl.run(&mut state).await;

    // Join the reaper even if the loop ended on a terminal error
    state.api.shutdown().await;
    result?;

    Ok(())
}
