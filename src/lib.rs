//! Pokedex CLI Library
//!
//! A REPL for browsing PokeAPI location areas and catching pokemon. Every
//! catalog request passes through an in-memory TTL cache.

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod repl;
pub mod state;
