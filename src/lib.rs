//! Pokédex API - a backend for authenticated Pokémon collections
//!
//! Proxies the PokéAPI through an in-process TTL response cache and stores
//! per-user favorites and battle teams in SQLite.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod storage;

pub use api::AppState;
pub use config::Config;
