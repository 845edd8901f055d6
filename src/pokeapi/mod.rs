//! PokéAPI Module
//!
//! The upstream client and the cache-fronted proxy layer over it.

mod client;
mod proxy;

pub use client::{PokeApiClient, UpstreamError};
pub use proxy::PokeProxy;
