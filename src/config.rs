//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path to the SQLite database file
    pub database_path: String,
    /// Secret used to sign and verify access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub token_ttl: i64,
    /// Response cache TTL in seconds
    pub cache_ttl: u64,
    /// Base URL of the upstream Pokémon API
    pub pokeapi_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite file path (default: pokedex.db)
    /// - `JWT_SECRET` - token signing secret (default: dev-jwt-secret)
    /// - `TOKEN_TTL` - access token lifetime in seconds (default: 86400)
    /// - `CACHE_TTL` - response cache TTL in seconds (default: 3600)
    /// - `POKEAPI_BASE_URL` - upstream API root (default: https://pokeapi.co/api/v2)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "pokedex.db".into()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-jwt-secret".into()),
            token_ttl: env::var("TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            pokeapi_base_url: env::var("POKEAPI_BASE_URL")
                .unwrap_or_else(|_| "https://pokeapi.co/api/v2".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_path: "pokedex.db".into(),
            jwt_secret: "dev-jwt-secret".into(),
            token_ttl: 86_400,
            cache_ttl: 3600,
            pokeapi_base_url: "https://pokeapi.co/api/v2".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.token_ttl, 86_400);
        assert_eq!(config.pokeapi_base_url, "https://pokeapi.co/api/v2");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_PATH");
        env::remove_var("JWT_SECRET");
        env::remove_var("TOKEN_TTL");
        env::remove_var("CACHE_TTL");
        env::remove_var("POKEAPI_BASE_URL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "pokedex.db");
        assert_eq!(config.jwt_secret, "dev-jwt-secret");
        assert_eq!(config.cache_ttl, 3600);
    }
}
