//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{auth, collection, maintenance, pokemon, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/health", get(maintenance::health))
        // Auth and user management
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/users", get(auth::list_users))
        .route("/api/auth/users/:id", delete(auth::delete_user))
        .route("/api/auth/seed/types", post(auth::seed_types))
        // Cached upstream proxy
        .route("/api/pokemon", get(pokemon::list))
        .route("/api/pokemon/:name", get(pokemon::detail))
        .route("/api/type", get(pokemon::list_types))
        .route("/api/type/:name", get(pokemon::list_by_type))
        // Cache maintenance
        .route("/api/cache/stats", get(maintenance::cache_stats))
        .route("/api/cache/clear", post(maintenance::cache_clear))
        // Caller's collection
        .route("/api/me/team", get(collection::get_team).post(collection::add_team_member))
        .route("/api/me/team/:id", delete(collection::remove_team_member))
        .route(
            "/api/me/favorites",
            get(collection::get_favorites).post(collection::add_favorite),
        )
        .route("/api/me/favorites/:id", delete(collection::remove_favorite))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
