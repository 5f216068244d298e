//! API Routes
//!
//! Configures the Axum router with all endpoints and their gates.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{require_api_key, require_credentials};
use super::handlers::{
    get_user_by_id_handler, get_users_handler, health_handler, login_handler, stats_handler,
    AppState,
};
use crate::upstream::UserSource;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /login` - Credentials check and profile greeting
/// - `GET /get-users` - Cached upstream user list
/// - `GET /get-user_by_id/:id` - Single upstream user, uncached
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// The first three sit behind the API-key gate (when a key is configured)
/// and then the credentials gate.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router<S: UserSource>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gated = Router::new()
        .route("/login", post(login_handler))
        .route("/get-users", get(get_users_handler::<S>))
        .route("/get-user_by_id/:id", get(get_user_by_id_handler::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_credentials,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/stats", get(stats_handler::<S>))
        .route("/health", get(health_handler))
        .merge(gated)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
