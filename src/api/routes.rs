use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Order entry
        .route("/place_order", post(handlers::place_order))
        .route("/chat", post(handlers::chat))
        // Account and market data
        .route("/account", get(handlers::get_account))
        .route("/price/:symbol", get(handlers::get_price))
        // Liveness
        .route("/health", get(handlers::health))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
