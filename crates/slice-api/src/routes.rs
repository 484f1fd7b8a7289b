//! # Routes
//!
//! Axum router configuration for the ordering API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - GET  /api/v1/menu - Bases and add-ons with availability
/// - GET  /api/v1/inventory - Remaining stock
/// - GET  /api/v1/payment-methods - Registered payment channels
/// - POST /api/v1/sessions - Open a session
/// - GET  /api/v1/sessions/{session_id} - Session summary
/// - POST /api/v1/sessions/{session_id}/base - Choose base
/// - POST /api/v1/sessions/{session_id}/add-ons - Add an add-on
/// - POST /api/v1/sessions/{session_id}/finish - Stop adding add-ons
/// - POST /api/v1/sessions/{session_id}/payment - Pay
/// - POST /api/v1/sessions/{session_id}/cancel - Cancel
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/menu", get(handlers::menu))
        .route("/inventory", get(handlers::inventory))
        .route("/payment-methods", get(handlers::payment_methods))
        // Order sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{session_id}", get(handlers::get_session))
        .route("/sessions/{session_id}/base", post(handlers::select_base))
        .route("/sessions/{session_id}/add-ons", post(handlers::add_add_on))
        .route("/sessions/{session_id}/finish", post(handlers::finish))
        .route("/sessions/{session_id}/payment", post(handlers::select_payment))
        .route("/sessions/{session_id}/cancel", post(handlers::cancel));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
