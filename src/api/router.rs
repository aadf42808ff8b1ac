use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{counters, health, teams};
use crate::api::state::AppState;

/// Builds the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Counter routes
        .route("/api/counters", post(counters::create_counter))
        .route(
            "/api/counters/:id",
            get(counters::get_counter).delete(counters::delete_counter),
        )
        .route(
            "/api/counters/:id/increment",
            post(counters::increment_counter),
        )
        // Team routes
        .route("/api/teams", post(teams::create_team))
        .route("/api/teams/leaderboard", get(teams::get_leaderboard))
        .route("/api/teams/:id", delete(teams::delete_team))
        .route("/api/teams/:id/steps", get(teams::get_team_steps))
        .route("/api/teams/:id/counters", get(teams::get_team_counters))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
