pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advice::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/advice/career",
            post(handlers::handle_career_advice),
        )
        .route(
            "/api/v1/advice/cover-letter",
            post(handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/advice/polish",
            post(handlers::handle_polish_resume),
        )
        .with_state(state)
}
