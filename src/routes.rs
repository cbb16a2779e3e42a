use axum::routing::{get, post};
use axum::Router;

use crate::handlers::AppState;
use crate::handlers::{find_asteroids, health};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/asteroids", post(find_asteroids))
}
