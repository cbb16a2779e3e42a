use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::domain::{ApiError, FilterRequest, FilterResult, Health};
use crate::services::AsteroidService;
use crate::validation::Validator;

pub type AppState = crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: chrono::Utc::now(),
    })
}

pub async fn find_asteroids(
    State(state): State<AppState>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterResult>, ApiError> {
    // A body that does not decode at all is the same failure as a body
    // that fails the field checks.
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.to_string()))?;
    let query = Validator::validate_filter_request(&request, state.config.date_validation)?;

    let service = AsteroidService::new(state.neo_client.clone());
    let result = service.find_within(&query).await?;
    Ok(Json(result))
}
