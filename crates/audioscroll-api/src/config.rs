use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use audioscroll_types::api::UpdateConfigRequest;
use audioscroll_types::models::AppConfig;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/config — never errors; the service falls back to defaults on
/// any store trouble.
pub async fn get_config(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.config.get().await)
}

/// PUT /api/config — merge-update theme and feature slots.
pub async fn update_config(
    State(state): State<AppState>,
    body: Result<Json<UpdateConfigRequest>, JsonRejection>,
) -> Result<Json<AppConfig>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let config = state.config.update(req).await?;
    Ok(Json(config))
}
