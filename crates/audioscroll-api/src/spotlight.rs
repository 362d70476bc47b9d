use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use audioscroll_types::api::{
    ActiveQuery, CreateSpotlightRequest, SpotlightResponse, UpdateSpotlightRequest,
};
use audioscroll_types::models::SpotlightAudiobook;

use crate::error::{ApiError, FieldError};
use crate::state::AppState;

/// GET /api/spotlight?platform=&targetAudience=
pub async fn list_spotlights(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
) -> Json<Vec<SpotlightResponse>> {
    Json(
        state
            .spotlight
            .list_active(query.platform, query.target_audience)
            .await,
    )
}

/// GET /api/spotlight/{id}
pub async fn get_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpotlightResponse>, ApiError> {
    let spotlight = state
        .spotlight
        .get(&id)
        .await?
        .ok_or(ApiError::NotFound("Spotlight"))?;
    Ok(Json(spotlight))
}

/// POST /api/spotlight — 404s with a distinct message when the referenced
/// snippet does not exist.
pub async fn create_spotlight(
    State(state): State<AppState>,
    body: Result<Json<CreateSpotlightRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_create(&req)?;

    let spotlight = state.spotlight.create(req).await?;
    Ok((StatusCode::CREATED, Json(spotlight)))
}

/// PUT /api/spotlight/{id}
pub async fn update_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSpotlightRequest>, JsonRejection>,
) -> Result<Json<SpotlightAudiobook>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let spotlight = state.spotlight.update(&id, req).await?;
    Ok(Json(spotlight))
}

/// DELETE /api/spotlight/{id}
pub async fn delete_spotlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.spotlight.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

fn validate_create(req: &CreateSpotlightRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    match &req.audiobook_snippet_id {
        Some(id) if !id.trim().is_empty() => {}
        _ => errors.push(FieldError {
            field: "audiobookSnippetId",
            message: "audiobookSnippetId is required",
        }),
    }

    if req.priority.is_some_and(|priority| priority < 0) {
        errors.push(FieldError {
            field: "priority",
            message: "priority must be a non-negative integer",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}
