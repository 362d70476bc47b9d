use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use url::Url;

use audioscroll_types::api::{ActiveQuery, CreateBannerRequest, UpdateBannerRequest};
use audioscroll_types::models::Banner;

use crate::error::{ApiError, FieldError};
use crate::state::AppState;

/// GET /api/banners?platform=&targetAudience= — the degraded outcome is
/// an empty array, never a 5xx.
pub async fn list_banners(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
) -> Json<Vec<Banner>> {
    Json(
        state
            .banners
            .list_active(query.platform, query.target_audience)
            .await,
    )
}

/// GET /api/banners/{id}
pub async fn get_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Banner>, ApiError> {
    let banner = state
        .banners
        .get(&id)
        .await?
        .ok_or(ApiError::NotFound("Banner"))?;
    Ok(Json(banner))
}

/// POST /api/banners
pub async fn create_banner(
    State(state): State<AppState>,
    body: Result<Json<CreateBannerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    validate_create(&req)?;

    let banner = state.banners.create(req).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// PUT /api/banners/{id}
pub async fn update_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBannerRequest>, JsonRejection>,
) -> Result<Json<Banner>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let banner = state.banners.update(&id, req).await?;
    Ok(Json(banner))
}

/// DELETE /api/banners/{id}
pub async fn delete_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.banners.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

fn validate_create(req: &CreateBannerRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    match &req.title {
        Some(title) if !title.trim().is_empty() => {}
        _ => errors.push(FieldError {
            field: "title",
            message: "title is required",
        }),
    }

    match &req.image_url {
        Some(url) if Url::parse(url).is_ok() => {}
        Some(_) => errors.push(FieldError {
            field: "imageUrl",
            message: "imageUrl must be a valid URL",
        }),
        None => errors.push(FieldError {
            field: "imageUrl",
            message: "imageUrl is required",
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
