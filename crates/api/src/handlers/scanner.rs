//! Handlers for the plant scanner.
//!
//! An uploaded photo is sent to the identification provider, reconciled
//! against the active catalog and recorded in the identification history.
//! When the provider is unavailable the scanner answers with mock results
//! flagged `is_mock: true`.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use zfarming_core::error::CoreError;
use zfarming_core::identification::{identify, MatchResult};
use zfarming_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use zfarming_core::types::DbId;
use zfarming_db::models::identification::{IdentificationFeedback, NewIdentification};
use zfarming_db::repositories::IdentificationRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the photo.
const IMAGE_FIELD: &str = "image";

/// Response for a scanner upload.
#[derive(Debug, Serialize)]
pub struct IdentifyResponse {
    /// ID of the identification history entry.
    pub history_id: DbId,
    pub is_mock: bool,
    pub best: Option<MatchResult>,
    pub results: Vec<MatchResult>,
}

/// POST /api/v1/scanner/identify
///
/// Accepts a multipart upload with an `image` field. Other fields are ignored.
pub async fn identify_plant(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, data));
    }

    let (file_name, image) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{IMAGE_FIELD}' field in multipart upload"))
    })?;
    if image.is_empty() {
        return Err(AppError::BadRequest("Uploaded image is empty".to_string()));
    }

    let catalog = state.catalog.get_active_plants().await?;
    let outcome = identify(state.identifier.as_ref(), &catalog, &image).await;

    let entry = IdentificationRepo::create(
        &state.pool,
        &NewIdentification::from_outcome(&file_name, image.len(), &outcome),
    )
    .await?;

    tracing::info!(
        history_id = entry.id,
        is_mock = outcome.is_mock,
        results = outcome.results.len(),
        identified_plant_id = ?entry.identified_plant_id,
        "Plant identification recorded"
    );

    let best = outcome.best().cloned();
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IdentifyResponse {
                history_id: entry.id,
                is_mock: outcome.is_mock,
                best,
                results: outcome.results,
            },
        }),
    ))
}

/// GET /api/v1/scanner/history
///
/// Most recent identifications first.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let entries = IdentificationRepo::list_recent(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/scanner/history/{id}
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = IdentificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| history_not_found(id))?;
    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/v1/scanner/history/{id}/feedback
///
/// Record whether the user confirmed the best match, with optional comments.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<IdentificationFeedback>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let entry = IdentificationRepo::set_feedback(&state.pool, id, &input)
        .await?
        .ok_or_else(|| history_not_found(id))?;

    tracing::info!(
        history_id = id,
        user_confirmed = input.user_confirmed,
        "Identification feedback recorded"
    );

    Ok(Json(DataResponse { data: entry }))
}

/// Oversized uploads keep their 413 status; every other multipart failure is a 400.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

fn history_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Identification",
        id: id.to_string(),
    }
}
