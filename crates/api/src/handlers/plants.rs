//! Handlers for the plant catalog.
//!
//! Plants are addressed by their stable `plant_id` key. Deletion is a soft
//! deactivation; deactivated plants drop out of every read endpoint except
//! the listing with `include_inactive=true`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use zfarming_core::error::CoreError;
use zfarming_core::plant::{CareAttribute, ImageRef, PlantRecord, PlantSummary};
use zfarming_core::search::{
    clamp_limit, clamp_offset, CatalogQuery, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use zfarming_core::types::DbId;
use zfarming_db::catalog::to_records;
use zfarming_db::models::plant::{CreatePlant, Plant, UpdatePlant};
use zfarming_db::repositories::{CategoryRepo, PlantRepo};
use zfarming_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::query::PlantListParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Full plant record plus display labels and the resolved image URL.
#[derive(Debug, Serialize)]
pub struct PlantDetail {
    #[serde(flatten)]
    pub plant: PlantRecord,
    pub image_url: String,
    pub sunlight_label: &'static str,
    pub space_label: &'static str,
    pub care_level_label: &'static str,
}

impl From<PlantRecord> for PlantDetail {
    fn from(plant: PlantRecord) -> Self {
        Self {
            image_url: ImageRef::or_default(plant.image.as_ref()).to_string(),
            sunlight_label: plant.sunlight.label(),
            space_label: plant.space.label(),
            care_level_label: plant.care_level.label(),
            plant,
        }
    }
}

/// GET /api/v1/plants
///
/// Paginated, name-ordered listing filtered by `search` and `care_level`.
pub async fn list_plants(
    State(state): State<AppState>,
    Query(params): Query<PlantListParams>,
) -> AppResult<impl IntoResponse> {
    let query = CatalogQuery::from_params(params.search.as_deref(), params.care_level.as_deref());
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let rows =
        PlantRepo::list(&state.pool, &query, params.include_inactive, limit, offset).await?;
    let total = PlantRepo::count(&state.pool, &query, params.include_inactive).await?;
    let items: Vec<PlantSummary> = to_records(&state.pool, rows)
        .await?
        .iter()
        .map(PlantRecord::summary)
        .collect();

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            limit,
            offset,
        },
    }))
}

/// POST /api/v1/plants
pub async fn create_plant(
    State(state): State<AppState>,
    Json(mut input): Json<CreatePlant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let slugs = std::mem::take(&mut input.categories);
    let category_ids = resolve_category_ids(&state.pool, &slugs).await?;
    let new_plant = input.into_new_plant()?;

    let plant = PlantRepo::create(&state.pool, &new_plant, &category_ids).await?;
    tracing::info!(plant_id = %plant.plant_id, "Plant created");

    let detail = load_detail(&state.pool, plant).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/plants/{plant_id}
pub async fn get_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let plant = PlantRepo::find_by_plant_id(&state.pool, &plant_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| plant_not_found(plant_id))?;

    let detail = load_detail(&state.pool, plant).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/plants/slug/{slug}
pub async fn get_plant_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let plant = PlantRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| plant_not_found(slug))?;

    let detail = load_detail(&state.pool, plant).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/plants/{plant_id}
///
/// Partial update. Renaming re-derives the slug; `categories`, when present,
/// replaces every category link.
pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Json(mut input): Json<UpdatePlant>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let current = PlantRepo::find_by_plant_id(&state.pool, &plant_id)
        .await?
        .ok_or_else(|| plant_not_found(plant_id.clone()))?;

    let category_ids = match input.categories.take() {
        Some(slugs) => Some(resolve_category_ids(&state.pool, &slugs).await?),
        None => None,
    };
    let changes = input.into_changes(&current)?;

    let plant = PlantRepo::update(&state.pool, &plant_id, &changes, category_ids.as_deref())
        .await?
        .ok_or_else(|| plant_not_found(plant_id))?;
    tracing::info!(plant_id = %plant.plant_id, is_active = plant.is_active, "Plant updated");

    let detail = load_detail(&state.pool, plant).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/plants/{plant_id}
///
/// Soft-deactivate. Returns 404 when the plant is missing or already inactive.
pub async fn deactivate_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if PlantRepo::deactivate(&state.pool, &plant_id).await? {
        tracing::info!(plant_id = %plant_id, "Plant deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(plant_not_found(plant_id).into())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn plant_not_found(id: String) -> CoreError {
    CoreError::NotFound { entity: "Plant", id }
}

/// Map category slugs to row IDs, rejecting unknown slugs.
async fn resolve_category_ids(pool: &DbPool, slugs: &[String]) -> AppResult<Vec<DbId>> {
    if slugs.is_empty() {
        return Ok(Vec::new());
    }
    let found = CategoryRepo::find_by_slugs(pool, slugs).await?;
    if let Some(missing) = slugs.iter().find(|s| !found.iter().any(|c| &c.slug == *s)) {
        return Err(AppError::BadRequest(format!("Unknown category '{missing}'")));
    }
    Ok(found.into_iter().map(|c| c.id).collect())
}

async fn load_detail(pool: &DbPool, plant: Plant) -> AppResult<PlantDetail> {
    let plant_id = plant.plant_id.clone();
    let record = to_records(pool, vec![plant])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError(format!("Stored plant '{plant_id}' is invalid")))?;
    Ok(PlantDetail::from(record))
}
