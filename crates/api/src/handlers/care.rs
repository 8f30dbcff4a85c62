//! Handlers for the care hub.
//!
//! The hub lists active plants (filtered like the catalog listing) and, when
//! the caller passes a `selected` plant, resolves it to a full care sheet.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use zfarming_core::care::{care_sheet, CareGuide, CareSheet};
use zfarming_core::error::CoreError;
use zfarming_core::plant::{PlantRecord, PlantSummary};
use zfarming_core::search::{filter_catalog, CatalogQuery};
use zfarming_core::session::SelectionContext;
use zfarming_db::repositories::{CareGuideRepo, PlantRepo};
use zfarming_db::DbPool;

use crate::error::AppResult;
use crate::query::CareHubParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Care hub page payload.
#[derive(Debug, Serialize)]
pub struct CareHub {
    pub plants: Vec<PlantSummary>,
    /// Selection after validation; cleared when the requested plant is gone.
    pub selection: SelectionContext,
    pub selected: Option<CareSheet>,
}

/// GET /api/v1/care
pub async fn care_hub(
    State(state): State<AppState>,
    Query(params): Query<CareHubParams>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.get_active_plants().await?;
    let query = CatalogQuery::from_params(params.search.as_deref(), params.care_level.as_deref());
    let plants = filter_catalog(&catalog, &query)
        .into_iter()
        .map(PlantRecord::summary)
        .collect();

    let mut selection = SelectionContext::new(params.selected.as_deref());
    let selected = match selection.resolve(&catalog) {
        Some(plant) => Some(load_sheet(&state.pool, plant).await?),
        None => None,
    };

    Ok(Json(DataResponse {
        data: CareHub {
            plants,
            selection,
            selected,
        },
    }))
}

/// GET /api/v1/care/{plant_id}
///
/// Care sheet for an active plant, with a generated guide when none is stored.
pub async fn get_care_sheet(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let plant = state
        .catalog
        .find_active(&plant_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        })?;

    let sheet = load_sheet(&state.pool, &plant).await?;
    Ok(Json(DataResponse { data: sheet }))
}

/// PUT /api/v1/care/{plant_id}/guide
///
/// Replace the stored guide for an active plant.
pub async fn update_care_guide(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Json(guide): Json<CareGuide>,
) -> AppResult<impl IntoResponse> {
    guide.validate()?;
    let plant = PlantRepo::find_by_plant_id(&state.pool, &plant_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        })?;

    let row = CareGuideRepo::upsert(&state.pool, plant.id, &guide).await?;
    tracing::info!(
        plant_id = %plant.plant_id,
        months = guide.monthly_care.len(),
        "Care guide updated"
    );

    Ok(Json(DataResponse {
        data: CareGuide::from(row),
    }))
}

async fn load_sheet(pool: &DbPool, plant: &PlantRecord) -> AppResult<CareSheet> {
    let stored = CareGuideRepo::find_by_plant_key(pool, &plant.plant_id)
        .await?
        .map(CareGuide::from);
    Ok(care_sheet(plant, stored))
}
