use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use zfarming_core::error::CoreError;
use zfarming_core::plant::PlantSummary;
use zfarming_db::catalog::to_records;
use zfarming_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// All categories, ordered by name, with their active plant counts.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{slug}/plants
pub async fn list_category_plants(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id: slug,
        })?;

    let rows = CategoryRepo::list_active_plants(&state.pool, category.id).await?;
    let plants: Vec<PlantSummary> = to_records(&state.pool, rows)
        .await?
        .iter()
        .map(|p| p.summary())
        .collect();

    Ok(Json(DataResponse { data: plants }))
}
