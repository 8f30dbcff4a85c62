//! Handlers for the plant finder.
//!
//! The finder form offers closed option sets for sunlight, space and care
//! level; a submitted form is matched against the active catalog snapshot.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use zfarming_core::plant::{CareAttribute, CareLevel, PlantSummary, Space, Sunlight};
use zfarming_core::recommendation::{recommend, MatchTier, PreferenceInput, UserPreference};
use zfarming_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One selectable value of a care attribute.
#[derive(Debug, Serialize)]
pub struct AttributeOption {
    pub key: &'static str,
    pub label: &'static str,
    pub short_label: &'static str,
}

/// Everything the finder form needs to render.
#[derive(Debug, Serialize)]
pub struct FinderOptions {
    pub sunlight: Vec<AttributeOption>,
    pub space: Vec<AttributeOption>,
    pub care_level: Vec<AttributeOption>,
    /// Category names offered as interest tags.
    pub plant_types: Vec<String>,
}

/// Result of a finder submission.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub tier: MatchTier,
    pub preference: UserPreference,
    pub plants: Vec<PlantSummary>,
}

fn options<T: CareAttribute>() -> Vec<AttributeOption> {
    T::ALL
        .iter()
        .map(|v| AttributeOption {
            key: v.key(),
            label: v.label(),
            short_label: v.short_label(),
        })
        .collect()
}

/// GET /api/v1/finder/options
pub async fn get_options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let plant_types = CategoryRepo::list_with_counts(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    Ok(Json(DataResponse {
        data: FinderOptions {
            sunlight: options::<Sunlight>(),
            space: options::<Space>(),
            care_level: options::<CareLevel>(),
            plant_types,
        },
    }))
}

/// POST /api/v1/finder/recommendations
///
/// Values outside the option sets are accepted and simply never match.
pub async fn recommend_plants(
    State(state): State<AppState>,
    Json(input): Json<PreferenceInput>,
) -> AppResult<impl IntoResponse> {
    let preference = UserPreference::from(&input);
    let catalog = state.catalog.get_active_plants().await?;
    let recommendation = recommend(&catalog, &preference);

    tracing::info!(
        tier = ?recommendation.tier,
        count = recommendation.plants.len(),
        "Plant recommendations computed"
    );

    let plants = recommendation
        .plants
        .iter()
        .map(|p| p.summary())
        .collect();

    Ok(Json(DataResponse {
        data: RecommendationResponse {
            tier: recommendation.tier,
            preference,
            plants,
        },
    }))
}
