//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `clamp_limit` / `clamp_offset` before use.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the plant listing.
#[derive(Debug, Deserialize)]
pub struct PlantListParams {
    pub search: Option<String>,
    pub care_level: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the care hub (`?search=&care_level=&selected=`).
#[derive(Debug, Deserialize)]
pub struct CareHubParams {
    pub search: Option<String>,
    pub care_level: Option<String>,
    /// `plant_id` of the plant the visitor has open.
    pub selected: Option<String>,
}
