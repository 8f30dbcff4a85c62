//! Plant category model.

use serde::Serialize;
use sqlx::FromRow;
use zfarming_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with the number of active plants linked to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub plant_count: i64,
}

/// Category name for a plant row, as returned by the junction lookup.
#[derive(Debug, Clone, FromRow)]
pub struct PlantCategoryName {
    pub plant_id: DbId,
    pub name: String,
}
