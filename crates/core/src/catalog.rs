//! Read-only catalog boundary.
//!
//! The matcher and the reconciler operate on a snapshot returned by a
//! [`CatalogProvider`]. Catalog writes belong to the repository layer.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::plant::{ensure_unique_ids, PlantRecord};

/// Source of the active plant catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Active (not soft-deleted) plants, sorted by name ascending.
    async fn get_active_plants(&self) -> Result<Vec<PlantRecord>, CoreError>;

    /// Look up a single active plant by its `plant_id`.
    async fn find_active(&self, plant_id: &str) -> Result<Option<PlantRecord>, CoreError> {
        Ok(self
            .get_active_plants()
            .await?
            .into_iter()
            .find(|p| p.plant_id == plant_id))
    }
}

/// Sort plants by name, ignoring case, to match the repository ordering.
pub fn sort_by_name(plants: &mut [PlantRecord]) {
    plants.sort_by_cached_key(|p| (p.name.to_lowercase(), p.name.clone()));
}

/// Fixed in-memory catalog, validated on construction.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    plants: Vec<PlantRecord>,
}

impl StaticCatalog {
    /// Validate every record and sort by name.
    pub fn new(mut plants: Vec<PlantRecord>) -> Result<Self, CoreError> {
        for plant in &plants {
            plant.validate()?;
        }
        ensure_unique_ids(&plants)?;
        sort_by_name(&mut plants);
        Ok(Self { plants })
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn get_active_plants(&self) -> Result<Vec<PlantRecord>, CoreError> {
        Ok(self.plants.iter().filter(|p| p.is_active).cloned().collect())
    }
}
