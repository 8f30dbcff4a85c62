//! Postgres-backed [`CatalogProvider`].

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use zfarming_core::catalog::{sort_by_name, CatalogProvider};
use zfarming_core::error::CoreError;
use zfarming_core::plant::PlantRecord;
use zfarming_core::types::DbId;

use crate::models::plant::Plant;
use crate::repositories::{CategoryRepo, PlantRepo};

/// Loads a fresh snapshot of the active catalog on every call.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogProvider for PgCatalog {
    async fn get_active_plants(&self) -> Result<Vec<PlantRecord>, CoreError> {
        let rows = PlantRepo::list_active(&self.pool).await.map_err(internal)?;
        let mut records = to_records(&self.pool, rows).await?;
        sort_by_name(&mut records);
        Ok(records)
    }

    async fn find_active(&self, plant_id: &str) -> Result<Option<PlantRecord>, CoreError> {
        let row = PlantRepo::find_by_plant_id(&self.pool, plant_id)
            .await
            .map_err(internal)?
            .filter(|p| p.is_active);
        Ok(match row {
            Some(row) => to_records(&self.pool, vec![row]).await?.pop(),
            None => None,
        })
    }
}

/// Attach category names and convert rows, skipping rows that fail validation.
pub async fn to_records(pool: &PgPool, rows: Vec<Plant>) -> Result<Vec<PlantRecord>, CoreError> {
    let ids: Vec<DbId> = rows.iter().map(|p| p.id).collect();
    let mut categories: HashMap<DbId, Vec<String>> = HashMap::new();
    for link in CategoryRepo::names_for_plants(pool, &ids)
        .await
        .map_err(internal)?
    {
        categories.entry(link.plant_id).or_default().push(link.name);
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let plant_id = row.plant_id.clone();
        match row.into_record(categories.remove(&id).unwrap_or_default()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(plant_id = %plant_id, error = %e, "Skipping invalid catalog row");
            }
        }
    }
    Ok(records)
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Catalog query failed: {err}"))
}
