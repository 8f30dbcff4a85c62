//! Repository for the `plants` table.

use sqlx::PgPool;
use zfarming_core::plant::CareAttribute;
use zfarming_core::search::CatalogQuery;
use zfarming_core::types::DbId;

use crate::models::plant::{NewPlant, Plant, PlantChanges};
use crate::repositories::CategoryRepo;

/// Column list for plants queries.
const COLUMNS: &str = "id, plant_id, name, scientific_name, slug, sunlight, space, care_level, \
    tagline, description, watering_frequency, pot_size, sunlight_needs, watering_guide, \
    sunlight_guide, potting_tips, common_issues, image_url, is_active, is_featured, \
    is_beginner_friendly, created_at, updated_at";

/// Shared filter: `$1` include inactive, `$2` ILIKE pattern, `$3` care level key.
const FILTER: &str = "($1 OR is_active) \
    AND ($2::text IS NULL OR name ILIKE $2 OR scientific_name ILIKE $2 OR tagline ILIKE $2) \
    AND ($3::text IS NULL OR care_level = $3)";

/// Provides CRUD operations for plants. Plants are never hard-deleted.
pub struct PlantRepo;

impl PlantRepo {
    /// List plants matching `query`, ordered by name ascending.
    pub async fn list(
        pool: &PgPool,
        query: &CatalogQuery,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM plants WHERE {FILTER} \
             ORDER BY LOWER(name) ASC, name ASC, id ASC LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Plant>(&sql)
            .bind(include_inactive)
            .bind(query.like_pattern())
            .bind(query.care_level.map(|c| c.key()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count plants matching `query`.
    pub async fn count(
        pool: &PgPool,
        query: &CatalogQuery,
        include_inactive: bool,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM plants WHERE {FILTER}");
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(include_inactive)
            .bind(query.like_pattern())
            .bind(query.care_level.map(|c| c.key()))
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// All active plants, ordered by name ascending.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plants WHERE is_active = true ORDER BY LOWER(name) ASC, name ASC, id ASC"
        );
        sqlx::query_as::<_, Plant>(&query).fetch_all(pool).await
    }

    /// Find a plant by its `plant_id` key, active or not.
    pub async fn find_by_plant_id(
        pool: &PgPool,
        plant_id: &str,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE plant_id = $1");
        sqlx::query_as::<_, Plant>(&query)
            .bind(plant_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active plant by its slug.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plants WHERE slug = $1 AND is_active = true");
        sqlx::query_as::<_, Plant>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new plant and link its categories in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &NewPlant,
        category_ids: &[DbId],
    ) -> Result<Plant, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO plants \
                (plant_id, name, scientific_name, slug, sunlight, space, care_level, \
                 tagline, description, watering_frequency, pot_size, sunlight_needs, \
                 watering_guide, sunlight_guide, potting_tips, common_issues, image_url, \
                 is_featured, is_beginner_friendly) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     $16, $17, $18, $19) \
             RETURNING {COLUMNS}"
        );
        let care = &input.care;
        let plant = sqlx::query_as::<_, Plant>(&insert_query)
            .bind(&input.plant_id)
            .bind(&input.name)
            .bind(&input.scientific_name)
            .bind(&input.slug)
            .bind(input.sunlight.key())
            .bind(input.space.key())
            .bind(input.care_level.key())
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(&care.watering_frequency)
            .bind(&care.pot_size)
            .bind(&care.sunlight_needs)
            .bind(&care.watering_guide)
            .bind(&care.sunlight_guide)
            .bind(&care.potting_tips)
            .bind(&care.common_issues)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .bind(input.is_beginner_friendly)
            .fetch_one(&mut *tx)
            .await?;

        if !category_ids.is_empty() {
            CategoryRepo::set_plant_categories_inner(&mut tx, plant.id, category_ids).await?;
        }

        tx.commit().await?;
        Ok(plant)
    }

    /// Update a plant. Only non-`None` fields are applied.
    ///
    /// If `category_ids` is `Some`, replaces all category links.
    /// Returns `None` if no plant with the given key exists.
    pub async fn update(
        pool: &PgPool,
        plant_id: &str,
        changes: &PlantChanges,
        category_ids: Option<&[DbId]>,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE plants SET \
                name = COALESCE($2, name), \
                scientific_name = COALESCE($3, scientific_name), \
                slug = COALESCE($4, slug), \
                sunlight = COALESCE($5, sunlight), \
                space = COALESCE($6, space), \
                care_level = COALESCE($7, care_level), \
                tagline = COALESCE($8, tagline), \
                description = COALESCE($9, description), \
                watering_frequency = COALESCE($10, watering_frequency), \
                pot_size = COALESCE($11, pot_size), \
                sunlight_needs = COALESCE($12, sunlight_needs), \
                watering_guide = COALESCE($13, watering_guide), \
                sunlight_guide = COALESCE($14, sunlight_guide), \
                potting_tips = COALESCE($15, potting_tips), \
                common_issues = COALESCE($16, common_issues), \
                image_url = COALESCE($17, image_url), \
                is_featured = COALESCE($18, is_featured), \
                is_beginner_friendly = COALESCE($19, is_beginner_friendly), \
                is_active = COALESCE($20, is_active) \
             WHERE plant_id = $1 \
             RETURNING {COLUMNS}"
        );
        let care = changes.care.as_ref();
        let plant = sqlx::query_as::<_, Plant>(&update_query)
            .bind(plant_id)
            .bind(&changes.name)
            .bind(&changes.scientific_name)
            .bind(&changes.slug)
            .bind(changes.sunlight.map(|s| s.key()))
            .bind(changes.space.map(|s| s.key()))
            .bind(changes.care_level.map(|c| c.key()))
            .bind(&changes.tagline)
            .bind(&changes.description)
            .bind(care.map(|c| c.watering_frequency.as_str()))
            .bind(care.map(|c| c.pot_size.as_str()))
            .bind(care.map(|c| c.sunlight_needs.as_str()))
            .bind(care.map(|c| c.watering_guide.as_str()))
            .bind(care.map(|c| c.sunlight_guide.as_str()))
            .bind(care.map(|c| c.potting_tips.as_str()))
            .bind(care.map(|c| c.common_issues.as_str()))
            .bind(&changes.image_url)
            .bind(changes.is_featured)
            .bind(changes.is_beginner_friendly)
            .bind(changes.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(plant), Some(ids)) = (&plant, category_ids) {
            CategoryRepo::set_plant_categories_inner(&mut tx, plant.id, ids).await?;
        }

        tx.commit().await?;
        Ok(plant)
    }

    /// Deactivate a plant (set is_active = false).
    ///
    /// Returns `false` if the plant does not exist or is already inactive.
    pub async fn deactivate(pool: &PgPool, plant_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE plants SET is_active = false \
             WHERE plant_id = $1 AND is_active = true",
        )
        .bind(plant_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
