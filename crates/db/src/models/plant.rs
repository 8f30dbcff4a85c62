//! Plant entity model and DTOs.
//!
//! Enum columns are stored as canonical keys (`low`, `large_balcony`, ...).
//! Request DTOs accept keys or labels; they are parsed into typed values
//! before anything reaches the repository.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use zfarming_core::error::CoreError;
use zfarming_core::plant::{
    parse_stored, plant_slug, validate_plant_id, CareAttribute, CareLevel, CareText, ImageRef,
    PlantRecord, Space, Sunlight, MAX_NAME_LEN,
};
use zfarming_core::types::{DbId, Timestamp};

/// A row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub plant_id: String,
    pub name: String,
    pub scientific_name: String,
    pub slug: String,
    pub sunlight: String,
    pub space: String,
    pub care_level: String,
    pub tagline: String,
    pub description: String,
    pub watering_frequency: String,
    pub pot_size: String,
    pub sunlight_needs: String,
    pub watering_guide: String,
    pub sunlight_guide: String,
    pub potting_tips: String,
    pub common_issues: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_beginner_friendly: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Plant {
    /// Convert the row into a validated catalog record.
    pub fn into_record(self, categories: Vec<String>) -> Result<PlantRecord, CoreError> {
        let record = PlantRecord {
            sunlight: parse_stored::<Sunlight>("sunlight", &self.sunlight)?,
            space: parse_stored::<Space>("space", &self.space)?,
            care_level: parse_stored::<CareLevel>("care_level", &self.care_level)?,
            image: ImageRef::from_optional(self.image_url.as_deref()),
            plant_id: self.plant_id,
            name: self.name,
            scientific_name: self.scientific_name,
            slug: self.slug,
            tagline: self.tagline,
            description: self.description,
            care: CareText {
                watering_frequency: self.watering_frequency,
                pot_size: self.pot_size,
                sunlight_needs: self.sunlight_needs,
                watering_guide: self.watering_guide,
                sunlight_guide: self.sunlight_guide,
                potting_tips: self.potting_tips,
                common_issues: self.common_issues,
            },
            categories,
            is_active: self.is_active,
            is_featured: self.is_featured,
            is_beginner_friendly: self.is_beginner_friendly,
        };
        record.validate()?;
        Ok(record)
    }
}

/// DTO for creating a new plant.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlant {
    #[validate(length(min = 1, max = 100))]
    pub plant_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub scientific_name: String,
    pub sunlight: String,
    pub space: String,
    pub care_level: String,
    #[validate(length(max = 200))]
    pub tagline: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub care: CareText,
    #[validate(url)]
    pub image_url: Option<String>,
    /// Category slugs to link.
    #[serde(default)]
    pub categories: Vec<String>,
    pub is_featured: Option<bool>,
    /// Defaults to `care_level == beginner`.
    pub is_beginner_friendly: Option<bool>,
}

/// DTO for updating a plant. `plant_id` is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlant {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub scientific_name: Option<String>,
    pub sunlight: Option<String>,
    pub space: Option<String>,
    pub care_level: Option<String>,
    #[validate(length(max = 200))]
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub care: Option<CareText>,
    #[validate(url)]
    pub image_url: Option<String>,
    /// When present, replaces all category links.
    pub categories: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_beginner_friendly: Option<bool>,
    /// Re-activate a deactivated plant.
    pub is_active: Option<bool>,
}

/// Parsed, insert-ready plant.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub plant_id: String,
    pub name: String,
    pub scientific_name: String,
    pub slug: String,
    pub sunlight: Sunlight,
    pub space: Space,
    pub care_level: CareLevel,
    pub tagline: String,
    pub description: String,
    pub care: CareText,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub is_beginner_friendly: bool,
}

impl CreatePlant {
    /// Parse enum fields, check the key and derive the slug.
    pub fn into_new_plant(self) -> Result<NewPlant, CoreError> {
        validate_plant_id(&self.plant_id)?;
        let name = required_name("name", &self.name)?;
        let scientific_name = required_name("scientific_name", &self.scientific_name)?;
        let care_level = parse_stored::<CareLevel>("care_level", &self.care_level)?;
        Ok(NewPlant {
            slug: plant_slug(&name, &scientific_name),
            sunlight: parse_stored::<Sunlight>("sunlight", &self.sunlight)?,
            space: parse_stored::<Space>("space", &self.space)?,
            is_beginner_friendly: self
                .is_beginner_friendly
                .unwrap_or(care_level == CareLevel::Beginner),
            care_level,
            plant_id: self.plant_id,
            name,
            scientific_name,
            tagline: self.tagline.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            care: self.care,
            image_url: ImageRef::from_optional(self.image_url.as_deref())
                .map(|i| i.as_str().to_string()),
            is_featured: self.is_featured.unwrap_or(false),
        })
    }
}

/// Parsed column changes for an update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct PlantChanges {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub slug: Option<String>,
    pub sunlight: Option<Sunlight>,
    pub space: Option<Space>,
    pub care_level: Option<CareLevel>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub care: Option<CareText>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub is_beginner_friendly: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdatePlant {
    /// Parse the patch against the current row. The slug is re-derived
    /// whenever either name changes.
    pub fn into_changes(self, current: &Plant) -> Result<PlantChanges, CoreError> {
        let name = self
            .name
            .as_deref()
            .map(|n| required_name("name", n))
            .transpose()?;
        let scientific_name = self
            .scientific_name
            .as_deref()
            .map(|n| required_name("scientific_name", n))
            .transpose()?;
        let slug = (name.is_some() || scientific_name.is_some()).then(|| {
            plant_slug(
                name.as_deref().unwrap_or(&current.name),
                scientific_name.as_deref().unwrap_or(&current.scientific_name),
            )
        });
        Ok(PlantChanges {
            name,
            scientific_name,
            slug,
            sunlight: parse_optional::<Sunlight>("sunlight", self.sunlight.as_deref())?,
            space: parse_optional::<Space>("space", self.space.as_deref())?,
            care_level: parse_optional::<CareLevel>("care_level", self.care_level.as_deref())?,
            tagline: self.tagline,
            description: self.description,
            care: self.care,
            image_url: self.image_url,
            is_featured: self.is_featured,
            is_beginner_friendly: self.is_beginner_friendly,
            is_active: self.is_active,
        })
    }
}

fn required_name(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be 1-{MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_optional<T: CareAttribute>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, CoreError> {
    value.map(|v| parse_stored::<T>(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn create_input() -> CreatePlant {
        CreatePlant {
            plant_id: "monstera".to_string(),
            name: " Monstera ".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            sunlight: "Medium Light (A few hours)".to_string(),
            space: "medium".to_string(),
            care_level: "Beginner".to_string(),
            tagline: None,
            description: None,
            care: CareText::default(),
            image_url: Some("  ".to_string()),
            categories: vec![],
            is_featured: None,
            is_beginner_friendly: None,
        }
    }

    #[test]
    fn create_parses_labels_and_derives_slug() {
        let plant = create_input().into_new_plant().unwrap();
        assert_eq!(plant.name, "Monstera");
        assert_eq!(plant.slug, "monstera-monstera-deliciosa");
        assert_eq!(plant.sunlight, Sunlight::Medium);
        assert_eq!(plant.space, Space::Medium);
        assert!(plant.is_beginner_friendly);
        assert_eq!(plant.image_url, None);
    }

    #[test]
    fn create_rejects_unknown_enum_value() {
        let mut input = create_input();
        input.space = "rooftop".to_string();
        assert_matches!(input.into_new_plant(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_malformed_plant_id() {
        let mut input = create_input();
        input.plant_id = "Monstera Plant".to_string();
        assert_matches!(input.into_new_plant(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn image_must_be_an_absolute_url() {
        let mut input = create_input();
        input.image_url = Some("uploads/plants/monstera.jpg".to_string());
        assert!(input.validate().is_err());

        input.image_url = Some("https://images.example.com/monstera.jpg".to_string());
        assert!(input.validate().is_ok());

        let update = UpdatePlant {
            image_url: Some("/media/monstera.jpg".to_string()),
            ..UpdatePlant::default()
        };
        assert!(update.validate().is_err());
    }

    fn stored_row() -> Plant {
        let now = chrono::Utc::now();
        Plant {
            id: 1,
            plant_id: "mint".to_string(),
            name: "Mint".to_string(),
            scientific_name: "Mentha".to_string(),
            slug: "mint-mentha".to_string(),
            sunlight: "medium".to_string(),
            space: "windowsill".to_string(),
            care_level: "beginner".to_string(),
            tagline: String::new(),
            description: String::new(),
            watering_frequency: String::new(),
            pot_size: String::new(),
            sunlight_needs: String::new(),
            watering_guide: String::new(),
            sunlight_guide: String::new(),
            potting_tips: String::new(),
            common_issues: String::new(),
            image_url: None,
            is_active: true,
            is_featured: false,
            is_beginner_friendly: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stored_row_converts_to_record() {
        let record = stored_row().into_record(vec!["Herbs".to_string()]).unwrap();
        assert_eq!(record.space, Space::Windowsill);
        assert_eq!(record.categories, vec!["Herbs".to_string()]);
    }

    #[test]
    fn invalid_stored_enum_is_rejected() {
        let mut row = stored_row();
        row.sunlight = "Full Sun".to_string();
        assert_matches!(row.into_record(vec![]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_rederives_slug_when_name_changes() {
        let patch = UpdatePlant {
            name: Some("Spearmint".to_string()),
            ..UpdatePlant::default()
        };
        let changes = patch.into_changes(&stored_row()).unwrap();
        assert_eq!(changes.slug.as_deref(), Some("spearmint-mentha"));

        let untouched = UpdatePlant {
            tagline: Some("Fresh".to_string()),
            ..UpdatePlant::default()
        };
        assert_eq!(untouched.into_changes(&stored_row()).unwrap().slug, None);
    }

    #[test]
    fn update_rejects_blank_name() {
        let patch = UpdatePlant {
            name: Some("   ".to_string()),
            ..UpdatePlant::default()
        };
        assert_matches!(patch.into_changes(&stored_row()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn validator_enforces_lengths() {
        let mut input = create_input();
        input.name = String::new();
        assert!(input.validate().is_err());
    }
}
