//! Plant catalog record and its closed care-attribute sets.
//!
//! Every enum has three spellings:
//! - a canonical key stored in the database (`low`, `large_balcony`, ...)
//! - a long label as shown in forms (`"Low Light (No direct sun)"`)
//! - a short display label, the long label up to its `(` (`"Low Light"`)
//!
//! [`PlantRecord`] is the typed, validated form of a catalog row. Rows are
//! converted and validated once at catalog-load time; the matcher and the
//! reconciler only ever see validated records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Image shown when a plant has no image of its own.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=400&h=300&fit=crop";

/// Maximum length of plant display and scientific names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a `plant_id` key.
pub const MAX_PLANT_ID_LEN: usize = 100;

/// Shared parsing and labelling behaviour for the closed care-attribute sets.
pub trait CareAttribute: Sized + Copy + 'static {
    /// All variants, in form order.
    const ALL: &'static [Self];

    /// Canonical key, as stored in the database.
    fn key(self) -> &'static str;

    /// Long label, as presented in forms.
    fn label(self) -> &'static str;

    /// Short display label: the long label up to its first `(`.
    fn short_label(self) -> &'static str {
        short_label(self.label())
    }

    /// Parse a key, short label, or long label (case-insensitive).
    ///
    /// Returns `None` for anything outside the closed set.
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|v| {
            v.key().eq_ignore_ascii_case(input)
                || v.label().eq_ignore_ascii_case(input)
                || v.short_label().eq_ignore_ascii_case(input)
        })
    }
}

/// Text before the first `(`, trimmed. Returns the whole label when there is none.
pub fn short_label(label: &str) -> &str {
    match label.find('(') {
        Some(idx) => label[..idx].trim(),
        None => label.trim(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sunlight {
    Low,
    Medium,
    Bright,
}

impl CareAttribute for Sunlight {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::Bright];

    fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Bright => "bright",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Light (No direct sun)",
            Self::Medium => "Medium Light (A few hours)",
            Self::Bright => "Bright Light (6+ hours)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Space {
    Windowsill,
    Hanging,
    Medium,
    LargeBalcony,
}

impl CareAttribute for Space {
    const ALL: &'static [Self] = &[
        Self::Windowsill,
        Self::Hanging,
        Self::Medium,
        Self::LargeBalcony,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Windowsill => "windowsill",
            Self::Hanging => "hanging",
            Self::Medium => "medium",
            Self::LargeBalcony => "large_balcony",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Windowsill => "Small Pot (Windowsill)",
            Self::Hanging => "Hanging Basket",
            Self::Medium => "Medium Container",
            Self::LargeBalcony => "Large Container (Balcony)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CareAttribute for CareLevel {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Intermediate, Self::Advanced];

    fn key(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner (I forget to water)",
            Self::Intermediate => "Intermediate (I can follow a schedule)",
            Self::Advanced => "Advanced (I love plant care)",
        }
    }
}

/// Parse a stored enum key, failing validation on anything outside the set.
pub fn parse_stored<T: CareAttribute>(field: &str, value: &str) -> Result<T, CoreError> {
    T::parse(value).ok_or_else(|| {
        let allowed: Vec<&str> = T::ALL.iter().map(|v| v.key()).collect();
        CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    })
}

/// Reference to a plant image: an absolute URL (request DTOs reject bare file paths).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Build a reference from optional raw text; blank text yields `None`.
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an optional image to a URL, falling back to [`DEFAULT_IMAGE_URL`].
    pub fn or_default(image: Option<&ImageRef>) -> &str {
        image.map_or(DEFAULT_IMAGE_URL, ImageRef::as_str)
    }
}

/// Free-text care attributes carried by every catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareText {
    pub watering_frequency: String,
    pub pot_size: String,
    pub sunlight_needs: String,
    pub watering_guide: String,
    pub sunlight_guide: String,
    pub potting_tips: String,
    pub common_issues: String,
}

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantRecord {
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
    pub image: Option<ImageRef>,
    pub categories: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_beginner_friendly: bool,
}

impl PlantRecord {
    /// Check the record invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_plant_id(&self.plant_id)?;
        validate_name("name", &self.name)?;
        validate_name("scientific_name", &self.scientific_name)?;
        Ok(())
    }

    /// Summary suitable for list views and recommendation cards.
    pub fn summary(&self) -> PlantSummary {
        PlantSummary {
            plant_id: self.plant_id.clone(),
            name: self.name.clone(),
            scientific_name: self.scientific_name.clone(),
            slug: self.slug.clone(),
            tagline: self.tagline.clone(),
            image_url: ImageRef::or_default(self.image.as_ref()).to_string(),
            sunlight: self.sunlight.short_label(),
            space: self.space.short_label(),
            care_level: self.care_level.short_label(),
            is_active: self.is_active,
        }
    }
}

/// Presentation-ready view of a plant with the default-image policy applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSummary {
    pub plant_id: String,
    pub name: String,
    pub scientific_name: String,
    pub slug: String,
    pub tagline: String,
    pub image_url: String,
    pub sunlight: &'static str,
    pub space: &'static str,
    pub care_level: &'static str,
    pub is_active: bool,
}

/// A `plant_id` must be a non-empty lowercase slug (`[a-z0-9_-]`).
pub fn validate_plant_id(plant_id: &str) -> Result<(), CoreError> {
    if plant_id.is_empty() || plant_id.len() > MAX_PLANT_ID_LEN {
        return Err(CoreError::Validation(format!(
            "plant_id must be 1-{MAX_PLANT_ID_LEN} characters"
        )));
    }
    let well_formed = plant_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !well_formed {
        return Err(CoreError::Validation(format!(
            "plant_id '{plant_id}' may only contain lowercase letters, digits, '_' and '-'"
        )));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Ensure every `plant_id` in a loaded catalog is unique.
pub fn ensure_unique_ids(catalog: &[PlantRecord]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for plant in catalog {
        if !seen.insert(plant.plant_id.as_str()) {
            return Err(CoreError::Conflict(format!(
                "Duplicate plant_id '{}' in catalog",
                plant.plant_id
            )));
        }
    }
    Ok(())
}

/// Lowercase slug with runs of non-alphanumerics collapsed to a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug for a plant detail page: `"{name}-{scientific_name}"`.
pub fn plant_slug(name: &str, scientific_name: &str) -> String {
    slugify(&format!("{name} {scientific_name}"))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_key_short_and_long_labels() {
        assert_eq!(Sunlight::parse("low"), Some(Sunlight::Low));
        assert_eq!(Sunlight::parse("Low Light"), Some(Sunlight::Low));
        assert_eq!(Sunlight::parse("low light (no direct sun)"), Some(Sunlight::Low));
        assert_eq!(Space::parse("Large Container (Balcony)"), Some(Space::LargeBalcony));
        assert_eq!(Space::parse("large_balcony"), Some(Space::LargeBalcony));
        assert_eq!(CareLevel::parse(" Intermediate "), Some(CareLevel::Intermediate));
    }

    #[test]
    fn parse_rejects_values_outside_the_set() {
        assert_eq!(Sunlight::parse("Full Sun"), None);
        assert_eq!(Space::parse(""), None);
        assert_eq!(CareLevel::parse("Expert"), None);
    }

    #[test]
    fn short_label_strips_parenthetical() {
        assert_eq!(CareLevel::Beginner.short_label(), "Beginner");
        assert_eq!(Space::Hanging.short_label(), "Hanging Basket");
        assert_eq!(Space::LargeBalcony.short_label(), "Large Container");
    }

    #[test]
    fn parse_stored_reports_allowed_keys() {
        let err = parse_stored::<Sunlight>("sunlight", "dim").unwrap_err();
        assert!(err.to_string().contains("low, medium, bright"));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Snake Plant"), "snake-plant");
        assert_eq!(slugify("  Air  Purifying!! "), "air-purifying");
        assert_eq!(
            plant_slug("Cherry Tomatoes", "Solanum lycopersicum var. cerasiforme"),
            "cherry-tomatoes-solanum-lycopersicum-var-cerasiforme"
        );
    }

    #[test]
    fn plant_id_validation() {
        assert!(validate_plant_id("snake_plant").is_ok());
        assert!(validate_plant_id("").is_err());
        assert!(validate_plant_id("Snake Plant").is_err());
    }

    #[test]
    fn record_validation_rejects_blank_names() {
        let mut record = fixtures::plant(
            "mint",
            "  ",
            "Mentha",
            Sunlight::Medium,
            Space::Windowsill,
            CareLevel::Beginner,
        );
        assert!(record.validate().is_err());
        record.name = "Mint".to_string();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn duplicate_ids_are_a_conflict() {
        let mut catalog = fixtures::catalog();
        assert!(ensure_unique_ids(&catalog).is_ok());
        catalog.push(catalog[0].clone());
        assert!(matches!(
            ensure_unique_ids(&catalog),
            Err(CoreError::Conflict(_))
        ));
    }

    #[test]
    fn summary_applies_default_image() {
        let mut record = fixtures::catalog().remove(0);
        assert_eq!(record.summary().image_url, DEFAULT_IMAGE_URL);
        record.image = ImageRef::from_optional(Some("https://example.com/aloe.jpg"));
        assert_eq!(record.summary().image_url, "https://example.com/aloe.jpg");
        assert_eq!(record.summary().care_level, "Beginner");
    }

    #[test]
    fn blank_image_is_none() {
        assert_eq!(ImageRef::from_optional(Some("   ")), None);
        assert_eq!(ImageRef::from_optional(None), None);
    }
}
