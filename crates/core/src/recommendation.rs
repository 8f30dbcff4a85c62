//! Plant finder recommendation matcher.
//!
//! Two-tier filter over a catalog snapshot: an exact match on sunlight,
//! space and care level, relaxed once to a care-level-only match when the
//! exact tier is empty. No scoring; results keep catalog order.

use serde::{Deserialize, Serialize};

use crate::plant::{CareAttribute, CareLevel, PlantRecord, Space, Sunlight};

/// Maximum number of plants returned by [`recommend`].
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Raw preference strings as submitted by a finder form.
///
/// Omitted fields deserialize as empty strings, which parse as unknown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceInput {
    #[serde(default)]
    pub sunlight: String,
    #[serde(default)]
    pub space: String,
    #[serde(default)]
    pub care_level: String,
    #[serde(default)]
    pub type_tags: Vec<String>,
}

/// Parsed finder preferences.
///
/// A field is `None` when the submitted value is outside its closed set;
/// such a field never matches any plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreference {
    pub sunlight: Option<Sunlight>,
    pub space: Option<Space>,
    pub care_level: Option<CareLevel>,
    /// Interest tags (e.g. "Herbs"). Echoed back to the caller; they do not
    /// narrow either filter tier.
    pub type_tags: Vec<String>,
}

impl UserPreference {
    pub fn new(sunlight: Sunlight, space: Space, care_level: CareLevel) -> Self {
        Self {
            sunlight: Some(sunlight),
            space: Some(space),
            care_level: Some(care_level),
            type_tags: Vec::new(),
        }
    }

    fn matches_exactly(&self, plant: &PlantRecord) -> bool {
        self.sunlight == Some(plant.sunlight)
            && self.space == Some(plant.space)
            && self.care_level == Some(plant.care_level)
    }

    fn matches_care_level(&self, plant: &PlantRecord) -> bool {
        self.care_level == Some(plant.care_level)
    }
}

impl From<&PreferenceInput> for UserPreference {
    fn from(input: &PreferenceInput) -> Self {
        Self {
            sunlight: Sunlight::parse(&input.sunlight),
            space: Space::parse(&input.space),
            care_level: CareLevel::parse(&input.care_level),
            type_tags: input
                .type_tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

/// Which filter tier produced a recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Sunlight, space and care level all matched.
    Exact,
    /// No exact match; plants share only the care level.
    Relaxed,
    /// Neither tier matched anything.
    None,
}

/// Output of [`recommend`].
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub tier: MatchTier,
    pub plants: Vec<&'a PlantRecord>,
}

/// Recommend up to [`MAX_RECOMMENDATIONS`] active plants for `preference`.
///
/// Falls back from the exact tier to the care-level tier exactly once.
/// An empty catalog yields an empty [`MatchTier::None`] result.
pub fn recommend<'a>(
    catalog: &'a [PlantRecord],
    preference: &UserPreference,
) -> Recommendation<'a> {
    let exact = take_active(catalog, |p| preference.matches_exactly(p));
    if !exact.is_empty() {
        return Recommendation {
            tier: MatchTier::Exact,
            plants: exact,
        };
    }

    let relaxed = take_active(catalog, |p| preference.matches_care_level(p));
    let tier = if relaxed.is_empty() {
        MatchTier::None
    } else {
        MatchTier::Relaxed
    };
    tracing::debug!(
        ?tier,
        count = relaxed.len(),
        "No exact plant match, relaxed to care level"
    );
    Recommendation {
        tier,
        plants: relaxed,
    }
}

fn take_active<'a>(
    catalog: &'a [PlantRecord],
    predicate: impl Fn(&PlantRecord) -> bool,
) -> Vec<&'a PlantRecord> {
    catalog
        .iter()
        .filter(|p| p.is_active && predicate(p))
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
