//! Care guides.
//!
//! A plant may have a stored extended guide; when it does not, a default
//! guide is generated from the catalog record so every active plant has a
//! readable care sheet.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::plant::{CareAttribute, CareText, PlantRecord, PlantSummary};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Care note for one calendar month (1 = January).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCare {
    pub month: u8,
    pub note: String,
}

impl MonthlyCare {
    pub fn month_name(&self) -> Option<&'static str> {
        MONTH_NAMES.get(usize::from(self.month).checked_sub(1)?).copied()
    }
}

/// Extended care guide for a single plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareGuide {
    #[serde(default)]
    pub monthly_care: Vec<MonthlyCare>,
    #[serde(default)]
    pub fertilizing_guide: String,
    #[serde(default)]
    pub pruning_guide: String,
    #[serde(default)]
    pub repotting_guide: String,
    #[serde(default)]
    pub pest_control: String,
    #[serde(default)]
    pub disease_prevention: String,
    #[serde(default)]
    pub pro_tips: String,
    #[serde(default)]
    pub common_mistakes: String,
}

impl CareGuide {
    /// Months must be within 1-12 and appear at most once.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = [false; 12];
        for entry in &self.monthly_care {
            let idx = usize::from(entry.month)
                .checked_sub(1)
                .filter(|i| *i < 12)
                .ok_or_else(|| {
                    CoreError::Validation(format!("Invalid month {} in care guide", entry.month))
                })?;
            if std::mem::replace(&mut seen[idx], true) {
                return Err(CoreError::Validation(format!(
                    "Duplicate care note for {}",
                    MONTH_NAMES[idx]
                )));
            }
        }
        Ok(())
    }
}

/// Generated guide for a plant without a stored one.
pub fn default_care_guide(plant: &PlantRecord) -> CareGuide {
    let name = &plant.name;
    CareGuide {
        monthly_care: Vec::new(),
        fertilizing_guide: format!(
            "Fertilize {name} monthly during growing season (spring/summer)"
        ),
        pruning_guide: format!("Prune {name} as needed to maintain shape and remove dead growth"),
        repotting_guide: format!("Repot {name} every 1-2 years or when rootbound"),
        pest_control: "Watch for common pests like aphids and spider mites. \
                       Use insecticidal soap if needed."
            .to_string(),
        disease_prevention: "Ensure good air circulation and avoid overwatering \
                             to prevent fungal issues."
            .to_string(),
        pro_tips: format!(
            "Best grown in {}. {}",
            plant.space.label().to_lowercase(),
            plant.care.common_issues
        )
        .trim_end()
        .to_string(),
        common_mistakes: "Overwatering is the most common mistake. \
                          Let soil dry between waterings."
            .to_string(),
    }
}

/// Everything the care hub shows for one plant.
#[derive(Debug, Clone, Serialize)]
pub struct CareSheet {
    pub plant: PlantSummary,
    pub description: String,
    pub care: CareText,
    pub guide: CareGuide,
    /// `true` when `guide` was generated rather than stored.
    pub guide_is_default: bool,
}

/// Combine a record with its stored guide, generating one when absent.
pub fn care_sheet(plant: &PlantRecord, stored: Option<CareGuide>) -> CareSheet {
    let (guide, guide_is_default) = match stored {
        Some(guide) => (guide, false),
        None => (default_care_guide(plant), true),
    };
    CareSheet {
        plant: plant.summary(),
        description: plant.description.clone(),
        care: plant.care.clone(),
        guide,
        guide_is_default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::fixtures;

    #[test]
    fn default_guide_mentions_plant_and_space() {
        let mut basil = fixtures::catalog().remove(1);
        basil.care.common_issues = "Pinch flowers to keep leaves tender.".to_string();
        let guide = default_care_guide(&basil);
        assert!(guide.fertilizing_guide.contains("Basil"));
        assert_eq!(
            guide.pro_tips,
            "Best grown in small pot (windowsill). Pinch flowers to keep leaves tender."
        );
        assert!(guide.monthly_care.is_empty());
    }

    #[test]
    fn default_guide_without_issues_has_no_trailing_space() {
        let mint = fixtures::catalog().remove(3);
        let guide = default_care_guide(&mint);
        assert_eq!(guide.pro_tips, "Best grown in small pot (windowsill).");
    }

    #[test]
    fn care_sheet_prefers_stored_guide() {
        let mint = fixtures::catalog().remove(3);
        let stored = CareGuide {
            pro_tips: "Grow in its own pot; it spreads.".to_string(),
            ..CareGuide::default()
        };
        let sheet = care_sheet(&mint, Some(stored));
        assert!(!sheet.guide_is_default);
        assert_eq!(sheet.guide.pro_tips, "Grow in its own pot; it spreads.");

        let generated = care_sheet(&mint, None);
        assert!(generated.guide_is_default);
    }

    #[test]
    fn month_validation() {
        let mut guide = CareGuide {
            monthly_care: vec![
                MonthlyCare { month: 3, note: "Start feeding".to_string() },
                MonthlyCare { month: 11, note: "Reduce watering".to_string() },
            ],
            ..CareGuide::default()
        };
        assert!(guide.validate().is_ok());
        assert_eq!(guide.monthly_care[0].month_name(), Some("March"));

        guide.monthly_care.push(MonthlyCare { month: 3, note: "again".to_string() });
        assert!(guide.validate().is_err());

        guide.monthly_care = vec![MonthlyCare { month: 13, note: String::new() }];
        assert!(guide.validate().is_err());
        assert_eq!(guide.monthly_care[0].month_name(), None);
    }
}
