//! Plant.id request and response bodies.
//!
//! Only the fields the reconciler uses are modelled; everything else in
//! the response is ignored.

use serde::{Deserialize, Serialize};
use zfarming_core::identification::IdentificationSuggestion;

/// Request modifiers sent with every identification.
pub const MODIFIERS: [&str; 2] = ["crops_fast", "similar_images"];

/// Plant detail fields requested with every identification.
pub const PLANT_DETAILS: [&str; 6] = [
    "common_names",
    "url",
    "name_authority",
    "wiki_description",
    "taxonomy",
    "synonyms",
];

/// Body of `POST /identify`.
#[derive(Debug, Serialize)]
pub struct IdentifyRequest<'a> {
    /// Base64-encoded images.
    pub images: Vec<String>,
    pub modifiers: &'a [&'a str],
    pub plant_details: &'a [&'a str],
}

impl IdentifyRequest<'static> {
    pub fn new(image_base64: String) -> Self {
        Self {
            images: vec![image_base64],
            modifiers: &MODIFIERS,
            plant_details: &PLANT_DETAILS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub plant_name: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub plant_details: Option<PlantDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlantDetails {
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
    #[serde(default)]
    pub structured_name: Option<StructuredName>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StructuredName {
    #[serde(default)]
    pub species: Option<String>,
}

impl From<Suggestion> for IdentificationSuggestion {
    fn from(s: Suggestion) -> Self {
        let details = s.plant_details.unwrap_or_default();
        IdentificationSuggestion {
            raw_name: s
                .plant_name
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
            probability: s.probability.unwrap_or(0.0),
            structured_scientific_name: details
                .structured_name
                .and_then(|n| n.species)
                .filter(|n| !n.trim().is_empty()),
            common_name_aliases: details.common_names.unwrap_or_default(),
        }
    }
}

impl IdentifyResponse {
    pub fn into_suggestions(self) -> Vec<IdentificationSuggestion> {
        self.suggestions.into_iter().map(Into::into).collect()
    }
}
