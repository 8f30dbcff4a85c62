//! Per-visitor care-hub selection.
//!
//! The care hub remembers which plant a visitor last opened. The selection
//! is carried by the caller (a query parameter) rather than stored on the
//! server, and is re-validated against the active catalog on every use.

use serde::{Deserialize, Serialize};

use crate::plant::PlantRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub selected_plant_id: Option<String>,
}

impl SelectionContext {
    pub fn new(selected_plant_id: Option<&str>) -> Self {
        Self {
            selected_plant_id: selected_plant_id
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn clear(&mut self) {
        self.selected_plant_id = None;
    }

    /// The selected plant, if it is still active in `catalog`.
    ///
    /// A selection that no longer resolves is cleared.
    pub fn resolve<'a>(&mut self, catalog: &'a [PlantRecord]) -> Option<&'a PlantRecord> {
        let found = self.selected_plant_id.as_deref().and_then(|id| {
            catalog
                .iter()
                .find(|p| p.is_active && p.plant_id == id)
        });
        if found.is_none() && self.selected_plant_id.is_some() {
            tracing::debug!(
                plant_id = ?self.selected_plant_id,
                "Stale care hub selection cleared"
            );
            self.clear();
        }
        found
    }
}
