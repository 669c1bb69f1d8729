//! Join of a plant with every planting of it in the garden.

use serde::{Deserialize, Serialize};

use super::{GardenPlanting, Plant};

/// A planted plant together with its planting history.
///
/// Never persisted; built by the garden queries for plants that have at
/// least one planting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantAndGardenPlantings {
    pub plant: Plant,

    /// Plantings of [`Self::plant`], oldest first
    #[serde(default)]
    pub garden_plantings: Vec<GardenPlanting>,
}

impl PlantAndGardenPlantings {
    /// The planting shown for this plant: the most recently planted one,
    /// with the highest ID winning ties.
    pub fn current_planting(&self) -> Option<&GardenPlanting> {
        self.garden_plantings
            .iter()
            .max_by_key(|planting| (planting.plant_date, planting.id))
    }
}
