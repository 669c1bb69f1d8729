//! Garden planting model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Records that a plant from the catalog is growing in the user's garden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GardenPlanting {
    /// Identifier assigned by the database
    pub id: u64,

    /// Catalog plant this planting refers to
    pub plant_id: String,

    /// When the plant was planted (UTC)
    pub plant_date: Timestamp,

    /// When the plant was last watered (UTC)
    pub last_watering_date: Timestamp,
}
