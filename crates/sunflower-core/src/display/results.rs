//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! watering, delete and seed operations with consistent messaging.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::GardenPlanting;

/// Wrapper for displaying a newly created resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<GardenPlanting> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added {} to the garden (planting ID: {})",
            self.resource.plant_id, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of recording that a planting was watered.
pub struct WateredResult {
    pub planting: GardenPlanting,
}

impl WateredResult {
    pub fn new(planting: GardenPlanting) -> Self {
        Self { planting }
    }
}

impl fmt::Display for WateredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Watered {} (planting ID: {}) at {}",
            self.planting.plant_id,
            self.planting.id,
            LocalDateTime(&self.planting.last_watering_date)
        )?;
        writeln!(f)?;
        write!(f, "{}", self.planting)
    }
}

/// Wrapper for displaying a removed resource.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<GardenPlanting> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed {} from the garden (planting ID: {})",
            self.resource.plant_id, self.resource.id
        )
    }
}

/// Outcome of a catalog import.
pub struct SeedResult {
    pub count: usize,
    pub source: String,
}

impl fmt::Display for SeedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "plant" } else { "plants" };
        writeln!(f, "Imported {} {noun} from {}", self.count, self.source)
    }
}
