//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::fmt;

use super::{card::PlantingCard, datetime::PlantingDate};
use crate::models::{GardenPlanting, Plant, PlantAndGardenPlantings};

/// Newtype wrapper for displaying a plant list, one line per plant.
///
/// # Examples
///
/// ```rust
/// use sunflower_core::{display::Plants, Plant};
///
/// let plants = Plants(vec![Plant::new("malus-pumila", "Apple", "", 3)]);
/// assert!(plants.to_string().contains("**Apple**"));
/// assert_eq!(Plants(vec![]).to_string(), "No plants found.\n");
/// ```
pub struct Plants(pub Vec<Plant>);

impl Plants {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plants in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Plants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plants found.");
        }

        for plant in &self.0 {
            writeln!(
                f,
                "- **{}** ({}): zone {}, water every {} days",
                plant.name, plant.id, plant.grow_zone_number, plant.watering_interval
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the planted garden, one card per plant.
pub struct Gardens(pub Vec<PlantAndGardenPlantings>);

impl Gardens {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Gardens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Your garden is empty.");
        }

        for (index, entry) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", PlantingCard::new(entry))?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying plantings compactly.
pub struct Plantings(pub Vec<GardenPlanting>);

impl fmt::Display for Plantings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plantings found.");
        }

        for planting in &self.0 {
            writeln!(
                f,
                "- Planting {} ({}): last watered {}",
                planting.id,
                planting.plant_id,
                PlantingDate::new(planting.last_watering_date)
            )?;
        }
        Ok(())
    }
}
