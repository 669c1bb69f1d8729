//! Display implementations for domain models.
//!
//! The Display implementations produce markdown for rich terminal display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{GardenPlanting, Plant};

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Grow zone: {}", self.grow_zone_number)?;
        writeln!(f, "- Water every {} days", self.watering_interval)?;
        if !self.image_url.is_empty() {
            writeln!(f, "- Image: {}", self.image_url)?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        Ok(())
    }
}

impl fmt::Display for GardenPlanting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Planting {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- Plant: {}", self.plant_id)?;
        writeln!(f, "- Planted: {}", LocalDateTime(&self.plant_date))?;
        writeln!(f, "- Last watered: {}", LocalDateTime(&self.last_watering_date))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn test_plant_display() {
        let plant = Plant::new("malus-pumila", "Apple", "A sweet fruit.", 3)
            .with_watering_interval(30);
        let output = plant.to_string();
        assert!(output.starts_with("# Apple\n"));
        assert!(output.contains("- ID: malus-pumila"));
        assert!(output.contains("- Water every 30 days"));
        assert!(output.contains("A sweet fruit."));
        assert!(!output.contains("- Image:"));
    }

    #[test]
    fn test_garden_planting_display() {
        let planting = GardenPlanting {
            id: 4,
            plant_id: "malus-pumila".to_string(),
            plant_date: Timestamp::UNIX_EPOCH,
            last_watering_date: Timestamp::UNIX_EPOCH,
        };
        let output = planting.to_string();
        assert!(output.contains("## Planting 4"));
        assert!(output.contains("- Plant: malus-pumila"));
    }
}
