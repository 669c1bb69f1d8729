//! Single-plant presentation of a planted plant.

use std::fmt;

use jiff::tz::TimeZone;

use super::datetime::PlantingDate;
use crate::models::{GardenPlanting, PlantAndGardenPlantings};

/// Presentation of one [`PlantAndGardenPlantings`] as shown in a garden list.
///
/// Dates come from the current planting, the one planted most recently.
///
/// ```rust
/// use jiff::{tz::TimeZone, Timestamp};
/// use sunflower_core::{display::PlantingCard, GardenPlanting, Plant, PlantAndGardenPlantings};
///
/// let planted: Timestamp = "2024-06-05T12:00:00Z".parse().unwrap();
/// let entry = PlantAndGardenPlantings {
///     plant: Plant::new("malus-pumila", "Apple", "", 3).with_watering_interval(30),
///     garden_plantings: vec![GardenPlanting {
///         id: 1,
///         plant_id: "malus-pumila".to_string(),
///         plant_date: planted,
///         last_watering_date: planted,
///     }],
/// };
///
/// let card = PlantingCard::new(&entry).with_time_zone(TimeZone::UTC);
/// assert_eq!(card.plant_name(), "Apple");
/// assert_eq!(card.plant_date_string().as_deref(), Some("Jun 5, 2024"));
/// ```
pub struct PlantingCard<'a> {
    entry: &'a PlantAndGardenPlantings,
    time_zone: TimeZone,
}

impl<'a> PlantingCard<'a> {
    /// Presents `entry` with dates in the system time zone.
    pub fn new(entry: &'a PlantAndGardenPlantings) -> Self {
        Self {
            entry,
            time_zone: TimeZone::system(),
        }
    }

    /// Formats dates in `time_zone` instead.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn plant_id(&self) -> &'a str {
        &self.entry.plant.id
    }

    pub fn plant_name(&self) -> &'a str {
        &self.entry.plant.name
    }

    pub fn image_url(&self) -> &'a str {
        &self.entry.plant.image_url
    }

    pub fn watering_interval(&self) -> i32 {
        self.entry.plant.watering_interval
    }

    /// Number of plantings of this plant in the garden.
    pub fn planting_count(&self) -> usize {
        self.entry.garden_plantings.len()
    }

    pub fn current_planting(&self) -> Option<&'a GardenPlanting> {
        self.entry.current_planting()
    }

    /// Plant date of the current planting, like `Jun 5, 2024`.
    pub fn plant_date_string(&self) -> Option<String> {
        self.current_planting()
            .map(|p| PlantingDate::in_time_zone(p.plant_date, self.time_zone.clone()).to_string())
    }

    /// Last watering date of the current planting, like `Jun 5, 2024`.
    pub fn water_date_string(&self) -> Option<String> {
        self.current_planting().map(|p| {
            PlantingDate::in_time_zone(p.last_watering_date, self.time_zone.clone()).to_string()
        })
    }
}

impl fmt::Display for PlantingCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.plant_name(), self.plant_id())?;
        writeln!(f)?;
        if let Some(planting) = self.current_planting() {
            writeln!(f, "- Planting ID: {}", planting.id)?;
        }
        if let Some(planted) = self.plant_date_string() {
            writeln!(f, "- Planted: {planted}")?;
        }
        if let Some(watered) = self.water_date_string() {
            writeln!(f, "- Last watered: {watered}")?;
        }
        writeln!(f, "- Water every {} days", self.watering_interval())?;
        if self.planting_count() > 1 {
            writeln!(f, "- Plantings: {}", self.planting_count())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Plant;

    fn planting(id: u64, plant_date: &str, watered: &str) -> GardenPlanting {
        GardenPlanting {
            id,
            plant_id: "malus-pumila".to_string(),
            plant_date: plant_date.parse::<Timestamp>().unwrap(),
            last_watering_date: watered.parse::<Timestamp>().unwrap(),
        }
    }

    #[test]
    fn test_card_shows_most_recent_planting() {
        let entry = PlantAndGardenPlantings {
            plant: Plant::new("malus-pumila", "Apple", "", 3).with_watering_interval(30),
            garden_plantings: vec![
                planting(1, "2024-01-10T12:00:00Z", "2024-02-01T12:00:00Z"),
                planting(2, "2024-06-05T12:00:00Z", "2024-07-14T12:00:00Z"),
            ],
        };
        let card = PlantingCard::new(&entry).with_time_zone(TimeZone::UTC);

        assert_eq!(card.plant_date_string().as_deref(), Some("Jun 5, 2024"));
        assert_eq!(card.water_date_string().as_deref(), Some("Jul 14, 2024"));
        assert_eq!(card.watering_interval(), 30);

        let output = card.to_string();
        assert!(output.contains("### Apple (malus-pumila)"));
        assert!(output.contains("- Planting ID: 2"));
        assert!(output.contains("- Plantings: 2"));
    }

    #[test]
    fn test_card_without_plantings_has_no_dates() {
        let entry = PlantAndGardenPlantings {
            plant: Plant::new("malus-pumila", "Apple", "", 3),
            garden_plantings: vec![],
        };
        let card = PlantingCard::new(&entry);
        assert!(card.plant_date_string().is_none());
        assert!(!card.to_string().contains("Planted:"));
    }
}
