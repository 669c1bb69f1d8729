//! One-time import of plant definitions into the catalog.
//!
//! Plant catalogs are JSON arrays in the format the garden has always been
//! seeded from:
//!
//! ```json
//! [
//!   {
//!     "plantId": "malus-pumila",
//!     "name": "Apple",
//!     "description": "An apple tree.",
//!     "growZoneNumber": 3,
//!     "wateringInterval": 30,
//!     "imageUrl": "https://example.com/apple.jpg"
//!   }
//! ]
//! ```
//!
//! `wateringInterval` defaults to 7 days and `imageUrl` to an empty string.

use std::path::Path;

use log::info;
use serde::Deserialize;
use tokio::fs;

use crate::{
    error::{GardenError, Result},
    garden::Garden,
    models::{Plant, DEFAULT_WATERING_INTERVAL},
};

/// Catalog shipped with the library.
const BUNDLED_PLANTS: &str = include_str!("../assets/plants.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPlant {
    plant_id: String,
    name: String,
    description: String,
    grow_zone_number: i32,
    #[serde(default = "default_watering_interval")]
    watering_interval: i32,
    #[serde(default)]
    image_url: String,
}

fn default_watering_interval() -> i32 {
    DEFAULT_WATERING_INTERVAL
}

impl From<SeedPlant> for Plant {
    fn from(seed: SeedPlant) -> Self {
        Plant {
            id: seed.plant_id,
            name: seed.name,
            description: seed.description,
            grow_zone_number: seed.grow_zone_number,
            watering_interval: seed.watering_interval,
            image_url: seed.image_url,
        }
    }
}

/// Parses a JSON plant catalog.
pub fn plants_from_json(json: &str) -> Result<Vec<Plant>> {
    let seeds: Vec<SeedPlant> = serde_json::from_str(json)?;
    Ok(seeds.into_iter().map(Plant::from).collect())
}

/// The catalog shipped with the library.
pub fn bundled_plants() -> Result<Vec<Plant>> {
    plants_from_json(BUNDLED_PLANTS)
}

impl Garden {
    /// Imports the plant catalog at `path`, returning how many plants were
    /// written. Existing plants with the same IDs are replaced.
    pub async fn seed_from_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .await
            .map_err(|e| GardenError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            })?;
        let plants = plants_from_json(&json)?;
        info!("Seeding {} plants from {}", plants.len(), path.display());
        self.seed(plants).await
    }

    /// Imports the catalog shipped with the library.
    pub async fn seed_bundled(&self) -> Result<usize> {
        let plants = bundled_plants()?;
        info!("Seeding {} bundled plants", plants.len());
        self.seed(plants).await
    }

    async fn seed(&self, plants: Vec<Plant>) -> Result<usize> {
        let count = plants.len();
        self.insert_plants(plants).await?;
        Ok(count)
    }
}
