//! Garden planting operations for the Garden.

use jiff::Timestamp;
use log::debug;

use super::Garden;
use crate::{
    error::Result,
    live::{Subscription, Table},
    models::{GardenPlanting, PlantAndGardenPlantings},
};

impl Garden {
    /// Puts a plant in the garden, planted and watered now.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::UnknownPlant` if the plant is not in the catalog
    pub async fn create_garden_planting(&self, plant_id: &str) -> Result<GardenPlanting> {
        debug!("create_garden_planting: {plant_id}");
        let plant_id = plant_id.to_string();
        self.mutate(&[Table::GardenPlantings], move |db| {
            db.create_garden_planting(&plant_id, Timestamp::now())
        })
        .await
    }

    /// Removes a planting from the garden.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::PlantingNotFound` if no planting has this ID
    pub async fn remove_garden_planting(&self, planting_id: u64) -> Result<()> {
        debug!("remove_garden_planting: {planting_id}");
        self.mutate(&[Table::GardenPlantings], move |db| {
            db.remove_garden_planting(planting_id)
        })
        .await
    }

    /// Records that a planting was watered at `at`.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::PlantingNotFound` if no planting has this ID
    pub async fn touch_watering(&self, planting_id: u64, at: Timestamp) -> Result<GardenPlanting> {
        debug!("touch_watering: {planting_id} at {at}");
        self.mutate(&[Table::GardenPlantings], move |db| {
            db.touch_watering(planting_id, at)
        })
        .await
    }

    /// Retrieves a garden planting by its ID.
    pub async fn get_garden_planting(&self, planting_id: u64) -> Result<Option<GardenPlanting>> {
        self.with_database(move |db| db.get_garden_planting(planting_id))
            .await
    }

    /// Lists every garden planting in insertion order.
    pub async fn list_garden_plantings(&self) -> Result<Vec<GardenPlanting>> {
        self.with_database(|db| db.list_garden_plantings()).await
    }

    /// Returns true if the plant has at least one planting.
    pub async fn is_planted(&self, plant_id: &str) -> Result<bool> {
        let plant_id = plant_id.to_string();
        self.with_database(move |db| db.is_planted(&plant_id)).await
    }

    /// Every planted plant with all of its plantings, ordered by plant name.
    pub async fn planted_gardens(&self) -> Result<Vec<PlantAndGardenPlantings>> {
        self.with_database(|db| db.planted_gardens()).await
    }

    /// Plantings whose watering interval has elapsed at `now`.
    pub async fn plantings_needing_water(&self, now: Timestamp) -> Result<Vec<GardenPlanting>> {
        self.with_database(move |db| db.plantings_needing_water(now))
            .await
    }

    /// Live list of every garden planting.
    pub fn watch_garden_plantings(&self) -> Subscription<Vec<GardenPlanting>> {
        self.live_query(&[Table::GardenPlantings], |db| db.list_garden_plantings())
    }

    /// Live flag telling whether the plant is in the garden.
    pub fn watch_is_planted(&self, plant_id: &str) -> Subscription<bool> {
        debug!("watch_is_planted: {plant_id}");
        let plant_id = plant_id.to_string();
        self.live_query(&[Table::GardenPlantings], move |db| db.is_planted(&plant_id))
    }

    /// Live join of planted plants and their plantings. Re-emits on changes
    /// to either table.
    pub fn watch_planted_gardens(&self) -> Subscription<Vec<PlantAndGardenPlantings>> {
        debug!("watch_planted_gardens");
        self.live_query(&[Table::Plants, Table::GardenPlantings], |db| {
            db.planted_gardens()
        })
    }
}
