//! Plant catalog operations for the Garden.

use log::{debug, info};

use super::Garden;
use crate::{
    error::Result,
    live::{Subscription, Table},
    models::Plant,
};

impl Garden {
    /// Inserts the given plants, fully replacing any plant with the same ID.
    pub async fn insert_plants(&self, plants: Vec<Plant>) -> Result<()> {
        let count = plants.len();
        self.mutate(&[Table::Plants], move |db| db.insert_plants(&plants))
            .await?;
        info!("Upserted {count} plants");
        Ok(())
    }

    /// Retrieves a plant by its ID.
    pub async fn get_plant(&self, plant_id: &str) -> Result<Option<Plant>> {
        let plant_id = plant_id.to_string();
        self.with_database(move |db| db.get_plant(&plant_id)).await
    }

    /// Lists every plant ordered by name.
    pub async fn list_plants(&self) -> Result<Vec<Plant>> {
        self.with_database(|db| db.list_plants()).await
    }

    /// Lists plants of one grow zone ordered by name.
    pub async fn list_plants_with_grow_zone(&self, grow_zone_number: i32) -> Result<Vec<Plant>> {
        self.with_database(move |db| db.list_plants_with_grow_zone(grow_zone_number))
            .await
    }

    /// Lists plants whose name starts with `keyword`, ordered by name.
    pub async fn list_plants_with_keyword(&self, keyword: &str) -> Result<Vec<Plant>> {
        let keyword = keyword.to_string();
        self.with_database(move |db| db.list_plants_with_keyword(&keyword))
            .await
    }

    /// Live list of every plant ordered by name.
    pub fn watch_plants(&self) -> Subscription<Vec<Plant>> {
        debug!("watch_plants");
        self.live_query(&[Table::Plants], |db| db.list_plants())
    }

    /// Live list of the plants of one grow zone.
    pub fn watch_plants_with_grow_zone(&self, grow_zone_number: i32) -> Subscription<Vec<Plant>> {
        debug!("watch_plants_with_grow_zone: {grow_zone_number}");
        self.live_query(&[Table::Plants], move |db| {
            db.list_plants_with_grow_zone(grow_zone_number)
        })
    }

    /// Live list of the plants whose name starts with `keyword`.
    pub fn watch_plants_with_keyword(&self, keyword: &str) -> Subscription<Vec<Plant>> {
        debug!("watch_plants_with_keyword: {keyword:?}");
        let keyword = keyword.to_string();
        self.live_query(&[Table::Plants], move |db| {
            db.list_plants_with_keyword(&keyword)
        })
    }

    /// Live view of a single plant; `None` while it does not exist.
    pub fn watch_plant(&self, plant_id: &str) -> Subscription<Option<Plant>> {
        let plant_id = plant_id.to_string();
        self.live_query(&[Table::Plants], move |db| db.get_plant(&plant_id))
    }
}
