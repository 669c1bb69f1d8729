//! Garden planting CRUD operations and the plant/planting join.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::{plant_from_row, planting_from_row, PLANTING_COLUMNS, PLANT_COLUMNS};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::{should_be_watered, GardenPlanting, PlantAndGardenPlantings},
};

const INSERT_PLANTING_SQL: &str =
    "INSERT INTO garden_plantings (plant_id, plant_date, last_watering_date) VALUES (?1, ?2, ?3)";
const IS_PLANTED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM garden_plantings WHERE plant_id = ?1 LIMIT 1)";
const DELETE_PLANTING_SQL: &str = "DELETE FROM garden_plantings WHERE id = ?1";
const UPDATE_WATERING_SQL: &str = "UPDATE garden_plantings SET last_watering_date = ?1 WHERE id = ?2";

impl super::Database {
    /// Puts a plant in the garden, planted and watered at `now`.
    ///
    /// Returns [`GardenError::UnknownPlant`] when `plant_id` is not in the
    /// catalog.
    pub fn create_garden_planting(
        &mut self,
        plant_id: &str,
        now: Timestamp,
    ) -> Result<GardenPlanting> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = now.to_string();
        tx.execute(INSERT_PLANTING_SQL, params![plant_id, &now_str, &now_str])
            .map_err(|e| {
                if GardenError::is_foreign_key_violation(&e) {
                    GardenError::UnknownPlant {
                        plant_id: plant_id.to_string(),
                    }
                } else {
                    GardenError::database("Failed to insert garden planting").with_source(e)
                }
            })?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(GardenPlanting {
            id,
            plant_id: plant_id.to_string(),
            plant_date: now,
            last_watering_date: now,
        })
    }

    /// Retrieves a garden planting by its ID.
    pub fn get_garden_planting(&self, id: u64) -> Result<Option<GardenPlanting>> {
        self.connection
            .query_row(
                &format!("SELECT {PLANTING_COLUMNS} FROM garden_plantings WHERE id = ?1"),
                params![id as i64],
                planting_from_row,
            )
            .optional()
            .db_context("Failed to query garden planting")
    }

    /// Lists every garden planting in insertion order.
    pub fn list_garden_plantings(&self) -> Result<Vec<GardenPlanting>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {PLANTING_COLUMNS} FROM garden_plantings ORDER BY id"
            ))
            .db_context("Failed to prepare query")?;

        let plantings = stmt
            .query_map([], planting_from_row)
            .db_context("Failed to query garden plantings")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch garden plantings")?;

        Ok(plantings)
    }

    /// Returns true if at least one planting references `plant_id`.
    pub fn is_planted(&self, plant_id: &str) -> Result<bool> {
        self.connection
            .query_row(IS_PLANTED_SQL, params![plant_id], |row| row.get(0))
            .db_context("Failed to check planting existence")
    }

    /// Permanently removes a planting from the garden.
    pub fn remove_garden_planting(&mut self, id: u64) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_PLANTING_SQL, params![id as i64])
            .db_context("Failed to delete garden planting")?;

        if rows_affected == 0 {
            return Err(GardenError::PlantingNotFound { id });
        }

        Ok(())
    }

    /// Records that a planting was watered at `at`.
    pub fn touch_watering(&mut self, id: u64, at: Timestamp) -> Result<GardenPlanting> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(UPDATE_WATERING_SQL, params![at.to_string(), id as i64])
            .db_context("Failed to update watering date")?;

        if rows_affected == 0 {
            return Err(GardenError::PlantingNotFound { id });
        }

        let planting = tx
            .query_row(
                &format!("SELECT {PLANTING_COLUMNS} FROM garden_plantings WHERE id = ?1"),
                params![id as i64],
                planting_from_row,
            )
            .db_context("Failed to query watered planting")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(planting)
    }

    /// Lists every plant with at least one planting, together with all of
    /// its plantings. Plants are ordered by name, plantings by plant date.
    ///
    /// Both tables are read inside one transaction so the result is a
    /// consistent snapshot.
    pub fn planted_gardens(&mut self) -> Result<Vec<PlantAndGardenPlantings>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plants = {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {PLANT_COLUMNS} FROM plants \
                     WHERE id IN (SELECT DISTINCT plant_id FROM garden_plantings) ORDER BY name"
                ))
                .db_context("Failed to prepare query")?;
            let plants = stmt
                .query_map([], plant_from_row)
                .db_context("Failed to query planted plants")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch planted plants")?;
            plants
        };

        let mut plantings_by_plant: HashMap<String, Vec<GardenPlanting>> = HashMap::new();
        {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {PLANTING_COLUMNS} FROM garden_plantings ORDER BY id"
                ))
                .db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map([], planting_from_row)
                .db_context("Failed to query garden plantings")?;
            for planting in rows {
                let planting = planting.db_context("Failed to fetch garden planting")?;
                plantings_by_plant
                    .entry(planting.plant_id.clone())
                    .or_default()
                    .push(planting);
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(plants
            .into_iter()
            .map(|plant| {
                let mut garden_plantings =
                    plantings_by_plant.remove(&plant.id).unwrap_or_default();
                // Text timestamps do not sort chronologically
                garden_plantings.sort_by_key(|planting| (planting.plant_date, planting.id));
                PlantAndGardenPlantings {
                    plant,
                    garden_plantings,
                }
            })
            .collect())
    }

    /// Lists plantings whose plant's watering interval has elapsed at `now`,
    /// least recently watered first.
    pub fn plantings_needing_water(&self, now: Timestamp) -> Result<Vec<GardenPlanting>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT gp.id, gp.plant_id, gp.plant_date, gp.last_watering_date, p.watering_interval \
                 FROM garden_plantings gp JOIN plants p ON p.id = gp.plant_id",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                let planting = planting_from_row(row)?;
                let watering_interval: i32 = row.get(4)?;
                Ok((planting, watering_interval))
            })
            .db_context("Failed to query garden plantings")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch garden plantings")?;

        let mut due: Vec<GardenPlanting> = rows
            .into_iter()
            .filter(|(planting, interval)| {
                should_be_watered(now, planting.last_watering_date, *interval)
            })
            .map(|(planting, _)| planting)
            .collect();
        due.sort_by_key(|planting| (planting.last_watering_date, planting.id));
        Ok(due)
    }
}
