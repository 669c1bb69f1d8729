//! Plant catalog queries and bulk upsert.

use rusqlite::{params, OptionalExtension};

use super::{plant_from_row, PLANT_COLUMNS};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::Plant,
};

const UPSERT_PLANT_SQL: &str = "INSERT INTO plants (id, name, description, grow_zone_number, watering_interval, image_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, description = excluded.description, \
     grow_zone_number = excluded.grow_zone_number, watering_interval = excluded.watering_interval, \
     image_url = excluded.image_url";

impl super::Database {
    /// Inserts the given plants, replacing every field of any plant whose ID
    /// already exists. The batch is written in a single transaction and is
    /// rejected as a whole when one plant fails validation.
    pub fn insert_plants(&mut self, plants: &[Plant]) -> Result<()> {
        for plant in plants {
            validate_plant(plant)?;
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        {
            // Replacing in place keeps existing plantings' references valid
            let mut stmt = tx
                .prepare(UPSERT_PLANT_SQL)
                .db_context("Failed to prepare plant upsert")?;
            for plant in plants {
                stmt.execute(params![
                    plant.id,
                    plant.name,
                    plant.description,
                    plant.grow_zone_number,
                    plant.watering_interval,
                    plant.image_url,
                ])
                .map_err(|e| {
                    GardenError::database(format!("Failed to upsert plant '{}'", plant.id))
                        .with_source(e)
                })?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Retrieves a plant by its ID.
    pub fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        self.connection
            .query_row(
                &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1"),
                params![id],
                plant_from_row,
            )
            .optional()
            .db_context("Failed to query plant")
    }

    /// Lists every plant ordered by name.
    pub fn list_plants(&self) -> Result<Vec<Plant>> {
        self.query_plants(
            &format!("SELECT {PLANT_COLUMNS} FROM plants ORDER BY name"),
            params![],
        )
    }

    /// Lists plants of one grow zone ordered by name.
    pub fn list_plants_with_grow_zone(&self, grow_zone_number: i32) -> Result<Vec<Plant>> {
        self.query_plants(
            &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE grow_zone_number = ?1 ORDER BY name"),
            params![grow_zone_number],
        )
    }

    /// Lists plants whose name starts with `keyword`, ordered by name.
    ///
    /// Matching uses SQLite's `LIKE`, so it ignores ASCII case. Wildcard
    /// characters in `keyword` match literally, and an empty keyword matches
    /// every plant.
    pub fn list_plants_with_keyword(&self, keyword: &str) -> Result<Vec<Plant>> {
        self.query_plants(
            &format!(
                "SELECT {PLANT_COLUMNS} FROM plants WHERE name LIKE ?1 || '%' ESCAPE '\\' ORDER BY name"
            ),
            params![escape_like(keyword)],
        )
    }

    fn query_plants(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Plant>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let plants = stmt
            .query_map(params, plant_from_row)
            .db_context("Failed to query plants")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plants")?;

        Ok(plants)
    }
}

/// Rejects plants the catalog cannot store meaningfully.
fn validate_plant(plant: &Plant) -> Result<()> {
    if plant.id.trim().is_empty() {
        return Err(GardenError::invalid_input("id").with_reason("Plant ID must not be empty"));
    }
    if plant.name.trim().is_empty() {
        return Err(GardenError::invalid_input("name")
            .with_reason(format!("Plant '{}' has an empty name", plant.id)));
    }
    if plant.grow_zone_number < 0 {
        return Err(GardenError::invalid_input("grow_zone_number").with_reason(format!(
            "Plant '{}' has negative grow zone {}",
            plant.id, plant.grow_zone_number
        )));
    }
    if plant.watering_interval <= 0 {
        return Err(GardenError::invalid_input("watering_interval").with_reason(format!(
            "Plant '{}' must be watered at least every day, got {}",
            plant.id, plant.watering_interval
        )));
    }
    Ok(())
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Ap"), "Ap");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_validate_plant_rejects_empty_id() {
        let plant = Plant::new(" ", "Apple", "", 3);
        assert!(matches!(
            validate_plant(&plant),
            Err(GardenError::InvalidInput { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_validate_plant_rejects_negative_zone() {
        let plant = Plant::new("apple", "Apple", "", -2);
        assert!(validate_plant(&plant).is_err());
    }

    #[test]
    fn test_validate_plant_rejects_zero_interval() {
        let plant = Plant::new("apple", "Apple", "", 3).with_watering_interval(0);
        assert!(validate_plant(&plant).is_err());
    }
}
