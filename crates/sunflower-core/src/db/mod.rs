//! Database operations and SQLite management for plants and plantings.
//!
//! This module provides low-level database operations for the garden. It
//! handles SQLite connections and schema management, and provides query
//! interfaces for the plant catalog, the garden plantings and the saved
//! filter state.

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{GardenPlanting, Plant},
};

pub mod plant_queries;
pub mod planting_queries;
pub mod schema;
pub mod state_queries;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Counter SQLite bumps whenever another connection commits to the file.
    pub fn data_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA data_version", [], |row| row.get(0))
            .db_context("Failed to read data version")
    }
}

pub(crate) const PLANT_COLUMNS: &str =
    "id, name, description, grow_zone_number, watering_interval, image_url";
pub(crate) const PLANTING_COLUMNS: &str = "id, plant_id, plant_date, last_watering_date";

/// Maps a row selected with [`PLANT_COLUMNS`].
pub(crate) fn plant_from_row(row: &Row<'_>) -> rusqlite::Result<Plant> {
    Ok(Plant {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        grow_zone_number: row.get(3)?,
        watering_interval: row.get(4)?,
        image_url: row.get(5)?,
    })
}

/// Maps a row selected with [`PLANTING_COLUMNS`].
pub(crate) fn planting_from_row(row: &Row<'_>) -> rusqlite::Result<GardenPlanting> {
    Ok(GardenPlanting {
        id: row.get::<_, i64>(0)? as u64,
        plant_id: row.get(1)?,
        plant_date: timestamp_column(row, 2)?,
        last_watering_date: timestamp_column(row, 3)?,
    })
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
