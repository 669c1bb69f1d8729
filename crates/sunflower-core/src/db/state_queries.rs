//! Saved key-value state, used to restore list filters after a restart.

use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_STATE_SQL: &str = "SELECT value FROM saved_state WHERE key = ?1";
const UPSERT_STATE_SQL: &str = "INSERT INTO saved_state (key, value) VALUES (?1, ?2) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

impl super::Database {
    /// Reads the value saved under `key`.
    pub fn get_state(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_STATE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read saved state")
    }

    /// Saves `value` under `key`, replacing any previous value.
    pub fn set_state(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_STATE_SQL, params![key, value])
            .db_context("Failed to write saved state")?;
        Ok(())
    }
}
