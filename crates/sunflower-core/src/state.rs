//! Key-value state that survives process restarts.
//!
//! The plant list filter keeps its parameters in a [`StateBag`] so a
//! restarted process resumes with the same filter active. Two bags are
//! provided: [`SqliteStateBag`], stored in the garden database, and
//! [`MemoryStateBag`] for tests and throwaway sessions.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use crate::{db::Database, error::Result, garden::Garden};

/// String values saved under fixed keys.
///
/// Implementations may block; callers on an async runtime should move calls
/// to the blocking pool.
pub trait StateBag: Send + Sync {
    /// Reads the value saved under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Saves `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// State bag kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryStateBag {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStateBag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateBag for MemoryStateBag {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// State bag stored in the `saved_state` table of a garden database.
#[derive(Debug, Clone)]
pub struct SqliteStateBag {
    db_path: PathBuf,
}

impl SqliteStateBag {
    /// Opens the state bag of the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl StateBag for SqliteStateBag {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Database::new(&self.db_path)?.get_state(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Database::new(&self.db_path)?.set_state(key, value)
    }
}

impl Garden {
    /// State bag sharing this garden's database.
    pub fn state_bag(&self) -> SqliteStateBag {
        SqliteStateBag::new(self.db_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_memory_state_bag_roundtrip() {
        let bag = MemoryStateBag::new();
        assert_eq!(bag.get("keyword").unwrap(), None);
        bag.set("keyword", "Ap").unwrap();
        bag.set("keyword", "Ba").unwrap();
        assert_eq!(bag.get("keyword").unwrap().as_deref(), Some("Ba"));
    }

    #[test]
    fn test_sqlite_state_bag_persists_across_instances() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        SqliteStateBag::new(temp_file.path())
            .set("grow_zone", "9")
            .expect("Failed to save state");

        let reopened = SqliteStateBag::new(temp_file.path());
        assert_eq!(reopened.get("grow_zone").unwrap().as_deref(), Some("9"));
        assert_eq!(reopened.get("keyword").unwrap(), None);
    }
}
