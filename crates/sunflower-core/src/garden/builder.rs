//! Builder for creating and configuring Garden instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Garden;
use crate::{
    db::Database,
    error::{GardenError, Result},
};

/// Builder for creating and configuring Garden instances.
#[derive(Debug, Clone)]
pub struct GardenBuilder {
    database_path: Option<PathBuf>,
}

impl GardenBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sunflower/sunflower.db` or
    /// `~/.local/share/sunflower/sunflower.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configured garden, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `GardenError::Database` if database initialization fails
    pub async fn build(self) -> Result<Garden> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GardenError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening garden database at {}", db_path.display());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), GardenError>(())
        })
        .await
        .map_err(GardenError::join)??;

        Ok(Garden::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("sunflower")
            .place_data_file("sunflower.db")
            .map_err(|e| GardenError::XdgDirectory(e.to_string()))
    }
}

impl Default for GardenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
