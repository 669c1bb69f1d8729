//! High-level garden API over the plant catalog and the user's plantings.
//!
//! This module provides the main [`Garden`] interface. The garden is the
//! central coordinator between callers and the database: every storage call
//! runs on Tokio's blocking pool against its own SQLite connection, and every
//! committed mutation is announced to the live queries through a
//! [`ChangeNotifier`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Callers     │    │     Garden      │    │    Database     │
//! │ (CLI, filters)  │───▶│ (plant_ops,     │───▶│   (via db/)     │
//! │                 │◀───│  planting_ops)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    Subscriptions         ChangeNotifier         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Garden`] instances with configuration
//! - [`plant_ops`]: Plant catalog reads, live queries and bulk upsert
//! - [`planting_ops`]: Garden plantings, watering and the plant/planting join
//!
//! Change notification is immediate for writes made through a [`Garden`]
//! value and its clones. Writes from other gardens over the same file, and
//! from other processes, are picked up by polling SQLite's `data_version`,
//! so live queries see them within a fraction of a second.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sunflower_core::{GardenBuilder, Plant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let garden = GardenBuilder::new()
//!     .with_database_path("/tmp/garden.db")
//!     .build()
//!     .await?;
//!
//! garden
//!     .insert_plants(vec![Plant::new("malus-pumila", "Apple", "An apple tree.", 3)])
//!     .await?;
//!
//! let mut planted = garden.watch_is_planted("malus-pumila");
//! assert_eq!(planted.next().await.transpose()?, Some(false));
//!
//! garden.create_garden_planting("malus-pumila").await?;
//! assert_eq!(planted.next().await.transpose()?, Some(true));
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

pub mod builder;
pub mod plant_ops;
pub mod planting_ops;


pub use builder::GardenBuilder;

use crate::{
    db::Database,
    error::{GardenError, Result},
    live::{spawn_live_query, ChangeNotifier, ExternalChanges, Subscription, Table},
};

/// Main garden interface for managing plants and plantings.
#[derive(Debug, Clone)]
pub struct Garden {
    pub(crate) db_path: PathBuf,
    pub(crate) notifier: ChangeNotifier,
}

impl Garden {
    /// Creates a new garden over an initialized database file.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Path of the SQLite database backing this garden.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        run_blocking(self.db_path.clone(), operation).await
    }

    /// Like [`Self::with_database`], then announces a change to `tables`
    /// once the operation has succeeded.
    pub(crate) async fn mutate<T, F>(&self, tables: &[Table], operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let value = self.with_database(operation).await?;
        self.notifier.notify(tables);
        Ok(value)
    }

    /// Starts a live query re-running `query` whenever `tables` change.
    pub(crate) fn live_query<T, F>(&self, tables: &'static [Table], query: F) -> Subscription<T>
    where
        T: Clone + PartialEq + Send + 'static,
        F: Fn(&mut Database) -> Result<T> + Send + Sync + 'static,
    {
        let db_path = self.db_path.clone();
        let query = Arc::new(query);
        let external: Box<dyn ExternalChanges> = Box::new(DataVersionPoller::new(db_path.clone()));
        spawn_live_query(&self.notifier, tables, Some(external), move || {
            let query = Arc::clone(&query);
            run_blocking(db_path.clone(), move |db| (*query)(db))
        })
    }
}

/// Watches the database file for commits made by other connections.
///
/// Holds its own connection, opened on first use; SQLite changes that
/// connection's `data_version` whenever any other connection commits.
struct DataVersionPoller {
    db_path: PathBuf,
    db: Option<Database>,
    last_version: i64,
}

impl DataVersionPoller {
    fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            db: None,
            last_version: 0,
        }
    }
}

impl ExternalChanges for DataVersionPoller {
    fn changed(&mut self) -> Result<bool> {
        match self.db.as_ref().map(Database::data_version) {
            Some(version) => {
                let version = version?;
                let changed = version != self.last_version;
                self.last_version = version;
                Ok(changed)
            }
            None => {
                let db = Database::new(&self.db_path)?;
                self.last_version = db.data_version()?;
                self.db = Some(db);
                Ok(false)
            }
        }
    }
}

async fn run_blocking<T, F>(db_path: PathBuf, operation: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
{
    task::spawn_blocking(move || {
        let mut db = Database::new(&db_path)?;
        operation(&mut db)
    })
    .await
    .map_err(GardenError::join)?
}
