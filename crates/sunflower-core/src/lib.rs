//! Core library for the Sunflower garden tracking application.
//!
//! This crate provides the persistence and query layer for a plant catalog
//! and the plants a user has put in their garden: SQLite storage, live
//! queries that push fresh results as the tables change, a grow-zone and
//! keyword filter whose state survives restarts, and the watering predicate.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): [`Plant`], [`GardenPlanting`] and the
//!   [`PlantAndGardenPlantings`] join
//! - **Storage** ([`db`]): blocking SQLite queries over one connection
//! - **Garden** ([`garden`]): async facade, runs storage on the blocking
//!   pool and announces committed changes
//! - **Live queries** ([`live`]): [`Subscription`] handles fed by background
//!   producers
//! - **Filters** ([`filter`]): [`PlantListFilter`] over a [`StateBag`]
//! - **Display** ([`display`]): markdown formatting for terminals
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sunflower_core::GardenBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let garden = GardenBuilder::new()
//!     .with_database_path("garden.db")
//!     .build()
//!     .await?;
//!
//! garden.seed_bundled().await?;
//! let planting = garden.create_garden_planting("malus-pumila").await?;
//! println!("Planted with ID {}", planting.id);
//!
//! let mut gardens = garden.watch_planted_gardens();
//! while let Some(result) = gardens.next().await {
//!     for entry in result? {
//!         println!("{} ({} plantings)", entry.plant.name, entry.garden_plantings.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod filter;
pub mod garden;
pub mod live;
pub mod models;
pub mod seed;
pub mod state;

// Re-export commonly used types
pub use db::Database;
pub use display::{Gardens, PlantingCard, PlantingDate, Plantings, Plants};
pub use error::{GardenError, Result};
pub use filter::{PlantListFilter, NO_GROW_ZONE, NO_KEYWORD};
pub use garden::{Garden, GardenBuilder};
pub use live::Subscription;
pub use models::{should_be_watered, GardenPlanting, Plant, PlantAndGardenPlantings};
pub use state::{MemoryStateBag, SqliteStateBag, StateBag};
