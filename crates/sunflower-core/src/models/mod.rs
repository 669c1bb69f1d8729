//! Data models for plants and garden plantings.
//!
//! This module contains the core domain models of the garden: the plant
//! catalog ([`Plant`]), the user's plantings ([`GardenPlanting`]) and the
//! non-persisted join of the two ([`PlantAndGardenPlantings`]). Display
//! implementations for these models live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use sunflower_core::models::{GardenPlanting, Plant};
//! use jiff::Timestamp;
//!
//! let plant = Plant::new("malus-pumila", "Apple", "An apple tree.", 3).with_watering_interval(30);
//! let planting = GardenPlanting {
//!     id: 1,
//!     plant_id: plant.id.clone(),
//!     plant_date: Timestamp::UNIX_EPOCH,
//!     last_watering_date: Timestamp::UNIX_EPOCH,
//! };
//!
//! // Thirty days have not elapsed yet
//! let now = Timestamp::from_second(86_400 * 30).unwrap();
//! assert!(!plant.should_be_watered(now, planting.last_watering_date));
//! ```

pub mod garden_planting;
pub mod plant;
pub mod plant_and_garden_plantings;


pub use garden_planting::GardenPlanting;
pub use plant::{should_be_watered, Plant, DEFAULT_WATERING_INTERVAL};
pub use plant_and_garden_plantings::PlantAndGardenPlantings;
