//! Display formatting functions and result types.
//!
//! This module provides wrapper types for collections, single-plant cards and
//! operation results, enabling consistent markdown formatting across output
//! contexts.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers, Cards │    │   Formatted     │
//! │ (Plant, ...)    │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Plants, Gardens, Plantings)
//! - [`card`]: Single planted-plant presentation (PlantingCard)
//! - [`results`]: Operation result types (CreateResult, WateredResult, ...)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod card;
pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

// Re-export commonly used types for convenience
pub use card::PlantingCard;
pub use collections::{Gardens, Plantings, Plants};
pub use datetime::{LocalDateTime, PlantingDate};
pub use results::{CreateResult, DeleteResult, SeedResult, WateredResult};
