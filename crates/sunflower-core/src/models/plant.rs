//! Plant model definition and the watering predicate.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Number of days between waterings when a plant does not specify one.
pub const DEFAULT_WATERING_INTERVAL: i32 = 7;

/// A plant from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plant {
    /// Unique, immutable identifier of the plant (e.g. `malus-pumila`)
    pub id: String,

    /// Common name
    pub name: String,

    /// Free-form description, may contain markup
    pub description: String,

    /// Climate suitability classification
    pub grow_zone_number: i32,

    /// How often the plant should be watered, in days
    #[serde(default = "default_watering_interval")]
    pub watering_interval: i32,

    /// Image reference, empty when the plant has no picture
    #[serde(default)]
    pub image_url: String,
}

fn default_watering_interval() -> i32 {
    DEFAULT_WATERING_INTERVAL
}

impl Plant {
    /// Creates a plant with the default watering interval and no image.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        grow_zone_number: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            grow_zone_number,
            watering_interval: DEFAULT_WATERING_INTERVAL,
            image_url: String::new(),
        }
    }

    /// Sets the watering interval in days.
    pub fn with_watering_interval(mut self, days: i32) -> Self {
        self.watering_interval = days;
        self
    }

    /// Sets the image reference.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Determines if the plant should be watered at `since`, given when it
    /// was last watered.
    pub fn should_be_watered(&self, since: Timestamp, last_watering_date: Timestamp) -> bool {
        should_be_watered(since, last_watering_date, self.watering_interval)
    }
}

/// Returns true iff `since` lies strictly after `last_watering_date` plus
/// `watering_interval` days. A day is 24 hours of absolute time.
///
/// ```rust
/// use jiff::Timestamp;
/// use sunflower_core::models::should_be_watered;
///
/// let day = |n: i64| Timestamp::from_second(n * 86_400).unwrap();
/// assert!(!should_be_watered(day(7), day(0), 7));
/// assert!(should_be_watered(day(8), day(0), 7));
/// ```
pub fn should_be_watered(
    since: Timestamp,
    last_watering_date: Timestamp,
    watering_interval: i32,
) -> bool {
    let interval = SignedDuration::from_hours(i64::from(watering_interval) * 24);
    last_watering_date
        .checked_add(interval)
        .is_ok_and(|due| since > due)
}
