//! Filter and search state for the plant list.
//!
//! [`PlantListFilter`] owns two independently observable parameters, the
//! grow zone and the search keyword, and derives live plant lists from them.
//! Each parameter is written to a [`StateBag`] before it is published, so a
//! restarted process resumes with the same filter active.
//!
//! Switching is "latest wins": when a parameter changes, the query for the
//! previous value is dropped and none of its results are delivered
//! afterwards.

use std::sync::Arc;

use log::{debug, warn};
use tokio::{
    sync::{watch, Mutex},
    task,
};

use crate::{
    error::{GardenError, Result},
    garden::Garden,
    live::{switch_latest, Subscription},
    models::Plant,
    state::StateBag,
};

/// Grow zone value meaning "no grow zone filter".
pub const NO_GROW_ZONE: i32 = -1;
/// Keyword value meaning "no search".
pub const NO_KEYWORD: &str = "";
/// State bag key of the grow zone filter.
pub const GROW_ZONE_STATE_KEY: &str = "grow_zone";
/// State bag key of the search keyword.
pub const KEYWORD_STATE_KEY: &str = "keyword";

/// Persisted grow-zone filter and keyword search over the plant catalog.
pub struct PlantListFilter {
    garden: Garden,
    state: Arc<dyn StateBag>,
    grow_zone: watch::Sender<i32>,
    keyword: watch::Sender<String>,
    // Serializes persist-then-publish so the bag and the channels agree
    write_lock: Mutex<()>,
}

impl PlantListFilter {
    /// Creates a filter, resuming whatever parameters `state` holds.
    pub async fn restore(garden: Garden, state: Arc<dyn StateBag>) -> Result<Self> {
        let bag = Arc::clone(&state);
        let (grow_zone, keyword) = task::spawn_blocking(move || {
            Ok::<_, GardenError>((bag.get(GROW_ZONE_STATE_KEY)?, bag.get(KEYWORD_STATE_KEY)?))
        })
        .await
        .map_err(GardenError::join)??;

        let grow_zone = match grow_zone {
            Some(saved) => saved.parse::<i32>().unwrap_or_else(|_| {
                warn!("Ignoring unreadable saved grow zone {saved:?}");
                NO_GROW_ZONE
            }),
            None => NO_GROW_ZONE,
        };
        let keyword = keyword.unwrap_or_else(|| NO_KEYWORD.to_string());
        debug!("Restored plant list filter: grow zone {grow_zone}, keyword {keyword:?}");

        Ok(Self {
            garden,
            state,
            grow_zone: watch::Sender::new(grow_zone),
            keyword: watch::Sender::new(keyword),
            write_lock: Mutex::new(()),
        })
    }

    /// The garden whose catalog is being filtered.
    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Current grow zone, [`NO_GROW_ZONE`] when unfiltered.
    pub fn grow_zone(&self) -> i32 {
        *self.grow_zone.borrow()
    }

    /// Current search keyword, empty when not searching.
    pub fn keyword(&self) -> String {
        self.keyword.borrow().clone()
    }

    /// Returns true while a grow zone filter is active.
    pub fn is_filtered(&self) -> bool {
        self.grow_zone() != NO_GROW_ZONE
    }

    /// Observes the grow zone parameter.
    pub fn watch_grow_zone(&self) -> watch::Receiver<i32> {
        self.grow_zone.subscribe()
    }

    /// Observes the keyword parameter.
    pub fn watch_keyword(&self) -> watch::Receiver<String> {
        self.keyword.subscribe()
    }

    /// Shows only plants of `grow_zone_number`.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::InvalidInput` for a negative zone; use
    /// [`Self::clear_grow_zone`] to remove the filter.
    pub async fn set_grow_zone(&self, grow_zone_number: i32) -> Result<()> {
        if grow_zone_number < 0 {
            return Err(GardenError::invalid_input("grow_zone")
                .with_reason(format!("Grow zone must not be negative, got {grow_zone_number}")));
        }
        self.store_grow_zone(grow_zone_number).await
    }

    /// Removes the grow zone filter.
    pub async fn clear_grow_zone(&self) -> Result<()> {
        self.store_grow_zone(NO_GROW_ZONE).await
    }

    /// Clears the filter if one is active, otherwise filters on
    /// `grow_zone_number`. Returns whether a filter is active afterwards.
    pub async fn toggle_grow_zone(&self, grow_zone_number: i32) -> Result<bool> {
        if self.is_filtered() {
            self.clear_grow_zone().await?;
            Ok(false)
        } else {
            self.set_grow_zone(grow_zone_number).await?;
            Ok(true)
        }
    }

    /// Searches plants by name prefix; an empty keyword shows every plant.
    pub async fn set_keyword(&self, keyword: impl Into<String>) -> Result<()> {
        let keyword = keyword.into();
        let _guard = self.write_lock.lock().await;
        debug!("set_keyword: {:?} -> {keyword:?}", *self.keyword.borrow());
        self.persist(KEYWORD_STATE_KEY, keyword.clone()).await?;
        self.keyword.send_replace(keyword);
        Ok(())
    }

    /// Live plant list honoring the grow zone filter.
    pub fn plants(&self) -> Subscription<Vec<Plant>> {
        let garden = self.garden.clone();
        switch_latest(self.grow_zone.subscribe(), move |zone| {
            if zone == NO_GROW_ZONE {
                garden.watch_plants()
            } else {
                garden.watch_plants_with_grow_zone(zone)
            }
        })
    }

    /// Live plant list honoring the search keyword.
    pub fn search_plants(&self) -> Subscription<Vec<Plant>> {
        let garden = self.garden.clone();
        switch_latest(self.keyword.subscribe(), move |keyword: String| {
            if keyword == NO_KEYWORD {
                garden.watch_plants()
            } else {
                garden.watch_plants_with_keyword(&keyword)
            }
        })
    }

    async fn store_grow_zone(&self, grow_zone_number: i32) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        debug!("set_grow_zone: {} -> {grow_zone_number}", *self.grow_zone.borrow());
        self.persist(GROW_ZONE_STATE_KEY, grow_zone_number.to_string())
            .await?;
        self.grow_zone.send_replace(grow_zone_number);
        Ok(())
    }

    async fn persist(&self, key: &'static str, value: String) -> Result<()> {
        let state = Arc::clone(&self.state);
        task::spawn_blocking(move || state.set(key, &value))
            .await
            .map_err(GardenError::join)?
    }
}
