#![allow(dead_code)]

use std::time::Duration;

use sunflower_core::{Garden, GardenBuilder, Plant, Subscription};
use tempfile::TempDir;

/// How long a test waits for a live query to deliver.
pub const EMIT_TIMEOUT: Duration = Duration::from_secs(5);
/// How long a test waits to be sure nothing more is delivered.
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Helper function to create a test garden
pub async fn create_test_garden() -> (TempDir, Garden) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let garden = GardenBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create garden");
    (temp_dir, garden)
}

/// Plants named "Apple", "Apricot" and "Banana"; the last two in zone 9.
pub fn fruit_plants() -> Vec<Plant> {
    vec![
        Plant::new("apple", "Apple", "Crisp.", 3),
        Plant::new("apricot", "Apricot", "Soft.", 9),
        Plant::new("banana", "Banana", "Yellow.", 9),
    ]
}

/// Waits for the next successful emission.
pub async fn next_value<T>(subscription: &mut Subscription<T>) -> T {
    tokio::time::timeout(EMIT_TIMEOUT, subscription.next())
        .await
        .expect("Timed out waiting for live query")
        .expect("Live query ended")
        .expect("Live query failed")
}

/// Reads emissions until `accept` matches one, returning it.
pub async fn next_matching<T, F>(subscription: &mut Subscription<T>, accept: F) -> T
where
    F: Fn(&T) -> bool,
{
    loop {
        let value = next_value(subscription).await;
        if accept(&value) {
            return value;
        }
    }
}

/// Drains emissions until the subscription stays quiet, returning the last.
pub async fn settle<T>(subscription: &mut Subscription<T>, mut last: T) -> T {
    while let Ok(Some(item)) = tokio::time::timeout(QUIET_PERIOD, subscription.next()).await {
        last = item.expect("Live query failed");
    }
    last
}

pub fn names(plants: &[Plant]) -> Vec<&str> {
    plants.iter().map(|p| p.name.as_str()).collect()
}
