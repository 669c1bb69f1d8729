mod common;

use std::{sync::Arc, time::Duration};

use common::{create_test_garden, fruit_plants, names, next_matching, next_value, settle};
use sunflower_core::{
    GardenError, MemoryStateBag, PlantListFilter, StateBag, NO_GROW_ZONE, NO_KEYWORD,
};

async fn seeded_filter(state: Arc<dyn StateBag>) -> (tempfile::TempDir, PlantListFilter) {
    let (temp_dir, garden) = create_test_garden().await;
    garden.insert_plants(fruit_plants()).await.unwrap();
    let filter = PlantListFilter::restore(garden, state)
        .await
        .expect("Failed to restore filter");
    (temp_dir, filter)
}

#[tokio::test]
async fn test_fresh_filter_is_unfiltered() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;

    assert_eq!(filter.grow_zone(), NO_GROW_ZONE);
    assert_eq!(filter.keyword(), NO_KEYWORD);
    assert!(!filter.is_filtered());

    let mut plants = filter.plants();
    assert_eq!(next_value(&mut plants).await.len(), 3);
}

#[tokio::test]
async fn test_grow_zone_filter_switches_plant_list() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    let mut plants = filter.plants();
    assert_eq!(next_value(&mut plants).await.len(), 3);

    filter.set_grow_zone(9).await.unwrap();
    assert!(filter.is_filtered());
    let zoned = next_matching(&mut plants, |p| p.len() == 2).await;
    assert_eq!(names(&zoned), ["Apricot", "Banana"]);

    filter.clear_grow_zone().await.unwrap();
    next_matching(&mut plants, |p| p.len() == 3).await;
}

#[tokio::test]
async fn test_rapid_switch_ends_on_latest_value() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    let mut plants = filter.plants();
    let first = next_value(&mut plants).await;

    filter.set_grow_zone(9).await.unwrap();
    filter.clear_grow_zone().await.unwrap();

    let last = settle(&mut plants, first).await;
    assert_eq!(names(&last), ["Apple", "Apricot", "Banana"]);
}

#[tokio::test]
async fn test_read_after_clear_never_sees_zone_results() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    let mut plants = filter.plants();
    assert_eq!(next_value(&mut plants).await.len(), 3);

    filter.set_grow_zone(9).await.unwrap();
    // Give the zone query time to land in the subscription's buffer
    tokio::time::sleep(Duration::from_millis(300)).await;
    filter.clear_grow_zone().await.unwrap();

    let next = next_value(&mut plants).await;
    assert_eq!(names(&next), ["Apple", "Apricot", "Banana"]);
}

#[tokio::test]
async fn test_filtered_list_follows_catalog_changes() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    filter.set_grow_zone(3).await.unwrap();
    let mut plants = filter.plants();
    assert_eq!(names(&next_value(&mut plants).await), ["Apple"]);

    filter
        .garden()
        .insert_plants(vec![sunflower_core::Plant::new("beet", "Beet", "", 3)])
        .await
        .unwrap();
    let updated = next_matching(&mut plants, |p| p.len() == 2).await;
    assert_eq!(names(&updated), ["Apple", "Beet"]);
}

#[tokio::test]
async fn test_toggle_grow_zone() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;

    assert!(filter.toggle_grow_zone(9).await.unwrap());
    assert_eq!(filter.grow_zone(), 9);

    assert!(!filter.toggle_grow_zone(9).await.unwrap());
    assert_eq!(filter.grow_zone(), NO_GROW_ZONE);
}

#[tokio::test]
async fn test_negative_grow_zone_rejected() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    filter.set_grow_zone(9).await.unwrap();

    let result = filter.set_grow_zone(-5).await;
    assert!(matches!(result, Err(GardenError::InvalidInput { .. })));
    assert_eq!(filter.grow_zone(), 9);
}

#[tokio::test]
async fn test_keyword_search() {
    let (_temp_dir, filter) = seeded_filter(Arc::new(MemoryStateBag::new())).await;
    let mut results = filter.search_plants();
    assert_eq!(next_value(&mut results).await.len(), 3);

    filter.set_keyword("Ap").await.unwrap();
    let found = next_matching(&mut results, |p| p.len() == 2).await;
    assert_eq!(names(&found), ["Apple", "Apricot"]);

    filter.set_keyword("Zucchini").await.unwrap();
    next_matching(&mut results, Vec::is_empty).await;

    filter.set_keyword(NO_KEYWORD).await.unwrap();
    next_matching(&mut results, |p| p.len() == 3).await;
}

#[tokio::test]
async fn test_filter_state_survives_restore() {
    let (_temp_dir, garden) = create_test_garden().await;
    garden.insert_plants(fruit_plants()).await.unwrap();

    let filter = PlantListFilter::restore(garden.clone(), Arc::new(garden.state_bag()))
        .await
        .unwrap();
    filter.set_grow_zone(9).await.unwrap();
    filter.set_keyword("Ba").await.unwrap();
    drop(filter);

    let restored = PlantListFilter::restore(garden.clone(), Arc::new(garden.state_bag()))
        .await
        .unwrap();
    assert_eq!(restored.grow_zone(), 9);
    assert_eq!(restored.keyword(), "Ba");

    let mut plants = restored.plants();
    assert_eq!(next_value(&mut plants).await.len(), 2);
    let mut results = restored.search_plants();
    assert_eq!(names(&next_value(&mut results).await), ["Banana"]);
}

#[tokio::test]
async fn test_unreadable_saved_zone_falls_back_to_unfiltered() {
    let state = Arc::new(MemoryStateBag::new());
    state.set("grow_zone", "nine").unwrap();

    let (_temp_dir, filter) = seeded_filter(state).await;
    assert_eq!(filter.grow_zone(), NO_GROW_ZONE);
}
