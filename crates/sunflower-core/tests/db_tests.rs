use jiff::{SignedDuration, Timestamp};
use sunflower_core::{Database, GardenError, Plant};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn fruit_plants() -> Vec<Plant> {
    vec![
        Plant::new("banana", "Banana", "Yellow.", 9).with_watering_interval(3),
        Plant::new("apple", "Apple", "Crisp.", 3).with_watering_interval(30),
        Plant::new("apricot", "Apricot", "Soft.", 9),
    ]
}

fn day(n: i64) -> Timestamp {
    Timestamp::UNIX_EPOCH
        .checked_add(SignedDuration::from_hours(24 * n))
        .unwrap()
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert!(db.list_plants().expect("Failed to list plants").is_empty());
}

#[test]
fn test_reopen_existing_database() {
    let (temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants())
        .expect("Failed to insert plants");
    drop(db);

    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(reopened.list_plants().unwrap().len(), 3);
}

#[test]
fn test_insert_then_get_plant() {
    let (_temp_file, mut db) = create_test_db();
    let plant = Plant::new("malus-pumila", "Apple", "A sweet fruit.", 3)
        .with_watering_interval(30)
        .with_image_url("https://example.com/apple.jpg");

    db.insert_plants(std::slice::from_ref(&plant))
        .expect("Failed to insert plant");

    let stored = db
        .get_plant("malus-pumila")
        .expect("Failed to get plant")
        .expect("Plant should exist");
    assert_eq!(stored, plant);
}

#[test]
fn test_get_missing_plant() {
    let (_temp_file, db) = create_test_db();
    assert_eq!(db.get_plant("nope").expect("Failed to get plant"), None);
}

#[test]
fn test_insert_replaces_all_fields() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&[Plant::new("apple", "Apple", "Old.", 3).with_image_url("old.jpg")])
        .unwrap();

    let replacement = Plant::new("apple", "Green Apple", "New.", 5).with_watering_interval(12);
    db.insert_plants(std::slice::from_ref(&replacement))
        .unwrap();

    let stored = db.get_plant("apple").unwrap().unwrap();
    assert_eq!(stored, replacement);
    assert_eq!(stored.image_url, "");
    assert_eq!(db.list_plants().unwrap().len(), 1);
}

#[test]
fn test_replace_keeps_plantings_of_plant() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    db.create_garden_planting("apple", day(0)).unwrap();

    db.insert_plants(&[Plant::new("apple", "Apple", "Updated.", 3)])
        .expect("Replacing a planted plant should succeed");

    assert!(db.is_planted("apple").unwrap());
}

#[test]
fn test_invalid_batch_writes_nothing() {
    let (_temp_file, mut db) = create_test_db();
    let mut plants = fruit_plants();
    plants.push(Plant::new("", "Nameless", "", 1));

    let result = db.insert_plants(&plants);
    assert!(matches!(result, Err(GardenError::InvalidInput { .. })));
    assert!(db.list_plants().unwrap().is_empty());
}

#[test]
fn test_list_plants_ordered_by_name() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    let names: Vec<String> = db.list_plants().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Apple", "Apricot", "Banana"]);
}

#[test]
fn test_list_plants_with_grow_zone() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    let names: Vec<String> = db
        .list_plants_with_grow_zone(9)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Apricot", "Banana"]);
    assert!(db.list_plants_with_grow_zone(1).unwrap().is_empty());
}

#[test]
fn test_list_plants_with_keyword() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    let names: Vec<String> = db
        .list_plants_with_keyword("Ap")
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Apple", "Apricot"]);

    assert_eq!(db.list_plants_with_keyword("").unwrap().len(), 3);
    assert_eq!(db.list_plants_with_keyword("ap").unwrap().len(), 2);
    assert!(db.list_plants_with_keyword("pple").unwrap().is_empty());
}

#[test]
fn test_keyword_wildcards_match_literally() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    assert!(db.list_plants_with_keyword("%").unwrap().is_empty());
    assert!(db.list_plants_with_keyword("A_ple").unwrap().is_empty());
}

#[test]
fn test_create_garden_planting() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    let planting = db
        .create_garden_planting("apple", day(3))
        .expect("Failed to create planting");

    assert!(planting.id > 0);
    assert_eq!(planting.plant_id, "apple");
    assert_eq!(planting.plant_date, day(3));
    assert_eq!(planting.last_watering_date, day(3));

    let stored = db.get_garden_planting(planting.id).unwrap();
    assert_eq!(stored, Some(planting));
}

#[test]
fn test_create_planting_for_unknown_plant() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.create_garden_planting("ghost", day(0));
    assert!(
        matches!(result, Err(GardenError::UnknownPlant { ref plant_id }) if plant_id == "ghost"),
        "Expected referential error, got {result:?}"
    );
    assert!(db.list_garden_plantings().unwrap().is_empty());
}

#[test]
fn test_is_planted() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();

    assert!(!db.is_planted("apple").unwrap());
    db.create_garden_planting("apple", day(0)).unwrap();
    assert!(db.is_planted("apple").unwrap());
    assert!(!db.is_planted("banana").unwrap());
}

#[test]
fn test_remove_garden_planting() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    let planting = db.create_garden_planting("apple", day(0)).unwrap();

    db.remove_garden_planting(planting.id)
        .expect("Failed to remove planting");
    assert!(!db.is_planted("apple").unwrap());

    let again = db.remove_garden_planting(planting.id);
    assert!(matches!(again, Err(GardenError::PlantingNotFound { id }) if id == planting.id));
}

#[test]
fn test_list_garden_plantings_in_insertion_order() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    let first = db.create_garden_planting("banana", day(5)).unwrap();
    let second = db.create_garden_planting("apple", day(1)).unwrap();

    let ids: Vec<u64> = db
        .list_garden_plantings()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, [first.id, second.id]);
}

#[test]
fn test_planted_gardens_only_planted_plants() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    db.create_garden_planting("banana", day(0)).unwrap();
    db.create_garden_planting("apple", day(2)).unwrap();
    db.create_garden_planting("apple", day(1)).unwrap();

    let gardens = db.planted_gardens().expect("Failed to load gardens");
    let names: Vec<&str> = gardens.iter().map(|g| g.plant.name.as_str()).collect();
    assert_eq!(names, ["Apple", "Banana"]);

    let apple = &gardens[0];
    assert_eq!(apple.garden_plantings.len(), 2);
    assert!(apple.garden_plantings.iter().all(|p| p.plant_id == "apple"));
    assert_eq!(apple.garden_plantings[0].plant_date, day(1));
    assert_eq!(apple.current_planting().unwrap().plant_date, day(2));
}

#[test]
fn test_planted_gardens_drops_plant_after_last_removal() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    let only = db.create_garden_planting("apricot", day(0)).unwrap();
    db.create_garden_planting("banana", day(0)).unwrap();

    db.remove_garden_planting(only.id).unwrap();

    let gardens = db.planted_gardens().unwrap();
    assert_eq!(gardens.len(), 1);
    assert_eq!(gardens[0].plant.id, "banana");
}

#[test]
fn test_touch_watering() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    let planting = db.create_garden_planting("apple", day(0)).unwrap();

    let watered = db
        .touch_watering(planting.id, day(4))
        .expect("Failed to water planting");
    assert_eq!(watered.plant_date, day(0));
    assert_eq!(watered.last_watering_date, day(4));

    assert!(matches!(
        db.touch_watering(999, day(4)),
        Err(GardenError::PlantingNotFound { id: 999 })
    ));
}

#[test]
fn test_plantings_needing_water() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plants(&fruit_plants()).unwrap();
    // banana every 3 days, apricot every 7, apple every 30
    let banana = db.create_garden_planting("banana", day(0)).unwrap();
    let apricot = db.create_garden_planting("apricot", day(0)).unwrap();
    db.create_garden_planting("apple", day(0)).unwrap();

    let due: Vec<u64> = db
        .plantings_needing_water(day(8))
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(due, [banana.id, apricot.id]);

    db.touch_watering(banana.id, day(7)).unwrap();
    let due: Vec<u64> = db
        .plantings_needing_water(day(8))
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(due, [apricot.id]);

    assert!(db.plantings_needing_water(day(7)).unwrap().is_empty());
}

#[test]
fn test_saved_state() {
    let (_temp_file, db) = create_test_db();

    assert_eq!(db.get_state("keyword").unwrap(), None);
    db.set_state("keyword", "Ap").unwrap();
    db.set_state("keyword", "Ba").unwrap();
    assert_eq!(db.get_state("keyword").unwrap().as_deref(), Some("Ba"));
}
