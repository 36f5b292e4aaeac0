use tempfile::TempDir;

use bucketlist::{
    config::PlannerConfig,
    destination::{DestinationDraft, DestinationPatch},
    persist::{SlotStorage, sqlite::SqliteSlots},
    planner::Planner,
};

#[test]
fn sqlite_hydrate_round_trips_collection_and_order() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("bucketlist.db");

    let mut planner = Planner::hydrate(SqliteSlots::open(&db_path).expect("open"), PlannerConfig::default());
    let (kyoto, _) = planner
        .create(DestinationDraft::at(35.0116, 135.7681).titled("Kyoto"))
        .expect("create kyoto");
    let (lima, _) = planner
        .create(DestinationDraft::at(-12.0464, -77.0428).titled("Lima"))
        .expect("create lima");
    planner.create(DestinationDraft::at(-13.1631, -72.545)).expect("create pin");
    planner
        .update(&kyoto, &DestinationPatch::completion(true))
        .expect("complete");
    planner.remove(&lima).expect("remove");
    let expected = planner.records().to_vec();
    drop(planner);

    let reopened = Planner::hydrate(SqliteSlots::open(&db_path).expect("reopen"), PlannerConfig::default());
    assert_eq!(reopened.records(), expected.as_slice());
    assert!(reopened.get(&kyoto).expect("kyoto").completed);
}

#[test]
fn corrupt_slot_hydrates_empty() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("corrupt.db");

    let mut slots = SqliteSlots::open(&db_path).expect("open");
    slots.save("bucketList", "{not json").expect("save");
    drop(slots);

    let planner = Planner::hydrate(SqliteSlots::open(&db_path).expect("reopen"), PlannerConfig::default());
    assert!(planner.is_empty());
}

#[test]
fn slots_are_keyed_and_overwritten() {
    let mut slots = SqliteSlots::open_in_memory().expect("open");
    assert_eq!(slots.load("bucketList").expect("load"), None);

    slots.save("bucketList", "[]").expect("save");
    slots.save("bucketList", "[1]").expect("overwrite");
    slots.save("other", "x").expect("save other");

    assert_eq!(slots.load("bucketList").expect("load").as_deref(), Some("[1]"));
    assert!(slots.updated_ms("bucketList").expect("ts").is_some());

    slots.clear("bucketList").expect("clear");
    assert_eq!(slots.load("bucketList").expect("load"), None);
    assert_eq!(slots.load("other").expect("load").as_deref(), Some("x"));
}

#[test]
fn custom_storage_key_is_honoured() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("keyed.db");
    let config = PlannerConfig {
        storage_key: "trip-2027".to_string(),
        ..PlannerConfig::default()
    };

    let mut planner = Planner::hydrate(SqliteSlots::open(&db_path).expect("open"), config.clone());
    planner.create(DestinationDraft::at(1.0, 1.0)).expect("create");
    drop(planner);

    let slots = SqliteSlots::open(&db_path).expect("reopen");
    assert!(slots.load("trip-2027").expect("load").is_some());
    assert_eq!(slots.load("bucketList").expect("load"), None);

    let default_key = Planner::hydrate(SqliteSlots::open(&db_path).expect("reopen"), PlannerConfig::default());
    assert!(default_key.is_empty());
    let keyed = Planner::hydrate(slots, config);
    assert_eq!(keyed.len(), 1);
}
