use std::sync::{Arc, Mutex};

use tracing_test::traced_test;

use bucketlist::{
    config::PlannerConfig,
    core::progress::Achievement,
    destination::DestinationDraft,
    op::Change,
    persist::{PersistError, PersistResult, SlotStorage, memory::MemorySlots},
    planner::{Planner, PlannerError},
    types::{DestinationId, Revision},
    view::{EditFields, Intent, ListEntry, ListView, MapView, Marker, ViewSet},
};

struct BrokenSlots;

impl SlotStorage for BrokenSlots {
    fn load(&self, _key: &str) -> PersistResult<Option<String>> {
        Err(PersistError::Message("disk unplugged".to_string()))
    }

    fn save(&mut self, _key: &str, _value: &str) -> PersistResult<()> {
        Err(PersistError::Message("disk unplugged".to_string()))
    }
}

#[derive(Clone, Default)]
struct RecordingMap(Arc<Mutex<Vec<(Revision, Vec<Marker>)>>>);

impl MapView for RecordingMap {
    fn render_markers(&mut self, markers: &[Marker], revision: Revision) {
        self.0.lock().expect("lock").push((revision, markers.to_vec()));
    }
}

#[derive(Clone, Default)]
struct RecordingList(Arc<Mutex<Vec<(Revision, Vec<ListEntry>)>>>);

impl ListView for RecordingList {
    fn render_list(&mut self, entries: &[ListEntry], revision: Revision) {
        self.0.lock().expect("lock").push((revision, entries.to_vec()));
    }
}

fn planner() -> Planner {
    Planner::hydrate(MemorySlots::new(), PlannerConfig::default())
}

#[test]
fn edit_intent_is_refused_on_completed_destination() {
    let mut planner = planner();
    let (id, _) = planner.create(DestinationDraft::at(27.1751, 78.0421)).unwrap();
    planner.dispatch(Intent::Toggle { id: id.clone() }).unwrap();

    let fields = EditFields {
        title: "Taj Mahal".to_string(),
        description: String::new(),
        emoji: "🏛️".to_string(),
    };
    let err = planner
        .dispatch(Intent::Edit { id: id.clone(), fields: fields.clone() })
        .unwrap_err();
    assert!(matches!(err, PlannerError::EditLocked(ref locked) if *locked == id));
    assert_eq!(planner.get(&id).unwrap().title, "");

    planner.dispatch(Intent::Toggle { id: id.clone() }).unwrap();
    planner.dispatch(Intent::Edit { id: id.clone(), fields }).unwrap();
    assert_eq!(planner.get(&id).unwrap().title, "Taj Mahal");
    assert_eq!(planner.get(&id).unwrap().emoji, "🏛️");
}

#[test]
fn intents_cover_the_full_lifecycle() {
    let mut planner = planner();
    let added = planner
        .dispatch(Intent::Add { lat: -22.9068, lng: -43.1729 })
        .unwrap()
        .unwrap();
    let Change::Created { id } = added.change.clone() else {
        panic!("expected create, got {added:?}");
    };

    let toggled = planner.dispatch(Intent::Toggle { id: id.clone() }).unwrap().unwrap();
    assert_eq!(toggled.change, Change::Updated { id: id.clone() });
    assert_eq!(planner.achievements(), vec![Achievement::Explorer, Achievement::DreamAchiever]);

    let removed = planner.dispatch(Intent::Delete { id: id.clone() }).unwrap().unwrap();
    assert_eq!(removed.change, Change::Removed { id });
    assert!(planner.is_empty());
    assert!(planner.achievements().is_empty());

    let ghost = DestinationId::from("ghost");
    assert!(planner.dispatch(Intent::Toggle { id: ghost.clone() }).unwrap().is_none());
    assert!(planner.dispatch(Intent::Delete { id: ghost }).unwrap().is_none());
}

#[test]
fn both_views_render_the_same_snapshot() {
    let map = RecordingMap::default();
    let list = RecordingList::default();
    let mut planner = planner().with_views(ViewSet::new().with_map(map.clone()).with_list(list.clone()));

    let (id, _) = planner
        .create(DestinationDraft::at(-3.4653, -62.2159).described("Amazon"))
        .unwrap();
    planner.toggle(&id).unwrap();

    let maps = map.0.lock().unwrap();
    let lists = list.0.lock().unwrap();
    assert_eq!(maps.len(), 3);
    assert_eq!(lists.len(), 3);
    assert_eq!(maps[0].0, 0);
    assert!(maps[0].1.is_empty());

    let (rev, markers) = maps.last().unwrap();
    let (list_rev, entries) = lists.last().unwrap();
    assert_eq!(rev, list_rev);
    assert_eq!(*rev, planner.revision());
    assert_eq!(markers[0].label, "New Location");
    assert!(markers[0].completed && !markers[0].editable);
    assert_eq!(entries[0].label, "Untitled Location");
    assert_eq!(entries[0].description.as_deref(), Some("Amazon"));
    assert_eq!(markers[0].id, entries[0].id);
}

#[test]
fn persist_happens_on_every_mutation() {
    let slots = MemorySlots::new();
    let mut planner = Planner::hydrate(slots.clone(), PlannerConfig::default());
    assert_eq!(slots.get("bucketList"), None);

    let (id, _) = planner.create(DestinationDraft::at(0.0, 0.0).titled("Null Island")).unwrap();
    assert!(slots.get("bucketList").unwrap().contains("Null Island"));

    planner.toggle(&id).unwrap();
    assert!(slots.get("bucketList").unwrap().contains("\"completed\":true"));

    planner.remove(&id).unwrap();
    assert_eq!(slots.get("bucketList").as_deref(), Some("[]"));
}

#[test]
#[traced_test]
fn unreadable_storage_hydrates_empty_and_surfaces_persist_errors() {
    let mut planner = Planner::hydrate(BrokenSlots, PlannerConfig::default());
    assert!(planner.is_empty());
    assert!(logs_contain("failed to read stored collection"));

    let err = planner.create(DestinationDraft::at(1.0, 2.0)).unwrap_err();
    assert!(matches!(err, PlannerError::Persist { applied: Some(_), .. }));
    // Applied in memory even though the write failed.
    assert_eq!(planner.len(), 1);
    let id = err.created_id().expect("created id").clone();
    assert!(planner.get(&id).is_some());
    assert_eq!(err.applied().map(|a| a.revision), Some(planner.revision()));
    assert!(logs_contain("persist failed"));

    let err = planner.toggle(&id).unwrap_err();
    assert!(err.created_id().is_none());
    assert!(planner.get(&id).expect("record").completed);

    // Unknown id: nothing applied, but the save was still attempted.
    let err = planner.remove(&"missing".into()).unwrap_err();
    assert!(matches!(err, PlannerError::Persist { applied: None, .. }));
}

#[test]
#[traced_test]
fn corrupt_slot_is_logged_and_discarded() {
    let slots = MemorySlots::new().with_slot("bucketList", "[{\"id\": 1}]");
    let planner = Planner::hydrate(slots, PlannerConfig::default());
    assert!(planner.is_empty());
    assert!(logs_contain("discarding unreadable collection"));
}

#[test]
fn hydrate_picks_up_previous_session() {
    let slots = MemorySlots::new();
    {
        let mut first = Planner::hydrate(slots.clone(), PlannerConfig::default());
        first.create(DestinationDraft::at(51.5074, -0.1278).titled("London")).unwrap();
        first.create(DestinationDraft::at(55.9533, -3.1883).titled("Edinburgh")).unwrap();
    }
    let second = Planner::hydrate(slots, PlannerConfig::default());
    let titles: Vec<_> = second.records().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["London", "Edinburgh"]);
    assert_eq!(second.progress().total, 2);
}
