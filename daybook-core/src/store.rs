//! The event store: an ordered event list mirrored to a storage slot.
//!
//! Every mutating operation ends with an explicit `persist()`, so the slot
//! always holds a full snapshot of the in-memory list once the call returns.
//! Operations that match nothing still persist.

use tracing::{debug, warn};

use crate::defaults::default_events;
use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventId, FieldValue};
use crate::storage::Storage;

/// Storage key holding the serialized event list.
pub const EVENTS_KEY: &str = "events";

/// Where the collection came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the storage slot.
    Persisted,
    /// Nothing (or `null`) was stored; the default dataset is in use.
    DefaultMissing,
    /// The stored value did not parse; the default dataset is in use.
    DefaultMalformed,
}

impl LoadSource {
    pub fn is_default(&self) -> bool {
        !matches!(self, LoadSource::Persisted)
    }
}

/// UI-transient state. Never persisted, never validated by the store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Id of the selected event, if any. May point at an event that has
    /// since been deleted.
    pub selected_event: Option<EventId>,
    pub is_editing: bool,
}

pub struct EventStore<S: Storage> {
    storage: S,
    events: Vec<Event>,
    selection: Selection,
    load_source: LoadSource,
}

impl<S: Storage> EventStore<S> {
    /// Open a store over `storage`, seeding it from the `events` slot or,
    /// when that is missing or unreadable as an event list, from the default
    /// dataset. Opening never writes. Only a storage read failure is an error.
    pub fn open(storage: S) -> DaybookResult<Self> {
        let (events, load_source) = match storage.load(EVENTS_KEY)? {
            None => (default_events(), LoadSource::DefaultMissing),
            Some(raw) => match serde_json::from_str::<Option<Vec<Event>>>(&raw) {
                Ok(Some(events)) => (events, LoadSource::Persisted),
                Ok(None) => (default_events(), LoadSource::DefaultMissing),
                Err(e) => {
                    warn!(error = %e, "stored events are malformed, using defaults");
                    (default_events(), LoadSource::DefaultMalformed)
                }
            },
        };

        debug!(count = events.len(), source = ?load_source, "opened event store");

        Ok(EventStore {
            storage,
            events,
            selection: Selection::default(),
            load_source,
        })
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.find(id).is_some()
    }

    /// One past the largest integer id in the collection (1 when there are
    /// none). Fails once `i64::MAX` is taken.
    pub fn next_numeric_id(&self) -> DaybookResult<EventId> {
        let max = self
            .events
            .iter()
            .filter_map(|e| match e.id {
                EventId::Number(n) => Some(n),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(EventId::Number)
            .ok_or(DaybookError::IdsExhausted(max))
    }

    /// Append an event. Ids are not checked for uniqueness.
    pub fn add_event(&mut self, event: Event) -> DaybookResult<()> {
        if self.contains(&event.id) {
            warn!(id = %event.id, "adding event with an id that is already in use");
        }
        self.events.push(event);
        self.persist()
    }

    /// Replace every event whose id equals `id` with a copy of `updated`,
    /// keeping its position. The replacement takes `updated.id`.
    ///
    /// Returns the number of replaced events.
    pub fn edit_event(&mut self, updated: &Event, id: &EventId) -> DaybookResult<usize> {
        let mut replaced = 0;
        for event in self.events.iter_mut().filter(|e| &e.id == id) {
            *event = updated.clone();
            replaced += 1;
        }
        self.persist()?;
        Ok(replaced)
    }

    /// Remove every event whose id equals `id`. Returns how many were removed.
    pub fn delete_event(&mut self, id: &EventId) -> DaybookResult<usize> {
        let before = self.events.len();
        self.events.retain(|e| &e.id != id);
        let removed = before - self.events.len();
        self.persist()?;
        Ok(removed)
    }

    /// Move every event matching `id` to `new_date`. Ids are compared
    /// loosely (see [`EventId::loosely_matches`]).
    ///
    /// Returns the number of moved events.
    pub fn drag_edit_event(
        &mut self,
        id: &EventId,
        new_date: impl Into<FieldValue>,
    ) -> DaybookResult<usize> {
        let new_date = new_date.into();
        let mut moved = 0;
        for event in self.events.iter_mut().filter(|e| e.id.loosely_matches(id)) {
            event.date = new_date.clone();
            moved += 1;
        }
        self.persist()?;
        Ok(moved)
    }

    /// Serialize the whole collection and overwrite the storage slot.
    pub fn persist(&mut self) -> DaybookResult<()> {
        let json = serde_json::to_string(&self.events)?;
        self.storage.save(EVENTS_KEY, &json)?;
        debug!(count = self.events.len(), "persisted events");
        Ok(())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Resolve the selected id to its event, if it still exists.
    pub fn selected(&self) -> Option<&Event> {
        self.selection
            .selected_event
            .as_ref()
            .and_then(|id| self.find(id))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PriorityLevel;
    use crate::storage::{FileStorage, MemoryStorage};

    fn make_event(id: i64, title: &str, date: &str) -> Event {
        Event {
            id: EventId::Number(id),
            title: title.to_string(),
            description: format!("{} description", title),
            time: "12:00".into(),
            date: date.into(),
            priority: PriorityLevel::new(3).unwrap(),
            file: None,
        }
    }

    fn store_with(events: &[Event]) -> EventStore<MemoryStorage> {
        let json = serde_json::to_string(events).unwrap();
        EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, &json)).unwrap()
    }

    fn persisted(store: &EventStore<MemoryStorage>) -> Vec<Event> {
        let raw = store.storage().load(EVENTS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_open_missing_slot_uses_defaults_without_writing() {
        let store = EventStore::open(MemoryStorage::new()).unwrap();
        assert_eq!(store.load_source(), LoadSource::DefaultMissing);
        assert!(store.load_source().is_default());
        assert_eq!(store.events(), default_events().as_slice());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_open_null_slot_counts_as_missing() {
        let store = EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, "null")).unwrap();
        assert_eq!(store.load_source(), LoadSource::DefaultMissing);
        assert_eq!(store.len(), default_events().len());
    }

    #[test]
    fn test_open_malformed_slot_uses_defaults() {
        for raw in ["{not json", "{}", r#"[{"id":1}]"#, "42"] {
            let store = EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, raw)).unwrap();
            assert_eq!(store.load_source(), LoadSource::DefaultMalformed, "payload {raw}");
            assert_eq!(store.events(), default_events().as_slice());
        }
    }

    #[test]
    fn test_open_keeps_records_with_foreign_field_shapes() {
        let raw = r##"[
            {"id":1.5,"title":"Imported","description":"","time":null,
             "date":1704067200000,"priority":{"id":2,"color":"#DE54E0"},
             "file":{"name":"a.png"}},
            {"id":"n-2","title":"Text id","description":"","time":"08:00",
             "date":"2024-01-02","priority":1,"file":null}
        ]"##;
        let mut store = EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, raw)).unwrap();
        assert_eq!(store.load_source(), LoadSource::Persisted);
        assert_eq!(store.len(), 2);
        let imported = store.events()[0].clone();

        store.add_event(make_event(3, "New", "2024-01-03")).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&store.storage().load(EVENTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(written[0]["id"], serde_json::json!(1.5));
        assert_eq!(written[0]["time"], serde_json::Value::Null);
        assert_eq!(written[0]["date"], serde_json::json!(1704067200000_i64));
        assert_eq!(written[0]["file"], serde_json::json!({ "name": "a.png" }));
        assert_eq!(written[1]["id"], serde_json::json!("n-2"));
        assert_eq!(written.as_array().map(Vec::len), Some(3));
        assert_eq!(persisted(&store)[0], imported);
    }

    #[test]
    fn test_drag_edit_event_matches_fractional_id() {
        let raw = r#"[{"id":1.5,"title":"A","description":"","time":"","date":"2024-01-01","priority":1,"file":null}]"#;
        let mut store = EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, raw)).unwrap();

        assert_eq!(store.drag_edit_event(&EventId::from("1.5"), "2024-01-09").unwrap(), 1);
        assert_eq!(store.events()[0].date, "2024-01-09");
    }

    #[test]
    fn test_open_empty_array_is_persisted_empty() {
        let store = EventStore::open(MemoryStorage::with_slot(EVENTS_KEY, "[]")).unwrap();
        assert_eq!(store.load_source(), LoadSource::Persisted);
        assert!(!store.load_source().is_default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_event_appends_exact_record() {
        let mut store = store_with(&[]);
        for i in 1..=3 {
            let before = store.len();
            let event = make_event(i, &format!("E{i}"), "2024-02-01");
            store.add_event(event.clone()).unwrap();
            assert_eq!(store.len(), before + 1);
            assert_eq!(store.events().last(), Some(&event));
        }
    }

    #[test]
    fn test_add_event_allows_duplicate_ids() {
        let mut store = store_with(&[make_event(1, "A", "2024-01-01")]);
        store.add_event(make_event(1, "B", "2024-01-02")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(&EventId::Number(1)).unwrap().title, "A");
    }

    #[test]
    fn test_edit_event_replaces_in_place() {
        let a = make_event(1, "A", "2024-01-01");
        let b = make_event(2, "B", "2024-01-02");
        let c = make_event(3, "C", "2024-01-03");
        let mut store = store_with(&[a.clone(), b, c.clone()]);

        let mut updated = make_event(2, "B2", "2024-01-09");
        updated.file = Some("notes.pdf".into());
        updated.priority = PriorityLevel::new(6).unwrap();

        let replaced = store.edit_event(&updated, &EventId::Number(2)).unwrap();

        assert_eq!(replaced, 1);
        assert_eq!(store.events(), &[a, updated, c]);
    }

    #[test]
    fn test_edit_event_takes_new_id() {
        let mut store = store_with(&[make_event(1, "A", "2024-01-01")]);
        let updated = make_event(10, "A", "2024-01-01");

        store.edit_event(&updated, &EventId::Number(1)).unwrap();

        assert!(!store.contains(&EventId::Number(1)));
        assert!(store.contains(&EventId::Number(10)));
    }

    #[test]
    fn test_edit_event_without_match_is_noop() {
        let events = vec![make_event(1, "A", "2024-01-01"), make_event(2, "B", "2024-01-02")];
        let mut store = store_with(&events);

        let replaced = store
            .edit_event(&make_event(9, "Z", "2024-09-09"), &EventId::Number(9))
            .unwrap();

        assert_eq!(replaced, 0);
        assert_eq!(store.events(), events.as_slice());
    }

    #[test]
    fn test_edit_event_is_strict_about_id_type() {
        let events = vec![make_event(1, "A", "2024-01-01")];
        let mut store = store_with(&events);

        let replaced = store
            .edit_event(&make_event(1, "Z", "2024-09-09"), &EventId::from("1"))
            .unwrap();

        assert_eq!(replaced, 0);
        assert_eq!(store.events(), events.as_slice());
    }

    #[test]
    fn test_delete_event_removes_all_matches() {
        let mut store = store_with(&[
            make_event(1, "A", "2024-01-01"),
            make_event(2, "B", "2024-01-02"),
            make_event(1, "A again", "2024-01-03"),
        ]);

        let removed = store.delete_event(&EventId::Number(1)).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&EventId::Number(1)));
        assert_eq!(store.delete_event(&EventId::Number(1)).unwrap(), 0);
    }

    #[test]
    fn test_drag_edit_event_changes_only_date() {
        let a = make_event(1, "A", "2024-01-01");
        let b = make_event(2, "B", "2024-01-02");
        let mut store = store_with(&[a.clone(), b.clone()]);

        let moved = store.drag_edit_event(&EventId::Number(1), "2024-01-20").unwrap();

        assert_eq!(moved, 1);
        let mut expected = a;
        expected.date = "2024-01-20".into();
        assert_eq!(store.events(), &[expected, b]);
    }

    #[test]
    fn test_drag_edit_event_matches_text_id_loosely() {
        let mut store = store_with(&[make_event(7, "A", "2024-01-01")]);

        let moved = store.drag_edit_event(&EventId::from("7"), "2024-02-02").unwrap();

        assert_eq!(moved, 1);
        assert_eq!(store.events()[0].date, "2024-02-02");
    }

    #[test]
    fn test_drag_edit_event_without_match_is_noop() {
        let events = vec![make_event(1, "A", "2024-01-01")];
        let mut store = store_with(&events);
        assert_eq!(store.drag_edit_event(&EventId::Number(5), "2024-05-05").unwrap(), 0);
        assert_eq!(store.events(), events.as_slice());
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = store_with(&[make_event(1, "A", "2024-01-01")]);
        assert_eq!(store.storage().writes(), 0);

        store.add_event(make_event(2, "B", "2024-01-02")).unwrap();
        store.edit_event(&make_event(3, "C", "2024-01-03"), &EventId::Number(99)).unwrap();
        store.delete_event(&EventId::Number(99)).unwrap();
        store.drag_edit_event(&EventId::Number(2), "2024-01-05").unwrap();

        assert_eq!(store.storage().writes(), 4);
        assert_eq!(persisted(&store), store.events());
    }

    #[test]
    fn test_round_trip_through_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = EventStore::open(FileStorage::new(dir.path())).unwrap();
        assert_eq!(store.load_source(), LoadSource::DefaultMissing);

        let mut attached = make_event(50, "With file", "2024-04-01");
        attached.file = Some("/tmp/agenda.txt".into());
        store.add_event(attached).unwrap();
        store.add_event(make_event(51, "Plain", "2024-04-02")).unwrap();
        let snapshot = store.events().to_vec();

        let reopened = EventStore::open(store.into_storage()).unwrap();
        assert_eq!(reopened.load_source(), LoadSource::Persisted);
        assert_eq!(reopened.events(), snapshot.as_slice());
    }

    #[test]
    fn test_drag_delete_add_scenario() {
        let mut store = store_with(&[make_event(1, "A", "2024-01-01")]);

        store.drag_edit_event(&EventId::Number(1), "2024-01-05").unwrap();
        assert_eq!(store.events(), &[make_event(1, "A", "2024-01-05")]);

        store.delete_event(&EventId::Number(1)).unwrap();
        assert!(store.is_empty());

        let b = make_event(2, "B", "2024-01-06");
        store.add_event(b.clone()).unwrap();
        assert_eq!(store.events(), &[b.clone()]);
        assert_eq!(persisted(&store), vec![b]);
    }

    #[test]
    fn test_independent_stores_coexist() {
        let mut first = store_with(&[]);
        let second = store_with(&[]);

        first.add_event(make_event(1, "A", "2024-01-01")).unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(second.storage().writes(), 0);
    }

    #[test]
    fn test_selection_is_transient() {
        let mut store = store_with(&[make_event(1, "A", "2024-01-01")]);
        assert_eq!(store.selection(), &Selection::default());

        store.selection_mut().selected_event = Some(EventId::Number(1));
        store.selection_mut().is_editing = true;
        assert_eq!(store.selected().map(|e| e.title.as_str()), Some("A"));

        store.delete_event(&EventId::Number(1)).unwrap();
        assert!(store.selected().is_none());
        assert!(store.selection().is_editing);

        let raw = store.storage().load(EVENTS_KEY).unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_next_numeric_id() {
        let mut store = store_with(&[]);
        assert_eq!(store.next_numeric_id().unwrap(), EventId::Number(1));

        store.add_event(make_event(4, "A", "2024-01-01")).unwrap();
        let mut text = make_event(0, "T", "2024-01-01");
        text.id = EventId::from("x-100");
        store.add_event(text).unwrap();

        assert_eq!(store.next_numeric_id().unwrap(), EventId::Number(5));
    }

    #[test]
    fn test_next_numeric_id_at_i64_max() {
        let store = store_with(&[make_event(i64::MAX, "Last", "2024-01-01")]);
        assert!(matches!(
            store.next_numeric_id(),
            Err(DaybookError::IdsExhausted(i64::MAX))
        ));
    }
}
