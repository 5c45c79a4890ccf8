mod common;

use common::SteppingClock;
use memo_core::{
    project, InMemoryKeyValueStore, KeyValueStore, KvMemoRepository, MemoDate, MemoStore,
    PersistPolicy, RepoError, SortKey, SNAPSHOT_KEY,
};
use uuid::Uuid;

fn titles(memos: &[&memo_core::Memo]) -> Vec<String> {
    memos.iter().map(|memo| memo.title.clone()).collect()
}

#[test]
fn load_from_empty_store_starts_empty() {
    let store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new())).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn load_recovers_from_malformed_snapshot_with_empty_collection() {
    let mut kv = InMemoryKeyValueStore::new();
    kv.set(SNAPSHOT_KEY, "[{\"title\": oops").unwrap();

    let store = MemoStore::load(KvMemoRepository::new(kv)).unwrap();
    assert!(store.is_empty());
}

#[test]
fn load_treats_null_snapshot_as_empty() {
    let mut kv = InMemoryKeyValueStore::new();
    kv.set(SNAPSHOT_KEY, "null").unwrap();

    let store = MemoStore::load(KvMemoRepository::new(kv)).unwrap();
    assert!(store.is_empty());
}

#[test]
fn create_assigns_clock_time_and_unstarred_flag() {
    let clock = SteppingClock::new();
    let mut store =
        MemoStore::load_with_clock(KvMemoRepository::new(InMemoryKeyValueStore::new()), &clock)
            .unwrap();

    let first = store.create("", "").unwrap();
    let second = store.create("t", "c").unwrap();

    assert!(!first.starred);
    assert_eq!(first.title, "");
    assert_eq!(first.date.to_string(), "2024-01-01T09:00:00.000Z");
    assert_eq!(second.date.to_string(), "2024-01-01T09:01:00.000Z");
    assert_ne!(first.id, second.id);
    assert_eq!(store.len(), 2);
}

#[test]
fn update_preserves_date_and_star() {
    let clock = SteppingClock::new();
    let mut store =
        MemoStore::load_with_clock(KvMemoRepository::new(InMemoryKeyValueStore::new()), &clock)
            .unwrap();
    let created = store.create("draft", "body").unwrap();
    store.toggle_star(created.id).unwrap();

    let updated = store.update(created.id, "final", "new body").unwrap().unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.content, "new body");
    assert_eq!(updated.date, created.date);
    assert!(updated.starred);
    assert_eq!(store.len(), 1);
}

#[test]
fn operations_on_unknown_id_are_noops_without_writes() {
    let mut store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new())).unwrap();
    let missing = Uuid::new_v4();

    assert_eq!(store.update(missing, "t", "c").unwrap(), None);
    assert_eq!(store.delete(missing).unwrap(), None);
    assert_eq!(store.toggle_star(missing).unwrap(), None);

    assert!(store.is_empty());
    assert_eq!(store.repository().store().get(SNAPSHOT_KEY).unwrap(), None);
}

#[test]
fn only_delete_changes_collection_size() {
    let mut store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new())).unwrap();
    let a = store.create("a", "").unwrap();
    let b = store.create("b", "").unwrap();
    store.create("c", "").unwrap();

    store.update(a.id, "a2", "").unwrap();
    store.toggle_star(b.id).unwrap();
    assert_eq!(store.len(), 3);

    let removed = store.delete(b.id).unwrap().unwrap();
    assert_eq!(removed.id, b.id);
    assert_eq!(store.len(), 2);

    assert_eq!(store.delete(b.id).unwrap(), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn structurally_identical_memos_are_addressed_independently() {
    let mut store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new())).unwrap();
    let first = store.create("same", "same").unwrap();
    let second = store.create("same", "same").unwrap();

    store.toggle_star(second.id).unwrap();
    store.delete(first.id).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot()[0].id, second.id);
    assert!(store.snapshot()[0].starred);
}

#[test]
fn snapshot_then_load_reproduces_collection() {
    let clock = SteppingClock::new();
    let mut store =
        MemoStore::load_with_clock(KvMemoRepository::new(InMemoryKeyValueStore::new()), &clock)
            .unwrap();
    let a = store.create("alpha", "one").unwrap();
    store.create("beta", "two\nlines").unwrap();
    store.toggle_star(a.id).unwrap();
    let expected = store.snapshot().to_vec();

    let kv = store.into_repository().into_store();
    let reloaded = MemoStore::load(KvMemoRepository::new(kv)).unwrap();

    assert_eq!(reloaded.snapshot(), expected.as_slice());
}

#[test]
fn always_policy_persists_empty_collection_after_last_delete() {
    let mut store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new())).unwrap();
    let memo = store.create("only", "").unwrap();
    store.delete(memo.id).unwrap();

    let kv = store.into_repository().into_store();
    assert_eq!(kv.get(SNAPSHOT_KEY).unwrap().as_deref(), Some("[]"));
    assert!(MemoStore::load(KvMemoRepository::new(kv)).unwrap().is_empty());
}

#[test]
fn skip_empty_policy_keeps_previous_snapshot_after_last_delete() {
    let mut store = MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::new()))
        .unwrap()
        .with_persist_policy(PersistPolicy::SkipEmpty);
    let memo = store.create("only", "").unwrap();
    store.delete(memo.id).unwrap();
    assert!(store.is_empty());

    let kv = store.into_repository().into_store();
    let reloaded = MemoStore::load(KvMemoRepository::new(kv)).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.snapshot()[0].id, memo.id);
}

#[test]
fn persist_failure_is_returned_and_memory_state_is_kept() {
    let mut store =
        MemoStore::load(KvMemoRepository::new(InMemoryKeyValueStore::with_quota(16))).unwrap();

    let err = store.create("too long for quota", "").unwrap_err();
    assert!(matches!(err, RepoError::QuotaExceeded { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn load_accepts_legacy_snapshot_and_rekeys_duplicate_ids() {
    let legacy = r#"[
        {"id":"11111111-2222-4333-8444-555555555555","title":"a","content":"","date":"2024-02-01T00:00:00.000Z","star":false},
        {"id":"11111111-2222-4333-8444-555555555555","title":"b","content":"","date":"2024-02-02T00:00:00.000Z","star":true},
        {"title":"c","content":"","date":"someday","star":false}
    ]"#;
    let mut kv = InMemoryKeyValueStore::new();
    kv.set(SNAPSHOT_KEY, legacy).unwrap();

    let store = MemoStore::load(KvMemoRepository::new(kv)).unwrap();
    let memos = store.snapshot();
    assert_eq!(memos.len(), 3);
    assert_eq!(
        memos[0].id.to_string(),
        "11111111-2222-4333-8444-555555555555"
    );
    assert_ne!(memos[1].id, memos[0].id);
    assert!(memos[1].starred);
    assert_eq!(memos[2].date, MemoDate::Malformed("someday".to_string()));
}

#[test]
fn odd_record_does_not_discard_the_rest_of_the_snapshot() {
    let stored = r#"[
        {"title":"keep","content":"a","date":"2024-01-01T00:00:00.000Z","star":true},
        {"title":"odd","content":"b","date":null,"star":false}
    ]"#;
    let mut kv = InMemoryKeyValueStore::new();
    kv.set(SNAPSHOT_KEY, stored).unwrap();

    let mut store = MemoStore::load(KvMemoRepository::new(kv)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(
        titles(&project(store.snapshot(), SortKey::Date)),
        ["keep", "odd"]
    );

    store.create("new", "").unwrap();
    let kv = store.into_repository().into_store();
    let persisted: serde_json::Value =
        serde_json::from_str(&kv.get(SNAPSHOT_KEY).unwrap().unwrap()).unwrap();
    let persisted_titles: Vec<&str> = persisted
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["title"].as_str().unwrap())
        .collect();
    assert_eq!(persisted_titles, ["keep", "odd", "new"]);
    assert_eq!(persisted[0]["star"], true);
}

#[test]
fn documented_scenario_create_star_sort_delete() {
    let clock = SteppingClock::new();
    let mut store =
        MemoStore::load_with_clock(KvMemoRepository::new(InMemoryKeyValueStore::new()), &clock)
            .unwrap();
    let a = store.create("A", "x").unwrap();
    let b = store.create("B", "y").unwrap();

    assert_eq!(titles(&project(store.snapshot(), SortKey::Date)), ["B", "A"]);

    store.toggle_star(a.id).unwrap();
    assert_eq!(titles(&project(store.snapshot(), SortKey::Star)), ["A", "B"]);

    store.delete(b.id).unwrap();
    assert_eq!(store.len(), 1);
}
