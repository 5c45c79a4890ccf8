use chrono::{TimeZone, Utc};
use memo_core::{project, Memo, MemoDate, SortKey};

fn memo(title: &str, date: &str, starred: bool) -> Memo {
    let mut memo = Memo::new(title, "", Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    memo.date = MemoDate::parse(date);
    memo.starred = starred;
    memo
}

fn titles(memos: Vec<&Memo>) -> Vec<&str> {
    memos.into_iter().map(|memo| memo.title.as_str()).collect()
}

fn sample() -> Vec<Memo> {
    vec![
        memo("banana", "2024-03-02T00:00:00.000Z", false),
        memo("Apple", "2024-03-04T00:00:00.000Z", true),
        memo("cherry", "garbage", true),
        memo("apple", "2024-03-01T00:00:00.000Z", false),
        memo("date", "2024-03-03T00:00:00.000Z", true),
    ]
}

#[test]
fn title_sort_is_case_insensitive_with_lowercase_first_on_ties() {
    let memos = sample();
    assert_eq!(
        titles(project(&memos, SortKey::Title)),
        ["apple", "Apple", "banana", "cherry", "date"]
    );
}

#[test]
fn title_sort_places_accented_titles_by_base_letter() {
    let memos: Vec<Memo> = ["fig", "éclair", "egg", "Zoo", "Émile"]
        .into_iter()
        .map(|title| memo(title, "2024-03-01", false))
        .collect();
    assert_eq!(
        titles(project(&memos, SortKey::Title)),
        ["éclair", "egg", "Émile", "fig", "Zoo"]
    );
}

#[test]
fn date_sort_is_newest_first_with_malformed_last() {
    let memos = sample();
    assert_eq!(
        titles(project(&memos, SortKey::Date)),
        ["Apple", "date", "banana", "apple", "cherry"]
    );
}

#[test]
fn star_sort_partitions_then_orders_by_date() {
    let memos = sample();
    assert_eq!(
        titles(project(&memos, SortKey::Star)),
        ["Apple", "date", "cherry", "banana", "apple"]
    );
}

#[test]
fn insertion_key_keeps_collection_order() {
    let memos = sample();
    let key: SortKey = "whatever".parse().unwrap();
    assert_eq!(
        titles(project(&memos, key)),
        ["banana", "Apple", "cherry", "apple", "date"]
    );
}

#[test]
fn projection_is_idempotent_and_leaves_input_untouched() {
    let memos = sample();
    let before = memos.clone();

    for key in [SortKey::Title, SortKey::Date, SortKey::Star, SortKey::Insertion] {
        let first = project(&memos, key);
        let second = project(&memos, key);
        assert_eq!(first, second);
    }
    assert_eq!(memos, before);
}

#[test]
fn equal_dates_keep_collection_order() {
    let memos = vec![
        memo("first", "2024-01-01", false),
        memo("second", "2024-01-01", false),
        memo("broken-1", "x", false),
        memo("broken-2", "y", false),
    ];
    assert_eq!(
        titles(project(&memos, SortKey::Date)),
        ["first", "second", "broken-1", "broken-2"]
    );
}
