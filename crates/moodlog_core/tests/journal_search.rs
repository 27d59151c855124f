use chrono::{DateTime, Duration, TimeZone, Utc};
use moodlog_core::{
    CoreError, FixedClock, JournalEntry, JournalIndex, JournalInput, JournalPageQuery,
    JournalService, MemoryBackend, StorageEngine, ValidationError,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap()
}

fn write_at(
    store: &StorageEngine<MemoryBackend>,
    at: DateTime<Utc>,
    input: JournalInput,
) -> JournalEntry {
    JournalService::new(store, FixedClock::utc(at))
        .write(input)
        .unwrap()
}

fn titles(entries: &[JournalEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.title.as_str()).collect()
}

#[test]
fn query_matches_title_case_insensitively() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(&store, base(), JournalInput::new("Morning Walk", "sunny and cold"));
    write_at(
        &store,
        base() + Duration::hours(12),
        JournalInput::new("Evening Reflection", "long day"),
    );

    let index = JournalIndex::new(&store);
    let hits = index.search("MORNING");
    assert!(!hits.is_degraded());
    assert_eq!(titles(&hits.entries), vec!["Morning Walk"]);
}

#[test]
fn blank_query_returns_everything_newest_first() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(&store, base(), JournalInput::new("Morning Walk", "sunny"));
    write_at(
        &store,
        base() + Duration::hours(12),
        JournalInput::new("Evening Reflection", "quiet"),
    );

    let index = JournalIndex::new(&store);
    for query in ["", "   "] {
        let hits = index.search(query);
        assert_eq!(
            titles(&hits.entries),
            vec!["Evening Reflection", "Morning Walk"]
        );
    }
}

#[test]
fn tag_substring_matches() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(
        &store,
        base(),
        JournalInput::new("Check-in", "felt tense").with_tags(["Anxiety"]),
    );
    write_at(&store, base(), JournalInput::new("Groceries", "milk"));

    let hits = JournalIndex::new(&store).search("anx");
    assert_eq!(titles(&hits.entries), vec!["Check-in"]);
}

#[test]
fn content_match_and_no_match() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(&store, base(), JournalInput::new("Day", "Talked to Sam"));

    let index = JournalIndex::new(&store);
    assert_eq!(index.search("sam").entries.len(), 1);
    assert!(index.search("zzz").entries.is_empty());
}

#[test]
fn equal_timestamps_prefer_later_insert() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(&store, base(), JournalInput::new("First", "a"));
    write_at(&store, base(), JournalInput::new("Second", "b"));

    let hits = JournalIndex::new(&store).search("");
    assert_eq!(titles(&hits.entries), vec!["Second", "First"]);
}

#[test]
fn write_keeps_text_normalizes_tags_and_rejects_blank_fields() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = JournalService::new(&store, FixedClock::utc(base()));

    let stored = service
        .write(
            JournalInput::new("  Title  ", "body")
                .with_tags(["  deep   work ", "Deep Work", "", "rest"]),
        )
        .unwrap();
    assert_eq!(stored.title, "  Title  ");
    assert_eq!(stored.tags, vec!["deep work", "rest"]);
    assert_eq!(stored.created_at, base());
    assert_eq!(service.list().entries, vec![stored.clone()]);

    let err = service.write(JournalInput::new("   ", "body")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::EmptyTitle)
    ));
    let err = service.write(JournalInput::new("Title", "")).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::EmptyContent)
    ));
    assert_eq!(service.list().entries.len(), 1);
}

#[test]
fn list_page_filters_by_tag_and_mood() {
    let store = StorageEngine::new(MemoryBackend::new());
    write_at(
        &store,
        base(),
        JournalInput::new("Run", "5k").with_tags(["Health"]).with_mood("Happy"),
    );
    write_at(
        &store,
        base() + Duration::hours(1),
        JournalInput::new("Doctor", "checkup").with_tags(["health", "errands"]),
    );
    write_at(
        &store,
        base() + Duration::hours(2),
        JournalInput::new("Movie", "fun").with_mood("happy"),
    );

    let index = JournalIndex::new(&store);
    let by_tag = index.list_page(&JournalPageQuery {
        tag: Some("HEALTH".to_string()),
        ..JournalPageQuery::default()
    });
    assert_eq!(titles(&by_tag.items), vec!["Doctor", "Run"]);
    assert_eq!(by_tag.total, 2);

    let by_mood = index.list_page(&JournalPageQuery {
        mood: Some("happy".to_string()),
        ..JournalPageQuery::default()
    });
    assert_eq!(titles(&by_mood.items), vec!["Movie", "Run"]);

    let both = index.list_page(&JournalPageQuery {
        tag: Some("health".to_string()),
        mood: Some(" Happy ".to_string()),
        ..JournalPageQuery::default()
    });
    assert_eq!(titles(&both.items), vec!["Run"]);
}

#[test]
fn list_page_pages_and_clamps_size() {
    let store = StorageEngine::new(MemoryBackend::new());
    for offset in 0..12 {
        write_at(
            &store,
            base() + Duration::minutes(offset),
            JournalInput::new(format!("Entry {offset}"), "text"),
        );
    }

    let index = JournalIndex::new(&store);
    let first = index.list_page(&JournalPageQuery::default());
    assert_eq!(first.page, 1);
    assert_eq!(first.page_size, 10);
    assert_eq!(first.total, 12);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].title, "Entry 11");

    let second = index.list_page(&JournalPageQuery {
        page: 2,
        ..JournalPageQuery::default()
    });
    assert_eq!(titles(&second.items), vec!["Entry 1", "Entry 0"]);

    let wide = index.list_page(&JournalPageQuery {
        page_size: Some(500),
        ..JournalPageQuery::default()
    });
    assert_eq!(wide.page_size, 50);
    assert_eq!(wide.items.len(), 12);

    let past_end = index.list_page(&JournalPageQuery {
        page: 9,
        ..JournalPageQuery::default()
    });
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 12);
}

#[test]
fn get_returns_entry_or_not_found() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = JournalService::new(&store, FixedClock::utc(base()));
    let stored = service.write(JournalInput::new("Title", "body")).unwrap();

    assert_eq!(service.get(&stored.id).unwrap(), stored);
    assert!(matches!(
        service.get("missing"),
        Err(CoreError::NotFound { .. })
    ));
}
