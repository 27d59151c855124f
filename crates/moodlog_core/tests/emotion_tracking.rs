use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use moodlog_core::{
    CoreError, EmotionAggregator, EmotionInput, EmotionKind, EmotionService, FixedClock,
    MemoryBackend, StorageEngine, ValidationError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record_at(
    store: &StorageEngine<MemoryBackend>,
    at: DateTime<Utc>,
    emotion: &str,
    intensity: i64,
) {
    EmotionService::new(store, FixedClock::utc(at))
        .record(EmotionInput::new(emotion, intensity))
        .unwrap();
}

#[test]
fn record_then_list_preserves_input_fields() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));

    let stored = service
        .record(
            EmotionInput::new("anxious", 7)
                .with_notes("exam tomorrow")
                .with_user("user-1"),
        )
        .unwrap();

    let listing = service.list();
    assert!(!listing.is_degraded());
    assert_eq!(listing.entries, vec![stored.clone()]);
    assert_eq!(stored.emotion, EmotionKind::Anxious);
    assert_eq!(stored.intensity, 7);
    assert_eq!(stored.notes.as_deref(), Some("exam tomorrow"));
    assert_eq!(stored.user_id.as_deref(), Some("user-1"));
    assert_eq!(stored.timestamp, now());
}

#[test]
fn surrounding_whitespace_survives_round_trip() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));

    let stored = service
        .record(
            EmotionInput::new("happy", 5)
                .with_notes("  indented note\n")
                .with_user(" u1 "),
        )
        .unwrap();
    assert_eq!(stored.notes.as_deref(), Some("  indented note\n"));
    assert_eq!(stored.user_id.as_deref(), Some(" u1 "));

    let listed = service.list().entries;
    assert_eq!(listed, vec![stored]);

    let blank = service
        .record(EmotionInput::new("happy", 5).with_notes(" \t ").with_user(""))
        .unwrap();
    assert_eq!(blank.notes, None);
    assert_eq!(blank.user_id, None);
}

#[test]
fn every_valid_intensity_is_accepted() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));

    for intensity in 1..=10 {
        let stored = service.record(EmotionInput::new("calm", intensity)).unwrap();
        assert_eq!(i64::from(stored.intensity), intensity);
    }
    let ids: std::collections::HashSet<_> =
        service.list().entries.into_iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn out_of_range_intensity_leaves_collection_unchanged() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));
    service.record(EmotionInput::new("happy", 5)).unwrap();

    for bad in [0, 11] {
        let err = service.record(EmotionInput::new("happy", bad)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::IntensityOutOfRange(value)) if value == bad
        ));
    }
    assert_eq!(service.list().entries.len(), 1);
}

#[test]
fn unknown_emotion_is_rejected() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));

    let err = service.record(EmotionInput::new("bored", 5)).unwrap_err();
    assert_eq!(err.code(), "validation_error");
    assert!(service.list().entries.is_empty());
}

#[test]
fn clear_empties_collection_and_stays_empty_after_reads() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));
    service.record(EmotionInput::new("sad", 3)).unwrap();
    service.record(EmotionInput::new("sad", 4)).unwrap();

    service.clear().unwrap();
    assert!(service.list().entries.is_empty());

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    aggregator.aggregate(30).unwrap();
    service.by_type(EmotionKind::Sad);
    assert!(service.list().entries.is_empty());
}

#[test]
fn same_day_samples_average_per_category() {
    let store = StorageEngine::new(MemoryBackend::new());
    let morning = now() - Duration::hours(3);
    record_at(&store, morning, "happy", 4);
    record_at(&store, now(), "happy", 8);
    record_at(&store, now(), "sad", 3);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let series = aggregator.aggregate(1).unwrap();

    assert!(!series.is_degraded());
    assert_eq!(series.entries.len(), 1);
    let today = &series.entries[0];
    assert_eq!(today.date, day(2026, 10, 17));
    assert_eq!(today.averages.get(&EmotionKind::Happy), Some(&6.0));
    assert_eq!(today.averages.get(&EmotionKind::Sad), Some(&3.0));
    assert_eq!(today.averages.get(&EmotionKind::Calm), None);
}

#[test]
fn series_covers_every_day_and_drops_out_of_window_samples() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now() - Duration::days(2), "calm", 5);
    record_at(&store, now() - Duration::days(10), "angry", 9);
    record_at(&store, now() + Duration::days(1), "excited", 9);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let series = aggregator.aggregate(7).unwrap().entries;

    assert_eq!(series.len(), 7);
    assert_eq!(series.first().unwrap().date, day(2026, 10, 11));
    assert_eq!(series.last().unwrap().date, day(2026, 10, 17));
    assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));

    let with_data: Vec<_> = series.iter().filter(|point| !point.is_empty()).collect();
    assert_eq!(with_data.len(), 1);
    assert_eq!(with_data[0].date, day(2026, 10, 15));
    assert_eq!(with_data[0].averages.get(&EmotionKind::Calm), Some(&5.0));
}

#[test]
fn empty_day_serializes_without_category_keys() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now(), "happy", 4);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let series = aggregator.aggregate(2).unwrap().entries;

    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"date": "2026-10-16"},
            {"date": "2026-10-17", "happy": 4.0}
        ])
    );
}

#[test]
fn aggregate_is_idempotent_without_writes() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now(), "happy", 4);
    record_at(&store, now() - Duration::days(5), "anxious", 6);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let first = aggregator.aggregate(30).unwrap();
    let second = aggregator.aggregate(30).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.entries.len(), 30);
}

#[test]
fn non_positive_window_is_rejected() {
    let store = StorageEngine::new(MemoryBackend::new());
    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));

    assert_eq!(
        aggregator.aggregate(0).unwrap_err(),
        ValidationError::NonPositiveWindow(0)
    );
    assert_eq!(
        aggregator.aggregate(-3).unwrap_err(),
        ValidationError::NonPositiveWindow(-3)
    );
}

#[test]
fn large_window_still_aggregates() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now() - Duration::days(39_000), "sad", 8);
    record_at(&store, now(), "happy", 4);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let series = aggregator.aggregate(40_000).unwrap().entries;
    assert_eq!(series.len(), 40_000);
    assert_eq!(series.last().unwrap().date, day(2026, 10, 17));

    let stats = aggregator.stats(40_000).unwrap();
    assert_eq!(stats.counts.get(&EmotionKind::Sad), Some(&1));
    assert_eq!(stats.counts.get(&EmotionKind::Happy), Some(&1));
}

#[test]
fn buckets_follow_observer_offset() {
    let store = StorageEngine::new(MemoryBackend::new());
    // 23:30 UTC on the 16th is already the 17th at UTC+02:00.
    let late = Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap();
    record_at(&store, late, "calm", 2);

    let east = FixedOffset::east_opt(2 * 3600).unwrap();
    let local = EmotionAggregator::new(&store, FixedClock::with_offset(now(), east));
    let series = local.aggregate(2).unwrap().entries;
    assert!(series[0].is_empty());
    assert_eq!(series[1].averages.get(&EmotionKind::Calm), Some(&2.0));

    let utc = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let series = utc.aggregate(2).unwrap().entries;
    assert_eq!(series[0].averages.get(&EmotionKind::Calm), Some(&2.0));
    assert!(series[1].is_empty());
}

#[test]
fn stats_report_counts_and_overall_means() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now(), "happy", 4);
    record_at(&store, now() - Duration::days(1), "happy", 7);
    record_at(&store, now() - Duration::days(1), "sad", 2);
    record_at(&store, now() - Duration::days(40), "sad", 10);

    let aggregator = EmotionAggregator::new(&store, FixedClock::utc(now()));
    let stats = aggregator.stats(30).unwrap();

    assert_eq!(stats.corrupted, None);
    assert_eq!(stats.counts.get(&EmotionKind::Happy), Some(&2));
    assert_eq!(stats.counts.get(&EmotionKind::Sad), Some(&1));
    assert_eq!(stats.average_intensity.get(&EmotionKind::Happy), Some(&5.5));
    assert_eq!(stats.average_intensity.get(&EmotionKind::Sad), Some(&2.0));
    assert_eq!(stats.daily.len(), 30);
}

#[test]
fn by_type_and_range_return_newest_first() {
    let store = StorageEngine::new(MemoryBackend::new());
    record_at(&store, now() - Duration::days(3), "happy", 2);
    record_at(&store, now() - Duration::days(1), "happy", 6);
    record_at(&store, now() - Duration::days(2), "sad", 5);

    let service = EmotionService::new(&store, FixedClock::utc(now()));
    let happy: Vec<_> = service
        .by_type(EmotionKind::Happy)
        .entries
        .into_iter()
        .map(|e| e.intensity)
        .collect();
    assert_eq!(happy, vec![6, 2]);

    let recent: Vec<_> = service
        .in_range(now() - Duration::days(2), now())
        .entries
        .into_iter()
        .map(|e| e.intensity)
        .collect();
    assert_eq!(recent, vec![6, 5]);
}

#[test]
fn get_unknown_id_is_not_found() {
    let store = StorageEngine::new(MemoryBackend::new());
    let service = EmotionService::new(&store, FixedClock::utc(now()));
    let stored = service.record(EmotionInput::new("calm", 1)).unwrap();

    assert_eq!(service.get(&stored.id).unwrap(), stored);
    assert_eq!(service.get("nope").unwrap_err().code(), "not_found");
}
