use chrono::Duration;
use rpaytracker::errors::AppError;
use rpaytracker::models::pay_summary::PaySummary;
use rpaytracker::widget::sink::{FileSink, SnapshotSink, read_snapshot};
use rpaytracker::widget::snapshot::{
    LiveSnapshot, PrecomputedSnapshot, SnapshotFormat, WidgetSnapshot, days_until,
};
use rpaytracker::widget::timeline::{Timeline, WidgetEntry, step_from_secs};
use std::fs;

mod common;
use common::{assert_close, temp_home, ts};

fn live(checked_in: bool) -> WidgetSnapshot {
    WidgetSnapshot::Live(LiveSnapshot {
        checked_in,
        start_date: ts(2026, 3, 2, 9, 0),
        history_minutes: 60.0,
        paycheck_day: ts(2026, 3, 13, 0, 0),
        hourly_rate: 15.3,
    })
}

#[test]
fn test_live_round_trip() {
    let snap = live(true);

    let json = snap.to_json().unwrap();
    let back = WidgetSnapshot::decode(&json, SnapshotFormat::Live).unwrap();

    assert_eq!(back, snap);
    assert!(json.contains("\"checkedIn\""));
    assert!(json.contains("\"historyMinutes\""));
}

#[test]
fn test_precomputed_round_trip_through_live_reader() {
    let snap = WidgetSnapshot::Precomputed(PrecomputedSnapshot {
        current_session_pay: 12.345678901,
        gross_total: 1034.5,
        paycheck_day: ts(2026, 3, 13, 0, 0),
        checked_in: true,
    });

    let json = snap.to_json().unwrap();
    let back = WidgetSnapshot::decode(&json, SnapshotFormat::Live).unwrap();

    assert_eq!(back.format(), SnapshotFormat::Precomputed);
    assert!(back.checked_in());
    assert_close(back.session_pay_at(ts(2030, 1, 1, 0, 0)), 12.345678901);
    assert_close(back.gross_pay_at(ts(2030, 1, 1, 0, 0)), 1034.5);
}

#[test]
fn test_live_without_rate_uses_default() {
    let raw = r#"{
        "checkedIn": false,
        "startDate": "2026-03-02T09:00:00Z",
        "historyMinutes": 120.0,
        "paycheckDay": "2026-03-13T00:00:00Z"
    }"#;

    let snap = WidgetSnapshot::decode(raw, SnapshotFormat::Precomputed).unwrap();

    assert_eq!(snap.format(), SnapshotFormat::Live);
    assert_close(snap.gross_pay_at(ts(2026, 3, 3, 0, 0)), 30.6);
}

#[test]
fn test_mixed_document_is_rejected() {
    let raw = r#"{
        "checkedIn": true,
        "startDate": "2026-03-02T09:00:00Z",
        "historyMinutes": 10.0,
        "paycheckDay": "2026-03-13T00:00:00Z",
        "currentSessionPay": 1.0,
        "grossTotal": 2.0
    }"#;

    for canonical in [SnapshotFormat::Live, SnapshotFormat::Precomputed] {
        assert!(matches!(
            WidgetSnapshot::decode(raw, canonical),
            Err(AppError::Snapshot(_))
        ));
    }
}

#[test]
fn test_capture_uses_requested_format() {
    let summary = PaySummary {
        historical_minutes: 120.0,
        open_session_minutes: 0.0,
        current_session_pay: 0.0,
        gross_pay: 30.6,
    };
    let at = ts(2026, 3, 2, 17, 0);
    let payday = ts(2026, 3, 13, 0, 0);

    let a = WidgetSnapshot::capture(SnapshotFormat::Live, false, at, &summary, 15.3, payday);
    let b = WidgetSnapshot::capture(SnapshotFormat::Precomputed, false, at, &summary, 15.3, payday);

    assert_eq!(a.format(), SnapshotFormat::Live);
    assert_eq!(b.format(), SnapshotFormat::Precomputed);
    assert_close(a.gross_pay_at(at), b.gross_pay_at(at));
}

#[test]
fn test_days_until_paycheck_rounds_down() {
    let now = ts(2026, 3, 2, 12, 0);

    assert_eq!(days_until(now + Duration::hours(60), now), 2);
    assert_eq!(days_until(now + Duration::hours(23), now), 0);
    assert_eq!(days_until(now, now), 0);
    assert_eq!(days_until(now - Duration::hours(12), now), -1);
    assert_eq!(live(false).days_until_paycheck(ts(2026, 3, 12, 18, 0)), 0);
}

#[test]
fn test_timeline_recomputes_each_entry() {
    // 60 banked minutes, open since 09:00, first entry at 10:30
    let now = ts(2026, 3, 2, 10, 30);
    let entries: Vec<WidgetEntry> =
        Timeline::new(live(true), now, 3, Duration::minutes(30)).collect();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].date, now);
    assert_eq!(entries[2].date, now + Duration::minutes(60));

    assert_close(entries[0].session_pay, 22.95);
    assert_close(entries[0].gross_pay, 15.3 + 22.95);
    assert_close(entries[1].session_pay, 30.6);
    assert_close(entries[2].session_pay, 38.25);
    assert!(entries.iter().all(|e| e.checked_in && !e.error));
    assert_eq!(entries[0].days_until_paycheck, 10);
}

#[test]
fn test_timeline_checked_out_is_flat() {
    let now = ts(2026, 3, 2, 10, 30);
    let timeline = Timeline::new(live(false), now, 4, Duration::seconds(30));

    assert_eq!(timeline.len(), 4);
    for e in timeline {
        assert_close(e.session_pay, 0.0);
        assert_close(e.gross_pay, 15.3);
    }
}

#[test]
fn test_timeline_is_restartable() {
    let now = ts(2026, 3, 2, 10, 30);
    let mut timeline = Timeline::new(live(true), now, 5, Duration::seconds(30));

    let first: Vec<WidgetEntry> = timeline.clone().collect();
    let drained: Vec<WidgetEntry> = timeline.by_ref().collect();
    assert_eq!(first, drained);
    assert!(timeline.next().is_none());

    timeline.restart();
    assert_eq!(timeline.collect::<Vec<_>>(), first);
}

#[test]
fn test_missing_snapshot_yields_error_entry() {
    let home = temp_home("snapshot_missing");
    let path = std::path::Path::new(&home).join("widget.json");
    let now = ts(2026, 3, 2, 10, 30);

    let timeline = Timeline::load(&path, SnapshotFormat::Live, now, 60, Duration::seconds(30));
    assert!(timeline.is_error());

    let entries: Vec<WidgetEntry> = timeline.collect();
    assert_eq!(entries, vec![WidgetEntry::error(now)]);
    assert!(!entries[0].checked_in);
    assert_close(entries[0].gross_pay, 0.0);
    assert_close(entries[0].session_pay, 0.0);
}

#[test]
fn test_corrupt_snapshot_yields_error_entry() {
    let home = temp_home("snapshot_corrupt");
    let path = std::path::Path::new(&home).join("widget.json");
    fs::write(&path, "{\"checkedIn\": tru").unwrap();

    assert!(matches!(
        read_snapshot(&path, SnapshotFormat::Live),
        Err(AppError::Snapshot(_))
    ));

    let now = ts(2026, 3, 2, 10, 30);
    let entries: Vec<WidgetEntry> =
        Timeline::load(&path, SnapshotFormat::Live, now, 10, Duration::seconds(30)).collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].error);
}

#[test]
fn test_file_sink_replaces_snapshot() {
    let home = temp_home("snapshot_sink");
    let mut sink = FileSink::new(std::path::Path::new(&home).join("shared").join("widget.json"));

    sink.publish(&live(true)).unwrap();
    sink.publish(&live(false)).unwrap();

    let back = read_snapshot(sink.path(), SnapshotFormat::Live).unwrap();
    assert_eq!(back, live(false));
}

#[test]
fn test_timeline_stops_at_last_representable_date() {
    let now = ts(2026, 3, 2, 10, 30);

    // a second step lands beyond the largest date chrono can hold
    let timeline = Timeline::new(live(true), now, 3, Duration::seconds(10_000_000_000_000));
    assert_eq!(timeline.len(), 1);

    let entries: Vec<WidgetEntry> = timeline.collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, now);
}

#[test]
fn test_timeline_count_is_capped_by_entry_index() {
    let now = ts(2026, 3, 2, 10, 30);
    let huge = i32::MAX as usize + 10;

    let mut timeline = Timeline::new(live(false), now, huge, Duration::zero());
    assert_eq!(timeline.len(), i32::MAX as usize + 1);
    assert_eq!(timeline.next().map(|e| e.date), Some(now));
}

#[test]
fn test_step_from_secs_rejects_bad_intervals() {
    assert_eq!(step_from_secs(30).unwrap(), Duration::seconds(30));
    assert!(matches!(step_from_secs(0), Err(AppError::Config(_))));
    assert!(matches!(step_from_secs(-5), Err(AppError::Config(_))));
    assert!(matches!(step_from_secs(i64::MAX), Err(AppError::Config(_))));
}

#[test]
fn test_live_snapshot_accepts_reference_date_numbers() {
    let raw = r#"{
        "checkedIn": true,
        "startDate": 794134800,
        "historyMinutes": 60,
        "paycheckDay": 795052800.0
    }"#;

    let snap = WidgetSnapshot::decode(raw, SnapshotFormat::Live).expect("numeric dates");
    assert_eq!(snap, live(true));

    let now = ts(2026, 3, 2, 10, 30);
    assert_close(snap.session_pay_at(now), 22.95);
    assert_eq!(snap.days_until_paycheck(now), 10);
}

#[test]
fn test_reference_date_keeps_fractional_seconds() {
    let raw = r#"{"checkedIn":false,"startDate":794134830.5,"historyMinutes":0,"paycheckDay":795052800}"#;

    match WidgetSnapshot::decode(raw, SnapshotFormat::Live).unwrap() {
        WidgetSnapshot::Live(s) => {
            assert_eq!(s.start_date, ts(2026, 3, 2, 9, 0) + Duration::milliseconds(30_500));
        }
        other => panic!("unexpected snapshot: {:?}", other),
    }
}

#[test]
fn test_out_of_range_reference_date_is_rejected() {
    let raw = r#"{"checkedIn":false,"startDate":1e300,"historyMinutes":0,"paycheckDay":0}"#;
    assert!(matches!(
        WidgetSnapshot::decode(raw, SnapshotFormat::Live),
        Err(AppError::Snapshot(_))
    ));
}
