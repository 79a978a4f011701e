use chrono::Duration;
use rpaytracker::core::checkin::{CheckInOutController, PaySettings};
use rpaytracker::core::policy::FailurePolicy;
use rpaytracker::db::memory::MemoryStore;
use rpaytracker::db::pool::DbPool;
use rpaytracker::db::queries::insert_session;
use rpaytracker::db::store::SessionStore;
use rpaytracker::errors::AppError;
use rpaytracker::models::clock_state::ClockState;
use rpaytracker::models::session::Session;
use rpaytracker::widget::sink::MemorySink;
use rpaytracker::widget::snapshot::{SnapshotFormat, WidgetSnapshot};

mod common;
use common::{assert_close, ts};

fn settings(format: SnapshotFormat) -> PaySettings {
    PaySettings {
        hourly_rate: 15.3,
        paycheck_day: ts(2026, 3, 13, 0, 0),
        snapshot_format: format,
    }
}

fn controller(store: MemoryStore) -> CheckInOutController<MemoryStore, MemorySink> {
    CheckInOutController::new(store, MemorySink::default(), settings(SnapshotFormat::Live))
        .expect("controller")
}

#[test]
fn test_initial_state_comes_from_store() {
    let t = ts(2026, 3, 2, 9, 0);

    let ctl = controller(MemoryStore::new());
    assert_eq!(ctl.state(), ClockState::CheckedOut);

    let ctl = controller(MemoryStore::with_sessions(vec![
        Session::closed(t - Duration::days(1), t - Duration::hours(20)),
        Session::open(t),
    ]));
    assert_eq!(ctl.state(), ClockState::CheckedIn);
}

#[test]
fn test_check_in_opens_session_and_publishes_snapshot() {
    let t = ts(2026, 3, 2, 9, 0);
    let history = Session::closed(t - Duration::days(1), t - Duration::days(1) + Duration::minutes(120));
    let mut ctl = controller(MemoryStore::with_sessions(vec![history]));

    let tr = ctl.check_in(t).expect("check in");

    assert_eq!(tr.state, ClockState::CheckedIn);
    assert_eq!(ctl.state(), ClockState::CheckedIn);
    assert_eq!(tr.session.start, t);
    assert!(tr.session.is_open());

    let sessions = ctl.store_mut().sessions().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, tr.session.id);

    match ctl.sink().last() {
        Some(WidgetSnapshot::Live(s)) => {
            assert!(s.checked_in);
            assert_eq!(s.start_date, t);
            assert_close(s.history_minutes, 120.0);
            assert_eq!(s.paycheck_day, ts(2026, 3, 13, 0, 0));
            assert_close(s.hourly_rate, 15.3);
        }
        other => panic!("unexpected snapshot: {:?}", other),
    }
}

#[test]
fn test_check_in_twice_is_rejected() {
    let t = ts(2026, 3, 2, 9, 0);
    let mut ctl = controller(MemoryStore::new());

    ctl.check_in(t).unwrap();
    let err = ctl.check_in(t + Duration::minutes(5)).unwrap_err();

    assert!(matches!(err, AppError::AlreadyCheckedIn(_)));
    assert_eq!(ctl.store_mut().sessions().unwrap().len(), 1);
    assert_eq!(ctl.sink().published.len(), 1);
}

#[test]
fn test_check_out_closes_session_and_banks_minutes() {
    let t = ts(2026, 3, 2, 9, 0);
    let mut ctl = controller(MemoryStore::new());

    ctl.check_in(t).unwrap();
    let tr = ctl.check_out(t + Duration::minutes(90)).expect("check out");

    assert_eq!(tr.state, ClockState::CheckedOut);
    assert_eq!(tr.session.end, Some(t + Duration::minutes(90)));
    assert_close(tr.summary.historical_minutes, 90.0);
    assert_close(tr.summary.current_session_pay, 0.0);
    assert_close(tr.summary.gross_pay, 22.95);

    let stored = ctl.store_mut().sessions().unwrap();
    assert_eq!(stored[0].end, Some(t + Duration::minutes(90)));

    let snap = ctl.sink().last().unwrap();
    assert!(!snap.checked_in());
    assert_close(snap.gross_pay_at(t + Duration::days(3)), 22.95);
    assert_close(snap.session_pay_at(t + Duration::days(3)), 0.0);
}

#[test]
fn test_check_out_without_open_session_is_rejected() {
    let t = ts(2026, 3, 2, 9, 0);
    let closed = Session::closed(t - Duration::hours(3), t - Duration::hours(1));
    let mut ctl = controller(MemoryStore::with_sessions(vec![closed.clone()]));

    let err = ctl.check_out(t).unwrap_err();

    assert!(matches!(err, AppError::NoOpenSession));
    assert_eq!(ctl.state(), ClockState::CheckedOut);
    assert_eq!(ctl.store_mut().sessions().unwrap(), vec![closed]);
    assert!(ctl.sink().published.is_empty());

    // never a persistence failure, so a lenient policy does not swallow it
    assert!(FailurePolicy::Warn.apply("Check-out", Err::<(), _>(err)).is_err());
}

#[test]
fn test_toggle_alternates() {
    let t = ts(2026, 3, 2, 9, 0);
    let mut ctl = controller(MemoryStore::new());

    assert_eq!(ctl.toggle(t).unwrap().state, ClockState::CheckedIn);
    assert_eq!(ctl.toggle(t + Duration::hours(1)).unwrap().state, ClockState::CheckedOut);
    assert_eq!(ctl.toggle(t + Duration::hours(2)).unwrap().state, ClockState::CheckedIn);
    assert_eq!(ctl.store_mut().sessions().unwrap().len(), 2);
}

#[test]
fn test_check_in_write_failure_is_typed() {
    let mut ctl = controller(MemoryStore::failing());

    let result = ctl.check_in(ts(2026, 3, 2, 9, 0));

    assert_eq!(ctl.state(), ClockState::CheckedOut);
    assert!(ctl.sink().published.is_empty());
    let err = result.unwrap_err();
    assert!(err.is_persistence());

    let fatal = FailurePolicy::Fatal.apply("Check-in", Err::<(), _>(err));
    assert!(matches!(fatal, Err(AppError::Persistence { op: "check-in", .. })));
}

#[test]
fn test_check_out_write_failure_leaves_controller_usable() {
    let t = ts(2026, 3, 2, 9, 0);
    let mut store = MemoryStore::with_sessions(vec![Session::open(t)]);
    store.fail_writes = true;
    let mut ctl = controller(store);

    let result = ctl.check_out(t + Duration::hours(2));
    let handled = FailurePolicy::Warn.apply("Check-out", result).expect("warn policy");

    assert!(handled.is_none());
    assert_eq!(ctl.state(), ClockState::CheckedIn);
    assert!(ctl.store_mut().sessions().unwrap()[0].is_open());

    let audit = &ctl.store_mut().audit;
    assert!(audit.iter().any(|(op, target, _)| op == "persist_failed" && target == "check-out"));

    // store recovers, next attempt goes through
    ctl.store_mut().fail_writes = false;
    assert!(ctl.check_out(t + Duration::hours(3)).is_ok());
}

#[test]
fn test_precomputed_snapshot_carries_pay() {
    let t = ts(2026, 3, 2, 9, 0);
    let mut ctl = CheckInOutController::new(
        MemoryStore::with_sessions(vec![Session::open(t)]),
        MemorySink::default(),
        settings(SnapshotFormat::Precomputed),
    )
    .unwrap();

    let tr = ctl.check_out(t + Duration::minutes(120)).unwrap();

    match &tr.snapshot {
        WidgetSnapshot::Precomputed(s) => {
            assert!(!s.checked_in);
            assert_close(s.gross_total, 30.6);
            assert_close(s.current_session_pay, 0.0);
        }
        other => panic!("unexpected snapshot: {:?}", other),
    }
}

#[test]
fn test_sqlite_store_round_trip() {
    let t = ts(2026, 3, 2, 9, 0);
    let pool = DbPool::in_memory().expect("in-memory db");
    let mut ctl =
        CheckInOutController::new(pool, MemorySink::default(), settings(SnapshotFormat::Live))
            .unwrap();

    ctl.check_in(t).unwrap();
    ctl.check_out(t + Duration::minutes(45)).unwrap();
    ctl.check_in(t + Duration::hours(2)).unwrap();

    let summary = ctl.summary(t + Duration::hours(2) + Duration::minutes(15)).unwrap();
    assert_close(summary.historical_minutes, 45.0);
    assert_close(summary.open_session_minutes, 15.0);

    let (mut pool, _) = ctl.into_parts();
    let sessions = pool.sessions().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].is_open());
    assert_eq!(sessions[1].end, Some(t + Duration::minutes(45)));

    let audited: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation IN ('check_in', 'check_out')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(audited, 3);
}

#[test]
fn test_sqlite_store_allows_one_open_session() {
    let pool = DbPool::in_memory().unwrap();
    let t = ts(2026, 3, 2, 9, 0);

    insert_session(&pool.conn, &Session::open(t)).unwrap();
    assert!(insert_session(&pool.conn, &Session::open(t + Duration::hours(1))).is_err());
    assert!(insert_session(&pool.conn, &Session::closed(t - Duration::hours(3), t - Duration::hours(2))).is_ok());
}

fn check_in_after_clock_moved_back<S: SessionStore>(store: S) -> S {
    let t = ts(2026, 3, 2, 9, 0);
    let mut ctl =
        CheckInOutController::new(store, MemorySink::default(), settings(SnapshotFormat::Live))
            .unwrap();

    ctl.check_in(t).unwrap();
    ctl.check_out(t + Duration::hours(1)).unwrap();

    // clock jumped back: the new session starts before the previous one
    let tr = ctl.check_in(t - Duration::minutes(30)).expect("skewed check in");
    assert_eq!(ctl.state(), ClockState::CheckedIn);

    let sessions = ctl.store_mut().sessions().unwrap();
    assert_eq!(sessions[0].id, tr.session.id);
    assert!(sessions[0].is_open());

    let out = ctl.check_out(t).expect("check out after skew");
    assert_eq!(out.session.id, tr.session.id);
    assert_close(out.summary.historical_minutes, 90.0);

    ctl.check_in(t + Duration::hours(2)).expect("check in again");
    ctl.into_parts().0
}

#[test]
fn test_memory_store_survives_clock_moving_back() {
    let mut store = check_in_after_clock_moved_back(MemoryStore::new());
    assert_eq!(store.sessions().unwrap().len(), 3);
}

#[test]
fn test_sqlite_store_survives_clock_moving_back() {
    let pool = check_in_after_clock_moved_back(DbPool::in_memory().unwrap());

    let mut fresh =
        CheckInOutController::new(pool, MemorySink::default(), settings(SnapshotFormat::Live))
            .unwrap();
    assert_eq!(fresh.state(), ClockState::CheckedIn);
    assert_eq!(fresh.store_mut().sessions().unwrap().len(), 3);
}
