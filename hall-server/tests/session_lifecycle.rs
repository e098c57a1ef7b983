//! Session lifecycle integration tests
//!
//! Runs the session engine against an in-memory SurrealDB engine.
//! Elapsed time is simulated by shifting persisted timestamps backwards.

use surrealdb::engine::local::{Db, Mem};
use surrealdb::{RecordId, Surreal};

use hall_server::db::models::{
    ApplyPromotion, BilliardTableCreate, CloseSession, OpenSession, PaymentType, Promotion,
    PromotionStatus, PromotionType, SessionStatus, TableStatus, TransferSession,
};
use hall_server::db::repository::{
    BilliardTableRepository, PaymentRepository, PromotionRepository,
};
use hall_server::{Config, ServerState};

const MINUTE_MS: i64 = 60_000;

async fn test_state() -> ServerState {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hall_server::db::define_schema(&db).await.unwrap();
    ServerState::with_db(Config::with_overrides("/tmp/hall-test", 0), db)
}

async fn create_table(state: &ServerState, name: &str, rate: f64) -> String {
    let repo = BilliardTableRepository::new(state.db.clone());
    let table = repo
        .create(BilliardTableCreate {
            name: name.to_string(),
            table_type: "SNOOKER".to_string(),
            rate_per_hour: rate,
            description: None,
        })
        .await
        .unwrap();
    table.id.unwrap().to_string()
}

/// Shift a timestamp field backwards, simulating elapsed time
async fn rewind(state: &ServerState, id: &RecordId, field: &str, minutes: i64) {
    state
        .db
        .query(format!("UPDATE $thing SET {field} = {field} - $delta"))
        .bind(("thing", id.clone()))
        .bind(("delta", minutes * MINUTE_MS))
        .await
        .unwrap();
}

async fn table_status(state: &ServerState, table_id: &str) -> TableStatus {
    BilliardTableRepository::new(state.db.clone())
        .find_by_id(table_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn open_marks_table_in_use_and_rejects_second_open() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession {
            table_id: table_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.rate_per_hour, 100.0);
    assert_eq!(table_status(&state, &table_id).await, TableStatus::InUse);

    // Table is gated: a second open must fail with no new session
    let err = state
        .session_engine
        .open(OpenSession {
            table_id: table_id.clone(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not available"), "{err}");

    let active = state
        .session_engine
        .active_for_table(&table_id)
        .await
        .unwrap()
        .expect("active session");
    assert_eq!(active.id, session.id);
}

#[tokio::test]
async fn immediate_close_bills_minimum_one_hour() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession {
            table_id: table_id.clone(),
        })
        .await
        .unwrap();
    let session_id = session.id.clone().unwrap().to_string();

    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();

    assert_eq!(closed.status, SessionStatus::Closed);
    assert!(closed.duration_mins < 0.1, "got {}", closed.duration_mins);
    assert_eq!(closed.table_charge, 100.0);
    assert_eq!(closed.grand_total, 100.0);
    assert!(closed.end_time.is_some());
    assert_eq!(table_status(&state, &table_id).await, TableStatus::Available);

    // Exactly one reconciling payment, defaulting to CASH
    let payments = PaymentRepository::new(state.db.clone())
        .list_by_session(&session.id.clone().unwrap())
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].payment_type, PaymentType::Cash);
    assert_eq!(payments[0].amount, 100.0);

    // Terminal state: closing again is rejected
    let err = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already closed"), "{err}");
}

#[tokio::test]
async fn pause_resume_composes_additively() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    // First pause: 5 minutes
    state.session_engine.pause(&session_id).await.unwrap();
    rewind(&state, &id, "paused_at", 5).await;
    let resumed = state.session_engine.resume(&session_id).await.unwrap();
    assert!(
        (resumed.total_paused_mins - 5.0).abs() < 0.1,
        "got {}",
        resumed.total_paused_mins
    );

    // Second pause: 10 minutes; accrual is additive
    state.session_engine.pause(&session_id).await.unwrap();
    rewind(&state, &id, "paused_at", 10).await;
    let resumed = state.session_engine.resume(&session_id).await.unwrap();
    assert!(
        (resumed.total_paused_mins - 15.0).abs() < 0.1,
        "got {}",
        resumed.total_paused_mins
    );
    assert_eq!(resumed.status, SessionStatus::Active);
    assert_eq!(resumed.paused_at, None);

    // Pausing an active session twice in a row is rejected
    state.session_engine.pause(&session_id).await.unwrap();
    let err = state.session_engine.pause(&session_id).await.unwrap_err();
    assert!(err.to_string().contains("not active"), "{err}");
    // Resuming twice likewise
    state.session_engine.resume(&session_id).await.unwrap();
    let err = state.session_engine.resume(&session_id).await.unwrap_err();
    assert!(err.to_string().contains("not paused"), "{err}");
}

#[tokio::test]
async fn example_scenario_90_minutes_with_30_minute_pause() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    // 90 minutes of wall clock, 30 of them paused (pause already resumed)
    rewind(&state, &id, "start_time", 90).await;
    state
        .db
        .query("UPDATE $thing SET total_paused_mins = 30.0")
        .bind(("thing", id.clone()))
        .await
        .unwrap();

    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    assert!(
        (closed.duration_mins - 60.0).abs() < 0.1,
        "got {}",
        closed.duration_mins
    );
    assert_eq!(closed.table_charge, 100.0);
}

#[tokio::test]
async fn closing_while_paused_folds_open_pause_interval() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    // 90 minutes on the clock, the last 30 spent paused without resuming
    rewind(&state, &id, "start_time", 90).await;
    state.session_engine.pause(&session_id).await.unwrap();
    rewind(&state, &id, "paused_at", 30).await;

    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();

    // The un-resumed pause is folded in before billing: 60 active minutes
    assert!(
        (closed.total_paused_mins - 30.0).abs() < 0.1,
        "got {}",
        closed.total_paused_mins
    );
    assert!(
        (closed.duration_mins - 60.0).abs() < 0.1,
        "got {}",
        closed.duration_mins
    );
    assert_eq!(closed.table_charge, 100.0);
    assert_eq!(closed.paused_at, None);
}

#[tokio::test]
async fn concurrent_close_creates_at_most_one_payment() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    let engine = state.session_engine.clone();
    let (a, b) = tokio::join!(
        engine.close(&session_id, CloseSession::default()),
        engine.close(&session_id, CloseSession::default()),
    );

    // One close wins, the other is rejected by the per-session lock + re-read
    assert!(a.is_ok() != b.is_ok(), "exactly one close must succeed");

    let payments = PaymentRepository::new(state.db.clone())
        .list_by_session(&id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1, "duplicate reconciling payment created");
}

#[tokio::test]
async fn transfer_rebinds_rate_and_swaps_table_status() {
    let state = test_state().await;
    let t1 = create_table(&state, "T1", 100.0).await;
    let t2 = create_table(&state, "T2", 200.0).await;

    let session = state
        .session_engine
        .open(OpenSession {
            table_id: t1.clone(),
        })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    let transferred = state
        .session_engine
        .transfer(
            &session_id,
            TransferSession {
                new_table_id: t2.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(transferred.table_name, "T2");
    assert_eq!(transferred.rate_per_hour, 200.0);
    assert_eq!(table_status(&state, &t1).await, TableStatus::Available);
    assert_eq!(table_status(&state, &t2).await, TableStatus::InUse);

    // The final rate applies to the whole elapsed duration
    rewind(&state, &id, "start_time", 90).await;
    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    assert_eq!(closed.table_charge, 300.0);
    assert_eq!(table_status(&state, &t2).await, TableStatus::Available);

    // Transferring to an occupied table is rejected
    let t3 = create_table(&state, "T3", 50.0).await;
    let other = state
        .session_engine
        .open(OpenSession {
            table_id: t3.clone(),
        })
        .await
        .unwrap();
    let t4 = create_table(&state, "T4", 50.0).await;
    state
        .session_engine
        .open(OpenSession {
            table_id: t4.clone(),
        })
        .await
        .unwrap();
    let err = state
        .session_engine
        .transfer(
            &other.id.unwrap().to_string(),
            TransferSession { new_table_id: t4 },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not available"), "{err}");
}

async fn create_promotion(state: &ServerState, promo: Promotion) -> String {
    PromotionRepository::new(state.db.clone())
        .create(promo)
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

fn free_hours_promo() -> Promotion {
    Promotion {
        id: None,
        name: "Play 2 get 1".to_string(),
        description: None,
        promotion_type: PromotionType::FreeHours,
        play_hours: 2.0,
        free_hours: 1.0,
        discount_pct: 0.0,
        discount_amt: 0.0,
        table_types: vec![],
        start_date: 0,
        end_date: i64::MAX,
        status: PromotionStatus::Active,
        created_at: 0,
        updated_at: 0,
    }
}

#[tokio::test]
async fn promotion_discount_is_recomputed_at_close() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;
    let promo_id = create_promotion(&state, free_hours_promo()).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    // Preview right after open: threshold not reached, discount 0
    let previewed = state
        .session_engine
        .apply_promotion(
            &session_id,
            ApplyPromotion {
                promotion_id: promo_id,
            },
        )
        .await
        .unwrap();
    assert_eq!(previewed.promotion_discount, 0.0);
    assert_eq!(previewed.promotion_name.as_deref(), Some("Play 2 get 1"));

    // By close time 2 hours have elapsed: one free hour at the table rate
    rewind(&state, &id, "start_time", 121).await;
    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    assert_eq!(closed.promotion_discount, 100.0);
    assert!(
        (closed.grand_total - (closed.table_charge - 100.0)).abs() < 0.01,
        "grand {} charge {}",
        closed.grand_total,
        closed.table_charge
    );
}

#[tokio::test]
async fn grand_total_floors_at_zero_and_skips_auto_payment() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession { table_id })
        .await
        .unwrap();
    let id = session.id.clone().unwrap();
    let session_id = id.to_string();

    // Manual discount exceeds every charge
    let closed = state
        .session_engine
        .close(
            &session_id,
            CloseSession {
                discount: Some(500.0),
                note: Some("comped".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(closed.grand_total, 0.0);
    assert_eq!(closed.note.as_deref(), Some("comped"));

    // Nothing remains, so no reconciling payment is created
    let payments = PaymentRepository::new(state.db.clone())
        .list_by_session(&id)
        .await
        .unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn list_and_active_lookup() {
    let state = test_state().await;
    let table_id = create_table(&state, "T1", 100.0).await;

    let session = state
        .session_engine
        .open(OpenSession {
            table_id: table_id.clone(),
        })
        .await
        .unwrap();
    let session_id = session.id.clone().unwrap().to_string();

    let listed = state
        .session_engine
        .list(session.start_time - MINUTE_MS, session.start_time + MINUTE_MS)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let detail = state.session_engine.get_detail(&session_id).await.unwrap();
    assert!(detail.orders.is_empty());
    assert!(detail.payments.is_empty());

    state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    let active = state
        .session_engine
        .active_for_table(&table_id)
        .await
        .unwrap();
    assert!(active.is_none());
}

#[tokio::test]
async fn embedded_db_opens_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let db = hall_server::db::open(&tmp.path().join("hall.db"))
        .await
        .unwrap();
    // Schema definitions are idempotent
    hall_server::db::define_schema(&db).await.unwrap();
}

#[tokio::test]
async fn unknown_ids_are_rejected() {
    let state = test_state().await;

    let err = state
        .session_engine
        .open(OpenSession {
            table_id: "billiard_table:missing".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");

    let err = state
        .session_engine
        .pause("table_session:missing")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");

    // Malformed ids fail validation before any state change
    let err = state.session_engine.pause("not a record id").await.unwrap_err();
    assert!(err.to_string().contains("Invalid"), "{err}");
}
