//! Order placement / stock invariant and credit flow integration tests

use surrealdb::engine::local::{Db, Mem};
use surrealdb::Surreal;

use hall_server::db::models::{
    BilliardTableCreate, CloseSession, CreditStatus, CreditorRepay, MenuItemCreate, OpenSession,
    PaymentCreate, PaymentType, PlaceOrder,
};
use hall_server::db::repository::{
    BilliardTableRepository, CreditorRepository, MenuItemRepository, PaymentRepository,
};
use hall_server::{Config, ServerState};

async fn test_state() -> ServerState {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hall_server::db::define_schema(&db).await.unwrap();
    ServerState::with_db(Config::with_overrides("/tmp/hall-test", 0), db)
}

async fn open_session(state: &ServerState, table_name: &str) -> String {
    let table = BilliardTableRepository::new(state.db.clone())
        .create(BilliardTableCreate {
            name: table_name.to_string(),
            table_type: "POOL".to_string(),
            rate_per_hour: 100.0,
            description: None,
        })
        .await
        .unwrap();
    let session = state
        .session_engine
        .open(OpenSession {
            table_id: table.id.unwrap().to_string(),
        })
        .await
        .unwrap();
    session.id.unwrap().to_string()
}

async fn create_menu_item(state: &ServerState, name: &str, price: f64, stock: i64) -> String {
    let item = MenuItemRepository::new(state.db.clone())
        .create(MenuItemCreate {
            name: name.to_string(),
            category: "DRINKS".to_string(),
            price,
            cost_price: Some(price / 2.0),
            quantity: Some(stock),
            unit: Some("bottle".to_string()),
        })
        .await
        .unwrap();
    item.id.unwrap().to_string()
}

async fn stock_of(state: &ServerState, item_id: &str) -> i64 {
    MenuItemRepository::new(state.db.clone())
        .find_by_id(item_id)
        .await
        .unwrap()
        .unwrap()
        .quantity
}

#[tokio::test]
async fn order_rejects_insufficient_stock_without_touching_it() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;
    let item_id = create_menu_item(&state, "Cola", 3.5, 5).await;

    let err = state
        .order_service
        .place(PlaceOrder {
            session_id: session_id.clone(),
            menu_item_id: item_id.clone(),
            quantity: 6,
            discount: 0.0,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Insufficient stock"), "{err}");
    assert_eq!(stock_of(&state, &item_id).await, 5);
}

#[tokio::test]
async fn order_reserves_stock_and_cancel_restores_it_exactly() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;
    let item_id = create_menu_item(&state, "Cola", 3.5, 5).await;

    let order = state
        .order_service
        .place(PlaceOrder {
            session_id: session_id.clone(),
            menu_item_id: item_id.clone(),
            quantity: 3,
            discount: 0.0,
        })
        .await
        .unwrap();
    assert_eq!(order.name, "Cola");
    assert_eq!(order.total, 10.5);
    assert_eq!(stock_of(&state, &item_id).await, 2);

    state
        .order_service
        .cancel(&order.id.unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(stock_of(&state, &item_id).await, 5);

    let orders = state
        .order_service
        .list_by_session(&session_id)
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn order_line_total_floors_at_zero() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;
    let item_id = create_menu_item(&state, "Snack", 5.0, 10).await;

    let order = state
        .order_service
        .place(PlaceOrder {
            session_id,
            menu_item_id: item_id,
            quantity: 1,
            discount: 10.0,
        })
        .await
        .unwrap();
    assert_eq!(order.total, 0.0);
}

#[tokio::test]
async fn close_pulls_food_total_from_orders() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;
    let item_id = create_menu_item(&state, "Cola", 3.5, 10).await;

    state
        .order_service
        .place(PlaceOrder {
            session_id: session_id.clone(),
            menu_item_id: item_id.clone(),
            quantity: 2,
            discount: 0.0,
        })
        .await
        .unwrap();
    state
        .order_service
        .place(PlaceOrder {
            session_id: session_id.clone(),
            menu_item_id: item_id,
            quantity: 1,
            discount: 1.0,
        })
        .await
        .unwrap();

    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    // 7.00 + 2.50 on top of the one-hour minimum charge
    assert_eq!(closed.food_total, 9.5);
    assert_eq!(closed.grand_total, 109.5);
}

#[tokio::test]
async fn prior_payment_reduces_the_reconciling_payment() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;

    state
        .credit_service
        .record_payment(PaymentCreate {
            session_id: session_id.clone(),
            payment_type: PaymentType::Transfer,
            amount: 60.0,
            note: None,
        })
        .await
        .unwrap();

    let closed = state
        .session_engine
        .close(&session_id, CloseSession::default())
        .await
        .unwrap();
    assert_eq!(closed.grand_total, 100.0);

    let payments = PaymentRepository::new(state.db.clone())
        .list_by_session(&closed.id.clone().unwrap())
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);
    let auto = payments
        .iter()
        .find(|p| p.payment_type == PaymentType::Cash)
        .expect("auto payment");
    assert_eq!(auto.amount, 40.0);
}

#[tokio::test]
async fn outstanding_payment_opens_a_creditor_and_repayments_wear_it_down() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;

    state
        .credit_service
        .record_payment(PaymentCreate {
            session_id: session_id.clone(),
            payment_type: PaymentType::Outstanding,
            amount: 50.0,
            note: Some("Mr. Wu".to_string()),
        })
        .await
        .unwrap();

    let creditors = CreditorRepository::new(state.db.clone())
        .find_all(Some(CreditStatus::Pending))
        .await
        .unwrap();
    assert_eq!(creditors.len(), 1);
    let creditor = &creditors[0];
    assert_eq!(creditor.amount, 50.0);
    assert_eq!(creditor.remaining, 50.0);
    let creditor_id = creditor.id.clone().unwrap().to_string();

    // Partial repayment decrements remaining
    let after = state
        .credit_service
        .repay(
            &creditor_id,
            CreditorRepay {
                amount: 20.0,
                payment_type: PaymentType::Cash,
                note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(after.paid_amount, 20.0);
    assert_eq!(after.remaining, 30.0);
    assert_eq!(after.status, CreditStatus::Pending);

    // Over-repayment is rejected
    let err = state
        .credit_service
        .repay(
            &creditor_id,
            CreditorRepay {
                amount: 31.0,
                payment_type: PaymentType::Cash,
                note: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("exceeds remaining"), "{err}");

    // Settling the rest flips the creditor to PAID
    let settled = state
        .credit_service
        .repay(
            &creditor_id,
            CreditorRepay {
                amount: 30.0,
                payment_type: PaymentType::Transfer,
                note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(settled.remaining, 0.0);
    assert_eq!(settled.status, CreditStatus::Paid);

    let repayments = state
        .credit_service
        .list_repayments(&creditor_id)
        .await
        .unwrap();
    assert_eq!(repayments.len(), 2);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let state = test_state().await;
    let session_id = open_session(&state, "T1").await;

    let err = state
        .credit_service
        .record_payment(PaymentCreate {
            session_id: session_id.clone(),
            payment_type: PaymentType::Cash,
            amount: 0.0,
            note: None,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("positive"), "{err}");

    let item_id = create_menu_item(&state, "Cola", 3.5, 5).await;
    let err = state
        .order_service
        .place(PlaceOrder {
            session_id,
            menu_item_id: item_id,
            quantity: 0,
            discount: 0.0,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("positive"), "{err}");
}
