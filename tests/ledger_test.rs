//! Ledger workflow tests against a real PostgreSQL instance
//!
//! Covers the transactional order/deposit lifecycle end to end at the
//! repository layer: guarded debits, terminal-state conflicts, refunds,
//! sold counters, and deposit crediting.

mod helpers;

use assert_matches::assert_matches;
use helpers::database_helper::TestDatabase;
use serde_json::json;
use serial_test::serial;
use TopupStore::database::repositories::{NewDeposit, NewOrder};
use TopupStore::models::{DepositStatus, OrderStatus};
use TopupStore::utils::helpers::generate_display_code;
use TopupStore::StoreError;

fn order_payload(telegram_id: i64, product_id: i64, price: i64) -> NewOrder {
    NewOrder {
        order_code: generate_display_code("ORD"),
        telegram_id,
        product_id,
        product_name: "PUBG UC".to_string(),
        category_name: "PUBG".to_string(),
        product_amount: "1000 UC".to_string(),
        price,
        currency: "MMK".to_string(),
        input_data: json!({ "player_id": "5123456789" }),
    }
}

#[tokio::test]
#[serial]
async fn order_reject_refunds_and_stores_note() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 10_000).await;
    let (_, product_id) = db.seed_product("PUBG UC", 4_000).await;

    let order = db
        .database
        .orders
        .create_pending(order_payload(buyer, product_id, 4_000))
        .await
        .expect("place order");

    assert_eq!(order.status, OrderStatus::Pending);
    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 6_000);
    assert_eq!(user.total_orders, 1);
    assert_eq!(user.pending_orders, 1);

    let processed = db
        .database
        .orders
        .reject(&order.order_code, 777, "out of stock")
        .await
        .expect("reject order");

    assert_eq!(processed.order.status, OrderStatus::Rejected);
    assert_eq!(processed.order.note.as_deref(), Some("out of stock"));
    assert_eq!(processed.balance_after, 10_000);

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 10_000);
    assert_eq!(user.rejected_orders, 1);
    assert_eq!(user.pending_orders, 0);
}

#[tokio::test]
#[serial]
async fn order_approve_bumps_sold_counters_and_keeps_balance() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 10_000).await;
    let (category_id, product_id) = db.seed_product("ML Diamonds", 4_000).await;

    let order = db
        .database
        .orders
        .create_pending(order_payload(buyer, product_id, 4_000))
        .await
        .expect("place order");

    let processed = db
        .database
        .orders
        .approve(&order.order_code, 777)
        .await
        .expect("approve order");

    assert_eq!(processed.order.status, OrderStatus::Approved);
    assert_eq!(processed.order.processed_by, Some(777));
    assert_eq!(processed.balance_after, 6_000);

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 6_000);
    assert_eq!(user.approved_orders, 1);
    assert_eq!(user.pending_orders, 0);

    let product = db.database.catalog.find_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.total_sold, 1);
    let category = db.database.catalog.find_category(category_id).await.unwrap().unwrap();
    assert_eq!(category.total_sold, 1);
}

#[tokio::test]
#[serial]
async fn processed_order_cannot_be_processed_again() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 10_000).await;
    let (_, product_id) = db.seed_product("Free Fire Diamonds", 4_000).await;

    let order = db
        .database
        .orders
        .create_pending(order_payload(buyer, product_id, 4_000))
        .await
        .expect("place order");
    db.database
        .orders
        .approve(&order.order_code, 777)
        .await
        .expect("first approve");

    let err = db.database.orders.approve(&order.order_code, 777).await.unwrap_err();
    assert_matches!(err, StoreError::InvalidStateTransition { entity: "order", .. });

    // A late reject must not refund an approved order
    let err = db
        .database
        .orders
        .reject(&order.order_code, 777, "changed my mind")
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::InvalidStateTransition { entity: "order", .. });

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 6_000);
    assert_eq!(user.approved_orders, 1);

    let product = db.database.catalog.find_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.total_sold, 1, "sold counter applied exactly once");
}

#[tokio::test]
#[serial]
async fn insufficient_balance_changes_nothing() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 1_000).await;
    let (_, product_id) = db.seed_product("PUBG UC", 4_000).await;

    let err = db
        .database
        .orders
        .create_pending(order_payload(buyer, product_id, 4_000))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::InsufficientBalance {
            balance: 1_000,
            required: 4_000,
            ..
        }
    );

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 1_000);
    assert_eq!(user.total_orders, 0);
    assert_eq!(user.pending_orders, 0);
}

#[tokio::test]
#[serial]
async fn deposit_credits_balance_only_on_approval() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 0).await;
    let method_id = db.seed_payment_method("KBZPay").await;

    let deposit = db
        .database
        .deposits
        .create_pending(NewDeposit {
            deposit_code: generate_display_code("DEP"),
            telegram_id: buyer,
            amount: 20_000,
            payment_method_id: method_id,
            payment_method_name: "KBZPay".to_string(),
            receipt_file_id: "AgACAgQAAxkBAAIB".to_string(),
        })
        .await
        .expect("create deposit");

    assert_eq!(deposit.status, DepositStatus::Pending);
    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 0, "pending deposit is balance-neutral");
    assert_eq!(user.total_deposits, 0);

    let processed = db
        .database
        .deposits
        .approve(&deposit.deposit_code, 777)
        .await
        .expect("approve deposit");

    assert_eq!(processed.deposit.status, DepositStatus::Approved);
    assert_eq!(processed.balance_after, 20_000);

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 20_000);
    assert_eq!(user.total_deposits, 20_000);

    let err = db.database.deposits.approve(&deposit.deposit_code, 777).await.unwrap_err();
    assert_matches!(err, StoreError::InvalidStateTransition { entity: "deposit", .. });
    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 20_000, "double approval credits exactly once");
}

#[tokio::test]
#[serial]
async fn rejected_deposit_is_balance_neutral() {
    let db = TestDatabase::new().await.expect("test database");
    let buyer = TestDatabase::unique_telegram_id();
    db.seed_buyer(buyer, 5_000).await;
    let method_id = db.seed_payment_method("WavePay").await;

    let deposit = db
        .database
        .deposits
        .create_pending(NewDeposit {
            deposit_code: generate_display_code("DEP"),
            telegram_id: buyer,
            amount: 20_000,
            payment_method_id: method_id,
            payment_method_name: "WavePay".to_string(),
            receipt_file_id: "AgACAgQAAxkBAAIC".to_string(),
        })
        .await
        .expect("create deposit");

    let rejected = db
        .database
        .deposits
        .reject(&deposit.deposit_code, 777, "receipt unreadable")
        .await
        .expect("reject deposit");

    assert_eq!(rejected.status, DepositStatus::Rejected);
    assert_eq!(rejected.note.as_deref(), Some("receipt unreadable"));

    let user = db.database.users.find_by_telegram_id(buyer).await.unwrap().unwrap();
    assert_eq!(user.balance, 5_000);
    assert_eq!(user.total_deposits, 0);
}
