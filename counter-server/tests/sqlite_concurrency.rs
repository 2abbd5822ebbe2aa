//! SQLite 并发测试
//!
//! 文件数据库 (WAL, 5 连接)，多个任务同时下单抢同一件库存。

use std::collections::HashSet;
use std::sync::Arc;

use chrono::FixedOffset;
use counter_server::db::DbService;
use counter_server::stock::StockLedger;
use counter_server::{CounterStore, OrderError, OrdersManager, SqliteStore};
use shared::models::{OrderCreate, OrderItemInput, StockItemCreate};

const CONCURRENCY: usize = 20;

async fn open(path: &std::path::Path) -> Arc<dyn CounterStore> {
    let db = DbService::new(&path.to_string_lossy()).await.unwrap();
    Arc::new(SqliteStore::new(db))
}

fn manager(store: Arc<dyn CounterStore>) -> OrdersManager {
    OrdersManager::new(store, FixedOffset::west_opt(3 * 3600).unwrap())
}

async fn add_stock(store: Arc<dyn CounterStore>, quantity: i64) -> i64 {
    StockLedger::new(store)
        .add(StockItemCreate {
            name: "Pie".into(),
            description: None,
            detailed_description: Some("Apple pie".into()),
            price: Some(5.0),
            image_ref: None,
            quantity,
            is_promo: false,
        })
        .await
        .unwrap()
        .id
}

fn order_cmd(name: String, stock_id: i64) -> OrderCreate {
    OrderCreate {
        customer_name: Some(name),
        phone: None,
        items: Some(vec![OrderItemInput {
            id: stock_id,
            name: None,
            quantity: 1,
        }]),
        total: Some(5.0),
        payment_method: Some("cash".into()),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_units_are_sold_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("counter.db")).await;
    let stock_id = add_stock(store.clone(), 5).await;
    let orders = manager(store.clone());

    let mut handles = Vec::new();
    for i in 0..CONCURRENCY {
        let orders = orders.clone();
        handles.push(tokio::spawn(async move {
            orders.create_order(order_cmd(format!("guest-{i}"), stock_id)).await
        }));
    }

    let mut numbers = HashSet::new();
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(placed) => assert!(numbers.insert(placed.order_number)),
            Err(OrderError::InsufficientStock(_)) => refused += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(numbers.len(), 5);
    assert_eq!(refused, CONCURRENCY - 5);
    // Failed placements do not consume numbers
    let expected: HashSet<String> = (1..=5).map(|n| format!("{n:03}")).collect();
    assert_eq!(numbers, expected);
    assert_eq!(store.find_stock(stock_id).await.unwrap().unwrap().quantity, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_numbers_are_unique_and_dense() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("counter.db")).await;
    let stock_id = add_stock(store.clone(), 1_000).await;
    let orders = manager(store.clone());

    let mut handles = Vec::new();
    for i in 0..CONCURRENCY {
        let orders = orders.clone();
        handles.push(tokio::spawn(async move {
            orders
                .create_order(order_cmd(format!("guest-{i}"), stock_id))
                .await
                .unwrap()
                .order_number
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort();
    let expected: Vec<String> = (1..=CONCURRENCY).map(|n| format!("{n:03}")).collect();
    assert_eq!(numbers, expected);
}

#[tokio::test]
async fn numbering_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counter.db");

    let stock_id = {
        let store = open(&path).await;
        let stock_id = add_stock(store.clone(), 10).await;
        let orders = manager(store);
        orders.create_order(order_cmd("Ana".into(), stock_id)).await.unwrap();
        orders.create_order(order_cmd("Bia".into(), stock_id)).await.unwrap();
        stock_id
    };

    let store = open(&path).await;
    let orders = manager(store.clone());
    let placed = orders.create_order(order_cmd("Caio".into(), stock_id)).await.unwrap();
    assert_eq!(placed.order_number, "003");
    assert_eq!(store.find_stock(stock_id).await.unwrap().unwrap().quantity, 7);

    orders.reset_all().await.unwrap();
    let placed = orders.create_order(order_cmd("Duda".into(), stock_id)).await.unwrap();
    assert_eq!(placed.order_number, "001");
}
