//! Shared helpers for the in-process HTTP tests
//!
//! The router is driven through `tower::ServiceExt::oneshot`; no socket is
//! bound.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use counter_server::core::Config;
use counter_server::services::build_router;
use counter_server::store::CounterStore;
use counter_server::{MemoryStore, ServerState};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{StockItem, StockItemCreate};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_ID: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

pub struct TestApp {
    pub state: ServerState,
    pub router: axum::Router,
    /// Keeps the work dir (uploads) alive for the test
    _work_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn CounterStore>) -> Self {
        let work_dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
        config.admin_id = ADMIN_ID.into();
        config.admin_password = ADMIN_PASSWORD.into();
        config.ensure_work_dir_structure().unwrap();

        let state = ServerState::with_store(config, store).unwrap();
        let router = build_router(state.clone());
        Self {
            state,
            router,
            _work_dir: work_dir,
        }
    }

    pub async fn add_stock(&self, name: &str, price: f64, quantity: i64) -> StockItem {
        self.state
            .stock
            .add(StockItemCreate {
                name: name.into(),
                description: None,
                detailed_description: Some(format!("{name} of the day")),
                price: Some(price),
                image_ref: None,
                quantity,
                is_promo: false,
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, bytes::Bytes) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(req).await;
        (status, parse_json(&body))
    }

    pub async fn post_json(&self, uri: &str, json: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        let (status, body) = self.send(req).await;
        (status, parse_json(&body))
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::post(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(req).await;
        (status, parse_json(&body))
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::delete(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(req).await;
        (status, parse_json(&body))
    }

    /// Place an order for `lines` of `(stock_id, quantity)`
    pub async fn place(&self, name: &str, lines: &[(i64, i64)], payment: &str) -> (StatusCode, Value) {
        let items: Vec<Value> = lines
            .iter()
            .map(|(id, quantity)| serde_json::json!({ "id": id, "quantity": quantity }))
            .collect();
        self.post_json(
            "/api/orders",
            serde_json::json!({
                "customer_name": name,
                "items": items,
                "total": 10.0,
                "payment_method": payment,
            }),
        )
        .await
    }
}

pub fn parse_json(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into()))
}
