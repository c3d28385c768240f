#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;

use inventory_api::{
    app::product::{
        model::{Product, ProductPayload},
        repository::ProductRepository,
    },
    build_app,
    core::middleware::ErrorPolicy,
    App, AppError, AppResult, AppState,
};

/// 内存仓储，id 从 1 开始自增
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: Mutex<(i64, BTreeMap<i64, Product>)>,
}

impl InMemoryProductRepository {
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().1.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.inner.lock().unwrap().1.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Product> {
        self.inner
            .lock()
            .unwrap()
            .1
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("product {} not found", id)))
    }

    async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let mut guard = self.inner.lock().unwrap();
        guard.0 += 1;
        let product = payload.with_id(guard.0);
        guard.1.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> AppResult<()> {
        let mut guard = self.inner.lock().unwrap();
        if let Some(existing) = guard.1.get_mut(&id) {
            *existing = payload.clone().with_id(id);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.inner.lock().unwrap().1.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// 每个操作都返回存储错误
pub struct FailingProductRepository;

fn unavailable(context: &'static str) -> AppError {
    AppError::storage(context, sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        Err(unavailable("could not query products"))
    }

    async fn get_by_id(&self, _id: i64) -> AppResult<Product> {
        Err(unavailable("could not query product"))
    }

    async fn create(&self, _payload: ProductPayload) -> AppResult<Product> {
        Err(unavailable("could not insert product"))
    }

    async fn update(&self, _id: i64, _payload: &ProductPayload) -> AppResult<()> {
        Err(unavailable("could not update product"))
    }

    async fn delete(&self, _id: i64) -> AppResult<()> {
        Err(unavailable("could not delete product"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(unavailable("database health check failed"))
    }
}

pub fn app_with(repo: Arc<dyn ProductRepository>, strict: bool, policy: ErrorPolicy) -> App {
    build_app(AppState::new(repo).with_strict_validation(strict), policy)
}

pub fn in_memory_app() -> (App, Arc<InMemoryProductRepository>) {
    let repo = Arc::new(InMemoryProductRepository::default());
    let app = app_with(repo.clone(), false, ErrorPolicy::default());
    (app, repo)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

pub async fn send(app: &App, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(Body::from(body.unwrap_or_default().to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        request_id,
        body,
    }
}
