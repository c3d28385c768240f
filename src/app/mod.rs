//! 应用层：共享状态与路由装配

pub mod product;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use std::sync::Arc;
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};

use crate::core::error::AppResult;
use crate::core::middleware::{
    error_disclosure_middleware, request_logging_middleware, ErrorPolicy,
};
use crate::core::response::HealthBody;
use product::repository::ProductRepository;

/// 对外服务：路由外层去掉路径末尾的 `/`
pub type App = NormalizePath<Router>;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ProductRepository>,
    pub strict_validation: bool,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            repo,
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthBody>> {
    state.repo.ping().await?;
    Ok(Json(HealthBody { status: "ok" }))
}

pub fn build_router(state: AppState, policy: ErrorPolicy) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(product::routes())
        .layer(middleware::from_fn_with_state(
            policy,
            error_disclosure_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/products/` 与 `/product/1/` 按去掉末尾 `/` 后的路径路由
pub fn build_app(state: AppState, policy: ErrorPolicy) -> App {
    NormalizePath::trim_trailing_slash(build_router(state, policy))
}
