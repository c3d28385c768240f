//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error::{ErrorKind, ErrorReport};
use super::response::ErrorBody;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 存储错误被隐藏时返回的固定消息
pub const GENERIC_ERROR_MESSAGE: &str = "internal server error";

/// 错误细节是否返回给客户端
#[derive(Debug, Clone, Copy)]
pub struct ErrorPolicy {
    pub expose_details: bool,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            expose_details: true,
        }
    }
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        request_id = %request_id,
        "{} {} - {} - {}ms",
        method,
        uri,
        status,
        duration.as_millis()
    );

    response
}

/// 错误披露中间件：记录错误细节，并按策略隐藏存储错误的消息
pub async fn error_disclosure_middleware(
    State(policy): State<ErrorPolicy>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    match report.kind {
        ErrorKind::Storage => error!("Storage error: {}", report.detail),
        ErrorKind::Validation => warn!("Rejected request: {}", report.detail),
        ErrorKind::NotFound => {}
    }

    if policy.expose_details || report.kind != ErrorKind::Storage {
        return response;
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(GENERIC_ERROR_MESSAGE)),
    )
        .into_response()
}
