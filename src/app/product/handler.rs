//! 产品处理器

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
    response::Json,
};
use serde::de::DeserializeOwned;
use tracing::info;
use validator::Validate;

use super::model::{Product, ProductPayload};
use crate::app::AppState;
use crate::core::error::{AppError, AppResult};
use crate::core::response::MessageBody;

pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// `{id}` 路径参数，非整数时返回 400
#[derive(Debug, Clone, Copy)]
pub struct ProductId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("invalid product id: {}", e.body_text())))?;

        raw.parse::<i64>()
            .map(ProductId)
            .map_err(|e| AppError::validation(format!("invalid product id {:?}: {}", raw, e)))
    }
}

/// JSON 请求体，不检查 Content-Type；解码失败返回 400
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::validation(format!("invalid request body: {}", e)))
    }
}

fn check_payload(state: &AppState, payload: &ProductPayload) -> AppResult<()> {
    if state.strict_validation {
        payload.validate()?;
    }
    Ok(())
}

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.repo.list_all().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<Product>> {
    let product = state.repo.get_by_id(id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> AppResult<(StatusCode, Json<Product>)> {
    check_payload(&state, &payload)?;

    let product = state.repo.create(payload).await?;
    info!("Created product: {} ({})", product.name, product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

/// 路径中的 id 覆盖请求体中的 id，返回提交的内容
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> AppResult<Json<Product>> {
    check_payload(&state, &payload)?;

    state.repo.update(id, &payload).await?;
    info!("Updated product: {}", id);

    Ok(Json(payload.with_id(id)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<MessageBody>> {
    state.repo.delete(id).await?;
    info!("Deleted product: {}", id);

    Ok(Json(MessageBody::new(DELETED_MESSAGE)))
}
