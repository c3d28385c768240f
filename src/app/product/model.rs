//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// 创建/更新请求体；请求中的 `id` 被忽略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

impl ProductPayload {
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
