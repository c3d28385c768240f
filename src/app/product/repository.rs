//! 产品仓储
//!
//! 每个操作只对共享连接池执行一条参数化 SQL，不开事务，不做缓存。

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use super::model::{Product, ProductPayload};
use crate::core::error::{AppError, AppResult};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 全部产品，顺序由存储决定
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    /// 没有匹配行时返回 `AppError::NotFound`
    async fn get_by_id(&self, id: i64) -> AppResult<Product>;

    /// 返回带有存储分配 id 的产品
    async fn create(&self, payload: ProductPayload) -> AppResult<Product>;

    /// 覆盖 name/quantity/price；没有匹配行也算成功
    async fn update(&self, id: i64, payload: &ProductPayload) -> AppResult<()>;

    /// 没有匹配行也算成功
    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>("SELECT id, name, quantity, price FROM products")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage("could not query products", e))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::storage("could not query product", e))?
        .ok_or_else(|| AppError::not_found(format!("product {} not found", id)))
    }

    async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO products (name, quantity, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&payload.name)
        .bind(payload.quantity)
        .bind(payload.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::storage("could not insert product", e))?;

        Ok(payload.with_id(id))
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> AppResult<()> {
        sqlx::query("UPDATE products SET name = $1, quantity = $2, price = $3 WHERE id = $4")
            .bind(&payload.name)
            .bind(payload.quantity)
            .bind(payload.price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("could not update product", e))?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("could not delete product", e))?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("database health check failed", e))?;
        Ok(())
    }
}
