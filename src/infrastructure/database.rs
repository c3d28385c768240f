//! 数据库基础设施

use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions},
    Error,
};
use tracing::info;

use super::config::DatabaseConfig;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    quantity BIGINT NOT NULL,
    price DOUBLE PRECISION NOT NULL
)
"#;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// 打开连接池并 ping 一次，失败即返回
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        let (host, port) = config.host_and_port();
        let options = PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(&config.user)
            .password(config.password())
            .database(&config.name);

        info!(
            "Connecting to database {} on {}:{} as {}",
            config.name, host, port, config.user
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let manager = Self { pool };
        manager.ping().await?;
        Ok(manager)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// 创建 products 表（已存在则跳过）
    pub async fn ensure_schema(&self) -> Result<(), Error> {
        info!("Ensuring products table exists");
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}
