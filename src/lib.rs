//! # 库存 API
//!
//! 基于 Axum 和 SQLx 的产品 CRUD 服务：
//! - `app`：产品处理器、仓储和路由装配
//! - `core`：错误类型、响应体、中间件
//! - `infrastructure`：配置、数据库连接池、日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_app, build_router, App, AppState};
pub use crate::core::error::{AppError, AppResult};
