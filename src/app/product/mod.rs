//! 产品模块

pub mod handler;
pub mod model;
pub mod repository;

use axum::{
    routing::{get, post},
    Router,
};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handler::list_products))
        .route("/product", post(handler::create_product))
        .route(
            "/product/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
