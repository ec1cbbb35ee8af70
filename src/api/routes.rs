use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::store::traits::ProductStore;

pub fn create_router<S: ProductStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product catalog
        .route("/api/products", get(handlers::list_products::<S>))
        .route("/api/product", post(handlers::create_product::<S>))
        .route("/api/product/:id", get(handlers::get_product::<S>))
        .route("/api/product/:id", put(handlers::update_product::<S>))
        .route("/api/product/:id", delete(handlers::delete_product::<S>))
        // Both spellings of the type listing are in circulation with clients.
        .route("/api/products-types", get(handlers::list_product_types::<S>))
        .route("/api/productTypes", get(handlers::list_product_types::<S>))
        .layer(CorsLayer::permissive())
}
