use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::store::traits::{ProductStore, StoreError};

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Create request body. The fields are optional at the serde level so a
/// missing one maps to the catalog's own 400 message instead of a
/// deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<f64>,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Option<NewProduct> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let kind = self.kind.filter(|k| !k.is_empty())?;
        let price = self.price?;
        Some(NewProduct { name, kind, price })
    }
}

pub async fn list_products<S: ProductStore>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<ErrorResponse>)> {
    match store.list_products().await {
        Ok(products) => Ok(Json(products)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}

pub async fn get_product<S: ProductStore>(
    State(store): State<AppState<S>>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, (StatusCode, Json<ErrorResponse>)> {
    match store.get_product(id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Product not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}

pub async fn create_product<S: ProductStore>(
    State(store): State<AppState<S>>,
    RequestJson(request): RequestJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<ErrorResponse>)> {
    let Some(new_product) = request.into_new_product() else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "All fields (name, type, price) are required",
            )),
        ));
    };

    match store.create_product(new_product).await {
        Ok(product) => Ok((StatusCode::CREATED, Json(product))),
        Err(e) if e.downcast_ref::<StoreError>().is_some() => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&e.to_string())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}

pub async fn update_product<S: ProductStore>(
    State(store): State<AppState<S>>,
    Path(id): Path<ProductId>,
    RequestJson(patch): RequestJson<ProductPatch>,
) -> Result<Json<Product>, (StatusCode, Json<ErrorResponse>)> {
    match store.update_product(id, patch).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Product not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}

pub async fn delete_product<S: ProductStore>(
    State(store): State<AppState<S>>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match store.delete_product(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Product not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}

pub async fn list_product_types<S: ProductStore>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<String>>, (StatusCode, Json<ErrorResponse>)> {
    match store.list_product_types().await {
        Ok(types) => Ok(Json(types)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&e.to_string())),
        )),
    }
}
