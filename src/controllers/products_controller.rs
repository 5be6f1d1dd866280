use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::models::Product;
use crate::services::query_service::{self, ProductPage, ProductQuery, RawProductQuery};
use crate::AppState;

/// `GET /products` — pagination, filtering, search, sorting and field
/// selection, all combinable.
pub async fn list_products(
    State(state): State<AppState>,
    Query(raw): Query<RawProductQuery>,
) -> Result<Json<ProductPage>, ApiError> {
    let query = ProductQuery::from_raw(raw)?;
    let page = query_service::run(state.catalog.products(), &query)?;
    Ok(Json(page))
}

/// `GET /products/:id`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::ProductNotFound(id))
}

/// `GET /products/categories`
pub async fn get_categories(State(state): State<AppState>) -> Json<Value> {
    let categories = state.catalog.categories();
    Json(json!({
        "total": categories.len(),
        "categories": categories,
    }))
}

/// `GET /products/brands`
pub async fn get_brands(State(state): State<AppState>) -> Json<Value> {
    let brands = state.catalog.brands();
    Json(json!({
        "total": brands.len(),
        "brands": brands,
    }))
}
