use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Product API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "products": "/products",
            "orders": "/orders",
        },
        "total_products": state.catalog.len(),
        "total_orders": state.orders.len(),
    }))
}
