use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::errors::ApiError;
use crate::models::{NewOrder, Order};
use crate::AppState;

/// `POST /orders` — 201 with the stored order, including the generated
/// id and createdAt. Body deserialization failures surface as 422 in the
/// same `{"detail": ...}` shape as every other error.
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let order = state.orders.create(payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders`
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.orders.list_all())
}

/// `GET /users/:user_id/orders` — possibly empty, never an error.
pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Order>> {
    Json(state.orders.list_by_user(&user_id))
}
