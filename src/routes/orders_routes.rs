use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::orders_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/orders", post(orders_controller::create_order).get(orders_controller::list_orders))
        .route("/users/:user_id/orders", get(orders_controller::list_user_orders))
}
