use axum::{Router, routing::get};

use crate::{AppState, controllers::products_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/products", get(products_controller::list_products))
        .route("/products/categories", get(products_controller::get_categories))
        .route("/products/brands", get(products_controller::get_brands))
        .route("/products/:id", get(products_controller::get_product))
}
