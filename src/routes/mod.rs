use axum::Router;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub mod home_routes;
pub mod products_routes;
pub mod orders_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = products_routes::add_routes(router);
    let router = orders_routes::add_routes(router);

    router
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
