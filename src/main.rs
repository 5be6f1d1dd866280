use std::net::SocketAddr;

use product_api::services::catalog_service::CatalogStore;
use product_api::services::orders_service::OrdersStore;
use product_api::{config, routes, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let catalog = CatalogStore::load(&settings.catalog_path)
        .expect("Failed to load product catalog");
    tracing::info!("loaded {} products from {}", catalog.len(), settings.catalog_path);

    let orders = OrdersStore::load(&settings.orders_path);
    tracing::info!("loaded {} orders from {}", orders.len(), settings.orders_path);

    let state = AppState { catalog, orders };
    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>().unwrap(), settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
