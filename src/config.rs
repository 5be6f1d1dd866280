use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub catalog_path: String,
    pub orders_path: String,
}


pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let catalog_path = env::var("CATALOG_PATH")
        .unwrap_or_else(|_| "data/db.json".to_string());

    let orders_path = env::var("ORDERS_PATH")
        .unwrap_or_else(|_| "data/orders.json".to_string());

    Settings {
        host,
        port,
        catalog_path,
        orders_path,
    }
}
