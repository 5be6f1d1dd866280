pub mod catalog_service;
pub mod query_service;
pub mod orders_service;
