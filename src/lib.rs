//! Library entrypoint for the product API.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod errors;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub catalog: services::catalog_service::CatalogStore,
    pub orders: services::orders_service::OrdersStore,
}
