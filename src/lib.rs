//! Read-only HTTP API over a database of U.S. state-level business,
//! emission, tax and COVID-19 statistics, shaped for chart widgets.

use axum::Router;
use sqlx::SqlitePool;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod reports;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Build the full application router. The binary and the integration
/// tests serve the same tree.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}
