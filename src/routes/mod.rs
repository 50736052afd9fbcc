use axum::routing::get;
use axum::Router;

use crate::AppState;

pub mod business;
pub mod emission;
pub mod state;
pub mod stats;
pub mod tax;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(state::list))
        .route("/tuples", get(stats::tuples))
        .nest("/business-data", business::router())
        .nest("/emission-data", emission::router())
        .nest("/tax-data", tax::router())
}
