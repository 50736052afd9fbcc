use axum::extract::State;
use axum::Json;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Total row count across every table, for the dataset summary widget.
pub async fn tuples(State(app): State<AppState>) -> ApiResult<Json<i64>> {
    db::count_all_tuples(&app.pool)
        .await
        .map(Json)
        .map_err(ApiError::query("Failed to count tuples"))
}
