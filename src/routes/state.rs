use axum::extract::State;
use axum::Json;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::StateRow;
use crate::AppState;

pub async fn list(State(app): State<AppState>) -> ApiResult<Json<Vec<StateRow>>> {
    db::list_states(&app.pool)
        .await
        .map(Json)
        .map_err(ApiError::query("Failed to fetch states"))
}
