use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::CodeName;
use crate::query::table::PayloadRow;
use crate::reports::registry::{EMISSION, EMISSION_TOP_FIVE};
use crate::reports::runner::{
    list_categories, parse_state_code, parse_year, run_report, run_top_five, ReportRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionQuery {
    state_code: Option<String>,
    start_year: Option<String>,
    end_year: Option<String>,
    included_sectors: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report))
        .route("/energy-sector", get(energy_sectors))
        .route("/top-5-sectors", get(top_five))
}

/// Percent-of-total emission per energy sector and year, with the
/// per-year COVID case overlay.
async fn report(
    State(app): State<AppState>,
    Query(q): Query<EmissionQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let req = ReportRequest::parse(
        &EMISSION,
        q.state_code.as_deref(),
        q.start_year.as_deref(),
        q.end_year.as_deref(),
        q.included_sectors.as_deref(),
        None,
    )?;
    run_report(&app.pool, &EMISSION, &req).await.map(Json)
}

async fn energy_sectors(State(app): State<AppState>) -> ApiResult<Json<Vec<CodeName>>> {
    list_categories(&app.pool, &EMISSION).await.map(Json)
}

async fn top_five(
    State(app): State<AppState>,
    Query(q): Query<EmissionQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let state_code = parse_state_code(q.state_code.as_deref())?;
    let start_year = parse_year(q.start_year.as_deref(), EMISSION.default_years.0);
    let end_year = parse_year(q.end_year.as_deref(), EMISSION.default_years.1);
    run_top_five(&app.pool, &EMISSION_TOP_FIVE, state_code, start_year, end_year)
        .await
        .map(Json)
}
