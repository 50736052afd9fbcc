use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::CodeName;
use crate::query::table::PayloadRow;
use crate::reports::registry::{
    BUSINESS, BUSINESS_GEO, BUSINESS_TOP_FIVE, PAYROLL, PAYROLL_GEO, PAYROLL_TOP_FIVE,
};
use crate::reports::runner::{
    list_categories, parse_state_code, parse_year, run_geo, run_report, run_top_five,
    ReportRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessQuery {
    state_code: Option<String>,
    start_year: Option<String>,
    end_year: Option<String>,
    included_industries: Option<String>,
    excluded_industries: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report))
        .route("/industry", get(industries))
        .route("/top-5-industries", get(top_five))
        .route("/geo", get(geo))
        .route("/payroll", get(payroll))
        .route("/payroll/top-5-industries", get(payroll_top_five))
        .route("/payroll/geo", get(payroll_geo))
}

/// Establishment counts per industry and year, pivoted for line charts.
async fn report(
    State(app): State<AppState>,
    Query(q): Query<BusinessQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let req = ReportRequest::parse(
        &BUSINESS,
        q.state_code.as_deref(),
        q.start_year.as_deref(),
        q.end_year.as_deref(),
        q.included_industries.as_deref(),
        q.excluded_industries.as_deref(),
    )?;
    run_report(&app.pool, &BUSINESS, &req).await.map(Json)
}

async fn industries(State(app): State<AppState>) -> ApiResult<Json<Vec<CodeName>>> {
    list_categories(&app.pool, &BUSINESS).await.map(Json)
}

async fn top_five(
    State(app): State<AppState>,
    Query(q): Query<BusinessQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let state_code = parse_state_code(q.state_code.as_deref())?;
    let start_year = parse_year(q.start_year.as_deref(), BUSINESS.default_years.0);
    let end_year = parse_year(q.end_year.as_deref(), BUSINESS.default_years.1);
    run_top_five(&app.pool, &BUSINESS_TOP_FIVE, state_code, start_year, end_year)
        .await
        .map(Json)
}

/// Establishment totals per state for the whole range, for map shading.
async fn geo(State(app): State<AppState>) -> ApiResult<Json<Vec<PayloadRow>>> {
    run_geo(&app.pool, &BUSINESS_GEO).await.map(Json)
}

/// Annual payroll per industry and year, pivoted for line charts.
async fn payroll(
    State(app): State<AppState>,
    Query(q): Query<BusinessQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let req = ReportRequest::parse(
        &PAYROLL,
        q.state_code.as_deref(),
        q.start_year.as_deref(),
        q.end_year.as_deref(),
        q.included_industries.as_deref(),
        q.excluded_industries.as_deref(),
    )?;
    run_report(&app.pool, &PAYROLL, &req).await.map(Json)
}

async fn payroll_top_five(
    State(app): State<AppState>,
    Query(q): Query<BusinessQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let state_code = parse_state_code(q.state_code.as_deref())?;
    let start_year = parse_year(q.start_year.as_deref(), PAYROLL.default_years.0);
    let end_year = parse_year(q.end_year.as_deref(), PAYROLL.default_years.1);
    run_top_five(&app.pool, &PAYROLL_TOP_FIVE, state_code, start_year, end_year)
        .await
        .map(Json)
}

async fn payroll_geo(State(app): State<AppState>) -> ApiResult<Json<Vec<PayloadRow>>> {
    run_geo(&app.pool, &PAYROLL_GEO).await.map(Json)
}
