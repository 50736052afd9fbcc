use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::CodeName;
use crate::query::table::PayloadRow;
use crate::reports::registry::{TAX, TAX_TOP_FIVE};
use crate::reports::runner::{
    list_categories, parse_state_code, parse_year, run_report, run_top_five, ReportRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxQuery {
    state_code: Option<String>,
    start_year: Option<String>,
    end_year: Option<String>,
    included_categories: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report))
        .route("/taxcategory", get(tax_categories))
        .route("/top-5-taxcategory", get(top_five))
}

/// Tax revenue per category and year with the COVID case overlay. An
/// empty result is a 200 with an empty payload, not a 404.
async fn report(
    State(app): State<AppState>,
    Query(q): Query<TaxQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let req = ReportRequest::parse(
        &TAX,
        q.state_code.as_deref(),
        q.start_year.as_deref(),
        q.end_year.as_deref(),
        q.included_categories.as_deref(),
        None,
    )?;
    run_report(&app.pool, &TAX, &req).await.map(Json)
}

async fn tax_categories(State(app): State<AppState>) -> ApiResult<Json<Vec<CodeName>>> {
    list_categories(&app.pool, &TAX).await.map(Json)
}

async fn top_five(
    State(app): State<AppState>,
    Query(q): Query<TaxQuery>,
) -> ApiResult<Json<Vec<PayloadRow>>> {
    let state_code = parse_state_code(q.state_code.as_deref())?;
    let start_year = parse_year(q.start_year.as_deref(), TAX.default_years.0);
    let end_year = parse_year(q.end_year.as_deref(), TAX.default_years.1);
    run_top_five(&app.pool, &TAX_TOP_FIVE, state_code, start_year, end_year)
        .await
        .map(Json)
}
