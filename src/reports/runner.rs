//! The generic report runner behind every reporting route.
//!
//! Each route parses its query string into a [`ReportRequest`], picks its
//! spec from the registry, and delegates here. The runner fans out the
//! independent reads, applies the empty-result policy, pivots, and
//! assembles the payload.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{CodeName, FactRow, RankedRow};
use crate::query::filter::{in_list, InList};
use crate::query::pivot::pivot_rows;
use crate::query::table::{assemble_pairs, assemble_report, PayloadRow};
use crate::reports::registry::{GeoSpec, ReportSpec, TopFiveSpec};

pub const GROUP_HEADER: &str = "Year";
pub const COVID_HEADER: &str = "Confirmed COVID-19 Cases";

/// A parsed, validated reporting request.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub state_code: i64,
    pub start_year: i64,
    pub end_year: i64,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
}

impl ReportRequest {
    /// Validate raw query parameters against a spec. The state code must
    /// be a positive integer; year bounds fall back to the domain
    /// defaults when absent or unparseable. Fails before any query runs.
    pub fn parse(
        spec: &ReportSpec,
        state_code: Option<&str>,
        start_year: Option<&str>,
        end_year: Option<&str>,
        included: Option<&str>,
        excluded: Option<&str>,
    ) -> ApiResult<Self> {
        Ok(ReportRequest {
            state_code: parse_state_code(state_code)?,
            start_year: parse_year(start_year, spec.default_years.0),
            end_year: parse_year(end_year, spec.default_years.1),
            included: parse_code_list(included),
            excluded: parse_code_list(excluded),
        })
    }
}

pub fn parse_state_code(raw: Option<&str>) -> ApiResult<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|code| *code > 0)
        .ok_or(ApiError::InvalidStateCode)
}

pub fn parse_year(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Split a comma-separated code list; empty segments are dropped, the
/// values themselves are passed through to the bind layer untouched.
pub fn parse_code_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Compose the include/exclude clauses for one filter column.
///
/// `intro` is `WHERE` or `AND` depending on what precedes the marker.
/// Both lists empty means no clause at all; an empty `IN ()` is never
/// emitted.
fn filter_clause(intro: &str, column: &str, included: &InList, excluded: &InList) -> String {
    let mut parts = Vec::new();
    if !included.is_empty() {
        parts.push(format!("{column} IN ({})", included.placeholders));
    }
    if !excluded.is_empty() {
        parts.push(format!("{column} NOT IN ({})", excluded.placeholders));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{intro} {}", parts.join(" AND "))
    }
}

/// Run a pivoted report: category universe, fact rows, and the optional
/// COVID overlay are independent reads issued concurrently.
pub async fn run_report(
    pool: &SqlitePool,
    spec: &ReportSpec,
    req: &ReportRequest,
) -> ApiResult<Vec<PayloadRow>> {
    // 1. Filter fragments. Category placeholders start at $1; the fact
    // query already binds state and year bounds as $1..$3.
    let cat_included = in_list(&req.included, 1);
    let cat_excluded = in_list(&req.excluded, 1 + cat_included.len());
    let fact_included = in_list(&req.included, 4);
    let fact_excluded = in_list(&req.excluded, 4 + fact_included.len());

    let category_sql = spec.category_sql.replace(
        "{filter}",
        &filter_clause(
            "WHERE",
            spec.category_filter_column,
            &cat_included,
            &cat_excluded,
        ),
    );
    let fact_sql = spec.fact_sql.replace(
        "{filter}",
        &filter_clause(
            "AND",
            spec.fact_filter_column,
            &fact_included,
            &fact_excluded,
        ),
    );

    // 2. Bind and fan out.
    let mut category_query = sqlx::query_as::<_, CodeName>(&category_sql);
    for value in cat_included.values.iter().chain(&cat_excluded.values) {
        category_query = category_query.bind(value);
    }

    let mut fact_query = sqlx::query_as::<_, FactRow>(&fact_sql)
        .bind(req.state_code)
        .bind(req.start_year)
        .bind(req.end_year);
    for value in fact_included.values.iter().chain(&fact_excluded.values) {
        fact_query = fact_query.bind(value);
    }

    let overlay = async {
        if spec.covid_overlay {
            db::covid_cases_by_year(pool, req.state_code, req.start_year, req.end_year)
                .await
                .map(Some)
        } else {
            Ok(None)
        }
    };

    let (categories, facts, overlay) = tokio::join!(
        category_query.fetch_all(pool),
        fact_query.fetch_all(pool),
        overlay,
    );

    let categories = categories.map_err(ApiError::query(spec.error_message))?;
    let facts = facts.map_err(ApiError::query(spec.error_message))?;
    let overlay = overlay.map_err(ApiError::query(spec.error_message))?;

    // 3. Empty-result policy differs by endpoint.
    if facts.is_empty() && spec.not_found_on_empty {
        return Err(ApiError::NoData);
    }

    // 4. Pivot and assemble.
    let universe: Vec<String> = categories.into_iter().map(|c| c.name).collect();
    let pivoted = pivot_rows(&facts, &universe);

    let cases: Option<HashMap<i64, i64>> = overlay
        .map(|rows| rows.into_iter().map(|r| (r.year, r.cases)).collect());

    Ok(assemble_report(
        &pivoted,
        GROUP_HEADER,
        cases.as_ref().map(|m| (COVID_HEADER, m)),
    ))
}

/// The category listing behind `/industry`, `/energy-sector` and
/// `/taxcategory`: the unfiltered category universe as `{code, name}`.
pub async fn list_categories(pool: &SqlitePool, spec: &ReportSpec) -> ApiResult<Vec<CodeName>> {
    let sql = spec.category_sql.replace("{filter}", "");
    sqlx::query_as::<_, CodeName>(&sql)
        .fetch_all(pool)
        .await
        .map_err(ApiError::query(spec.list_error_message))
}

/// Run a top-5 report: one ranked aggregate query, no pivot.
pub async fn run_top_five(
    pool: &SqlitePool,
    spec: &TopFiveSpec,
    state_code: i64,
    start_year: i64,
    end_year: i64,
) -> ApiResult<Vec<PayloadRow>> {
    let rows = sqlx::query_as::<_, RankedRow>(spec.sql)
        .bind(state_code)
        .bind(start_year)
        .bind(end_year)
        .fetch_all(pool)
        .await
        .map_err(ApiError::query(spec.error_message))?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }

    Ok(assemble_pairs(&rows, spec.label_header, spec.value_header))
}

/// Run a geo report: one per-state aggregate over the fixed year range.
/// An empty result stays a 200; the map simply shades nothing.
pub async fn run_geo(pool: &SqlitePool, spec: &GeoSpec) -> ApiResult<Vec<PayloadRow>> {
    let rows = sqlx::query_as::<_, RankedRow>(spec.sql)
        .bind(spec.years.0)
        .bind(spec.years.1)
        .fetch_all(pool)
        .await
        .map_err(ApiError::query(spec.error_message))?;

    Ok(assemble_pairs(&rows, "State", spec.value_header))
}
