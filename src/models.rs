use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A state lookup row, as served by `GET /state`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StateRow {
    pub state_code: i64,
    pub state_name: String,
}

/// A generic lookup-table row. Queries alias their columns
/// (`industry_code AS code, industry_name AS name`) so the same struct
/// serves industries, energy sectors and tax categories.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CodeName {
    pub code: i64,
    pub name: String,
}

/// One aggregated measurement tied to a year and a category label.
/// The atomic unit consumed by the long-to-wide pivot.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FactRow {
    pub year: i64,
    pub label: String,
    pub value: f64,
}

/// Per-year confirmed COVID-19 case counts, merged into reports as an
/// overlay column.
#[derive(Debug, FromRow, Clone)]
pub struct YearCases {
    pub year: i64,
    pub cases: i64,
}

/// A two-column label/value row, shared by the top-5 and geo queries.
#[derive(Debug, FromRow, Clone)]
pub struct RankedRow {
    pub label: String,
    pub value: f64,
}
