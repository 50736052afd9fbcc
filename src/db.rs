use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::{StateRow, YearCases};

/// Connect to the statistics database. The schema is owned by the
/// database; this layer only reads it.
pub async fn init(database_url: &str) -> Result<SqlitePool> {
    tracing::info!("Connecting to database: {database_url}");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// All states, ordered by code. Backs `GET /state`.
pub async fn list_states(pool: &SqlitePool) -> Result<Vec<StateRow>, sqlx::Error> {
    sqlx::query_as::<_, StateRow>(
        r#"
        SELECT DISTINCT state_code, state_name
        FROM state
        ORDER BY state_code ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Confirmed COVID-19 cases per year for one state, used as the overlay
/// column of the emission and tax reports.
pub async fn covid_cases_by_year(
    pool: &SqlitePool,
    state_code: i64,
    start_year: i64,
    end_year: i64,
) -> Result<Vec<YearCases>, sqlx::Error> {
    sqlx::query_as::<_, YearCases>(
        r#"
        SELECT year, SUM(count_confirmed_cases) AS cases
        FROM covid_data
        WHERE state_code = $1
        AND year >= $2
        AND year <= $3
        GROUP BY year
        "#,
    )
    .bind(state_code)
    .bind(start_year)
    .bind(end_year)
    .fetch_all(pool)
    .await
}

/// Total number of rows across every lookup and fact table. Backs
/// `GET /tuples`.
pub async fn count_all_tuples(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM state)
             + (SELECT COUNT(*) FROM business_type)
             + (SELECT COUNT(*) FROM business_size)
             + (SELECT COUNT(*) FROM industry)
             + (SELECT COUNT(*) FROM business_data)
             + (SELECT COUNT(*) FROM covid_data)
             + (SELECT COUNT(*) FROM energy_sector)
             + (SELECT COUNT(*) FROM fuel_type)
             + (SELECT COUNT(*) FROM emission_data)
             + (SELECT COUNT(*) FROM tax_category)
             + (SELECT COUNT(*) FROM tax_data)
        "#,
    )
    .fetch_one(pool)
    .await
}
