//! Static report configurations.
//!
//! The business, payroll, emission and tax reporting routes share one
//! generic runner; everything that differs between them lives here as
//! data: the category lookup, the fact aggregation, default year bounds,
//! the overlay and the empty-result policy.
//!
//! Fact templates bind `$1` = state code, `$2` = start year, `$3` = end
//! year, and carry a `{filter}` marker where the runner splices the
//! include/exclude clauses (placeholders numbered from `$4`). Category
//! templates carry the same marker with placeholders numbered from `$1`.

use once_cell::sync::Lazy;

pub struct ReportSpec {
    /// Client-visible message on query failure for the pivoted report.
    pub error_message: &'static str,
    /// Client-visible message on query failure for the category listing.
    pub list_error_message: &'static str,
    /// `SELECT DISTINCT code, name` template with a `{filter}` marker.
    pub category_sql: String,
    pub category_filter_column: &'static str,
    /// Long-format fact aggregation template with a `{filter}` marker.
    pub fact_sql: String,
    pub fact_filter_column: &'static str,
    pub default_years: (i64, i64),
    /// Merge per-year COVID case counts as an extra leading column.
    pub covid_overlay: bool,
    /// Zero fact rows: 404 when true, empty 200 payload when false.
    pub not_found_on_empty: bool,
}

/// A ranked two-column aggregate: no pivot, top five rows straight from
/// the query. `$1` = state code, `$2`/`$3` = year bounds.
pub struct TopFiveSpec {
    pub error_message: &'static str,
    pub sql: &'static str,
    pub label_header: &'static str,
    pub value_header: &'static str,
}

/// A per-state two-column aggregate over a fixed year range for map
/// shading. `$1`/`$2` = year bounds, no state filter.
pub struct GeoSpec {
    pub error_message: &'static str,
    pub sql: &'static str,
    pub value_header: &'static str,
    pub years: (i64, i64),
}

fn category_sql(table: &str, code_column: &str, name_column: &str) -> String {
    format!(
        "SELECT DISTINCT {code_column} AS code, {name_column} AS name \
         FROM {table} {{filter}} ORDER BY {code_column} ASC"
    )
}

struct SumFact {
    /// `FROM` clause with the lookup joins.
    from: &'static str,
    label_column: &'static str,
    value_column: &'static str,
    state_column: &'static str,
    year_column: &'static str,
    /// Guard against NULL measurements. Intentionally uneven across
    /// domains; see DESIGN.md.
    require_not_null: bool,
}

fn sum_fact_sql(f: &SumFact) -> String {
    let not_null = if f.require_not_null {
        format!("AND {} IS NOT NULL ", f.value_column)
    } else {
        String::new()
    };
    // COALESCE: SUM over an all-NULL group is NULL in SQLite; charts get
    // a zero cell, same as the pivot's zero-fill.
    format!(
        "SELECT {year} AS year, {label} AS label, CAST(COALESCE(SUM({value}), 0) AS REAL) AS value \
         FROM {from} \
         WHERE {state} = $1 \
         AND {year} >= $2 \
         AND {year} <= $3 \
         {not_null}{{filter}} \
         GROUP BY {year}, {label} \
         ORDER BY {year} ASC, {label} ASC",
        year = f.year_column,
        label = f.label_column,
        value = f.value_column,
        from = f.from,
        state = f.state_column,
    )
}

const BUSINESS_FROM: &str = "business_data bd \
    INNER JOIN state s ON s.state_code = bd.state_code \
    INNER JOIN business_type bt ON bd.type_code = bt.type_code \
    INNER JOIN business_size bs ON bs.size_code = bd.size_code \
    INNER JOIN industry i ON i.industry_code = bd.industry_code";

pub static BUSINESS: Lazy<ReportSpec> = Lazy::new(|| ReportSpec {
    error_message: "Failed to fetch business data",
    list_error_message: "Failed to fetch industries",
    category_sql: category_sql("industry", "industry_code", "industry_name"),
    category_filter_column: "industry_code",
    fact_sql: sum_fact_sql(&SumFact {
        from: BUSINESS_FROM,
        label_column: "i.industry_name",
        value_column: "bd.count_establishments",
        state_column: "s.state_code",
        year_column: "bd.year",
        require_not_null: true,
    }),
    fact_filter_column: "i.industry_code",
    default_years: (2012, 2021),
    covid_overlay: false,
    not_found_on_empty: true,
});

pub static PAYROLL: Lazy<ReportSpec> = Lazy::new(|| ReportSpec {
    error_message: "Failed to fetch payroll data",
    list_error_message: "Failed to fetch industries",
    category_sql: category_sql("industry", "industry_code", "industry_name"),
    category_filter_column: "industry_code",
    fact_sql: sum_fact_sql(&SumFact {
        from: BUSINESS_FROM,
        label_column: "i.industry_name",
        value_column: "bd.annual_payroll",
        state_column: "s.state_code",
        year_column: "bd.year",
        require_not_null: false,
    }),
    fact_filter_column: "i.industry_code",
    default_years: (2012, 2021),
    covid_overlay: false,
    not_found_on_empty: true,
});

/// Percent of the state's total yearly emission contributed by each
/// energy sector. Fuel type 400 is the "all fuels" rollup and is kept
/// out of the totals.
const EMISSION_FACT_SQL: &str = "\
    WITH avg_sector_emission(year, sector_code, state_code, avg_emission) AS ( \
        SELECT emis.year, emis.sector_code, emis.state_code, AVG(emis.emission) \
        FROM emission_data emis \
        INNER JOIN state s ON s.state_code = emis.state_code \
        INNER JOIN energy_sector sect ON emis.sector_code = sect.sector_code \
        INNER JOIN fuel_type ft ON ft.fuel_type_code = emis.fuel_type_code \
        WHERE emis.emission IS NOT NULL \
        GROUP BY emis.year, emis.sector_code, emis.state_code \
    ), \
    total_yearly_state_emission(year, state_code, total_emission) AS ( \
        SELECT emis.year, emis.state_code, SUM(emis.emission) \
        FROM emission_data emis \
        INNER JOIN state s ON s.state_code = emis.state_code \
        INNER JOIN energy_sector sect ON emis.sector_code = sect.sector_code \
        INNER JOIN fuel_type ft ON ft.fuel_type_code = emis.fuel_type_code \
        WHERE emis.emission IS NOT NULL \
        AND ft.fuel_type_code != 400 \
        GROUP BY emis.year, emis.state_code \
    ), \
    total_year_sector_emission(year, state_code, sector_code, total_emission) AS ( \
        SELECT emis.year, emis.state_code, sect.sector_code, SUM(emis.emission) \
        FROM emission_data emis \
        INNER JOIN state s ON s.state_code = emis.state_code \
        INNER JOIN energy_sector sect ON emis.sector_code = sect.sector_code \
        INNER JOIN fuel_type ft ON ft.fuel_type_code = emis.fuel_type_code \
        WHERE emis.emission IS NOT NULL \
        AND ft.fuel_type_code != 400 \
        GROUP BY emis.year, emis.state_code, sect.sector_code \
    ) \
    SELECT avg_e.year AS year, sect.sector_name AS label, \
           COALESCE((tyse.total_emission / tye.total_emission) * 100, 0) AS value \
    FROM avg_sector_emission avg_e \
    INNER JOIN total_yearly_state_emission tye \
        ON avg_e.year = tye.year AND avg_e.state_code = tye.state_code \
    INNER JOIN total_year_sector_emission tyse \
        ON avg_e.year = tyse.year AND avg_e.state_code = tyse.state_code \
        AND avg_e.sector_code = tyse.sector_code \
    INNER JOIN state s ON s.state_code = avg_e.state_code \
    INNER JOIN energy_sector sect ON sect.sector_code = avg_e.sector_code \
    WHERE s.state_code = $1 \
    AND avg_e.year >= $2 \
    AND avg_e.year <= $3 \
    {filter} \
    ORDER BY avg_e.year ASC, avg_e.sector_code ASC";

pub static EMISSION: Lazy<ReportSpec> = Lazy::new(|| ReportSpec {
    error_message: "Failed to fetch emission data",
    list_error_message: "Failed to fetch energy sectors",
    category_sql: category_sql("energy_sector", "sector_code", "sector_name"),
    category_filter_column: "sector_code",
    fact_sql: EMISSION_FACT_SQL.to_string(),
    fact_filter_column: "sect.sector_code",
    default_years: (1970, 2021),
    covid_overlay: true,
    not_found_on_empty: true,
});

pub static TAX: Lazy<ReportSpec> = Lazy::new(|| ReportSpec {
    error_message: "Failed to fetch combined tax and COVID data",
    list_error_message: "Failed to fetch tax categories",
    category_sql: category_sql("tax_category", "category_code", "category_name"),
    category_filter_column: "category_code",
    fact_sql: sum_fact_sql(&SumFact {
        from: "tax_data td \
            INNER JOIN state s ON s.state_code = td.state_code \
            INNER JOIN tax_category tc ON tc.category_code = td.category_code",
        label_column: "tc.category_name",
        value_column: "td.amount",
        state_column: "s.state_code",
        year_column: "td.year",
        require_not_null: true,
    }),
    fact_filter_column: "tc.category_code",
    default_years: (2012, 2021),
    covid_overlay: true,
    // The tax report answers an empty result with an empty payload
    // instead of a 404.
    not_found_on_empty: false,
});

pub const BUSINESS_TOP_FIVE: TopFiveSpec = TopFiveSpec {
    error_message: "Failed to fetch top-5 industries",
    sql: "WITH top_industries AS ( \
            SELECT industry_code, CAST(COALESCE(SUM(count_establishments), 0) AS REAL) AS value \
            FROM business_data \
            WHERE state_code = $1 \
            AND year >= $2 \
            AND year <= $3 \
            GROUP BY industry_code \
            ORDER BY value DESC \
            LIMIT 5 \
        ) \
        SELECT i.industry_name AS label, t.value AS value \
        FROM top_industries t \
        INNER JOIN industry i ON i.industry_code = t.industry_code \
        ORDER BY t.value DESC",
    label_header: "Industry Name",
    value_header: "Count of Establishments",
};

pub const PAYROLL_TOP_FIVE: TopFiveSpec = TopFiveSpec {
    error_message: "Failed to fetch top-5 payroll industries",
    sql: "WITH top_industries AS ( \
            SELECT industry_code, COALESCE(SUM(annual_payroll), 0) AS value \
            FROM business_data \
            WHERE state_code = $1 \
            AND year >= $2 \
            AND year <= $3 \
            GROUP BY industry_code \
            ORDER BY value DESC \
            LIMIT 5 \
        ) \
        SELECT i.industry_name AS label, t.value AS value \
        FROM top_industries t \
        INNER JOIN industry i ON i.industry_code = t.industry_code \
        ORDER BY t.value DESC",
    label_header: "Industry Name",
    value_header: "Total Annual Payroll",
};

pub const EMISSION_TOP_FIVE: TopFiveSpec = TopFiveSpec {
    error_message: "Failed to fetch top-5 bar graph data",
    sql: "WITH avg_sector_emission(year, sector_code, state_code, avg_emission) AS ( \
            SELECT emis.year, emis.sector_code, emis.state_code, AVG(emis.emission) \
            FROM emission_data emis \
            INNER JOIN state s ON s.state_code = emis.state_code \
            INNER JOIN energy_sector sect ON emis.sector_code = sect.sector_code \
            INNER JOIN fuel_type ft ON ft.fuel_type_code = emis.fuel_type_code \
            WHERE emis.emission IS NOT NULL \
            GROUP BY emis.year, emis.sector_code, emis.state_code \
        ) \
        SELECT sect.sector_name AS label, COALESCE(SUM(a.avg_emission), 0) AS value \
        FROM avg_sector_emission a \
        INNER JOIN energy_sector sect ON sect.sector_code = a.sector_code \
        WHERE a.state_code = $1 \
        AND a.year >= $2 \
        AND a.year <= $3 \
        GROUP BY sect.sector_name \
        ORDER BY value DESC \
        LIMIT 5",
    label_header: "Energy Sector",
    value_header: "Total Average Emissions (PPM)",
};

pub const TAX_TOP_FIVE: TopFiveSpec = TopFiveSpec {
    error_message: "Failed to fetch top-5 tax categories",
    sql: "SELECT tc.category_name AS label, COALESCE(SUM(td.amount), 0) AS value \
        FROM tax_data td \
        INNER JOIN tax_category tc ON td.category_code = tc.category_code \
        WHERE td.state_code = $1 \
        AND td.year >= $2 \
        AND td.year <= $3 \
        GROUP BY td.category_code, tc.category_name \
        ORDER BY value DESC \
        LIMIT 5",
    label_header: "Category Name",
    value_header: "Total Amount",
};

pub const BUSINESS_GEO: GeoSpec = GeoSpec {
    error_message: "Failed to fetch business geo data",
    sql: "SELECT s.state_name AS label, CAST(COALESCE(SUM(bd.count_establishments), 0) AS REAL) AS value \
        FROM business_data bd \
        INNER JOIN state s ON s.state_code = bd.state_code \
        WHERE bd.year >= $1 \
        AND bd.year <= $2 \
        AND bd.count_establishments IS NOT NULL \
        GROUP BY s.state_name \
        ORDER BY s.state_name ASC",
    value_header: "Count of Establishments",
    years: (2012, 2021),
};

pub const PAYROLL_GEO: GeoSpec = GeoSpec {
    error_message: "Failed to fetch payroll geo data",
    sql: "SELECT s.state_name AS label, COALESCE(SUM(bd.annual_payroll), 0) AS value \
        FROM business_data bd \
        INNER JOIN state s ON s.state_code = bd.state_code \
        WHERE bd.year >= $1 \
        AND bd.year <= $2 \
        GROUP BY s.state_name \
        ORDER BY s.state_name ASC",
    value_header: "Total Annual Payroll",
    years: (2012, 2021),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_templates_carry_the_filter_marker() {
        for spec in [&*BUSINESS, &*PAYROLL, &*EMISSION, &*TAX] {
            assert!(spec.fact_sql.contains("{filter}"));
            assert!(spec.category_sql.contains("{filter}"));
        }
    }

    #[test]
    fn not_null_guard_is_uneven_by_design() {
        // Establishment counts and tax amounts are guarded; the payroll
        // sibling is not.
        assert!(BUSINESS.fact_sql.contains("IS NOT NULL"));
        assert!(TAX.fact_sql.contains("IS NOT NULL"));
        assert!(!PAYROLL.fact_sql.contains("IS NOT NULL"));
    }

    #[test]
    fn ranked_queries_are_capped_at_five() {
        for spec in [
            &BUSINESS_TOP_FIVE,
            &PAYROLL_TOP_FIVE,
            &EMISSION_TOP_FIVE,
            &TAX_TOP_FIVE,
        ] {
            assert!(spec.sql.contains("LIMIT 5"));
        }
    }

    #[test]
    fn year_defaults_match_the_domains() {
        assert_eq!(BUSINESS.default_years, (2012, 2021));
        assert_eq!(EMISSION.default_years, (1970, 2021));
        assert_eq!(TAX.default_years, (2012, 2021));
    }
}
