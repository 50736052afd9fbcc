//! Assembly of chart-ready payload rows.
//!
//! Every reporting endpoint serializes the same shape: an array of
//! label-keyed objects whose keys are the chart's column headers, in
//! column order. Ordered maps keep that order stable through
//! serialization.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::models::RankedRow;

/// One payload row: header label -> cell value, in column order.
pub type PayloadRow = IndexMap<String, Value>;

/// Build the payload rows for a pivoted report.
///
/// Each record becomes one object: the group key first, then the
/// overlay column when an overlay series is supplied (missing group
/// keys default to integer 0, never null), then the record's own
/// columns in record order.
pub fn assemble_report(
    pivoted: &IndexMap<i64, IndexMap<String, f64>>,
    group_header: &str,
    overlay: Option<(&str, &HashMap<i64, i64>)>,
) -> Vec<PayloadRow> {
    let mut payload = Vec::with_capacity(pivoted.len());

    for (group_key, record) in pivoted {
        let mut row = PayloadRow::new();
        row.insert(group_header.to_string(), Value::from(*group_key));

        if let Some((header, series)) = overlay {
            let cases = series.get(group_key).copied().unwrap_or(0);
            row.insert(header.to_string(), Value::from(cases));
        }

        for (label, value) in record {
            row.insert(label.clone(), Value::from(*value));
        }

        payload.push(row);
    }

    payload
}

/// Build the payload rows for a two-column (top-5 or geo) result.
pub fn assemble_pairs(
    rows: &[RankedRow],
    label_header: &str,
    value_header: &str,
) -> Vec<PayloadRow> {
    rows.iter()
        .map(|r| {
            let mut row = PayloadRow::new();
            row.insert(label_header.to_string(), Value::from(r.label.clone()));
            row.insert(value_header.to_string(), Value::from(r.value));
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FactRow;
    use crate::query::pivot::pivot_rows;

    fn pivoted_sample() -> IndexMap<i64, IndexMap<String, f64>> {
        let rows = vec![
            FactRow {
                year: 2020,
                label: "Retail".to_string(),
                value: 5.0,
            },
            FactRow {
                year: 2021,
                label: "Tech".to_string(),
                value: 3.0,
            },
        ];
        pivot_rows(&rows, &["Retail".to_string(), "Tech".to_string()])
    }

    #[test]
    fn rows_are_keyed_by_headers_in_column_order() {
        let payload = assemble_report(&pivoted_sample(), "Year", None);

        assert_eq!(payload.len(), 2);
        let keys: Vec<&String> = payload[0].keys().collect();
        assert_eq!(keys, vec!["Year", "Retail", "Tech"]);
        assert_eq!(payload[0]["Year"], Value::from(2020));
        assert_eq!(payload[0]["Retail"], Value::from(5.0));
        assert_eq!(payload[1]["Tech"], Value::from(3.0));
    }

    #[test]
    fn overlay_defaults_missing_years_to_zero() {
        let mut cases = HashMap::new();
        cases.insert(2021i64, 120i64);

        let payload = assemble_report(
            &pivoted_sample(),
            "Year",
            Some(("Confirmed COVID-19 Cases", &cases)),
        );

        // 2020 has no overlay entry: integer zero, not null.
        assert_eq!(payload[0]["Confirmed COVID-19 Cases"], Value::from(0));
        assert_eq!(payload[1]["Confirmed COVID-19 Cases"], Value::from(120));

        let keys: Vec<&String> = payload[0].keys().collect();
        assert_eq!(
            keys,
            vec!["Year", "Confirmed COVID-19 Cases", "Retail", "Tech"]
        );
    }

    #[test]
    fn pairs_use_the_domain_headers() {
        let rows = vec![
            RankedRow {
                label: "Retail".to_string(),
                value: 42.0,
            },
            RankedRow {
                label: "Mining".to_string(),
                value: 7.0,
            },
        ];
        let payload = assemble_pairs(&rows, "Industry Name", "Count of Establishments");

        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0]["Industry Name"], Value::from("Retail"));
        assert_eq!(payload[0]["Count of Establishments"], Value::from(42.0));
        let keys: Vec<&String> = payload[1].keys().collect();
        assert_eq!(keys, vec!["Industry Name", "Count of Establishments"]);
    }

    #[test]
    fn empty_pivot_assembles_to_empty_payload() {
        let payload = assemble_report(&IndexMap::new(), "Year", None);
        assert!(payload.is_empty());
    }
}
