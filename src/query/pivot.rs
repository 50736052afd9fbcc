//! Long-to-wide pivot of aggregated fact rows.
//!
//! The reporting queries return long-format rows (one per year and
//! category); charts want wide-format rows (one per year, one column per
//! category). The category universe decides which columns exist even for
//! years where a category has no data.

use indexmap::IndexMap;

use crate::models::FactRow;

/// Pivot `(year, label, value)` rows into one record per year.
///
/// The first row seen for a year initializes its record with every
/// universe label at 0.0, then overwrites the row's own label; later rows
/// for the same year overwrite only their own label. Records iterate in
/// first-seen year order, labels in universe order.
///
/// A row whose label is not in the universe is still written and its
/// record gains a trailing key; callers that need strict columns filter
/// the rows first.
pub fn pivot_rows(
    rows: &[FactRow],
    universe: &[String],
) -> IndexMap<i64, IndexMap<String, f64>> {
    let mut pivoted: IndexMap<i64, IndexMap<String, f64>> = IndexMap::new();

    for row in rows {
        let record = pivoted.entry(row.year).or_insert_with(|| {
            universe.iter().map(|name| (name.clone(), 0.0)).collect()
        });
        record.insert(row.label.clone(), row.value);
    }

    pivoted
}
