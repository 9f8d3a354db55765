use crate::data::{scalar_label, TabularRecord};
use serde_json::Value;

/// One pivoted series: a name (absent for the implicit single series) and one
/// value slot per category, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: Option<String>,
    pub values: Vec<Option<f64>>,
}

/// Flat records pivoted into an ordered category axis and aligned series.
///
/// Invariant: every series has exactly `categories.len()` entries, in category
/// order, even when the source data is sparse.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    pub categories: Vec<String>,
    pub series: Vec<NamedSeries>,
}

/// Pivot flat tabular records into categories and aligned series arrays.
///
/// Categories are the deduplicated values of `category_field` in first-seen
/// order. With a `series_field`, one series is produced per distinct value of
/// that field (first-seen order); without one, a single unnamed series. Each
/// (category, series) cell holds the value of the first matching record, or
/// `None` when no record matches. Matching compares field values by equality
/// with no coercion between types, so the number 2020 and the string "2020"
/// are distinct categories.
///
/// Assumes a non-empty record set; empty input is rejected upstream.
pub fn pivot_records(
    records: &[TabularRecord],
    category_field: &str,
    value_field: &str,
    series_field: Option<&str>,
) -> SeriesTable {
    let categories = distinct_values(records, category_field);

    let series = match series_field {
        Some(series_field) => distinct_values(records, series_field)
            .iter()
            .map(|series_key| NamedSeries {
                name: Some(scalar_label(series_key)),
                values: categories
                    .iter()
                    .map(|category| {
                        records
                            .iter()
                            .find(|r| {
                                r.get(category_field) == Some(category)
                                    && r.get(series_field) == Some(series_key)
                            })
                            .and_then(|r| r.get(value_field))
                            .and_then(Value::as_f64)
                    })
                    .collect(),
            })
            .collect(),
        None => vec![NamedSeries {
            name: None,
            values: categories
                .iter()
                .map(|category| {
                    records
                        .iter()
                        .find(|r| r.get(category_field) == Some(category))
                        .and_then(|r| r.get(value_field))
                        .and_then(Value::as_f64)
                })
                .collect(),
        }],
    };

    SeriesTable {
        categories: categories.iter().map(scalar_label).collect(),
        series,
    }
}

/// Distinct values of `field` across `records`, first-seen order.
/// Records without the field contribute nothing.
fn distinct_values(records: &[TabularRecord], field: &str) -> Vec<Value> {
    let mut seen = Vec::new();
    for record in records {
        if let Some(value) = record.get(field) {
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<TabularRecord> {
        crate::data::records_from_json(&value).unwrap()
    }

    #[test]
    fn test_single_series() {
        let data = records(json!([
            {"time": "2020", "value": 10},
            {"time": "2021", "value": 20},
        ]));
        let table = pivot_records(&data, "time", "value", None);
        assert_eq!(table.categories, vec!["2020", "2021"]);
        assert_eq!(table.series.len(), 1);
        assert_eq!(table.series[0].name, None);
        assert_eq!(table.series[0].values, vec![Some(10.0), Some(20.0)]);
    }

    #[test]
    fn test_grouped_series_fills_null() {
        let data = records(json!([
            {"c": "Q1", "v": 5, "g": "A"},
            {"c": "Q1", "v": 7, "g": "B"},
            {"c": "Q2", "v": 9, "g": "A"},
        ]));
        let table = pivot_records(&data, "c", "v", Some("g"));
        assert_eq!(table.categories, vec!["Q1", "Q2"]);
        assert_eq!(table.series.len(), 2);
        assert_eq!(table.series[0].name.as_deref(), Some("A"));
        assert_eq!(table.series[0].values, vec![Some(5.0), Some(9.0)]);
        assert_eq!(table.series[1].name.as_deref(), Some("B"));
        // Missing Q2/B combination fills null, not omitted.
        assert_eq!(table.series[1].values, vec![Some(7.0), None]);
    }

    #[test]
    fn test_rectangularity() {
        let data = records(json!([
            {"c": "a", "v": 1, "g": "x"},
            {"c": "b", "v": 2, "g": "y"},
            {"c": "c", "v": 3, "g": "z"},
            {"c": "a", "v": 4, "g": "y"},
        ]));
        let table = pivot_records(&data, "c", "v", Some("g"));
        assert_eq!(table.categories.len(), 3);
        assert_eq!(table.series.len(), 3);
        for series in &table.series {
            assert_eq!(series.values.len(), table.categories.len());
        }
    }

    #[test]
    fn test_first_seen_order_preserved() {
        // Neither categories nor series keys are sorted; input order wins.
        let data = records(json!([
            {"c": "Zeta", "v": 1, "g": "beta"},
            {"c": "Alpha", "v": 2, "g": "alpha"},
            {"c": "Zeta", "v": 3, "g": "alpha"},
        ]));
        let table = pivot_records(&data, "c", "v", Some("g"));
        assert_eq!(table.categories, vec!["Zeta", "Alpha"]);
        let names: Vec<_> = table.series.iter().map(|s| s.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let data = records(json!([
            {"c": "Q1", "v": 5, "g": "A"},
            {"c": "Q2", "v": 7, "g": "B"},
            {"c": "Q1", "v": 2, "g": "B"},
        ]));
        let first = pivot_records(&data, "c", "v", Some("g"));
        let second = pivot_records(&data, "c", "v", Some("g"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_category_takes_first_match() {
        let data = records(json!([
            {"c": "Q1", "v": 5},
            {"c": "Q1", "v": 99},
        ]));
        let table = pivot_records(&data, "c", "v", None);
        assert_eq!(table.categories, vec!["Q1"]);
        assert_eq!(table.series[0].values, vec![Some(5.0)]);
    }

    #[test]
    fn test_no_coercion_between_types() {
        // The string "2020" and the number 2020 are distinct categories.
        let data = records(json!([
            {"c": "2020", "v": 1},
            {"c": 2020, "v": 2},
        ]));
        let table = pivot_records(&data, "c", "v", None);
        assert_eq!(table.categories, vec!["2020", "2020"]);
        assert_eq!(table.series[0].values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_non_numeric_value_is_null() {
        let data = records(json!([
            {"c": "Q1", "v": "n/a"},
            {"c": "Q2", "v": 3},
        ]));
        let table = pivot_records(&data, "c", "v", None);
        assert_eq!(table.series[0].values, vec![None, Some(3.0)]);
    }
}
