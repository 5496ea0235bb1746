//! Pivot/aggregation engine
//!
//! Groups a table by one row axis and one column-spread axis, reduces a
//! value column with the chosen aggregation, and assembles a reshaped table.
//! Combinations with no matching rows are filled with numeric zero, not null.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::table::{Column, Table, Value};

/// Aggregation function applied to each (row-key, column-key) group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFn {
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl FromStr for AggFn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(AggFn::Sum),
            "mean" => Ok(AggFn::Mean),
            "count" => Ok(AggFn::Count),
            "min" => Ok(AggFn::Min),
            "max" => Ok(AggFn::Max),
            other => Err(Error::Config(format!(
                "unknown aggregation function '{}'",
                other
            ))),
        }
    }
}

impl AggFn {
    /// Reduce one group of value cells to a number; groups with no usable
    /// cells yield zero
    fn reduce(&self, cells: &[Value]) -> f64 {
        if *self == AggFn::Count {
            return cells.iter().filter(|c| !c.is_null()).count() as f64;
        }

        let numbers: Vec<f64> = cells.iter().filter_map(Value::as_number).collect();
        if numbers.is_empty() {
            return 0.0;
        }
        match self {
            AggFn::Sum => numbers.iter().sum(),
            AggFn::Mean => numbers.iter().sum::<f64>() / numbers.len() as f64,
            AggFn::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            AggFn::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggFn::Count => unreachable!(),
        }
    }
}

/// Grouping key over a cell value; distinct variants never collapse, so a
/// numeric key and its text rendering stay separate groups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AxisKey {
    Null,
    Bool(bool),
    Number(u64),
    Text(String),
}

impl AxisKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => AxisKey::Null,
            Value::Bool(b) => AxisKey::Bool(*b),
            Value::Number(n) => AxisKey::Number(n.to_bits()),
            Value::Text(s) => AxisKey::Text(s.clone()),
        }
    }
}

/// Pivot a table: one output row per distinct `rows_col` value, one output
/// column per distinct `cols_col` value, cells aggregated from `values_col`
pub fn pivot(
    table: &Table,
    rows_col: &str,
    cols_col: &str,
    values_col: &str,
    agg: AggFn,
) -> Result<Table> {
    let row_idx = table
        .column_index(rows_col)
        .ok_or_else(|| Error::ColumnNotFound(rows_col.to_string()))?;
    let col_idx = table
        .column_index(cols_col)
        .ok_or_else(|| Error::ColumnNotFound(cols_col.to_string()))?;
    let val_idx = table
        .column_index(values_col)
        .ok_or_else(|| Error::ColumnNotFound(values_col.to_string()))?;

    // Distinct axis keys, sorted afterwards in natural ascending value order
    let mut row_keys: HashMap<AxisKey, Value> = HashMap::new();
    let mut col_keys: HashMap<AxisKey, Value> = HashMap::new();
    let mut groups: HashMap<(AxisKey, AxisKey), Vec<Value>> = HashMap::new();

    for row in 0..table.row_count() {
        let row_key = &table.columns[row_idx].cells[row];
        let col_key = &table.columns[col_idx].cells[row];
        let value = table.columns[val_idx].cells[row].clone();

        let row_axis_key = AxisKey::of(row_key);
        let col_axis_key = AxisKey::of(col_key);
        row_keys
            .entry(row_axis_key.clone())
            .or_insert_with(|| row_key.clone());
        col_keys
            .entry(col_axis_key.clone())
            .or_insert_with(|| col_key.clone());
        groups
            .entry((row_axis_key, col_axis_key))
            .or_default()
            .push(value);
    }

    let mut row_axis: Vec<(AxisKey, Value)> = row_keys.into_iter().collect();
    row_axis.sort_by(|a, b| a.1.compare(&b.1));
    let mut col_axis: Vec<(AxisKey, Value)> = col_keys.into_iter().collect();
    col_axis.sort_by(|a, b| a.1.compare(&b.1));

    let mut columns = Vec::with_capacity(col_axis.len() + 1);
    columns.push(Column::new(
        rows_col,
        row_axis.iter().map(|(_, key)| key.clone()).collect(),
    ));

    for (col_axis_key, col_key) in &col_axis {
        let cells = row_axis
            .iter()
            .map(|(row_axis_key, _)| {
                let aggregate = groups
                    .get(&(row_axis_key.clone(), col_axis_key.clone()))
                    .map_or(0.0, |group| agg.reduce(group));
                Value::Number(aggregate)
            })
            .collect();
        columns.push(Column::new(col_key.to_display_string(), cells));
    }

    Ok(Table { columns })
}

/// Re-sort a pivot result descending by its numeric column
///
/// Column choice: the sole numeric column if exactly one exists, otherwise
/// the most recently used values-column selection if that column is numeric,
/// otherwise the first numeric column. Always a full stable re-sort of the
/// pivot result.
pub fn sort_descending(pivot: &Table, last_values_col: Option<&str>) -> Result<Table> {
    let numeric: Vec<usize> = pivot
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.cells.iter().all(|v| matches!(v, Value::Number(_))))
        .map(|(i, _)| i)
        .collect();

    let chosen = match numeric.as_slice() {
        [] => {
            return Err(Error::Config(
                "no numeric column to sort by".to_string(),
            ))
        }
        [only] => *only,
        _ => last_values_col
            .and_then(|name| pivot.column_index(name))
            .filter(|idx| numeric.contains(idx))
            .unwrap_or(numeric[0]),
    };

    let mut order: Vec<usize> = (0..pivot.row_count()).collect();
    order.sort_by(|&a, &b| {
        let left = pivot.columns[chosen].cells[a].as_number().unwrap_or(0.0);
        let right = pivot.columns[chosen].cells[b].as_number().unwrap_or(0.0);
        right.total_cmp(&left)
    });

    Ok(pivot.take_rows(&order))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_table() -> Table {
        // (Region, Product, Sales)
        let rows = vec![
            ("North", "widget", 10.0),
            ("North", "widget", 5.0),
            ("North", "gadget", 2.0),
            ("South", "gadget", 7.0),
        ];
        Table::from_rows(
            vec!["Region".into(), "Product".into(), "Sales".into()],
            rows.into_iter()
                .map(|(r, p, s)| {
                    vec![
                        Value::Text(r.to_string()),
                        Value::Text(p.to_string()),
                        Value::Number(s),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_agg_fn_from_str_rejects_unknown() {
        assert_eq!("sum".parse::<AggFn>().unwrap(), AggFn::Sum);
        assert!(matches!("median".parse::<AggFn>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_pivot_sum_with_zero_fill() {
        let result = pivot(&sales_table(), "Region", "Product", "Sales", AggFn::Sum).unwrap();

        assert_eq!(result.column_names(), vec!["Region", "gadget", "widget"]);
        assert_eq!(result.row_count(), 2);

        // North row: gadget 2, widget 15
        assert_eq!(result.columns[0].cells[0], Value::Text("North".into()));
        assert_eq!(result.columns[1].cells[0], Value::Number(2.0));
        assert_eq!(result.columns[2].cells[0], Value::Number(15.0));

        // South has no widget rows: zero, not null
        assert_eq!(result.columns[1].cells[1], Value::Number(7.0));
        assert_eq!(result.columns[2].cells[1], Value::Number(0.0));
    }

    #[test]
    fn test_pivot_count_one_row_per_pair() {
        let table = Table::from_rows(
            vec!["r".into(), "c".into(), "v".into()],
            vec![
                vec![
                    Value::Text("x".into()),
                    Value::Text("p".into()),
                    Value::Number(1.0),
                ],
                vec![
                    Value::Text("y".into()),
                    Value::Text("q".into()),
                    Value::Number(9.0),
                ],
            ],
        );
        let result = pivot(&table, "r", "c", "v", AggFn::Count).unwrap();

        assert_eq!(result.columns[1].cells[0], Value::Number(1.0));
        assert_eq!(result.columns[2].cells[1], Value::Number(1.0));
        // Absent combinations are counted as 0, not null
        assert_eq!(result.columns[2].cells[0], Value::Number(0.0));
        assert_eq!(result.columns[1].cells[1], Value::Number(0.0));
    }

    #[test]
    fn test_pivot_mean_min_max() {
        let table = sales_table();
        let mean = pivot(&table, "Region", "Product", "Sales", AggFn::Mean).unwrap();
        assert_eq!(mean.columns[2].cells[0], Value::Number(7.5));

        let min = pivot(&table, "Region", "Product", "Sales", AggFn::Min).unwrap();
        assert_eq!(min.columns[2].cells[0], Value::Number(5.0));

        let max = pivot(&table, "Region", "Product", "Sales", AggFn::Max).unwrap();
        assert_eq!(max.columns[2].cells[0], Value::Number(10.0));
    }

    #[test]
    fn test_pivot_missing_column_rejected() {
        let err = pivot(&sales_table(), "Region", "Nope", "Sales", AggFn::Sum);
        assert!(matches!(err, Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_pivot_keeps_numeric_and_text_keys_distinct() {
        // A key column merged from mixed sources can hold both Number(1)
        // and Text("1"); these are distinct values and distinct groups
        let table = Table::from_rows(
            vec!["k".into(), "c".into(), "v".into()],
            vec![
                vec![
                    Value::Number(1.0),
                    Value::Text("a".into()),
                    Value::Number(1.0),
                ],
                vec![
                    Value::Text("1".into()),
                    Value::Text("a".into()),
                    Value::Number(1.0),
                ],
            ],
        );
        let result = pivot(&table, "k", "c", "v", AggFn::Count).unwrap();

        assert_eq!(result.row_count(), 2);
        // Ascending value order: numbers before text
        assert_eq!(result.columns[0].cells[0], Value::Number(1.0));
        assert_eq!(result.columns[0].cells[1], Value::Text("1".into()));
        assert_eq!(result.columns[1].cells[0], Value::Number(1.0));
        assert_eq!(result.columns[1].cells[1], Value::Number(1.0));
    }

    #[test]
    fn test_pivot_numeric_row_keys_sorted_ascending() {
        let table = Table::from_rows(
            vec!["k".into(), "c".into(), "v".into()],
            vec![
                vec![
                    Value::Number(10.0),
                    Value::Text("a".into()),
                    Value::Number(1.0),
                ],
                vec![
                    Value::Number(2.0),
                    Value::Text("a".into()),
                    Value::Number(1.0),
                ],
            ],
        );
        let result = pivot(&table, "k", "c", "v", AggFn::Sum).unwrap();
        assert_eq!(result.columns[0].cells[0], Value::Number(2.0));
        assert_eq!(result.columns[0].cells[1], Value::Number(10.0));
    }

    #[test]
    fn test_sort_descending_single_numeric_column() {
        let table = sales_table();
        let result = pivot(&table, "Region", "Product", "Sales", AggFn::Sum).unwrap();
        let sorted = sort_descending(&result, Some("Sales")).unwrap();

        // First numeric column is "gadget": South (7) then North (2)
        assert_eq!(sorted.columns[0].cells[0], Value::Text("South".into()));
        let gadget = sorted.column("gadget").unwrap();
        let mut prev = f64::INFINITY;
        for cell in &gadget.cells {
            let n = cell.as_number().unwrap();
            assert!(n <= prev);
            prev = n;
        }
    }

    #[test]
    fn test_sort_descending_no_numeric_column() {
        let table = Table::from_rows(
            vec!["a".into()],
            vec![vec![Value::Text("x".into())]],
        );
        assert!(matches!(
            sort_descending(&table, None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_sort_descending_prefers_last_values_column() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![Value::Number(1.0), Value::Number(9.0)],
                vec![Value::Number(2.0), Value::Number(3.0)],
            ],
        );
        let sorted = sort_descending(&table, Some("b")).unwrap();
        assert_eq!(sorted.columns[1].cells[0], Value::Number(9.0));

        // Unknown selection falls back to the first numeric column
        let sorted = sort_descending(&table, Some("zzz")).unwrap();
        assert_eq!(sorted.columns[0].cells[0], Value::Number(2.0));
    }
}
