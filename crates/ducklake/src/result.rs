// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::Value;

/// A fully materialized query result
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names in result order; not necessarily unique
    columns: Vec<String>,

    /// Rows aligned with `columns`
    rows: Vec<Vec<Value>>,

    /// Mapping view, built on first use
    maps: OnceLock<Vec<HashMap<String, Value>>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            maps: OnceLock::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as column name -> value maps.
    ///
    /// When column names repeat, the later column wins in the map; the row
    /// view is unaffected.
    pub fn to_maps(&self) -> &[HashMap<String, Value>] {
        self.maps.get_or_init(|| {
            self.rows
                .iter()
                .map(|row| {
                    let mut map = HashMap::with_capacity(self.columns.len());
                    for (column, value) in self.columns.iter().zip(row) {
                        map.insert(column.clone(), value.clone());
                    }
                    map
                })
                .collect()
        })
    }

    /// Value of `column` in the first row
    pub fn first_value(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().rposition(|c| c == column)?;
        self.rows.first()?.get(idx)
    }
}

impl PartialEq for QueryResult {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> QueryResult {
        QueryResult::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Value::from(1), Value::from("one")],
                vec![Value::from(2), Value::from("two")],
                vec![Value::from(3), Value::from("three")],
            ],
        )
    }

    #[test]
    fn test_row_and_map_views() {
        let result = events();
        assert_eq!(result.columns(), ["a", "b"]);
        assert_eq!(result.len(), 3);

        let maps = result.to_maps();
        assert_eq!(maps.len(), 3);
        assert_eq!(maps[1].get("a"), Some(&Value::from(2)));
        assert_eq!(maps[2].get("b"), Some(&Value::from("three")));
    }

    #[test]
    fn test_duplicate_columns_later_wins_in_maps_only() {
        let result = QueryResult::new(
            vec!["x".to_string(), "x".to_string()],
            vec![vec![Value::from(1), Value::from(2)]],
        );
        assert_eq!(result.rows()[0], vec![Value::from(1), Value::from(2)]);
        assert_eq!(result.to_maps()[0].len(), 1);
        assert_eq!(result.to_maps()[0].get("x"), Some(&Value::from(2)));
        assert_eq!(result.first_value("x"), Some(&Value::from(2)));
    }

    #[test]
    fn test_first_value() {
        let result = events();
        assert_eq!(result.first_value("b"), Some(&Value::from("one")));
        assert_eq!(result.first_value("missing"), None);
        assert_eq!(QueryResult::default().first_value("a"), None);
    }

    #[test]
    fn test_equality_ignores_cached_maps() {
        let a = events();
        let b = events();
        let _ = a.to_maps();
        assert_eq!(a, b);
    }
}
