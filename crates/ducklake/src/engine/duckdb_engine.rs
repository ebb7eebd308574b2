// SPDX-License-Identifier: Apache-2.0

//! DuckDB-backed engine.

use duckdb::{params_from_iter, Connection};
use tracing::{debug, trace};

use crate::codec::{decode_value, encode_bind_value};
use crate::engine::Engine;
use crate::error::DuckLakeResult;
use crate::result::QueryResult;
use crate::value::Value;

/// In-memory DuckDB connection, exclusively owned.
///
/// The connection is closed when the engine is dropped.
pub struct DuckDbEngine {
    conn: Connection,
}

impl DuckDbEngine {
    /// Open a fresh in-memory database
    pub fn open_in_memory() -> DuckLakeResult<Self> {
        debug!("Opening in-memory DuckDB connection");
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Engine for DuckDbEngine {
    fn execute(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult> {
        let bound = params
            .iter()
            .map(encode_bind_value)
            .collect::<DuckLakeResult<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bound.iter()))?;

        let columns = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                let native: duckdb::types::Value = row.get(idx)?;
                values.push(decode_value(native)?);
            }
            data.push(values);
        }

        trace!("Materialized {} row(s) x {} column(s)", data.len(), columns.len());
        Ok(QueryResult::new(columns, data))
    }
}

impl std::fmt::Debug for DuckDbEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDbEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuckLakeError;

    #[test]
    fn test_select_literal() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let result = engine.execute("SELECT 1 AS one, 'x' AS two", &[]).unwrap();
        assert_eq!(result.columns(), ["one", "two"]);
        assert_eq!(
            result.rows(),
            [vec![Value::Integer(1), Value::Text("x".to_string())]]
        );
    }

    #[test]
    fn test_binds_in_order() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let result = engine
            .execute("SELECT ? - ?", &[Value::from(10), Value::from(3)])
            .unwrap();
        assert_eq!(result.rows()[0][0], Value::Integer(7));
    }

    #[test]
    fn test_extra_params_fail_to_bind() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let err = engine
            .execute("SELECT ?", &[Value::from(1), Value::from(2)])
            .unwrap_err();
        assert!(matches!(err, DuckLakeError::ParameterBind(_)));
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let err = engine.execute("SELECT * FROM missing_table", &[]).unwrap_err();
        assert!(matches!(err, DuckLakeError::Engine(_)));
        assert!(err.to_string().contains("missing_table"));
    }

    #[test]
    fn test_unsupported_bind_value_fails_before_prepare() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let err = engine
            .execute("SELECT ?", &[Value::List(vec![])])
            .unwrap_err();
        assert!(matches!(err, DuckLakeError::UnsupportedType("list")));
    }
}
