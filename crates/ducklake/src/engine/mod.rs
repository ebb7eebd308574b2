// SPDX-License-Identifier: Apache-2.0

//! Boundary with the embedded SQL engine.

mod duckdb_engine;

pub use duckdb_engine::DuckDbEngine;

use crate::error::DuckLakeResult;
use crate::result::QueryResult;
use crate::value::Value;

/// An engine connection that runs one statement at a time.
///
/// Parameters are bound to the `?` placeholders of `sql` in order, starting
/// at index 1. Errors reported by the engine are returned untouched.
pub trait Engine {
    fn execute(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn execute(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult> {
        (**self).execute(sql, params)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Engine;
    use crate::error::{DuckLakeError, DuckLakeResult};
    use crate::result::QueryResult;
    use crate::statement::BoundStatement;
    use crate::value::Value;

    /// Engine double that records every statement it receives
    #[derive(Debug, Clone, Default)]
    pub struct RecordingEngine {
        log: Rc<RefCell<Vec<BoundStatement>>>,
        fail_on: Option<String>,
        responses: Rc<RefCell<Vec<(String, QueryResult)>>>,
    }

    impl RecordingEngine {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail any statement whose SQL starts with `prefix`
        pub fn failing_on(prefix: &str) -> Self {
            Self {
                fail_on: Some(prefix.to_string()),
                ..Self::default()
            }
        }

        /// Answer statements starting with `prefix` with `result`
        pub fn respond(&self, prefix: &str, result: QueryResult) {
            self.responses
                .borrow_mut()
                .push((prefix.to_string(), result));
        }

        pub fn statements(&self) -> Vec<BoundStatement> {
            self.log.borrow().clone()
        }

        pub fn sql(&self) -> Vec<String> {
            self.log.borrow().iter().map(|s| s.sql.clone()).collect()
        }

        pub fn clear(&self) {
            self.log.borrow_mut().clear();
        }
    }

    impl Engine for RecordingEngine {
        fn execute(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult> {
            self.log
                .borrow_mut()
                .push(BoundStatement::new(sql, params.to_vec()));

            if let Some(prefix) = &self.fail_on {
                if sql.starts_with(prefix.as_str()) {
                    return Err(DuckLakeError::UnexpectedResult(format!(
                        "simulated failure: {}",
                        sql
                    )));
                }
            }

            let responses = self.responses.borrow();
            let result = responses
                .iter()
                .find(|(prefix, _)| sql.starts_with(prefix.as_str()))
                .map(|(_, result)| result.clone())
                .unwrap_or_default();
            Ok(result)
        }
    }
}
