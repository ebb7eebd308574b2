// SPDX-License-Identifier: Apache-2.0

use crate::statement::BoundStatement;
use crate::value::Value;

/// How a function invocation is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `CALL name(...)`
    Procedure,
    /// `SELECT * FROM name(...)`
    TableFunction,
}

/// A function invocation with positional and named arguments.
///
/// Every argument is passed as a placeholder. Named arguments always render
/// after positional ones, regardless of the order they were added in.
/// Optional arguments that are not set never appear in the SQL text: the
/// extension distinguishes an omitted argument from one passed as `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    kind: CallKind,
    name: &'static str,
    positional: Vec<Value>,
    named: Vec<(&'static str, Value)>,
}

impl Call {
    pub fn procedure(name: &'static str) -> Self {
        Self::new(CallKind::Procedure, name)
    }

    pub fn table_function(name: &'static str) -> Self {
        Self::new(CallKind::TableFunction, name)
    }

    fn new(kind: CallKind, name: &'static str) -> Self {
        Self {
            kind,
            name,
            positional: vec![],
            named: vec![],
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Positional argument, skipped when absent
    pub fn arg_opt<V: Into<Value>>(self, value: Option<V>) -> Self {
        match value {
            Some(value) => self.arg(value),
            None => self,
        }
    }

    pub fn named(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.named.push((name, value.into()));
        self
    }

    /// Named argument, skipped when absent
    pub fn named_opt<V: Into<Value>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.named(name, value),
            None => self,
        }
    }

    /// Named boolean flag whose engine default is `false`; only rendered when set
    pub fn flag(self, name: &'static str, enabled: bool) -> Self {
        if enabled {
            self.named(name, true)
        } else {
            self
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn render(&self) -> BoundStatement {
        let args = self
            .positional
            .iter()
            .map(|_| "?".to_string())
            .chain(self.named.iter().map(|(name, _)| format!("{} => ?", name)))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = match self.kind {
            CallKind::Procedure => format!("CALL {}({})", self.name, args),
            CallKind::TableFunction => format!("SELECT * FROM {}({})", self.name, args),
        };

        let params = self
            .positional
            .iter()
            .cloned()
            .chain(self.named.iter().map(|(_, value)| value.clone()))
            .collect();

        BoundStatement::new(sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_without_args() {
        let stmt = Call::procedure("merge_adjacent_files").render();
        assert_eq!(stmt.sql, "CALL merge_adjacent_files()");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_table_function() {
        let stmt = Call::table_function("ducklake_snapshots")
            .arg("ducklake")
            .render();
        assert_eq!(stmt.sql, "SELECT * FROM ducklake_snapshots(?)");
        assert_eq!(stmt.params, vec![Value::from("ducklake")]);
    }

    #[test]
    fn test_named_args_follow_positional() {
        let stmt = Call::procedure("ducklake_set_option")
            .named("table_name", "events")
            .arg("ducklake")
            .arg("parquet_compression")
            .arg("zstd")
            .render();
        assert_eq!(
            stmt.sql,
            "CALL ducklake_set_option(?, ?, ?, table_name => ?)"
        );
        assert_eq!(
            stmt.params,
            vec![
                Value::from("ducklake"),
                Value::from("parquet_compression"),
                Value::from("zstd"),
                Value::from("events"),
            ]
        );
    }

    #[test]
    fn test_absent_optional_args_are_omitted() {
        let stmt = Call::procedure("ducklake_cleanup_old_files")
            .arg("ducklake")
            .flag("cleanup_all", false)
            .named_opt("older_than", None::<i64>)
            .flag("dry_run", false)
            .render();
        assert_eq!(stmt.sql, "CALL ducklake_cleanup_old_files(?)");
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn test_optional_positional() {
        let with = Call::procedure("ducklake_rewrite_data_files")
            .arg("ducklake")
            .arg_opt(Some("events"))
            .render();
        assert_eq!(with.sql, "CALL ducklake_rewrite_data_files(?, ?)");

        let without = Call::procedure("ducklake_rewrite_data_files")
            .arg("ducklake")
            .arg_opt(None::<&str>)
            .render();
        assert_eq!(without.sql, "CALL ducklake_rewrite_data_files(?)");
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let stmt = Call::table_function("ducklake_list_files")
            .arg("ducklake")
            .arg("events")
            .named("snapshot_version", 3)
            .flag("unused", false)
            .render();
        assert_eq!(stmt.sql.matches('?').count(), stmt.params.len());
    }
}
