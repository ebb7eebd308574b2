// SPDX-License-Identifier: Apache-2.0

//! Catalog metadata and maintenance operations.
//!
//! Every call passes the catalog alias and its arguments as bind
//! parameters. Optional arguments left at their defaults are omitted from
//! the SQL entirely.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;

use super::Client;
use crate::engine::Engine;
use crate::error::{DuckLakeError, DuckLakeResult};
use crate::result::QueryResult;
use crate::statement::{BoundStatement, Call, Command};
use crate::value::Value;

/// Options for [`Client::expire_snapshots`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpireSnapshotsOptions {
    /// Expire snapshots created before this time
    pub older_than: Option<DateTime<Utc>>,
    /// Report what would be expired without changing anything
    pub dry_run: bool,
}

impl ExpireSnapshotsOptions {
    fn to_call(&self, catalog: &str) -> Call {
        Call::procedure("ducklake_expire_snapshots")
            .arg(catalog)
            .named_opt("older_than", self.older_than)
            .flag("dry_run", self.dry_run)
    }
}

/// Options for [`Client::cleanup_old_files`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupOldFilesOptions {
    /// Remove every file scheduled for deletion, regardless of age
    pub cleanup_all: bool,
    pub older_than: Option<DateTime<Utc>>,
    pub dry_run: bool,
}

impl CleanupOldFilesOptions {
    fn to_call(&self, catalog: &str) -> Call {
        Call::procedure("ducklake_cleanup_old_files")
            .arg(catalog)
            .flag("cleanup_all", self.cleanup_all)
            .named_opt("older_than", self.older_than)
            .flag("dry_run", self.dry_run)
    }
}

/// Options for [`Client::rewrite_data_files`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteDataFilesOptions {
    /// Restrict the rewrite to one table
    pub table: Option<String>,
    /// Fraction of deleted rows above which a file is rewritten
    pub delete_threshold: Option<f64>,
}

impl RewriteDataFilesOptions {
    fn to_call(&self, catalog: &str) -> Call {
        Call::procedure("ducklake_rewrite_data_files")
            .arg(catalog)
            .arg_opt(self.table.as_deref())
            .named_opt("delete_threshold", self.delete_threshold)
    }
}

/// Options for [`Client::list_files`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilesOptions {
    pub snapshot_version: Option<i64>,
    pub snapshot_time: Option<DateTime<Utc>>,
}

impl ListFilesOptions {
    fn to_call(&self, catalog: &str, table: &str) -> Call {
        Call::table_function("ducklake_list_files")
            .arg(catalog)
            .arg(table)
            .named_opt("snapshot_version", self.snapshot_version)
            .named_opt("snapshot_time", self.snapshot_time)
    }
}

/// Options for [`Client::add_data_files`].
///
/// Unlike the other option sets, `Some(false)` is sent as an explicit
/// `false` argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddDataFilesOptions {
    /// Fill columns missing from the file with their defaults
    pub allow_missing: Option<bool>,
    /// Accept files with columns the table does not have
    pub ignore_extra_columns: Option<bool>,
}

impl AddDataFilesOptions {
    fn to_call(&self, catalog: &str, table: &str, path: &str) -> Call {
        Call::procedure("ducklake_add_data_files")
            .arg(catalog)
            .arg(table)
            .arg(path)
            .named_opt("allow_missing", self.allow_missing)
            .named_opt("ignore_extra_columns", self.ignore_extra_columns)
    }
}

impl<E: Engine> Client<E> {
    /// Tables in the catalog with their file counts and sizes
    pub fn table_info(&self) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        self.catalog_rows(Call::table_function("ducklake_table_info"))
    }

    pub fn snapshots(&self) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        self.catalog_rows(Call::table_function("ducklake_snapshots"))
    }

    /// Catalog options, including the ones scoped to a schema or table
    pub fn options(&self) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        self.catalog_rows(Call::table_function("ducklake_options"))
    }

    /// Set a catalog option, or a table option when `table_name` is given.
    ///
    /// Setting the same option again adds another entry to the catalog
    /// rather than replacing the first one; read back the newest entry for
    /// the scope you care about.
    pub fn set_option(
        &self,
        name: &str,
        value: impl Into<Value>,
        table_name: Option<&str>,
    ) -> DuckLakeResult<()> {
        let call = Call::procedure("ducklake_set_option")
            .arg(self.catalog.as_str())
            .arg(name)
            .arg(value)
            .named_opt("table_name", table_name);
        self.execute(&call.render())?;
        Ok(())
    }

    /// Version of the DuckLake format the catalog was written with
    pub fn format_version(&self) -> DuckLakeResult<String> {
        let stmt = BoundStatement::new(
            "SELECT value FROM ducklake_options(?) WHERE option_name = ?",
            vec![Value::from(self.catalog.as_str()), Value::from("version")],
        );
        single_text(&self.execute(&stmt)?, "value")
    }

    /// Version of the installed `ducklake` extension (experimental)
    pub fn extension_version(&self) -> DuckLakeResult<String> {
        let stmt = BoundStatement::new(
            "SELECT extension_version FROM duckdb_extensions() WHERE extension_name = ?",
            vec![Value::from("ducklake")],
        );
        single_text(&self.execute(&stmt)?, "extension_version")
    }

    /// Version of the engine library (experimental)
    pub fn duckdb_version(&self) -> DuckLakeResult<String> {
        let stmt = BoundStatement::text("SELECT VERSION() AS version");
        single_text(&self.execute(&stmt)?, "version")
    }

    pub fn merge_adjacent_files(&self) -> DuckLakeResult<()> {
        info!("Merging adjacent files in {}", self.catalog);
        self.execute(&Call::procedure("merge_adjacent_files").render())?;
        Ok(())
    }

    /// Expire snapshots, returning the ones expired (or that would be)
    pub fn expire_snapshots(
        &self,
        options: &ExpireSnapshotsOptions,
    ) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        info!("Expiring snapshots in {}: {:?}", self.catalog, options);
        self.call_rows(options.to_call(&self.catalog))
    }

    /// Delete data files no longer referenced by any snapshot
    pub fn cleanup_old_files(
        &self,
        options: &CleanupOldFilesOptions,
    ) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        info!("Cleaning up old files in {}: {:?}", self.catalog, options);
        self.call_rows(options.to_call(&self.catalog))
    }

    pub fn rewrite_data_files(&self, options: &RewriteDataFilesOptions) -> DuckLakeResult<()> {
        info!("Rewriting data files in {}: {:?}", self.catalog, options);
        self.execute(&options.to_call(&self.catalog).render())?;
        Ok(())
    }

    /// Run every maintenance step in one go (experimental)
    pub fn checkpoint(&self) -> DuckLakeResult<()> {
        info!("Checkpointing {}", self.catalog);
        self.run_command(&Command::Checkpoint)
    }

    /// Write inlined rows out to data files, for one table or all of them
    pub fn flush_inlined_data(&self, table_name: Option<&str>) -> DuckLakeResult<()> {
        let call = Call::procedure("ducklake_flush_inlined_data")
            .arg(self.catalog.as_str())
            .named_opt("table_name", table_name);
        self.execute(&call.render())?;
        Ok(())
    }

    pub fn list_files(
        &self,
        table: &str,
        options: &ListFilesOptions,
    ) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        self.call_rows(options.to_call(&self.catalog, table))
    }

    /// Register existing Parquet files with `table` without copying them
    pub fn add_data_files(
        &self,
        table: &str,
        path: &str,
        options: &AddDataFilesOptions,
    ) -> DuckLakeResult<()> {
        info!("Adding data files {} to {}", path, table);
        self.execute(&options.to_call(&self.catalog, table, path).render())?;
        Ok(())
    }

    pub fn drop_table(&self, table: &str, if_exists: bool) -> DuckLakeResult<()> {
        self.run_command(&Command::DropTable {
            table: table.to_string(),
            if_exists,
        })
    }

    /// Table function taking the catalog alias as its only argument
    fn catalog_rows(&self, call: Call) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        self.call_rows(call.arg(self.catalog.as_str()))
    }

    fn call_rows(&self, call: Call) -> DuckLakeResult<Vec<HashMap<String, Value>>> {
        Ok(self.execute(&call.render())?.to_maps().to_vec())
    }
}

fn single_text(result: &QueryResult, column: &str) -> DuckLakeResult<String> {
    match result.first_value(column) {
        Some(Value::Text(text)) => Ok(text.clone()),
        Some(Value::Null) | None => Err(DuckLakeError::UnexpectedResult(format!(
            "no value in column {}",
            column
        ))),
        Some(other) => Ok(other.to_string()),
    }
}
