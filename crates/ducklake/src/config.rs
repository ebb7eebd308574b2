// SPDX-License-Identifier: Apache-2.0

//! Configuration for the DuckLake client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::redact_url;
use crate::error::{DuckLakeError, DuckLakeResult};
use crate::statement::OptionSet;

/// Alias the lakehouse catalog is attached under
pub const CATALOG_ALIAS: &str = "ducklake";

/// Name of the engine's default in-memory catalog
pub const DEFAULT_CATALOG: &str = "memory";

/// Configuration for a DuckLake client
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Catalog database URL (e.g., "postgres://localhost/ducklake")
    pub catalog_url: String,

    /// Where data files live (local directory or "s3://bucket/prefix/")
    pub storage_url: String,

    /// Pin the session to a snapshot id
    #[serde(default)]
    pub snapshot_version: Option<i64>,

    /// Pin the session to the snapshot current at this time
    #[serde(default)]
    pub snapshot_time: Option<DateTime<Utc>>,

    /// Inline inserts of up to this many rows into the catalog (0 disables)
    #[serde(default = "default_data_inlining_row_limit")]
    pub data_inlining_row_limit: u64,

    /// Create the catalog if it does not exist yet
    #[serde(default = "default_create_if_not_exists")]
    pub create_if_not_exists: bool,

    /// Use `storage_url` even if the catalog records another data path
    /// (experimental)
    #[serde(default = "default_override_data_path")]
    pub override_data_path: bool,
}

impl ClientConfig {
    pub fn new(catalog_url: impl Into<String>, storage_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            storage_url: storage_url.into(),
            snapshot_version: None,
            snapshot_time: None,
            data_inlining_row_limit: default_data_inlining_row_limit(),
            create_if_not_exists: default_create_if_not_exists(),
            override_data_path: default_override_data_path(),
        }
    }

    pub fn with_snapshot_version(mut self, version: i64) -> Self {
        self.snapshot_version = Some(version);
        self
    }

    pub fn with_snapshot_time(mut self, time: DateTime<Utc>) -> Self {
        self.snapshot_time = Some(time);
        self
    }

    pub fn with_data_inlining_row_limit(mut self, limit: u64) -> Self {
        self.data_inlining_row_limit = limit;
        self
    }

    pub fn with_create_if_not_exists(mut self, create: bool) -> Self {
        self.create_if_not_exists = create;
        self
    }

    pub fn with_override_data_path(mut self, override_data_path: bool) -> Self {
        self.override_data_path = override_data_path;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DuckLakeResult<()> {
        if self.catalog_url.trim().is_empty() {
            return Err(DuckLakeError::InvalidConfig(
                "catalog_url must not be empty".to_string(),
            ));
        }

        if self.storage_url.trim().is_empty() {
            return Err(DuckLakeError::InvalidConfig(
                "storage_url must not be empty".to_string(),
            ));
        }

        if i64::try_from(self.data_inlining_row_limit).is_err() {
            return Err(DuckLakeError::InvalidConfig(format!(
                "data_inlining_row_limit must be at most {}",
                i64::MAX
            )));
        }

        // Both pins together are rejected by the extension itself
        // ("Cannot specify both VERSION and TIMESTAMP"), so they pass here.

        Ok(())
    }

    /// Options for attaching the catalog.
    ///
    /// `CREATE_IF_NOT_EXISTS` is only ever sent as `false`: leaving it out
    /// is what allows the engine to create the catalog.
    pub fn attach_options(&self) -> OptionSet {
        let mut options = OptionSet::new();
        options.insert("data_path", self.storage_url.as_str());
        if !self.create_if_not_exists {
            options.insert("create_if_not_exists", false);
        }
        options
            .insert_opt("snapshot_version", self.snapshot_version)
            .insert_opt("snapshot_time", self.snapshot_time);
        if self.data_inlining_row_limit > 0 {
            options.insert("data_inlining_row_limit", self.data_inlining_row_limit);
        }
        if self.override_data_path {
            options.insert("override_data_path", true);
        }
        options
    }
}

// Implement Debug manually to avoid printing credentials embedded in URLs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("catalog_url", &redact_url(&self.catalog_url))
            .field("storage_url", &redact_url(&self.storage_url))
            .field("snapshot_version", &self.snapshot_version)
            .field("snapshot_time", &self.snapshot_time)
            .field("data_inlining_row_limit", &self.data_inlining_row_limit)
            .field("create_if_not_exists", &self.create_if_not_exists)
            .field("override_data_path", &self.override_data_path)
            .finish()
    }
}

fn default_data_inlining_row_limit() -> u64 {
    0
}

fn default_create_if_not_exists() -> bool {
    false
}

fn default_override_data_path() -> bool {
    false
}
