// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the integration tests.
//!
//! Tests that build a [`Client`] download the `ducklake` extension on first
//! use and are ignored by default. Run them with
//! `cargo test -- --ignored --test-threads=1`; `CATALOG` selects the catalog
//! backend (`duckdb` when unset) and `STORAGE_URL` overrides the data path.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ducklake::{Client, ClientConfig, DuckLakeResult, Value};
use tempfile::TempDir;

/// A client together with the scratch directory its files live in
pub struct TestLake {
    pub client: Client,
    pub dir: TempDir,
}

impl TestLake {
    /// Fresh catalog with creation allowed and no `events` table
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path()).with_create_if_not_exists(true);
        Self::open(dir, config)
    }

    /// Client for `config`, whose paths point into `dir`
    pub fn open(dir: TempDir, config: ClientConfig) -> Self {
        let client = Client::new(config).unwrap();
        client.drop_table("events", true).unwrap();
        Self { client, dir }
    }

    /// `events` created from the CSV fixture, one data file
    pub fn create_events(&self) {
        let sql = format!(
            "CREATE TABLE events AS FROM {}",
            self.client.quote(&Value::from(fixture("data.csv"))).unwrap()
        );
        self.client.sql(&sql, &[]).unwrap();
    }

    /// Append the CSV fixture to `events` again, one more data file
    pub fn load_events(&self) {
        let sql = format!(
            "COPY events FROM {}",
            self.client.quote(&Value::from(fixture("data.csv"))).unwrap()
        );
        self.client.sql(&sql, &[]).unwrap();
    }

    pub fn clear_snapshots(&self) {
        self.client
            .expire_snapshots(&ducklake::ExpireSnapshotsOptions {
                older_than: Some(chrono::Utc::now()),
                dry_run: false,
            })
            .unwrap();
    }

    pub fn clear_old_files(&self) {
        self.clear_snapshots();
        self.client
            .cleanup_old_files(&ducklake::CleanupOldFilesOptions {
                cleanup_all: true,
                ..Default::default()
            })
            .unwrap();
    }

    /// Drop the client, keeping its catalog and data files on disk
    pub fn into_dir(self) -> TempDir {
        self.dir
    }
}

pub fn catalog() -> String {
    std::env::var("CATALOG").unwrap_or_else(|_| "duckdb".to_string())
}

pub fn catalog_url(dir: &Path) -> String {
    match catalog().as_str() {
        "postgres" => "postgres://localhost/ducklake_rust_test".to_string(),
        "mysql" => "mysql://localhost/ducklake_rust_test".to_string(),
        "mariadb" => "mariadb://localhost/ducklake_rust_test".to_string(),
        "sqlite" => format!("sqlite:///{}", dir.join("ducklake_rust_test.sqlite").display()),
        "duckdb" => format!("duckdb:///{}", dir.join("ducklake_rust_test.duckdb").display()),
        other => panic!("unsupported catalog: {}", other),
    }
}

pub fn storage_url(dir: &Path) -> String {
    std::env::var("STORAGE_URL")
        .unwrap_or_else(|_| dir.join("data_files").display().to_string())
}

pub fn config(dir: &Path) -> ClientConfig {
    ClientConfig::new(catalog_url(dir), storage_url(dir))
}

pub fn new_client(config: ClientConfig) -> DuckLakeResult<Client> {
    Client::new(config)
}

pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/support")
        .join(name)
        .display()
        .to_string()
}
