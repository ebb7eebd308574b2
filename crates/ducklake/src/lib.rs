// SPDX-License-Identifier: Apache-2.0

//! Client for DuckLake lakehouses, driven through an embedded DuckDB engine.
//!
//! A [`Client`] attaches one DuckLake catalog (kept in Postgres, MySQL,
//! SQLite or a DuckDB file) with its data files on local disk or S3, and
//! then runs caller SQL and catalog maintenance against it.
//!
//! ```no_run
//! use ducklake::{params, Client, ClientConfig};
//!
//! # fn main() -> ducklake::DuckLakeResult<()> {
//! let config = ClientConfig::new("postgres://localhost/ducklake", "s3://my-bucket/");
//! let client = Client::new(config)?;
//!
//! client.sql("CREATE TABLE events (a bigint, b text)", &[])?;
//! client.sql("INSERT INTO events VALUES (?, ?)", &params![1, "one"])?;
//! let rows = client.sql("SELECT * FROM events", &[])?;
//! for row in rows.to_maps() {
//!     println!("{:?}", row.get("b"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client (sql, attach, maintenance)
//!   ↓
//! Statement builder (Call / Command)      Value codec
//!   ↓                                       ↓
//! Engine (execute with bound parameters) ←──┘
//!   ↓
//! DuckDB + ducklake extension
//!   ↓
//! Catalog database + data files
//! ```
//!
//! Caller values always travel as bind parameters. Session commands such as
//! `ATTACH` that the engine cannot parameterize are rendered as text by
//! [`Command`](statement::Command), which is the only place literals are
//! quoted.

pub mod catalog;
pub mod client;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod quote;
pub mod result;
pub mod statement;
pub mod value;

// Re-exports
pub use catalog::CatalogBackend;
pub use client::{
    AddDataFilesOptions, CleanupOldFilesOptions, Client, ExpireSnapshotsOptions, ListFilesOptions,
    RewriteDataFilesOptions,
};
pub use config::ClientConfig;
pub use engine::{DuckDbEngine, Engine};
pub use error::{DuckLakeError, DuckLakeResult};
pub use result::QueryResult;
pub use value::Value;
