// SPDX-License-Identifier: Apache-2.0

//! Catalog, data source and storage URL handling.

use std::fmt;

use url::Url;

use crate::error::{DuckLakeError, DuckLakeResult};
use crate::statement::OptionSet;

/// Relational store holding the DuckLake metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogBackend {
    Postgres,
    Mysql,
    Sqlite,
    DuckdbFile,
}

impl CatalogBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogBackend::Postgres => "postgres",
            CatalogBackend::Mysql => "mysql",
            CatalogBackend::Sqlite => "sqlite",
            CatalogBackend::DuckdbFile => "duckdb-file",
        }
    }

    /// Engine extension needed to reach this backend, if any
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            CatalogBackend::Postgres => Some("postgres"),
            CatalogBackend::Mysql => Some("mysql"),
            CatalogBackend::Sqlite => Some("sqlite"),
            CatalogBackend::DuckdbFile => None,
        }
    }
}

impl fmt::Display for CatalogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog URL resolved to its backend and the URL handed to `ATTACH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLocation {
    pub backend: CatalogBackend,
    /// Backend-prefixed URL, without the `ducklake:` prefix
    pub attach_url: String,
}

impl CatalogLocation {
    /// Resolve a catalog URL.
    ///
    /// | URL                                | backend       | attach URL               |
    /// |------------------------------------|---------------|--------------------------|
    /// | `postgres://…`, `postgresql://…`   | `postgres`    | `postgres:<url>`         |
    /// | `mysql://…`, `mariadb://…`         | `mysql`       | `mysql:<url>`            |
    /// | `sqlite:///<path>`                 | `sqlite`      | `sqlite:<path>`          |
    /// | `duckdb:///<path>`                 | `duckdb-file` | `duckdb:<path>`          |
    pub fn parse(url: &str) -> DuckLakeResult<Self> {
        let (backend, attach_url) = if is_postgres_url(url) {
            (CatalogBackend::Postgres, format!("postgres:{}", url))
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            (CatalogBackend::Mysql, format!("mysql:{}", url))
        } else if let Some(path) = url.strip_prefix("sqlite:///") {
            (CatalogBackend::Sqlite, format!("sqlite:{}", path))
        } else if let Some(path) = url.strip_prefix("duckdb:///") {
            (CatalogBackend::DuckdbFile, format!("duckdb:{}", path))
        } else {
            return Err(DuckLakeError::UnsupportedCatalogType {
                scheme: scheme_of(url),
            });
        };

        Ok(Self {
            backend,
            attach_url,
        })
    }

    /// URL passed to `ATTACH` for the lakehouse catalog
    pub fn ducklake_url(&self) -> String {
        format!("ducklake:{}", self.attach_url)
    }
}

/// External database attached read-only for cross-source queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Postgres,
}

impl DataSourceKind {
    pub fn parse(url: &str) -> DuckLakeResult<Self> {
        if is_postgres_url(url) {
            Ok(DataSourceKind::Postgres)
        } else {
            Err(DuckLakeError::UnsupportedDataSourceType {
                scheme: scheme_of(url),
            })
        }
    }

    /// Value of the `TYPE` attach option
    pub fn attach_type(&self) -> &'static str {
        match self {
            DataSourceKind::Postgres => "postgres",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DataSourceKind::Postgres => "postgres",
        }
    }
}

/// Secret needed before data files under `storage_url` can be reached
pub fn storage_secret(storage_url: &str) -> Option<OptionSet> {
    if storage_url.starts_with("s3://") {
        let mut options = OptionSet::new();
        options
            .insert("type", "s3")
            .insert("provider", "credential_chain");
        Some(options)
    } else {
        None
    }
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

/// Scheme part of a URL for error messages, never the credentials
pub(crate) fn scheme_of(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, _)) if !scheme.is_empty() => scheme.to_string(),
        _ => "<none>".to_string(),
    }
}

/// URL with any password removed, for logs
pub(crate) fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                // fails only for cannot-be-a-base URLs, which have no password
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        // plain filesystem paths carry no credentials
        Err(_) if !url.contains("://") => url.to_string(),
        Err(_) => format!("{}://…", scheme_of(url)),
    }
}
