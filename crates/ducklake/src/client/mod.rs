// SPDX-License-Identifier: Apache-2.0

//! DuckLake client
//!
//! A [`Client`] owns one engine connection that has the lakehouse catalog
//! attached under [`CATALOG_ALIAS`]. All statements run synchronously on
//! that connection; the client is not meant to be shared between threads.

mod maintenance;
mod session;

pub use maintenance::{
    AddDataFilesOptions, CleanupOldFilesOptions, ExpireSnapshotsOptions, ListFilesOptions,
    RewriteDataFilesOptions,
};

use tracing::{debug, info};

use crate::catalog::{redact_url, CatalogBackend, CatalogLocation, DataSourceKind};
use crate::config::{ClientConfig, CATALOG_ALIAS};
use crate::engine::{DuckDbEngine, Engine};
use crate::error::DuckLakeResult;
use crate::quote::{quote_identifier, quote_literal};
use crate::result::QueryResult;
use crate::statement::{AttachDescriptor, BoundStatement, Command, OptionSet};
use crate::value::Value;

use self::session::Bootstrap;

/// Client for one DuckLake catalog
pub struct Client<E: Engine = DuckDbEngine> {
    /// Alias of the attached lakehouse catalog
    catalog: String,

    /// Backend holding the catalog metadata
    backend: CatalogBackend,

    /// Engine connection, closed when the client is dropped
    engine: E,
}

impl Client<DuckDbEngine> {
    /// Connect to a catalog using a fresh in-memory DuckDB engine.
    ///
    /// The catalog URL is checked before the engine is opened, so an
    /// unsupported URL never creates engine state.
    pub fn new(config: ClientConfig) -> DuckLakeResult<Self> {
        let location = resolve(&config)?;
        let engine = DuckDbEngine::open_in_memory()?;
        Self::connect(config, location, engine)
    }
}

impl<E: Engine> Client<E> {
    /// Connect to a catalog using an already opened engine
    pub fn with_engine(config: ClientConfig, engine: E) -> DuckLakeResult<Self> {
        let location = resolve(&config)?;
        Self::connect(config, location, engine)
    }

    fn connect(config: ClientConfig, location: CatalogLocation, engine: E) -> DuckLakeResult<Self> {
        info!(
            "Creating DuckLake client for {} catalog: {}",
            location.backend,
            redact_url(&config.catalog_url)
        );

        Bootstrap::new(&engine, &config, &location).run()?;

        info!("DuckLake client ready on catalog {}", CATALOG_ALIAS);
        Ok(Self {
            catalog: CATALOG_ALIAS.to_string(),
            backend: location.backend,
            engine,
        })
    }

    /// Alias of the attached catalog
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn backend(&self) -> CatalogBackend {
        self.backend
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run caller SQL with `?` placeholders bound to `params`, in order.
    ///
    /// Parameters are never interpolated into the SQL text. A parameter
    /// count that does not match the placeholders fails with
    /// [`DuckLakeError::ParameterBind`](crate::DuckLakeError::ParameterBind).
    /// When `sql` holds several statements, all of them run and the result
    /// of the last one is returned.
    pub fn sql(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult> {
        self.engine_execute(sql, params)
    }

    /// Attach an external database read-only under `alias`
    pub fn attach(&self, alias: &str, url: &str) -> DuckLakeResult<()> {
        let kind = DataSourceKind::parse(url)?;
        info!("Attaching {} data source {} as {}", kind.attach_type(), redact_url(url), alias);

        self.run_command(&Command::Install {
            extension: kind.extension().to_string(),
        })?;

        let mut options = OptionSet::new();
        options
            .insert("type", kind.attach_type())
            .insert("read_only", true);
        self.run_command(&Command::Attach(
            AttachDescriptor::new(alias, url).with_options(options),
        ))
    }

    pub fn detach(&self, alias: &str) -> DuckLakeResult<()> {
        info!("Detaching {}", alias);
        self.run_command(&Command::Detach {
            alias: alias.to_string(),
        })
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name)
    }

    pub fn quote(&self, value: &Value) -> DuckLakeResult<String> {
        quote_literal(value)
    }

    pub(crate) fn execute(&self, stmt: &BoundStatement) -> DuckLakeResult<QueryResult> {
        self.engine_execute(&stmt.sql, &stmt.params)
    }

    pub(crate) fn run_command(&self, command: &Command) -> DuckLakeResult<()> {
        let sql = command.render()?;
        self.engine_execute(&sql, &[])?;
        Ok(())
    }

    fn engine_execute(&self, sql: &str, params: &[Value]) -> DuckLakeResult<QueryResult> {
        debug!("Executing statement with {} param(s): {}", params.len(), sql);
        self.engine.execute(sql, params)
    }
}

/// Checks that need no engine: config values, then the catalog URL
fn resolve(config: &ClientConfig) -> DuckLakeResult<CatalogLocation> {
    config.validate()?;
    CatalogLocation::parse(&config.catalog_url)
}

impl<E: Engine> std::fmt::Debug for Client<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("catalog", &self.catalog)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
