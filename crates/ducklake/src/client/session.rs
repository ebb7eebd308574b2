// SPDX-License-Identifier: Apache-2.0

//! Session bootstrap: the steps that turn a fresh engine connection into one
//! positioned on the attached lakehouse catalog.
//!
//! ```text
//! Unconfigured -> ExtensionsInstalled -> [SecretConfigured] -> CatalogAttached -> Ready
//! ```
//!
//! The secret step only runs for object-store data paths. If a step after
//! the attach fails, the attach is undone before the error is returned.

use std::fmt;

use tracing::{debug, info, warn};

use crate::catalog::{redact_url, storage_secret, CatalogLocation};
use crate::config::{ClientConfig, CATALOG_ALIAS, DEFAULT_CATALOG};
use crate::engine::Engine;
use crate::error::DuckLakeResult;
use crate::statement::{AttachDescriptor, Command};

/// Progress of the bootstrap protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SessionState {
    Unconfigured,
    ExtensionsInstalled,
    SecretConfigured,
    CatalogAttached,
    Ready,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Unconfigured => "unconfigured",
            SessionState::ExtensionsInstalled => "extensions-installed",
            SessionState::SecretConfigured => "secret-configured",
            SessionState::CatalogAttached => "catalog-attached",
            SessionState::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Drives one engine connection through the bootstrap protocol
pub(crate) struct Bootstrap<'a, E: Engine> {
    engine: &'a E,
    config: &'a ClientConfig,
    location: &'a CatalogLocation,
    state: SessionState,
    /// Whether `USE` already moved the session off the default catalog
    switched: bool,
}

impl<'a, E: Engine> Bootstrap<'a, E> {
    pub(crate) fn new(engine: &'a E, config: &'a ClientConfig, location: &'a CatalogLocation) -> Self {
        Self {
            engine,
            config,
            location,
            state: SessionState::Unconfigured,
            switched: false,
        }
    }

    /// Run every step; on failure undo what can be undone and return the
    /// original error
    pub(crate) fn run(mut self) -> DuckLakeResult<SessionState> {
        match self.steps() {
            Ok(()) => Ok(self.state),
            Err(err) => {
                warn!("Session bootstrap failed in state {}: {}", self.state, err);
                self.rollback();
                Err(err)
            }
        }
    }

    fn steps(&mut self) -> DuckLakeResult<()> {
        self.run_command(&Command::Install {
            extension: "ducklake".to_string(),
        })?;
        if let Some(extension) = self.location.backend.extension() {
            self.run_command(&Command::Install {
                extension: extension.to_string(),
            })?;
        }
        self.advance(SessionState::ExtensionsInstalled);

        if let Some(options) = storage_secret(&self.config.storage_url) {
            self.run_command(&Command::CreateSecret { options })?;
            self.advance(SessionState::SecretConfigured);
        }

        let attach = AttachDescriptor::new(CATALOG_ALIAS, self.location.ducklake_url())
            .with_options(self.config.attach_options());
        info!(
            "Attaching {} catalog {} with data path {}",
            self.location.backend,
            redact_url(&self.config.catalog_url),
            redact_url(&self.config.storage_url)
        );
        self.run_command(&Command::Attach(attach))?;
        self.advance(SessionState::CatalogAttached);

        self.run_command(&Command::Use {
            alias: CATALOG_ALIAS.to_string(),
        })?;
        self.switched = true;
        self.run_command(&Command::Detach {
            alias: DEFAULT_CATALOG.to_string(),
        })?;
        self.advance(SessionState::Ready);

        Ok(())
    }

    fn advance(&mut self, next: SessionState) {
        debug!("Session state {} -> {}", self.state, next);
        self.state = next;
    }

    fn run_command(&self, command: &Command) -> DuckLakeResult<()> {
        let sql = command.render()?;
        debug!("Executing {} command: {}", command.kind(), sql);
        self.engine.execute(&sql, &[])?;
        Ok(())
    }

    /// Best effort: detach the lakehouse catalog if it was attached.
    ///
    /// Installed extensions stay in the engine's extension directory and the
    /// secret lives only as long as the connection, so neither is undone.
    fn rollback(&self) {
        if self.state < SessionState::CatalogAttached {
            return;
        }

        if self.switched {
            let back = Command::Use {
                alias: DEFAULT_CATALOG.to_string(),
            };
            if let Err(err) = self.run_command(&back) {
                warn!("Rollback could not switch back to {}: {}", DEFAULT_CATALOG, err);
                return;
            }
        }

        let detach = Command::Detach {
            alias: CATALOG_ALIAS.to_string(),
        };
        match self.run_command(&detach) {
            Ok(()) => info!("Rolled back attach of {}", CATALOG_ALIAS),
            Err(err) => warn!("Rollback could not detach {}: {}", CATALOG_ALIAS, err),
        }
    }
}
