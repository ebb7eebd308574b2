// SPDX-License-Identifier: Apache-2.0

//! Error types for DuckLake client operations

use thiserror::Error;

/// Result type for DuckLake operations
pub type DuckLakeResult<T> = Result<T, DuckLakeError>;

/// Errors that can occur when talking to a DuckLake catalog
#[derive(Debug, Error)]
pub enum DuckLakeError {
    /// Catalog URL scheme is not one of the supported backends
    #[error("unsupported catalog type: {scheme}")]
    UnsupportedCatalogType { scheme: String },

    /// Secondary data source URL scheme cannot be attached
    #[error("unsupported data source type: {scheme}")]
    UnsupportedDataSourceType { scheme: String },

    /// Option key is not a bare `[A-Z_]+` token after uppercasing
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),

    /// Value cannot be rendered as a literal or bound as a parameter
    #[error("can't quote value of type {0}")]
    UnsupportedType(&'static str),

    /// Parameters do not line up with the placeholders of a statement
    #[error(transparent)]
    ParameterBind(duckdb::Error),

    /// Any other failure reported by the engine, message untouched
    #[error(transparent)]
    Engine(duckdb::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The engine answered, but not with the shape we asked for
    #[error("unexpected result: {0}")]
    UnexpectedResult(String),
}

impl DuckLakeError {
    /// Message reported by the engine, if this error came from it
    pub fn engine_message(&self) -> Option<String> {
        match self {
            DuckLakeError::ParameterBind(err) | DuckLakeError::Engine(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Whether the error was raised locally before reaching the engine
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            DuckLakeError::ParameterBind(_) | DuckLakeError::Engine(_)
        )
    }
}

impl From<duckdb::Error> for DuckLakeError {
    fn from(err: duckdb::Error) -> Self {
        match err {
            duckdb::Error::InvalidParameterCount(..) | duckdb::Error::InvalidParameterName(_) => {
                DuckLakeError::ParameterBind(err)
            }
            other => DuckLakeError::Engine(other),
        }
    }
}
