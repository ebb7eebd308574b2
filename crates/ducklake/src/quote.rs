// SPDX-License-Identifier: Apache-2.0

//! Identifier and literal quoting for the DuckDB dialect.
//!
//! The engine offers no quoting function, so commands that cannot take
//! placeholders (`ATTACH`, `CREATE SECRET`, `INSTALL`, ...) depend entirely
//! on the helpers in this module.
//!
//! See <https://duckdb.org/docs/stable/sql/dialect/keywords_and_identifiers.html>

use std::sync::OnceLock;

use regex::Regex;

use crate::codec::encode_literal;
use crate::error::{DuckLakeError, DuckLakeResult};
use crate::value::Value;

/// Wrap an identifier in double quotes, doubling embedded double quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render a value as a SQL literal
pub fn quote_literal(value: &Value) -> DuckLakeResult<String> {
    encode_literal(value)
}

/// Validate an option key and return it as a bare uppercase token.
///
/// Option keys are rendered unquoted, so anything outside `[A-Z_]+` is
/// rejected. Keys are internal constants; this should never fail.
pub fn option_name(key: &str) -> DuckLakeResult<String> {
    static OPTION_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = OPTION_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Z_]+$").unwrap_or_else(|e| panic!("invalid option name regex: {}", e))
    });

    let name = key.to_uppercase();
    if re.is_match(&name) {
        Ok(name)
    } else {
        Err(DuckLakeError::InvalidOptionName(key.to_string()))
    }
}
