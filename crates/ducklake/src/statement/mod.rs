// SPDX-License-Identifier: Apache-2.0

//! Statement construction.
//!
//! Three kinds of statements reach the engine:
//!
//! ```text
//! caller SQL + params      -> BoundStatement (placeholders, never interpolated)
//! Call (maintenance, ...)  -> BoundStatement (placeholders, optional args omitted)
//! Command (ATTACH, ...)    -> plain SQL text (quoted identifiers and literals)
//! ```

mod call;
mod command;
mod options;

pub use call::{Call, CallKind};
pub use command::{AttachDescriptor, Command};
pub use options::OptionSet;

use crate::value::Value;

/// SQL text paired with the values for its `?` placeholders, in order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BoundStatement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// A statement without placeholders
    pub fn text(sql: impl Into<String>) -> Self {
        Self::new(sql, vec![])
    }
}
